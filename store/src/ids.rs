use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// The id of an entity, as the store knows it. Unique across one loaded set.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityName(pub String);

impl EntityName {
    pub fn new<I: Into<String>>(id: I) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityName {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub trait CheapID: Copy {
    fn new(x: usize) -> Self;
}

/// Assigns dense numeric IDs to original string IDs, in insertion order.
pub struct IDMapping<K: Ord, V> {
    orig_to_cheap: BTreeMap<K, V>,
    // We don't need to store the inverse. It's more convenient for each object to own that.
}

impl<K: Clone + std::fmt::Debug + Ord, V: CheapID> IDMapping<K, V> {
    pub fn new() -> Self {
        Self {
            orig_to_cheap: BTreeMap::new(),
        }
    }

    pub fn insert_new(&mut self, orig: K) -> Result<V> {
        let cheap = V::new(self.orig_to_cheap.len());
        if self.orig_to_cheap.contains_key(&orig) {
            bail!("IDMapping::insert_new has duplicate input for {:?}", orig);
        }
        self.orig_to_cheap.insert(orig, cheap);
        Ok(cheap)
    }

    pub fn len(&self) -> usize {
        self.orig_to_cheap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orig_to_cheap.is_empty()
    }
}
