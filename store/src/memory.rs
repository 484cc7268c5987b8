use anyhow::Result;

use crate::record::sort_by_timestamp;
use crate::{EntityName, SampleRecord, SampleStore};

/// Samples already held in memory. Keeps the order entities were added in.
pub struct MemoryStore {
    entities: Vec<(EntityName, Vec<SampleRecord>)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
        }
    }

    /// Replaces any previous samples for the same id.
    pub fn insert(&mut self, id: EntityName, mut records: Vec<SampleRecord>) {
        sort_by_timestamp(&mut records);
        if let Some(existing) = self.entities.iter_mut().find(|(x, _)| *x == id) {
            existing.1 = records;
        } else {
            self.entities.push((id, records));
        }
    }

    pub fn with(mut self, id: &str, records: Vec<SampleRecord>) -> Self {
        self.insert(EntityName::new(id), records);
        self
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleStore for MemoryStore {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn entity_ids(&mut self) -> Result<Vec<EntityName>> {
        Ok(self.entities.iter().map(|(id, _)| id.clone()).collect())
    }

    fn samples(&mut self, id: &EntityName) -> Result<Vec<SampleRecord>> {
        match self.entities.iter().find(|(x, _)| x == id) {
            Some((_, records)) => Ok(records.clone()),
            None => bail!("no samples for unknown entity {id}"),
        }
    }
}
