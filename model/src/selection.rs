use std::collections::BTreeSet;

use store::EntityName;

use crate::{PathRegistry, RenderedPath};

/// Which entities should be drawn. Every change is just a replacement of the selected set; the
/// other methods are shortcuts for building one.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    all: Vec<EntityName>,
    selected: BTreeSet<EntityName>,
}

impl Selection {
    /// Everything starts selected.
    pub fn new(all: Vec<EntityName>) -> Self {
        let selected = all.iter().cloned().collect();
        Self { all, selected }
    }

    /// In the order the entities were loaded
    pub fn all_ids(&self) -> &[EntityName] {
        &self.all
    }

    pub fn selected(&self) -> &BTreeSet<EntityName> {
        &self.selected
    }

    pub fn is_selected(&self, id: &EntityName) -> bool {
        self.selected.contains(id)
    }

    /// Ids that weren't loaded are dropped.
    pub fn replace(&mut self, ids: BTreeSet<EntityName>) {
        let (known, unknown): (BTreeSet<EntityName>, BTreeSet<EntityName>) =
            ids.into_iter().partition(|id| self.all.contains(id));
        if !unknown.is_empty() {
            debug!("Ignoring selection of unknown ids {:?}", unknown);
        }
        self.selected = known;
    }

    pub fn select_all(&mut self) {
        self.replace(self.all.iter().cloned().collect());
    }

    pub fn deselect_all(&mut self) {
        self.replace(BTreeSet::new());
    }

    pub fn set(&mut self, id: &EntityName, selected: bool) {
        let mut ids = self.selected.clone();
        if selected {
            ids.insert(id.clone());
        } else {
            ids.remove(id);
        }
        self.replace(ids);
    }

    /// The selected paths, in registry order.
    pub fn filter<'a>(&self, registry: &'a PathRegistry) -> Vec<&'a RenderedPath> {
        registry
            .paths()
            .iter()
            .filter(|path| self.selected.contains(&path.name))
            .collect()
    }
}
