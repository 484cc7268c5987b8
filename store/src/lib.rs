//! Where position samples come from. The playback model only ever talks to a
//! [`SampleStore`]: one call for the list of entities, then one call per entity for its samples.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod csv_store;
mod ids;
mod memory;
mod record;
mod zip_store;

use anyhow::Result;

pub use csv_store::CsvStore;
pub use ids::{CheapID, EntityName, IDMapping};
pub use memory::MemoryStore;
pub use record::{parse_timestamp, SampleRecord};
pub use zip_store::ZipStore;

/// A source of per-entity position samples.
///
/// Implementations return each entity's records ordered by timestamp, ascending. Records are not
/// validated here.
pub trait SampleStore {
    /// A short description used in logs and error messages, like a path.
    fn describe(&self) -> String;

    fn entity_ids(&mut self) -> Result<Vec<EntityName>>;

    fn samples(&mut self, id: &EntityName) -> Result<Vec<SampleRecord>>;
}
