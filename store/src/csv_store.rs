use std::collections::BTreeMap;

use anyhow::Result;
use serde::Deserialize;

use crate::record::{sample_reader, sort_by_timestamp};
use crate::{EntityName, SampleRecord, SampleStore};

/// Every sample for every entity in one CSV file, with columns `id,timestamp,latitude,longitude`.
pub struct CsvStore {
    source: String,
    // In order of first appearance in the file
    order: Vec<EntityName>,
    data_per_entity: BTreeMap<EntityName, Vec<SampleRecord>>,
}

impl CsvStore {
    pub fn load_path(path: &str) -> Result<Self> {
        let file = fs_err::File::open(path)?;
        Self::load(path.to_string(), file)
    }

    pub fn load<R: std::io::Read>(source: String, reader: R) -> Result<Self> {
        let mut order = Vec::new();
        let mut data_per_entity: BTreeMap<EntityName, Vec<SampleRecord>> = BTreeMap::new();
        let mut reader = sample_reader(
            &source,
            reader,
            &["id", "timestamp", "latitude", "longitude"],
        )?;
        for rec in reader.deserialize() {
            let rec: Row = match rec {
                Ok(rec) => rec,
                Err(err) => {
                    warn!("{source}: skipping a row: {err}");
                    continue;
                }
            };
            let id = EntityName(rec.id.unwrap_or_default().trim().to_string());
            if id.0.is_empty() {
                warn!("{source}: skipping a row with no id");
                continue;
            }
            let record = SampleRecord::parse(
                rec.timestamp.as_deref().unwrap_or_default(),
                rec.latitude.as_deref().unwrap_or_default(),
                rec.longitude.as_deref().unwrap_or_default(),
            );
            data_per_entity
                .entry(id.clone())
                .or_insert_with(|| {
                    order.push(id);
                    Vec::new()
                })
                .push(record);
        }

        for records in data_per_entity.values_mut() {
            sort_by_timestamp(records);
        }
        info!("{source} has {} entities", data_per_entity.len());

        Ok(Self {
            source,
            order,
            data_per_entity,
        })
    }
}

impl SampleStore for CsvStore {
    fn describe(&self) -> String {
        self.source.clone()
    }

    fn entity_ids(&mut self) -> Result<Vec<EntityName>> {
        Ok(self.order.clone())
    }

    fn samples(&mut self, id: &EntityName) -> Result<Vec<SampleRecord>> {
        match self.data_per_entity.get(id) {
            Some(records) => Ok(records.clone()),
            None => bail!("{}: unknown entity {id}", self.source),
        }
    }
}

#[derive(Deserialize)]
struct Row {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    latitude: Option<String>,
    #[serde(default)]
    longitude: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "id,timestamp,latitude,longitude
bus-7,20,1.0,1.0
bus-2,5,34.05,-118.24
bus-7,10,0.5,0.5
bus-2,,34.06,-118.25
,30,0,0
";

    #[test]
    fn groups_and_sorts() {
        let mut store = CsvStore::load("test.csv".to_string(), INPUT.as_bytes()).unwrap();
        assert_eq!(
            store.entity_ids().unwrap(),
            vec![EntityName::new("bus-7"), EntityName::new("bus-2")]
        );

        let bus7 = store.samples(&EntityName::new("bus-7")).unwrap();
        assert_eq!(
            bus7,
            vec![
                SampleRecord::new(10.0, 0.5, 0.5),
                SampleRecord::new(20.0, 1.0, 1.0)
            ]
        );

        let bus2 = store.samples(&EntityName::new("bus-2")).unwrap();
        assert_eq!(bus2.len(), 2);
        assert_eq!(bus2[0].timestamp, Some(5.0));
        assert_eq!(bus2[1].timestamp, None);
    }

    #[test]
    fn unknown_entity() {
        let mut store = CsvStore::load("test.csv".to_string(), INPUT.as_bytes()).unwrap();
        assert!(store.samples(&EntityName::new("tram-1")).is_err());
    }

    #[test]
    fn missing_columns() {
        let input = "id,when\nbus-1,5\n";
        assert!(CsvStore::load("bad.csv".to_string(), input.as_bytes()).is_err());
    }

    #[test]
    fn short_and_long_rows() {
        let input = "id,timestamp,latitude,longitude
truck,5,1.0
truck,10,2.0,2.0,extra
truck,20,3.0,3.0
";
        let mut store = CsvStore::load("ragged.csv".to_string(), input.as_bytes()).unwrap();
        let truck = store.samples(&EntityName::new("truck")).unwrap();
        assert_eq!(truck.len(), 3);
        assert_eq!(
            truck[0],
            SampleRecord {
                timestamp: Some(5.0),
                latitude: Some(1.0),
                longitude: None,
            }
        );
        assert_eq!(truck[1], SampleRecord::new(10.0, 2.0, 2.0));
        assert_eq!(truck[2], SampleRecord::new(20.0, 3.0, 3.0));
    }

    #[test]
    fn missing_file() {
        assert!(CsvStore::load_path("/definitely/not/here.csv").is_err());
    }
}
