use std::io::Cursor;

use anyhow::Result;
use serde::Deserialize;
use zip::ZipArchive;

use crate::record::{sample_reader, sort_by_timestamp};
use crate::{EntityName, SampleRecord, SampleStore};

const PREFIX: &str = "devices/";
const SUFFIX: &str = ".csv";

/// A zip archive laid out like a document store: one `devices/<id>.csv` member per entity, each
/// with columns `timestamp,latitude,longitude`. Members are only read when asked for.
pub struct ZipStore {
    source: String,
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl ZipStore {
    pub fn load_path(path: &str) -> Result<Self> {
        let bytes = fs_err::read(path)?;
        Self::from_bytes(path.to_string(), bytes)
    }

    pub fn from_bytes(source: String, bytes: Vec<u8>) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(bytes)).map_err(|err| anyhow!("{source}: {err}"))?;
        Ok(Self { source, archive })
    }
}

impl SampleStore for ZipStore {
    fn describe(&self) -> String {
        self.source.clone()
    }

    /// Sorted by id, since archive order isn't meaningful
    fn entity_ids(&mut self) -> Result<Vec<EntityName>> {
        let mut ids: Vec<EntityName> = self
            .archive
            .file_names()
            .filter_map(|name| {
                let id = name.strip_prefix(PREFIX)?.strip_suffix(SUFFIX)?;
                // Nested directories aren't entities
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Some(EntityName(id.to_string()))
            })
            .collect();
        ids.sort();
        Ok(ids)
    }

    fn samples(&mut self, id: &EntityName) -> Result<Vec<SampleRecord>> {
        let path = format!("{PREFIX}{id}{SUFFIX}");
        let file = self
            .archive
            .by_name(&path)
            .map_err(|err| anyhow!("{}: {path}: {err}", self.source))?;

        let mut records = Vec::new();
        let mut reader = sample_reader(&path, file, &["timestamp", "latitude", "longitude"])?;
        for rec in reader.deserialize() {
            let record = match rec {
                Ok(Row {
                    timestamp,
                    latitude,
                    longitude,
                }) => SampleRecord::parse(
                    timestamp.as_deref().unwrap_or_default(),
                    latitude.as_deref().unwrap_or_default(),
                    longitude.as_deref().unwrap_or_default(),
                ),
                // Kept, so validation counts it as dropped
                Err(err) => {
                    warn!("{path}: unreadable row: {err}");
                    SampleRecord {
                        timestamp: None,
                        latitude: None,
                        longitude: None,
                    }
                }
            };
            records.push(record);
        }
        sort_by_timestamp(&mut records);
        debug!("{path} has {} records", records.len());
        Ok(records)
    }
}

#[derive(Deserialize)]
struct Row {
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    latitude: Option<String>,
    #[serde(default)]
    longitude: Option<String>,
}
