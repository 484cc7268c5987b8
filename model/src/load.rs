use abstutil::Timer;
use store::{EntityName, IDMapping, SampleStore};

use crate::{EntityID, EntityTrack, PositionSample, Trajectory};

/// Everything that can go wrong loading data, phrased for the user.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Nothing can be played back
    #[error("The data source isn't configured or couldn't be read: {0}")]
    Configuration(String),
    #[error("No entities found in {0}")]
    NoEntities(String),
    #[error("Found {entities} entities in {origin}, but none of them have usable location samples")]
    NoSamples { origin: String, entities: usize },
    #[error("Skipped {dropped} samples from {origin} with a missing or invalid time or position")]
    MalformedSamples { origin: String, dropped: usize },
}

impl LoadError {
    /// Fatal errors block playback entirely. Everything else is just a notice.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LoadError::Configuration(_))
    }
}

pub struct LoadedTracks {
    pub tracks: Vec<EntityTrack>,
    /// Samples that failed validation, across all entities
    pub dropped: usize,
}

/// Reads every entity from the store: one fetch for the ids, then one per entity. Any store
/// failure is fatal. Bad samples are dropped and counted, not fatal.
pub fn load_tracks(
    store: &mut dyn SampleStore,
    timer: &mut Timer,
) -> Result<LoadedTracks, LoadError> {
    let origin = store.describe();
    let names = store
        .entity_ids()
        .map_err(|err| LoadError::Configuration(format!("{err:#}")))?;

    let mut ids: IDMapping<EntityName, EntityID> = IDMapping::new();
    let mut unique = Vec::new();
    for name in names {
        match ids.insert_new(name.clone()) {
            Ok(id) => unique.push((id, name)),
            Err(err) => warn!("{origin}: skipping duplicate entity: {err}"),
        }
    }

    let mut fetched = Vec::new();
    timer.start_iter("fetch samples", unique.len());
    for (id, name) in unique {
        timer.next();
        let records = store.samples(&name);
        fetched.push((id, name, records));
    }

    let mut tracks = Vec::new();
    let mut dropped = 0;
    for (id, name, records) in fetched {
        let records = records.map_err(|err| LoadError::Configuration(format!("{err:#}")))?;

        let mut samples = Vec::new();
        let mut bad = 0;
        for rec in &records {
            match PositionSample::from_record(rec) {
                Some(sample) => samples.push(sample),
                None => {
                    bad += 1;
                }
            }
        }
        if bad > 0 {
            warn!("{origin}: {name} has {bad} malformed samples");
            dropped += bad;
        }

        // The store should've ordered these already
        if samples
            .windows(2)
            .any(|pair| pair[0].timestamp > pair[1].timestamp)
        {
            warn!("{origin}: {name} samples are out of order; sorting them");
            samples.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        }
        if samples.is_empty() {
            warn!("{origin}: {name} has no usable samples");
        }

        let trajectory = match Trajectory::new(samples) {
            Ok(trajectory) => trajectory,
            Err(err) => {
                warn!("{origin}: {name}: {err}");
                Trajectory::empty()
            }
        };
        tracks.push(EntityTrack {
            id,
            name,
            trajectory,
        });
    }

    info!(
        "Loaded {} entities with {} samples from {origin}",
        tracks.len(),
        tracks.iter().map(|t| t.trajectory.len()).sum::<usize>()
    );
    Ok(LoadedTracks { tracks, dropped })
}

/// The earliest and latest timestamp of any sample. Entities without samples don't count.
pub fn time_bounds(tracks: &[EntityTrack]) -> Option<(f64, f64)> {
    let mut bounds: Option<(f64, f64)> = None;
    for track in tracks {
        if let (Some(start), Some(end)) = (track.trajectory.start_time(), track.trajectory.end_time())
        {
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(start), max.max(end)),
                None => (start, end),
            });
        }
    }
    bounds
}

/// Current wall time in whole seconds since the Unix epoch. The clock falls back to this when
/// there's nothing to play.
pub fn now_seconds() -> f64 {
    chrono::Utc::now().timestamp() as f64
}

#[cfg(test)]
mod tests {
    use store::{MemoryStore, SampleRecord};

    use super::*;

    #[test]
    fn drops_bad_samples_and_duplicates() {
        let mut store = MemoryStore::new()
            .with(
                "a",
                vec![
                    SampleRecord::new(10.0, 1.0, 1.0),
                    SampleRecord::new(f64::INFINITY, 1.0, 1.0),
                    SampleRecord::new(20.0, 100.0, 1.0),
                    SampleRecord::new(30.0, 2.0, 2.0),
                ],
            )
            .with("b", Vec::new());
        let loaded = load_tracks(&mut store, &mut Timer::throwaway()).unwrap();
        assert_eq!(loaded.dropped, 2);
        assert_eq!(loaded.tracks.len(), 2);
        assert_eq!(loaded.tracks[0].trajectory.len(), 2);
        assert!(loaded.tracks[1].trajectory.is_empty());
        assert_eq!(loaded.tracks[1].id, EntityID(1));
        assert_eq!(time_bounds(&loaded.tracks), Some((10.0, 30.0)));
    }

    #[test]
    fn bounds_span_all_entities() {
        let mut store = MemoryStore::new()
            .with("late", vec![SampleRecord::new(500.0, 0.0, 0.0)])
            .with(
                "early",
                vec![
                    SampleRecord::new(100.0, 0.0, 0.0),
                    SampleRecord::new(200.0, 0.0, 0.0),
                ],
            );
        let loaded = load_tracks(&mut store, &mut Timer::throwaway()).unwrap();
        assert_eq!(time_bounds(&loaded.tracks), Some((100.0, 500.0)));
        assert_eq!(time_bounds(&[]), None);
    }

    struct BrokenStore;

    impl SampleStore for BrokenStore {
        fn describe(&self) -> String {
            "broken".to_string()
        }

        fn entity_ids(&mut self) -> anyhow::Result<Vec<EntityName>> {
            Ok(vec![EntityName::new("x"), EntityName::new("x")])
        }

        fn samples(&mut self, _: &EntityName) -> anyhow::Result<Vec<SampleRecord>> {
            bail!("connection refused")
        }
    }

    #[test]
    fn store_failures_are_fatal() {
        match load_tracks(&mut BrokenStore, &mut Timer::throwaway()) {
            Err(err) => {
                assert!(err.is_fatal());
                assert!(err.to_string().contains("connection refused"));
            }
            Ok(_) => panic!("loading from a broken store should fail"),
        }
    }
}
