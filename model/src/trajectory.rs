use std::rc::Rc;

use anyhow::Result;

use crate::{LatLng, PositionSample};

/// The time-ordered samples of one entity. Cheap to clone; the samples themselves are shared and
/// never mutated.
#[derive(Clone, Debug)]
pub struct Trajectory {
    // Timestamps never decrease, but adjacent samples may share one
    inner: Rc<[PositionSample]>,
}

impl Trajectory {
    pub fn new(raw: Vec<PositionSample>) -> Result<Self> {
        for pair in raw.windows(2) {
            if pair[0].timestamp > pair[1].timestamp {
                bail!(
                    "Trajectory input out-of-order: {} then {}",
                    pair[0].timestamp,
                    pair[1].timestamp
                );
            }
        }
        Ok(Self { inner: raw.into() })
    }

    pub fn empty() -> Self {
        Self {
            inner: Vec::new().into(),
        }
    }

    pub fn samples(&self) -> &[PositionSample] {
        &self.inner
    }

    /// Another handle to the same samples, without copying them.
    pub fn shared(&self) -> Rc<[PositionSample]> {
        self.inner.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn start_time(&self) -> Option<f64> {
        self.inner.first().map(|s| s.timestamp)
    }

    pub fn end_time(&self) -> Option<f64> {
        self.inner.last().map(|s| s.timestamp)
    }
}

/// Linear interpolation between two samples, treating latitude and longitude as a flat plane.
/// There's no great-circle correction; over the distance between adjacent samples, this doesn't
/// matter.
///
/// Requires `p1.timestamp <= p2.timestamp`. Outside the segment, the nearest endpoint is returned
/// exactly. If both samples share a timestamp, the result is always `p1`.
pub fn interpolate(p1: &PositionSample, p2: &PositionSample, time: f64) -> LatLng {
    if p1.timestamp == p2.timestamp || time <= p1.timestamp {
        return p1.position();
    }
    if time >= p2.timestamp {
        return p2.position();
    }

    let factor = (time - p1.timestamp) / (p2.timestamp - p1.timestamp);
    LatLng::new(
        p1.latitude + (p2.latitude - p1.latitude) * factor,
        p1.longitude + (p2.longitude - p1.longitude) * factor,
    )
}

/// Finds the pair of samples bracketing `time` and interpolates between them. `samples` must be
/// ordered by timestamp.
pub fn project(samples: &[PositionSample], time: f64) -> Option<LatLng> {
    let first = samples.first()?;
    let last = samples.last()?;
    if samples.len() == 1 || time <= first.timestamp {
        return Some(first.position());
    }
    if time > last.timestamp {
        return Some(last.position());
    }

    // The first sample at or after the time. With equal timestamps, this picks the earliest pair
    // whose range contains the time.
    let idx = samples.partition_point(|s| s.timestamp < time);
    match (samples.get(idx.wrapping_sub(1)), samples.get(idx)) {
        (Some(p1), Some(p2)) => Some(interpolate(p1, p2, time)),
        // Only reachable with a NaN time
        _ => Some(last.position()),
    }
}
