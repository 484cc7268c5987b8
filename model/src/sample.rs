use serde::{Deserialize, Serialize};

use store::SampleRecord;

/// A geographic position in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One timestamped position of an entity. Immutable once loaded.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    /// Seconds since the Unix epoch
    pub timestamp: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl PositionSample {
    pub fn new(timestamp: f64, latitude: f64, longitude: f64) -> Self {
        Self {
            timestamp,
            latitude,
            longitude,
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// None if any field is missing, non-finite, or the coordinates are off the globe.
    pub fn from_record(rec: &SampleRecord) -> Option<Self> {
        let timestamp = rec.timestamp.filter(|t| t.is_finite())?;
        let latitude = rec
            .latitude
            .filter(|lat| lat.is_finite() && (-90.0..=90.0).contains(lat))?;
        let longitude = rec
            .longitude
            .filter(|lng| lng.is_finite() && (-180.0..=180.0).contains(lng))?;
        Some(Self::new(timestamp, latitude, longitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_records() {
        assert_eq!(
            PositionSample::from_record(&SampleRecord::new(5.0, 34.05, -118.24)),
            Some(PositionSample::new(5.0, 34.05, -118.24))
        );
        assert!(PositionSample::from_record(&SampleRecord::new(f64::NAN, 0.0, 0.0)).is_none());
        assert!(PositionSample::from_record(&SampleRecord::new(5.0, 91.0, 0.0)).is_none());
        assert!(PositionSample::from_record(&SampleRecord::new(5.0, 0.0, -180.5)).is_none());
        assert!(PositionSample::from_record(&SampleRecord {
            timestamp: None,
            latitude: Some(1.0),
            longitude: Some(1.0),
        })
        .is_none());
    }
}
