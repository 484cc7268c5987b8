use std::cmp::Ordering;

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One sample exactly as a store returned it. Missing or unparseable fields are `None`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    /// Seconds since the Unix epoch
    pub timestamp: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl SampleRecord {
    pub fn new(timestamp: f64, latitude: f64, longitude: f64) -> Self {
        Self {
            timestamp: Some(timestamp),
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    pub(crate) fn parse(timestamp: &str, latitude: &str, longitude: &str) -> Self {
        Self {
            timestamp: parse_timestamp(timestamp),
            latitude: parse_number(latitude),
            longitude: parse_number(longitude),
        }
    }
}

/// Understands Unix seconds, RFC 3339, and `2023-11-14 22:13:20` (taken as UTC).
pub fn parse_timestamp(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(secs) = raw.parse::<f64>() {
        return if secs.is_finite() { Some(secs) } else { None };
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(
            datetime.timestamp() as f64 + datetime.timestamp_subsec_millis() as f64 / 1000.0,
        );
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive).timestamp() as f64);
    }
    None
}

/// Reads CSV rows of sample data. Short or long rows still deserialize, with missing fields left
/// empty, so one bad row only drops that record. A header without every one of `columns` is an
/// error for the whole file.
pub(crate) fn sample_reader<R: std::io::Read>(
    source: &str,
    reader: R,
    columns: &[&str],
) -> Result<csv::Reader<R>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader
        .headers()
        .map_err(|err| anyhow!("{source}: {err}"))?;
    for column in columns {
        if !headers.iter().any(|header| header == *column) {
            bail!("{source} is missing the {column} column");
        }
    }
    Ok(reader)
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

/// Ascending by timestamp. Records without one go last. Stable, so equal timestamps keep their
/// original order.
pub(crate) fn sort_by_timestamp(records: &mut [SampleRecord]) {
    records.sort_by(|a, b| match (a.timestamp, b.timestamp) {
        (Some(t1), Some(t2)) => t1.total_cmp(&t2),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
