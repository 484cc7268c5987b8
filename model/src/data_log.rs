use store::EntityName;

use crate::RenderedPath;

/// One sample, flattened out of its path.
#[derive(Clone, Debug, PartialEq)]
pub struct LogRow {
    pub id: EntityName,
    pub color: &'static str,
    pub timestamp: f64,
    pub lat: f64,
    pub lng: f64,
}

/// Every sample of some paths, interleaved in time order, so the UI can show what was recorded
/// around the current time.
pub struct DataLog {
    rows: Vec<LogRow>,
}

impl DataLog {
    pub fn new(paths: &[&RenderedPath]) -> Self {
        let mut rows = Vec::new();
        for path in paths {
            for sample in path.samples.iter() {
                rows.push(LogRow {
                    id: path.name.clone(),
                    color: path.color,
                    timestamp: sample.timestamp,
                    lat: sample.latitude,
                    lng: sample.longitude,
                });
            }
        }
        // Stable, so ties stay in path order
        rows.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        Self { rows }
    }

    pub fn rows(&self) -> &[LogRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The last row recorded at or before this time.
    pub fn current_index(&self, time: f64) -> Option<usize> {
        let idx = self.rows.partition_point(|row| row.timestamp <= time);
        idx.checked_sub(1)
    }

    /// Up to `n` rows around the current one. Before anything was recorded, this is the first `n`.
    pub fn window(&self, time: f64, n: usize) -> &[LogRow] {
        let n = n.min(self.rows.len());
        let center = self.current_index(time).unwrap_or(0);
        let start = center.saturating_sub(n / 2).min(self.rows.len() - n);
        &self.rows[start..start + n]
    }
}
