//! Memoization for repeated interactions over unchanged input.
//!
//! A front-end that re-renders on every widget change would otherwise
//! re-parse the sheet and re-serialize the export each time. Both caches key
//! on a content fingerprint, so changed input is a miss rather than a stale
//! hit. Values are handed out as `Arc`s and never mutated after insertion.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::calendar::{Normalized, normalize_with_report};
use crate::domain::{RawRecord, SeriesPoint, ValueColumn};
use crate::error::AppError;
use crate::io::export::render_column_csv;

/// Content hash of raw rows.
pub fn fingerprint_records(rows: &[RawRecord]) -> u64 {
    let mut h = DefaultHasher::new();
    rows.len().hash(&mut h);
    for r in rows {
        r.date.hash(&mut h);
        for column in ValueColumn::ALL {
            column.get(r).map(f64::to_bits).hash(&mut h);
        }
    }
    h.finish()
}

/// Content hash of a column view.
pub fn fingerprint_points(points: &[SeriesPoint]) -> u64 {
    let mut h = DefaultHasher::new();
    points.len().hash(&mut h);
    for p in points {
        p.date.hash(&mut h);
        p.value.to_bits().hash(&mut h);
    }
    h.finish()
}

/// Single-slot cache of the normalized series for the current input.
#[derive(Debug, Default)]
pub struct SeriesCache {
    slot: Mutex<Option<(u64, Arc<Normalized>)>>,
}

impl SeriesCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalized series for `rows`, re-normalizing only when the rows changed.
    pub fn get_or_normalize(&self, rows: &[RawRecord]) -> Arc<Normalized> {
        let key = fingerprint_records(rows);
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((cached_key, normalized)) = slot.as_ref() {
            if *cached_key == key {
                debug!(key, "series cache hit");
                return Arc::clone(normalized);
            }
        }
        debug!(key, rows = rows.len(), "series cache miss");
        let normalized = Arc::new(normalize_with_report(rows));
        *slot = Some((key, Arc::clone(&normalized)));
        normalized
    }

    pub fn invalidate(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Rendered export bytes keyed by (view fingerprint, column).
///
/// Holds one view at a time: a new view evicts every column rendered for the
/// previous one.
#[derive(Debug, Default)]
pub struct ExportCache {
    entries: Mutex<HashMap<(u64, ValueColumn), Arc<Vec<u8>>>>,
}

impl ExportCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_render(&self, points: &[SeriesPoint], column: ValueColumn) -> Result<Arc<Vec<u8>>, AppError> {
        let key = (fingerprint_points(points), column);
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(bytes) = entries.get(&key) {
            return Ok(Arc::clone(bytes));
        }
        if entries.keys().any(|(view, _)| *view != key.0) {
            debug!(view = key.0, evicted = entries.len(), "export cache: new view");
            entries.clear();
        }
        let bytes = Arc::new(render_column_csv(points, column)?);
        entries.insert(key, Arc::clone(&bytes));
        Ok(bytes)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
