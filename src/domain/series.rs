//! The canonical, date-ordered time series.

use chrono::NaiveDate;

use crate::domain::{CalendarEntry, DateRange, SeriesPoint, ValueColumn};

/// Entries sorted non-decreasing by date.
///
/// Built once per ingestion and never mutated afterwards; range selection
/// borrows a contiguous slice instead of copying or filtering in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    entries: Vec<CalendarEntry>,
}

impl TimeSeries {
    /// Sort `entries` by date (stable: equal dates keep arrival order).
    pub fn from_entries(mut entries: Vec<CalendarEntry>) -> Self {
        entries.sort_by_key(|e| e.date);
        Self { entries }
    }

    pub fn entries(&self) -> &[CalendarEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.entries.first().map(|e| e.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.entries.last().map(|e| e.date)
    }

    /// Entries with `start <= date <= end`, as a contiguous slice.
    pub fn between(&self, range: DateRange) -> &[CalendarEntry] {
        if range.start > range.end {
            return &[];
        }
        let lo = self.entries.partition_point(|e| e.date < range.start);
        let hi = self.entries.partition_point(|e| e.date <= range.end);
        &self.entries[lo..hi]
    }

    /// The whole series or the slice selected by `range`.
    pub fn view(&self, range: Option<DateRange>) -> &[CalendarEntry] {
        match range {
            Some(r) => self.between(r),
            None => &self.entries,
        }
    }
}

/// Project a view onto `column`, skipping entries without a value.
pub fn column_points(entries: &[CalendarEntry], column: ValueColumn) -> Vec<SeriesPoint> {
    entries
        .iter()
        .filter_map(|e| {
            e.value(column).map(|value| SeriesPoint {
                date: e.date,
                value,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawRecord;

    fn entry(y: i32, m: u32, d: u32, close: f64) -> CalendarEntry {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        CalendarEntry {
            date,
            record: RawRecord::with_close(date.to_string(), close),
        }
    }

    fn series() -> TimeSeries {
        TimeSeries::from_entries(vec![
            entry(2024, 1, 5, 5.0),
            entry(2024, 1, 2, 2.0),
            entry(2024, 1, 3, 3.0),
            entry(2024, 1, 3, 3.5),
            entry(2024, 1, 4, 4.0),
        ])
    }

    #[test]
    fn sort_is_stable_for_equal_dates() {
        let s = series();
        let closes: Vec<f64> = s.entries().iter().map(|e| e.record.close.unwrap()).collect();
        assert_eq!(closes, vec![2.0, 3.0, 3.5, 4.0, 5.0]);
        assert!(s.entries().windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn between_is_inclusive_and_contiguous() {
        let s = series();
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
        );
        let view = s.between(range);
        assert_eq!(view.len(), 3);
        assert!(view.iter().all(|e| range.contains(e.date)));
        assert_eq!(view, &s.entries()[1..4]);
    }

    #[test]
    fn between_outside_domain_is_empty() {
        let s = series();
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        );
        assert!(s.between(range).is_empty());
        let inverted = DateRange::new(range.end, range.start);
        assert!(s.between(inverted).is_empty());
    }

    #[test]
    fn column_points_skip_missing_values() {
        let mut s = series().entries().to_vec();
        s[0].record.close = None;
        let points = column_points(&s, ValueColumn::Close);
        assert_eq!(points.len(), 4);
        assert!(column_points(&s, ValueColumn::Volume).is_empty());
    }
}
