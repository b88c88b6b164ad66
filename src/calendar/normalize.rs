//! Thai-calendar date parsing and series normalization.
//!
//! Source dates look like `2 ม.ค. 2567`: day, Thai month abbreviation,
//! Buddhist Era year. Rows whose date cannot be turned into a valid Gregorian
//! date are dropped from the series rather than defaulted; the drop reasons
//! are kept in [`Normalized::dropped`] so callers can report them.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;
use tracing::debug;

use crate::calendar::months::{BUDDHIST_ERA_OFFSET, find_month, month_abbreviation, month_number};
use crate::domain::{CalendarEntry, RawRecord, TimeSeries};

/// Why a date string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("no Thai month abbreviation in '{0}'")]
    UnknownMonth(String),
    #[error("expected 3 tokens (day month year), found {found} in '{text}'")]
    TokenCount { text: String, found: usize },
    #[error("month token '{0}' is not a Thai month abbreviation")]
    MonthToken(String),
    #[error("invalid day '{0}'")]
    Day(String),
    #[error("invalid year '{0}'")]
    Year(String),
    #[error("{year:04}-{month:02}-{day:02} is not a calendar date")]
    NotACalendarDate { year: i32, month: u32, day: u32 },
}

/// A row that failed normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedRow {
    /// Position in the input sequence (0-based).
    pub index: usize,
    pub date_text: String,
    pub reason: DateParseError,
}

/// Normalization output: the series plus what was left out of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub series: TimeSeries,
    pub dropped: Vec<DroppedRow>,
}

/// Parse a Thai-calendar date (`d <month> yyyy`, Buddhist Era year).
pub fn parse_thai_date(text: &str) -> Result<NaiveDate, DateParseError> {
    if find_month(text).is_none() {
        return Err(DateParseError::UnknownMonth(text.to_string()));
    }

    let cleaned = text.replace(',', "");
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    let [day_tok, month_tok, year_tok] = tokens.as_slice() else {
        return Err(DateParseError::TokenCount {
            text: text.to_string(),
            found: tokens.len(),
        });
    };

    let month = month_number(month_tok).ok_or_else(|| DateParseError::MonthToken(month_tok.to_string()))?;

    let day = day_tok
        .parse::<u32>()
        .ok()
        .filter(|d| (1..=31).contains(d))
        .ok_or_else(|| DateParseError::Day(day_tok.to_string()))?;

    let year = year_tok
        .parse::<i32>()
        .ok()
        .and_then(|y| y.checked_sub(BUDDHIST_ERA_OFFSET))
        .ok_or_else(|| DateParseError::Year(year_tok.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or(DateParseError::NotACalendarDate { year, month, day })
}

/// Render a date back into the sheet's Thai-calendar form.
pub fn format_thai_date(date: NaiveDate) -> String {
    // Every month number from chrono is 1..=12, which the table covers.
    let month = month_abbreviation(date.month()).unwrap_or("?");
    format!("{} {} {}", date.day(), month, date.year() + BUDDHIST_ERA_OFFSET)
}

/// Normalize raw rows into a sorted series, silently dropping undatable rows.
pub fn normalize(rows: &[RawRecord]) -> TimeSeries {
    normalize_with_report(rows).series
}

/// Normalize raw rows and keep a record of every dropped row.
pub fn normalize_with_report(rows: &[RawRecord]) -> Normalized {
    let mut entries = Vec::with_capacity(rows.len());
    let mut dropped = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        match parse_thai_date(&row.date) {
            Ok(date) => entries.push(CalendarEntry {
                date,
                record: row.clone(),
            }),
            Err(reason) => {
                debug!(index, date = %row.date, %reason, "dropping undatable row");
                dropped.push(DroppedRow {
                    index,
                    date_text: row.date.clone(),
                    reason,
                });
            }
        }
    }

    Normalized {
        series: TimeSeries::from_entries(entries),
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(dates: &[&str]) -> Vec<RawRecord> {
        dates
            .iter()
            .enumerate()
            .map(|(i, d)| RawRecord::with_close(*d, i as f64))
            .collect()
    }

    #[test]
    fn drops_unknown_month_and_invalid_day() {
        let input = rows(&["1 ม.ค. 2567", "99 บ.ค. 2567", "31 ก.พ. 2567"]);
        let out = normalize_with_report(&input);

        assert_eq!(out.series.len(), 1);
        assert_eq!(out.series.entries()[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(out.dropped.len(), 2);
        assert!(matches!(out.dropped[0].reason, DateParseError::UnknownMonth(_)));
        assert!(matches!(out.dropped[1].reason, DateParseError::NotACalendarDate { .. }));
        assert_eq!(out.dropped[1].index, 2);
    }

    #[test]
    fn output_is_sorted_and_stable() {
        let input = rows(&["3 ก.พ. 2567", "1 ม.ค. 2567", "3 ก.พ. 2567", "15 ธ.ค. 2566"]);
        let series = normalize(&input);
        let closes: Vec<f64> = series.entries().iter().map(|e| e.record.close.unwrap()).collect();
        assert_eq!(closes, vec![3.0, 1.0, 0.0, 2.0]);
        assert!(series.entries().windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn round_trips_every_month() {
        for month in 1..=12 {
            let date = NaiveDate::from_ymd_opt(2023, month, 28).unwrap();
            let text = format_thai_date(date);
            assert_eq!(parse_thai_date(&text), Ok(date), "{text}");
        }
        assert_eq!(format_thai_date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()), "2 ม.ค. 2567");
    }

    #[test]
    fn extra_whitespace_and_padding_are_accepted() {
        let date = parse_thai_date("  05   มิ.ย.\t2566 ").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 6, 5).unwrap());
    }

    #[test]
    fn commas_are_stripped_before_splitting() {
        assert_eq!(
            parse_thai_date("1,2 มี.ค. 2,567"),
            Ok(NaiveDate::from_ymd_opt(2024, 3, 12).unwrap())
        );
        // A comma-separated form collapses to two tokens.
        assert!(matches!(
            parse_thai_date("12มี.ค., 2567"),
            Err(DateParseError::TokenCount { found: 2, .. })
        ));
    }

    #[test]
    fn wrong_token_count_is_rejected() {
        assert!(matches!(
            parse_thai_date("1 ม.ค. 2567 extra"),
            Err(DateParseError::TokenCount { found: 4, .. })
        ));
        assert!(matches!(
            parse_thai_date("ม.ค. 2567"),
            Err(DateParseError::TokenCount { found: 2, .. })
        ));
    }

    #[test]
    fn non_integer_day_or_year_is_rejected() {
        assert!(matches!(parse_thai_date("x ม.ค. 2567"), Err(DateParseError::Day(_))));
        assert!(matches!(parse_thai_date("0 ม.ค. 2567"), Err(DateParseError::Day(_))));
        assert!(matches!(parse_thai_date("1 ม.ค. 25x7"), Err(DateParseError::Year(_))));
    }

    #[test]
    fn month_must_be_its_own_token() {
        assert!(matches!(
            parse_thai_date("1 xม.ค. 2567"),
            Err(DateParseError::MonthToken(_))
        ));
    }

    #[test]
    fn leap_day_only_in_leap_years() {
        assert!(parse_thai_date("29 ก.พ. 2567").is_ok());
        assert!(parse_thai_date("29 ก.พ. 2566").is_err());
        assert!(parse_thai_date("31 เม.ย. 2567").is_err());
    }
}
