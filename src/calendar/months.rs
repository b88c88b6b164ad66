//! Thai month abbreviations.

/// Abbreviation → month number, in calendar order.
pub const THAI_MONTHS: [(&str, u32); 12] = [
    ("ม.ค.", 1),
    ("ก.พ.", 2),
    ("มี.ค.", 3),
    ("เม.ย.", 4),
    ("พ.ค.", 5),
    ("มิ.ย.", 6),
    ("ก.ค.", 7),
    ("ส.ค.", 8),
    ("ก.ย.", 9),
    ("ต.ค.", 10),
    ("พ.ย.", 11),
    ("ธ.ค.", 12),
];

/// Buddhist Era year offset from the Gregorian year.
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

/// First table entry that occurs anywhere in `text`.
pub fn find_month(text: &str) -> Option<(&'static str, u32)> {
    THAI_MONTHS.iter().copied().find(|(abbr, _)| text.contains(abbr))
}

/// Exact lookup of a month token.
pub fn month_number(token: &str) -> Option<u32> {
    THAI_MONTHS
        .iter()
        .find(|(abbr, _)| *abbr == token)
        .map(|&(_, month)| month)
}

/// Abbreviation for a month number (1–12).
pub fn month_abbreviation(month: u32) -> Option<&'static str> {
    THAI_MONTHS
        .iter()
        .find(|&&(_, m)| m == month)
        .map(|&(abbr, _)| abbr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_abbreviation_contains_another() {
        for (i, (a, _)) in THAI_MONTHS.iter().enumerate() {
            for (j, (b, _)) in THAI_MONTHS.iter().enumerate() {
                if i != j {
                    assert!(!a.contains(b), "{a} contains {b}");
                }
            }
        }
    }

    #[test]
    fn table_covers_every_month_once() {
        let mut months: Vec<u32> = THAI_MONTHS.iter().map(|&(_, m)| m).collect();
        months.sort_unstable();
        assert_eq!(months, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn lookups_agree() {
        for (abbr, month) in THAI_MONTHS {
            assert_eq!(month_number(abbr), Some(month));
            assert_eq!(month_abbreviation(month), Some(abbr));
            assert_eq!(find_month(&format!("1 {abbr} 2567")), Some((abbr, month)));
        }
        assert_eq!(month_number("บ.ค."), None);
        assert_eq!(month_abbreviation(13), None);
    }
}
