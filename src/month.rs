use lazy_static::lazy_static;
use regex::Regex;
use time::{Date, OffsetDateTime};

/// Checks a `YYYY-MM` calendar month key.
pub fn is_valid_month(s: &str) -> bool {
    lazy_static! {
        static ref MONTH_RE: Regex = Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").unwrap();
    }
    MONTH_RE.is_match(s)
}

pub fn month_key(date: Date) -> String {
    format!("{:04}-{:02}", date.year(), u8::from(date.month()))
}

pub fn current_month() -> String {
    month_key(OffsetDateTime::now_utc().date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn accepts_well_formed_months() {
        assert!(is_valid_month("2024-01"));
        assert!(is_valid_month("1999-12"));
    }

    #[test]
    fn rejects_malformed_months() {
        assert!(!is_valid_month("2024-13"));
        assert!(!is_valid_month("2024-00"));
        assert!(!is_valid_month("2024-1"));
        assert!(!is_valid_month("24-01"));
        assert!(!is_valid_month("2024/01"));
        assert!(!is_valid_month(""));
    }

    #[test]
    fn month_key_pads_year_and_month() {
        assert_eq!(month_key(date!(2024 - 03 - 31)), "2024-03");
        assert_eq!(month_key(date!(0987 - 11 - 01)), "0987-11");
    }

    #[test]
    fn current_month_is_valid() {
        assert!(is_valid_month(&current_month()));
    }
}
