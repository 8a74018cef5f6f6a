use chrono::{NaiveTime, Timelike};
use serde::Serialize;

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("invalid time of day: {0}")]
pub struct InvalidTime(pub String);

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookingSummary {
    pub duration: f64,
    pub rate: f64,
    pub total: f64,
}

// Accepts only zero-padded `HH:MM` or `HH:MM:SS`.
pub fn parse_time(s: &str) -> Result<NaiveTime, InvalidTime> {
    let s = s.trim();
    let invalid = || InvalidTime(s.to_string());

    let padded = matches!(s.len(), 5 | 8)
        && s.bytes().enumerate().all(|(i, b)| match i {
            2 | 5 => b == b':',
            _ => b.is_ascii_digit(),
        });
    if !padded {
        return Err(invalid());
    }

    let format = if s.len() == 5 { "%H:%M" } else { "%H:%M:%S" };
    let time = NaiveTime::parse_from_str(s, format).map_err(|_| invalid())?;
    // chrono reads `:60` as a leap second
    if time.nanosecond() >= 1_000_000_000 {
        return Err(invalid());
    }
    Ok(time)
}

// Same-day hours; never wraps past midnight.
pub fn compute_duration(start: &str, end: &str) -> Result<f64, InvalidTime> {
    let start = parse_time(start)?;
    let end = parse_time(end)?;
    let seconds = end.signed_duration_since(start).num_seconds();
    Ok(seconds as f64 / 3600.0)
}

pub fn total_price(duration: f64, rate: f64) -> f64 {
    duration * rate
}

pub fn summarize(start: &str, end: &str, rate: f64) -> Result<BookingSummary, InvalidTime> {
    let duration = compute_duration(start, end)?;
    Ok(BookingSummary {
        duration,
        rate,
        total: total_price(duration, rate),
    })
}

pub fn format_price(currency: &str, amount: f64) -> String {
    format!("{currency}{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_day_duration() {
        assert_eq!(compute_duration("09:00", "17:00").unwrap(), 8.0);
    }

    #[test]
    fn test_reversed_range_is_negative() {
        assert_eq!(compute_duration("17:00", "09:00").unwrap(), -8.0);
    }

    #[test]
    fn test_equal_times_are_zero() {
        assert_eq!(compute_duration("10:15", "10:15").unwrap(), 0.0);
    }

    #[test]
    fn test_fractional_duration() {
        assert_eq!(compute_duration("10:00", "11:30").unwrap(), 1.5);
        assert_eq!(compute_duration("10:00", "10:45").unwrap(), 0.75);
    }

    #[test]
    fn test_seconds_precision_accepted() {
        assert_eq!(compute_duration("10:00:00", "12:00").unwrap(), 2.0);
    }

    #[test]
    fn test_overnight_not_wrapped() {
        assert_eq!(compute_duration("22:00", "02:00").unwrap(), -20.0);
    }

    #[test]
    fn test_invalid_time() {
        assert_eq!(
            compute_duration("25:00", "10:00").unwrap_err(),
            InvalidTime("25:00".to_string())
        );
        assert!(compute_duration("10:00", "noon").is_err());
        assert!(compute_duration("", "10:00").is_err());
    }

    #[test]
    fn test_unpadded_time_rejected() {
        assert!(compute_duration("9:00", "10:00").is_err());
        assert!(compute_duration("09:00", "10:0").is_err());
        assert!(compute_duration("09:00", "10:00:5").is_err());
        assert!(parse_time("10-00").is_err());
    }

    #[test]
    fn test_leap_second_rejected() {
        assert!(compute_duration("23:00", "23:59:60").is_err());
        assert!(parse_time("23:59:59").is_ok());
    }

    #[test]
    fn test_summarize() {
        let summary = summarize("10:00", "12:00", 15.0).unwrap();
        assert_eq!(
            summary,
            BookingSummary {
                duration: 2.0,
                rate: 15.0,
                total: 30.0
            }
        );
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price("RM", 30.0), "RM30.00");
        assert_eq!(format_price("$", 37.5), "$37.50");
    }
}
