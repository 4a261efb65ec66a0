//! Marker time values.

use squawk_core::semantic::TimestampFormat;
use thiserror::Error;

/// Why a marker value does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("timestamp is empty")]
    Empty,
    #[error("`{value}` does not match format `{format}`")]
    ComponentCount {
        value: String,
        format: TimestampFormat,
    },
    #[error("`{component}` in `{value}` is not a number")]
    NonNumeric { value: String, component: String },
}

/// Parses a marker value into milliseconds.
///
/// The value holds exactly as many `:`-separated components as `format`
/// names, optionally followed by `.` and a fraction. Only the digits of the
/// fraction count; it is truncated or right-padded to milliseconds.
///
/// ```
/// # use squawk_core::semantic::TimestampFormat;
/// # use squawk_parser::parse_timestamp;
/// assert_eq!(parse_timestamp("01:02.5", TimestampFormat::MinutesSeconds), Ok(62_500));
/// assert_eq!(parse_timestamp("1:00:00", TimestampFormat::HoursMinutesSeconds), Ok(3_600_000));
/// ```
pub fn parse_timestamp(value: &str, format: TimestampFormat) -> Result<u64, TimestampError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TimestampError::Empty);
    }

    let (whole, millis) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction_millis(fraction)),
        None => (trimmed, 0),
    };

    let components: Vec<&str> = whole.split(':').collect();
    if components.len() != format.component_count() {
        return Err(TimestampError::ComponentCount {
            value: trimmed.to_string(),
            format,
        });
    }

    let mut seconds: u64 = 0;
    for component in components {
        let number = parse_component(component).ok_or_else(|| TimestampError::NonNumeric {
            value: trimmed.to_string(),
            component: component.to_string(),
        })?;
        seconds = seconds.saturating_mul(60).saturating_add(number);
    }
    Ok(seconds.saturating_mul(1000).saturating_add(millis))
}

fn parse_component(component: &str) -> Option<u64> {
    let component = component.trim();
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    component.parse().ok()
}

fn fraction_millis(fraction: &str) -> u64 {
    let digits: String = fraction
        .chars()
        .filter(char::is_ascii_digit)
        .take(3)
        .collect();
    if digits.is_empty() {
        return 0;
    }
    format!("{digits:0<3}").parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats() {
        assert_eq!(parse_timestamp("42", TimestampFormat::Seconds), Ok(42_000));
        assert_eq!(parse_timestamp("01:00", TimestampFormat::MinutesSeconds), Ok(60_000));
        assert_eq!(
            parse_timestamp(" 01:02:03 ", TimestampFormat::HoursMinutesSeconds),
            Ok(3_723_000)
        );
    }

    #[test]
    fn test_minutes_may_exceed_an_hour() {
        assert_eq!(parse_timestamp("75:30", TimestampFormat::MinutesSeconds), Ok(4_530_000));
    }

    #[test]
    fn test_fraction_truncated_and_padded() {
        assert_eq!(parse_timestamp("00:01.5", TimestampFormat::MinutesSeconds), Ok(1_500));
        assert_eq!(parse_timestamp("00:01.05", TimestampFormat::MinutesSeconds), Ok(1_050));
        assert_eq!(parse_timestamp("00:01.12345", TimestampFormat::MinutesSeconds), Ok(1_123));
        assert_eq!(parse_timestamp("00:01.", TimestampFormat::MinutesSeconds), Ok(1_000));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_timestamp("  ", TimestampFormat::MinutesSeconds),
            Err(TimestampError::Empty)
        );
        assert!(matches!(
            parse_timestamp("00:00", TimestampFormat::Seconds),
            Err(TimestampError::ComponentCount { .. })
        ));
        assert!(matches!(
            parse_timestamp("1:2:3", TimestampFormat::MinutesSeconds),
            Err(TimestampError::ComponentCount { .. })
        ));
        assert_eq!(
            parse_timestamp("00:x5", TimestampFormat::MinutesSeconds),
            Err(TimestampError::NonNumeric {
                value: "00:x5".to_string(),
                component: "x5".to_string(),
            })
        );
        assert!(matches!(
            parse_timestamp("-1", TimestampFormat::Seconds),
            Err(TimestampError::NonNumeric { .. })
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = parse_timestamp("00:00", TimestampFormat::HoursMinutesSeconds).unwrap_err();
        assert_eq!(err.to_string(), "`00:00` does not match format `hh:mm:ss`");
    }
}
