//! # Duration Codec
//!
//! Decode the catalog's `PT#H#M#S` tokens and render seconds for humans.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use regex::Regex;

const TOKEN_PATTERN: &str = r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?";

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Parse a duration token such as `PT1H2M3S` into seconds.
///
/// Malformed tokens decode to zero so one odd item cannot sink a whole playlist.
pub fn parse_duration_token(token: &str) -> u64 {
    let Ok(re) = Regex::new(TOKEN_PATTERN) else {
        return 0;
    };
    let Some(caps) = re.captures(token) else {
        return 0;
    };

    let component = |index: usize| -> u64 {
        caps.get(index)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };

    component(1)
        .saturating_mul(SECONDS_PER_HOUR)
        .saturating_add(component(2).saturating_mul(SECONDS_PER_MINUTE))
        .saturating_add(component(3))
}

fn pluralize(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("{} {}", count, unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

/// Render seconds as e.g. `"1 day, 1 hour, 1 minute, 1 second"`
pub fn format_verbose(seconds: u64) -> String {
    if seconds == 0 {
        return "0 seconds".to_string();
    }

    let days = seconds / SECONDS_PER_DAY;
    let hours = (seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let secs = seconds % SECONDS_PER_MINUTE;

    [(days, "day"), (hours, "hour"), (minutes, "minute"), (secs, "second")]
        .iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, unit)| pluralize(*count, unit))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render seconds as `HH:MM:SS`, or `MM:SS` when under an hour
pub fn format_compact(seconds: u64) -> String {
    let hours = seconds / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let secs = seconds % SECONDS_PER_MINUTE;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_token() {
        assert_eq!(parse_duration_token("PT1H2M3S"), 3723);
    }

    #[test]
    fn test_parse_partial_tokens() {
        assert_eq!(parse_duration_token("PT4M13S"), 253);
        assert_eq!(parse_duration_token("PT2H"), 7200);
        assert_eq!(parse_duration_token("PT45S"), 45);
        assert_eq!(parse_duration_token("PT1H30S"), 3630);
        assert_eq!(parse_duration_token("PT10M"), 600);
        assert_eq!(parse_duration_token("PT"), 0);
    }

    #[test]
    fn test_parse_malformed_tokens_are_zero() {
        assert_eq!(parse_duration_token(""), 0);
        assert_eq!(parse_duration_token("garbage"), 0);
        assert_eq!(parse_duration_token("P1D"), 0);
        assert_eq!(parse_duration_token("1H2M"), 0);
    }

    #[test]
    fn test_parse_absurd_values_do_not_overflow() {
        let token = format!("PT{}H", u64::MAX);
        assert_eq!(parse_duration_token(&token), u64::MAX);
    }

    #[test]
    fn test_format_verbose() {
        assert_eq!(format_verbose(0), "0 seconds");
        assert_eq!(format_verbose(1), "1 second");
        assert_eq!(format_verbose(59), "59 seconds");
        assert_eq!(format_verbose(3600), "1 hour");
        assert_eq!(format_verbose(7260), "2 hours, 1 minute");
        assert_eq!(format_verbose(90061), "1 day, 1 hour, 1 minute, 1 second");
        assert_eq!(format_verbose(2 * 86_400 + 5), "2 days, 5 seconds");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(0), "00:00");
        assert_eq!(format_compact(125), "02:05");
        assert_eq!(format_compact(3661), "01:01:01");
        assert_eq!(format_compact(3599), "59:59");
        assert_eq!(format_compact(100 * 3600), "100:00:00");
    }
}
