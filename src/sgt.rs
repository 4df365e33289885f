use chrono::{DateTime, FixedOffset, SecondsFormat, Timelike, Utc};

/// Singapore runs a fixed UTC+8 offset with no daylight saving, so a
/// constant shift is sufficient; swapping in a real timezone database
/// later only touches this module.
const SGT_OFFSET_SECONDS: i32 = 8 * 3600;

fn sgt_offset() -> FixedOffset {
    FixedOffset::east_opt(SGT_OFFSET_SECONDS).expect("valid SGT offset")
}

/// Parse a Slack-style timestamp (`"1704067200.123456"`) into a UTC
/// instant. The fractional part is discarded; precision degrades to whole
/// seconds. Returns None when the seconds portion is not a number.
pub fn parse_slack_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    let seconds = ts.split('.').next().unwrap_or(ts);
    let seconds = seconds.trim().parse::<f64>().ok()?;
    DateTime::from_timestamp(seconds as i64, 0)
}

/// Render a UTC instant as fixed-width ISO-8601 (`2024-01-01T00:00:00+00:00`).
/// Lexical comparison of these strings is chronological comparison.
pub fn to_iso_utc(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Break a UTC instant into its SGT calendar date (`YYYY-MM-DD`),
/// time-of-day (`HH:MM:SS`) and hour components.
pub fn to_sgt_parts(instant: DateTime<Utc>) -> (String, String, u32) {
    let local = instant.with_timezone(&sgt_offset());
    (
        local.format("%Y-%m-%d").to_string(),
        local.format("%H:%M:%S").to_string(),
        local.hour(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slack_timestamp_with_fraction() {
        let instant = parse_slack_timestamp("1704067200.654321").unwrap();
        assert_eq!(instant.timestamp(), 1704067200);
    }

    #[test]
    fn test_parse_slack_timestamp_whole_seconds() {
        let instant = parse_slack_timestamp("1704067200").unwrap();
        assert_eq!(instant.timestamp(), 1704067200);
    }

    #[test]
    fn test_parse_slack_timestamp_invalid() {
        assert!(parse_slack_timestamp("").is_none());
        assert!(parse_slack_timestamp("not-a-number").is_none());
        assert!(parse_slack_timestamp("12x4.5").is_none());
    }

    #[test]
    fn test_iso_utc_is_fixed_width() {
        let instant = parse_slack_timestamp("1704067200").unwrap();
        assert_eq!(to_iso_utc(instant), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_sgt_conversion_at_midnight_utc() {
        // 2024-01-01T00:00:00Z is 08:00 in Singapore.
        let instant = parse_slack_timestamp("1704067200").unwrap();
        let (date, time, hour) = to_sgt_parts(instant);
        assert_eq!(date, "2024-01-01");
        assert_eq!(time, "08:00:00");
        assert_eq!(hour, 8);
    }

    #[test]
    fn test_sgt_conversion_crosses_date_line() {
        // 2023-12-31T20:30:00Z is already 2024-01-01 in Singapore.
        let instant = parse_slack_timestamp("1704054600.5").unwrap();
        let (date, time, hour) = to_sgt_parts(instant);
        assert_eq!(date, "2024-01-01");
        assert_eq!(time, "04:30:00");
        assert_eq!(hour, 4);
    }
}
