/// Utilities for date and time formatting
///
/// Backend timestamps are ISO-8601; the UI shows them in pt-BR order.
use chrono::{DateTime, NaiveDateTime, Utc};

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Format ISO datetime string to DD/MM/YYYY HH:MM
/// Example: "2024-03-15T14:02:26.000000Z" -> "15/03/2024 14:02"
pub fn format_datetime(datetime_str: &str) -> String {
    parse_timestamp(datetime_str)
        .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| datetime_str.to_string())
}

/// Relative age of a record, e.g. "há 3 dias"; empty when unparseable
pub fn format_since(datetime_str: &str, now: DateTime<Utc>) -> String {
    let Some(dt) = parse_timestamp(datetime_str) else {
        return String::new();
    };
    let days = (now - dt).num_days().max(0);
    match days {
        0 => "há menos de 1 dia".to_string(),
        1 => "há 1 dia".to_string(),
        n => format!("há {} dias", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2024-03-15T14:02:26.000000Z"),
            "15/03/2024 14:02"
        );
        assert_eq!(format_datetime("2024-12-31 23:59:59"), "31/12/2024 23:59");
    }

    #[test]
    fn test_format_since() {
        let now = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        assert_eq!(format_since("2024-03-20T08:00:00Z", now), "há menos de 1 dia");
        assert_eq!(format_since("2024-03-19T08:00:00Z", now), "há 1 dia");
        assert_eq!(format_since("2024-03-15T08:00:00Z", now), "há 5 dias");
        assert_eq!(format_since("2024-04-15T08:00:00Z", now), "há menos de 1 dia");
        assert_eq!(format_since("ontem", now), "");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
    }
}
