use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Output layout for every canonical timestamp.
pub const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Layouts that carry an explicit offset; converted to UTC.
const OFFSET_FORMATS: &[&str] = &[
    "%a %b %d %H:%M:%S %z %Y", // Twitter API: Wed Oct 10 20:19:24 +0000 2018
    "%a %b %d %Y %H:%M:%S GMT%z", // JS toString: Wed Oct 10 2018 20:19:24 GMT+0000
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%b %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M:%S",
    "%b %d %Y %H:%M:%S",
    "%a %b %d %Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
];

/// Parse a calendar date/time in any of the layouts seen in post exports.
/// Values with an offset are shifted to UTC; bare dates become midnight.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = strip_zone_name(s.trim().trim_matches('"').trim());
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc).naive_utc());
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Drop a trailing `(Zone Name)` and a bare ` UTC`/` GMT` suffix; the
/// remainder is then read as UTC or by its numeric offset.
fn strip_zone_name(s: &str) -> &str {
    let s = match s.rfind(" (") {
        Some(idx) if s.ends_with(')') => s[..idx].trim_end(),
        _ => s,
    };
    s.strip_suffix(" UTC")
        .or_else(|| s.strip_suffix(" GMT"))
        .unwrap_or(s)
        .trim_end()
}

pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format(OUTPUT_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(s: &str) -> Option<String> {
        parse_datetime(s).map(|dt| format_datetime(&dt))
    }

    #[test]
    fn test_bare_dates_are_midnight() {
        assert_eq!(fmt("2020-01-01").as_deref(), Some("2020-01-01 00:00:00"));
        assert_eq!(fmt("2020/01/31").as_deref(), Some("2020-01-31 00:00:00"));
        assert_eq!(fmt("12/25/2019").as_deref(), Some("2019-12-25 00:00:00"));
    }

    #[test]
    fn test_naive_datetimes() {
        assert_eq!(fmt("2019-05-04 13:14:15").as_deref(), Some("2019-05-04 13:14:15"));
        assert_eq!(fmt("2019-05-04T13:14:15.250").as_deref(), Some("2019-05-04 13:14:15"));
        assert_eq!(fmt("2019-05-04 13:14").as_deref(), Some("2019-05-04 13:14:00"));
        assert_eq!(fmt("2024/12/22 00:05:00").as_deref(), Some("2024-12-22 00:05:00"));
        assert_eq!(fmt(" \"2019-05-04 13:14:15\" ").as_deref(), Some("2019-05-04 13:14:15"));
    }

    #[test]
    fn test_offsets_shift_to_utc() {
        assert_eq!(fmt("2019-05-04T13:14:15+02:00").as_deref(), Some("2019-05-04 11:14:15"));
        assert_eq!(fmt("2019-05-04 13:14:15+00:00").as_deref(), Some("2019-05-04 13:14:15"));
        assert_eq!(fmt("Wed Oct 10 20:19:24 +0000 2018").as_deref(), Some("2018-10-10 20:19:24"));
        assert_eq!(fmt("Tue, 1 Jul 2003 10:52:37 +0200").as_deref(), Some("2003-07-01 08:52:37"));
    }

    #[test]
    fn test_month_names() {
        assert_eq!(fmt("Jan 1, 2020").as_deref(), Some("2020-01-01 00:00:00"));
        assert_eq!(fmt("January 1, 2020").as_deref(), Some("2020-01-01 00:00:00"));
        assert_eq!(fmt("January 1, 2020 10:00:00").as_deref(), Some("2020-01-01 10:00:00"));
        assert_eq!(fmt("Dec 25 2019 08:30:00").as_deref(), Some("2019-12-25 08:30:00"));
        assert_eq!(fmt("4 May 2019").as_deref(), Some("2019-05-04 00:00:00"));
    }

    #[test]
    fn test_zone_suffixes() {
        assert_eq!(fmt("2019-05-04 13:14:15 UTC").as_deref(), Some("2019-05-04 13:14:15"));
        assert_eq!(fmt("2019-05-04 13:14:15 GMT").as_deref(), Some("2019-05-04 13:14:15"));
        assert_eq!(
            fmt("Wed Oct 10 2018 20:19:24 GMT+0000").as_deref(),
            Some("2018-10-10 20:19:24")
        );
        assert_eq!(
            fmt("Wed Oct 10 2018 22:19:24 GMT+0200 (Central European Summer Time)").as_deref(),
            Some("2018-10-10 20:19:24")
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(fmt(""), None);
        assert_eq!(fmt("yesterday"), None);
        assert_eq!(fmt("2020-13-45"), None);
        assert_eq!(fmt("not a date 2020"), None);
    }
}
