//! Date parsing and the `formatDate` token grammar

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use serde_json::Value;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Longest tokens first so `MMMM` is never read as `MM` + `MM`
const TOKENS: [&str; 8] = ["MMMM", "MMM", "MM", "M", "YYYY", "YY", "DD", "D"];

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, `YYYY-MM-DDTHH:MM:SS` and `"today"`
pub(crate) fn parse_date(value: &Value) -> Option<NaiveDate> {
    let text = value.as_str()?.trim();
    if text.eq_ignore_ascii_case("today") {
        return Some(Local::now().date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.date_naive());
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|datetime| datetime.date())
}

/// Replace date tokens in one left-to-right pass; substituted text is never rescanned
pub(crate) fn format_date(date: NaiveDate, format: &str) -> String {
    let mut out = String::with_capacity(format.len() + 8);
    let mut rest = format;
    'scan: while !rest.is_empty() {
        for token in TOKENS {
            if let Some(after) = rest.strip_prefix(token) {
                out.push_str(&render_token(date, token));
                rest = after;
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
    out
}

fn render_token(date: NaiveDate, token: &str) -> String {
    let month = date.month0() as usize;
    match token {
        "MMMM" => MONTHS[month].to_string(),
        "MMM" => MONTHS[month][..3].to_string(),
        "MM" => format!("{:02}", date.month()),
        "M" => date.month().to_string(),
        "YYYY" => date.year().to_string(),
        "YY" => format!("{:02}", date.year().rem_euclid(100)),
        "DD" => format!("{:02}", date.day()),
        _ => date.day().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
    }

    #[test]
    fn test_format_tokens() {
        assert_eq!(format_date(date(), "MMMM D, YYYY"), "March 9, 2026");
        assert_eq!(format_date(date(), "MM/DD/YY"), "03/09/26");
        assert_eq!(format_date(date(), "D MMM YYYY"), "9 Mar 2026");
        assert_eq!(format_date(date(), "M-D"), "3-9");
    }

    #[test]
    fn test_substituted_text_is_not_rescanned() {
        // "May" contains "M"; a rescan would turn it into "3ay"
        let may = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        assert_eq!(format_date(may, "MMMM"), "May");
        assert_eq!(format_date(may, "MMMM D"), "May 1");
    }

    #[test]
    fn test_parse_date_forms() {
        assert_eq!(parse_date(&json!("2026-03-09")), Some(date()));
        assert_eq!(parse_date(&json!("2026-03-09T10:00:00Z")), Some(date()));
        assert_eq!(parse_date(&json!("2026-03-09T10:00:00")), Some(date()));
        assert_eq!(parse_date(&json!("March 9")), None);
        assert_eq!(parse_date(&json!(20260309)), None);
    }
}
