//! Calendar date parsing for assessment and hospital-episode dates.

use chrono::NaiveDate;

/// Parse a date cell.
///
/// Accepts ISO dates, ISO datetimes (the time part is dropped) and the
/// day-first forms found in older extracts. Returns `None` for blank or
/// unparseable values.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ukb_common::parse_date;
///
/// assert_eq!(parse_date("2009-03-14"), NaiveDate::from_ymd_opt(2009, 3, 14));
/// assert_eq!(parse_date("2009-03-14T00:00:00"), NaiveDate::from_ymd_opt(2009, 3, 14));
/// assert_eq!(parse_date(""), None);
/// ```
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let formats = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];
    for fmt in &formats {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(d);
        }
    }
    // Datetime text: keep the date part.
    if trimmed.len() > 10 && trimmed.is_char_boundary(10) {
        return NaiveDate::parse_from_str(&trimmed[..10], "%Y-%m-%d").ok();
    }
    None
}

/// Format a date as ISO 8601.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        let expected = NaiveDate::from_ymd_opt(2012, 7, 1);
        assert_eq!(parse_date("2012-07-01"), expected);
        assert_eq!(parse_date("01/07/2012"), expected);
        assert_eq!(parse_date("2012-07-01 13:45:00"), expected);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_date("nan"), None);
        assert_eq!(parse_date("2012-13-40"), None);
        assert_eq!(parse_date("   "), None);
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2010, 8, 1).unwrap();
        assert_eq!(format_date(date), "2010-08-01");
    }
}
