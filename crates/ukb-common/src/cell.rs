//! Cell text normalization.
//!
//! UK Biobank stores categorical answers as integer codes. A file loaded with
//! schema inference may surface the same code as `1` or `1.0`; both
//! normalize to the canonical text `"1"`.

/// Codes meaning "do not know" (`-1`) and "prefer not to answer" (`-3`).
///
/// A cell holding one of these is structurally present but carries no
/// information.
pub const MISSING_CODES: [&str; 2] = ["-1", "-3"];

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use ukb_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

/// Normalizes a raw cell to the text used for code comparison.
///
/// Blank cells and the literal `nan`/`NA` markers become `None`. Numeric text
/// is reformatted so `"1.0"` and `"1"` compare equal; anything else (ICD-10
/// codes such as `E119`, dates) is kept trimmed.
///
/// # Examples
///
/// ```
/// use ukb_common::canonical_code;
///
/// assert_eq!(canonical_code(" 1.0 "), Some("1".to_string()));
/// assert_eq!(canonical_code("E119"), Some("E119".to_string()));
/// assert_eq!(canonical_code(""), None);
/// ```
pub fn canonical_code(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || is_null_marker(trimmed) {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(format_numeric(v)),
        _ => Some(trimmed.to_string()),
    }
}

/// Returns true for the UK Biobank "do not know" / "prefer not to answer" codes.
pub fn is_missing_code(code: &str) -> bool {
    MISSING_CODES.contains(&code)
}

fn is_null_marker(value: &str) -> bool {
    value.eq_ignore_ascii_case("nan")
        || value.eq_ignore_ascii_case("na")
        || value.eq_ignore_ascii_case("null")
}

/// Parses a string as `f64`, returning `None` for invalid, empty or NaN strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}
