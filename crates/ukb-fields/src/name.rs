//! UK Biobank column-name dialects.
//!
//! The same cell can be called `f.20002.0.0` (ukbconv R output),
//! `20002-0.0` (showcase CSV) or `f20002_0_0` / `f_20002_0_0` (after
//! sanitizing for other tools). All decode to field `20002`, instance 0,
//! array slot 0.

use std::sync::LazyLock;

use regex::Regex;

static COLUMN_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[fF][._]?)?(\d+)(?:[-._](\d+)(?:[._](\d+))?)?$")
        .expect("Invalid column name regex")
});

/// Accepted names of the subject identifier column.
pub const ID_COLUMNS: [&str; 4] = ["eid", "f.eid", "f_eid", "feid"];

/// Field code, instance and array slot decoded from a column name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldKey {
    pub field: String,
    pub instance: u32,
    pub slot: u32,
}

/// Decode a column name. Returns `None` for names that are not field columns.
///
/// A bare field code (`31`, `f.31`) is instance 0, slot 0.
///
/// # Examples
///
/// ```
/// use ukb_fields::parse_column_name;
///
/// let key = parse_column_name("f.20002.1.3").unwrap();
/// assert_eq!((key.field.as_str(), key.instance, key.slot), ("20002", 1, 3));
/// assert!(parse_column_name("eid").is_none());
/// ```
pub fn parse_column_name(name: &str) -> Option<FieldKey> {
    let caps = COLUMN_NAME_REGEX.captures(name.trim())?;
    let field = caps.get(1)?.as_str().to_string();
    let instance = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    let slot = match caps.get(3) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    Some(FieldKey {
        field,
        instance,
        slot,
    })
}

/// True if `name` is one of the accepted subject identifier column names.
pub fn is_id_column(name: &str) -> bool {
    let lower = name.trim().to_lowercase();
    ID_COLUMNS.contains(&lower.as_str())
}
