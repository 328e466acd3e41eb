//! Shared utilities for UK Biobank crates.
//!
//! Cell values in a UK Biobank showcase extract arrive as text or numbers
//! depending on how the file was loaded; these helpers normalize them.

pub mod cell;
pub mod date;

pub use cell::{canonical_code, format_numeric, is_missing_code, parse_f64};
pub use date::{format_date, parse_date};
