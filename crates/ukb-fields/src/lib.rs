//! Field resolution over wide UK Biobank tables.
//!
//! A UK Biobank extract holds one column per field, assessment instance and
//! array slot. This crate indexes those columns once and answers the
//! questions phenotype algorithms ask of them: does any slot hold one of a
//! set of codes ([`FieldSource::presence`]), what is the companion value at
//! the slots where a code was found ([`FieldSource::interpolate`]), and what
//! is the earliest date among several columns
//! ([`FieldSource::earliest_date`]).

pub mod aggregate;
pub mod error;
pub mod index;
pub mod instances;
pub mod name;
pub mod reader;
pub mod source;
pub mod table;
pub mod values;

pub use aggregate::{Aggregate, Earliest, First, Mean, earliest_of};
pub use error::{FieldError, Result};
pub use index::{ColumnRef, FieldIndex};
pub use instances::{ASSESSMENT_DATE_FIELD, InstanceFilter};
pub use name::{FieldKey, ID_COLUMNS, is_id_column, parse_column_name};
pub use reader::{ReadOptions, read_ukb_csv, read_ukb_csv_with_options};
pub use source::{Cells, FieldSource, SEX_FIELD};
pub use table::UkbTable;
pub use values::ValueSet;
