//! Loading UK Biobank extracts into Polars.

use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::info;

use crate::error::{FieldError, Result};

/// Options for reading an extract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Field separator. Defaults to `,`.
    pub separator: u8,
    /// Trade speed for memory on very wide files.
    pub low_memory: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            separator: b',',
            low_memory: false,
        }
    }
}

impl ReadOptions {
    /// Tab-separated for `.tab`/`.tsv`/`.txt` files, comma otherwise.
    #[must_use]
    pub fn for_path(path: &Path) -> Self {
        let tabbed = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "tab" | "tsv" | "txt"));
        Self {
            separator: if tabbed { b'\t' } else { b',' },
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    #[must_use]
    pub fn with_low_memory(mut self, enabled: bool) -> Self {
        self.low_memory = enabled;
        self
    }
}

/// Read an extract with every column as text.
///
/// Codes such as `20003` medication ids exceed `i32` and ICD-10 codes are
/// alphanumeric, so no schema inference is attempted.
pub fn read_ukb_csv(path: &Path) -> Result<DataFrame> {
    read_ukb_csv_with_options(path, &ReadOptions::for_path(path))
}

pub fn read_ukb_csv_with_options(path: &Path, options: &ReadOptions) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(FieldError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let separator = options.separator;
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_low_memory(options.low_memory)
        .map_parse_options(|parse| parse.with_separator(separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| csv_error(path, &e))?
        .finish()
        .map_err(|e| csv_error(path, &e))?;
    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded extract"
    );
    Ok(df)
}

fn csv_error(path: &Path, err: &PolarsError) -> FieldError {
    FieldError::CsvParse {
        path: PathBuf::from(path),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str, suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_all_columns_are_text() {
        let file = create_temp_csv("eid,f.20003.0.0\n1,1140883066\n2,\n", ".csv");
        let df = read_ukb_csv(file.path()).unwrap();
        assert_eq!(df.height(), 2);
        for column in df.get_columns() {
            assert_eq!(column.dtype(), &DataType::String);
        }
    }

    #[test]
    fn test_tab_separated() {
        let file = create_temp_csv("eid\t31-0.0\n1\t0\n", ".tab");
        let df = read_ukb_csv(file.path()).unwrap();
        assert_eq!(df.width(), 2);
    }

    #[test]
    fn test_missing_file() {
        let result = read_ukb_csv(Path::new("/nonexistent/ukb.csv"));
        assert!(matches!(result, Err(FieldError::FileNotFound { .. })));
    }

    #[test]
    fn test_with_options() {
        let options = ReadOptions::default().with_separator(b';');
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "eid;f.31.0.0\n7;1\n").unwrap();
        let df = read_ukb_csv_with_options(file.path(), &options).unwrap();
        assert_eq!(df.width(), 2);
    }
}
