pub mod csv_export;
pub mod csv_import;
pub mod file;

use std::io;

use thiserror::Error;

pub use csv_export::{export_schedule_csv, write_schedule};
pub use csv_import::{import_template_csv, load_user_templates, parse_template};
pub use file::{load_or_default, load_snapshot, save_snapshot};

/// Errors from CSV import and export.
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV is missing required columns (found {found:?}); need a phase name and a duration")]
    MissingColumns { found: Vec<String> },

    #[error("no usable rows in CSV ({skipped} skipped)")]
    Empty { skipped: usize },
}
