use std::path::PathBuf;

use crate::schema::{DEFAULT_COLUMN_WIDTH, DEFAULT_SHEET_NAME};

/// Location and layout of the backing workbook.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path of the xlsx file (default: `responses.xlsx`).
    pub path: PathBuf,
    /// Title given to the single worksheet when the file is created.
    pub sheet_name: String,
    /// Width applied to every column on creation and rewrite.
    pub column_width: f64,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}
