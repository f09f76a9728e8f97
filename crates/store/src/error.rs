use std::path::PathBuf;

/// Failure of a store operation.
///
/// [`StoreError::NotFound`] is the only variant callers are expected to
/// branch on; everything else is a storage failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read workbook: {0}")]
    Read(#[from] calamine::XlsxError),

    #[error("Failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to replace store file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Workbook contains no worksheet")]
    MissingSheet,

    #[error("Header row does not match the expected columns, found {found:?}")]
    MalformedHeader { found: Vec<String> },

    #[error("Sheet exceeds the xlsx row or column limit")]
    SheetTooLarge,

    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
