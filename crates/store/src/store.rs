//! The submission store.
//!
//! State of the backing file only ever moves forward:
//! absent -> header only -> N rows -> N + 1 rows. Rows are never updated or
//! removed and the header is never rewritten with different content.
//!
//! xlsx cannot be patched in place, so an append reads the whole sheet,
//! renders a new workbook with the extra row, and atomically renames it over
//! the old file. A crash mid-append leaves the previous file intact.

use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use calamine::{open_workbook, Data, Reader, Xlsx};
use indexmap::IndexMap;
use intake_core::submission::Submission;
use intake_core::types::Timestamp;
use rust_xlsxwriter::{Color, ColNum, Format, RowNum, Workbook};
use serde_json::Value;

use crate::cell::{cell_text, cell_to_json, write_cell};
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::schema::{COLUMNS, HEADER_FILL_RGB};

/// One data row keyed by header name, in column order.
pub type Row = IndexMap<String, Value>;

/// Dense copy of the first worksheet, anchored at A1.
///
/// `rows.len()` is the 1-based index of the last used row, so a header-only
/// sheet has one row and a sheet with no cells has none.
struct Sheet {
    rows: Vec<Vec<Data>>,
}

impl Sheet {
    fn max_row(&self) -> usize {
        self.rows.len()
    }

    /// Header names with trailing blank cells dropped.
    ///
    /// Rows are padded to the widest used column, so a stray cell to the
    /// right of the table would otherwise show up as extra empty names.
    fn header(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .rows
            .first()
            .map(|cells| cells.iter().map(cell_text).collect())
            .unwrap_or_default();
        while names.last().is_some_and(String::is_empty) {
            names.pop();
        }
        names
    }

    /// Whether the first columns of the header are exactly [`COLUMNS`].
    ///
    /// Extra named columns to the right are tolerated and carried over.
    fn has_expected_header(&self) -> bool {
        let header = self.header();
        header.len() >= COLUMNS.len()
            && header.iter().map(String::as_str).zip(COLUMNS).all(|(a, b)| a == b)
    }

    fn data_rows(&self) -> &[Vec<Data>] {
        self.rows.get(1..).unwrap_or(&[])
    }
}

/// Append-only store over a single xlsx file.
///
/// All operations are serialized through one mutex guarding the path, so
/// overlapping requests cannot interleave their open-modify-save cycles.
#[derive(Debug)]
pub struct SubmissionStore {
    config: StoreConfig,
    lock: Mutex<()>,
}

impl SubmissionStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Whether the backing file currently exists.
    pub fn exists(&self) -> Result<bool, StoreError> {
        let _guard = self.acquire()?;
        Ok(self.config.path.exists())
    }

    /// Create the file with its formatted header row if it does not exist.
    ///
    /// Returns `true` when the file was created. An existing file is left
    /// untouched and its schema is not inspected.
    pub fn ensure_initialized(&self) -> Result<bool, StoreError> {
        let _guard = self.acquire()?;
        self.initialize_locked()
    }

    /// Append one submission as the next row.
    ///
    /// Returns the 1-based row number written. The file is created first if
    /// it has gone missing.
    pub fn append(&self, submission: &Submission) -> Result<usize, StoreError> {
        let _guard = self.acquire()?;
        self.initialize_locked()?;

        let mut sheet = self.load_locked()?;
        if !sheet.has_expected_header() {
            return Err(StoreError::MalformedHeader {
                found: sheet.header(),
            });
        }

        sheet.rows.push(
            submission
                .to_row()
                .iter()
                .map(|value| Data::String((*value).to_string()))
                .collect(),
        );
        let next_row = sheet.max_row();

        let bytes = self.render(&sheet.rows)?;
        self.replace_file(&bytes)?;

        tracing::info!(
            row = next_row,
            path = %self.config.path.display(),
            "Saved submission"
        );
        Ok(next_row)
    }

    /// Number of data rows (the header is not counted).
    pub fn count(&self) -> Result<usize, StoreError> {
        let _guard = self.acquire()?;
        let sheet = self.load_locked()?;
        Ok(sheet.max_row().saturating_sub(1))
    }

    /// Every non-empty data row, in append order.
    pub fn scan_all(&self) -> Result<Vec<Row>, StoreError> {
        let _guard = self.acquire()?;
        let sheet = self.load_locked()?;
        let header = sheet.header();

        let rows = sheet
            .data_rows()
            .iter()
            .filter(|cells| cells.iter().any(|c| *c != Data::Empty))
            .map(|cells| {
                header
                    .iter()
                    .zip(cells)
                    .filter(|(name, _)| !name.is_empty())
                    .map(|(name, cell)| (name.clone(), cell_to_json(cell)))
                    .collect()
            })
            .collect();
        Ok(rows)
    }

    /// Modification time of the backing file, `None` if it does not exist.
    pub fn last_modified(&self) -> Result<Option<Timestamp>, StoreError> {
        let _guard = self.acquire()?;
        match std::fs::metadata(&self.config.path) {
            Ok(meta) => Ok(Some(Timestamp::from(meta.modified()?))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Raw bytes of the backing file, for download.
    pub fn read_raw(&self) -> Result<Vec<u8>, StoreError> {
        let _guard = self.acquire()?;
        match std::fs::read(&self.config.path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(self.not_found()),
            Err(e) => Err(e.into()),
        }
    }

    // -----------------------------------------------------------------------
    // Internals (callers must hold the lock)
    // -----------------------------------------------------------------------

    fn acquire(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.lock.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn not_found(&self) -> StoreError {
        StoreError::NotFound {
            path: self.config.path.clone(),
        }
    }

    fn initialize_locked(&self) -> Result<bool, StoreError> {
        if self.config.path.exists() {
            return Ok(false);
        }
        let bytes = self.render(&[])?;
        self.replace_file(&bytes)?;
        tracing::info!(path = %self.config.path.display(), "Created new store file");
        Ok(true)
    }

    fn load_locked(&self) -> Result<Sheet, StoreError> {
        if !self.config.path.exists() {
            return Err(self.not_found());
        }

        let mut workbook: Xlsx<_> = open_workbook(&self.config.path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(StoreError::MissingSheet)??;

        let Some((last_row, last_col)) = range.end() else {
            return Ok(Sheet { rows: Vec::new() });
        };

        let rows = (0..=last_row)
            .map(|r| {
                (0..=last_col)
                    .map(|c| range.get_value((r, c)).cloned().unwrap_or(Data::Empty))
                    .collect()
            })
            .collect();
        Ok(Sheet { rows })
    }

    /// Serialize `rows` into an xlsx buffer.
    ///
    /// Row 0 is always written as the formatted [`COLUMNS`] header; any cells
    /// of `rows[0]` past the last column are kept as they are. Every other
    /// cell is written back with its type.
    fn render(&self, rows: &[Vec<Data>]) -> Result<Vec<u8>, StoreError> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(&self.config.sheet_name)?;

        let header_format = Format::new()
            .set_bold()
            .set_background_color(Color::RGB(HEADER_FILL_RGB));

        for (col, name) in COLUMNS.iter().enumerate() {
            let col = to_col(col)?;
            sheet.write_string_with_format(0, col, *name, &header_format)?;
            sheet.set_column_width(col, self.config.column_width)?;
        }

        for (idx, cells) in rows.iter().enumerate() {
            let row = RowNum::try_from(idx).map_err(|_| StoreError::SheetTooLarge)?;
            let skip = if idx == 0 { COLUMNS.len() } else { 0 };
            for (col, cell) in cells.iter().enumerate().skip(skip) {
                write_cell(sheet, row, to_col(col)?, cell)?;
            }
        }

        Ok(workbook.save_to_buffer()?)
    }

    /// Write `bytes` to a sibling temp file and rename it over the store.
    fn replace_file(&self, bytes: &[u8]) -> Result<(), StoreError> {
        let dir = match self.config.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.config.path)?;
        Ok(())
    }
}

fn to_col(col: usize) -> Result<ColNum, StoreError> {
    ColNum::try_from(col).map_err(|_| StoreError::SheetTooLarge)
}
