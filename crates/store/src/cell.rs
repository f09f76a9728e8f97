//! Conversions between calamine cells, JSON values, and worksheet writes.

use calamine::Data;
use rust_xlsxwriter::{ColNum, Format, RowNum, Worksheet, XlsxError};
use serde_json::Value;

/// Cell rendered as text; empty cells give an empty string.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Cell as a JSON value. Empty cells map to `null`.
pub fn cell_to_json(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => Value::from(*f),
        Data::Bool(b) => Value::Bool(*b),
        other => Value::String(other.to_string()),
    }
}

/// Number format for cells read back as dates or times.
const DATETIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Number format for cells read back as durations.
const DURATION_NUM_FORMAT: &str = "[h]:mm:ss";

/// Write a cell back, preserving its type where the writer supports it.
///
/// Empty cells are skipped so blank positions stay blank. Date and duration
/// cells keep their serial value under a date number format, so they read
/// back as the same typed cell.
pub fn write_cell(
    sheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    cell: &Data,
) -> Result<(), XlsxError> {
    match cell {
        Data::Empty => {}
        Data::String(s) => {
            sheet.write_string(row, col, s)?;
        }
        Data::Int(i) => {
            sheet.write_number(row, col, *i as f64)?;
        }
        Data::Float(f) => {
            sheet.write_number(row, col, *f)?;
        }
        Data::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        Data::DateTime(dt) => {
            let num_format = if dt.is_duration() {
                DURATION_NUM_FORMAT
            } else {
                DATETIME_NUM_FORMAT
            };
            let format = Format::new().set_num_format(num_format);
            sheet.write_number_with_format(row, col, dt.as_f64(), &format)?;
        }
        // ISO text cells and error values have no typed writer; keep the text.
        other => {
            sheet.write_string(row, col, other.to_string())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cell_is_null() {
        assert_eq!(cell_to_json(&Data::Empty), Value::Null);
        assert_eq!(cell_text(&Data::Empty), "");
    }

    #[test]
    fn scalar_cells_keep_their_json_type() {
        assert_eq!(cell_to_json(&Data::String("EDI".into())), Value::from("EDI"));
        assert_eq!(cell_to_json(&Data::Int(7)), Value::from(7));
        assert_eq!(cell_to_json(&Data::Float(1.5)), Value::from(1.5));
        assert_eq!(cell_to_json(&Data::Bool(true)), Value::Bool(true));
    }
}
