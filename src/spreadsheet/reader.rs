//! Workbook reader (xlsx, xls, ods)

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use super::CellValue;
use crate::error::ImportError;

fn to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        // as_datetime honours the workbook's 1900/1904 flag
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or(CellValue::Empty),
        Data::DateTimeIso(s) => CellValue::IsoDateTime(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

/// Parse a workbook buffer and return the rows of its first sheet.
///
/// Row and column positions are absolute: leading blank rows and columns
/// are kept as empty cells so that row indexes match the sheet.
pub fn read_first_sheet(bytes: &[u8]) -> Result<Vec<Vec<CellValue>>, ImportError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ImportError::MalformedInput(e.to_string()))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| ImportError::MalformedInput(e.to_string()))?,
        None => return Ok(Vec::new()),
    };

    let (first_row, first_col) = match range.start() {
        Some(start) => start,
        None => return Ok(Vec::new()),
    };

    let mut rows: Vec<Vec<CellValue>> = (0..first_row).map(|_| Vec::new()).collect();
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; first_col as usize];
        cells.extend(row.iter().map(to_cell));
        rows.push(cells);
    }

    tracing::debug!("Read {} rows from first sheet", rows.len());
    Ok(rows)
}
