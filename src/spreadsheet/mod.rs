//! Spreadsheet ingestion for the student import
//!
//! Reading turns an uploaded workbook into positional rows of [`CellValue`],
//! normalization re-keys them by header and cleans up the city and birth date.

pub mod normalize;
pub mod reader;

use chrono::NaiveDateTime;
use indexmap::IndexMap;

pub use normalize::{fold_text, normalize_date, normalize_rows, NormalizedRow};
pub use reader::read_first_sheet;

/// A raw cell, detached from the workbook library
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Date cell, already resolved in the workbook's own date system
    DateTime(NaiveDateTime),
    /// Date stored as an ISO 8601 string (e.g. from OpenDocument files)
    IsoDateTime(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) | CellValue::IsoDateTime(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Textual form of the cell; whole numbers lose their fractional part
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) | CellValue::IsoDateTime(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            CellValue::Number(n) => Some(format_number(*n)),
            CellValue::DateTime(dt) => Some(format_datetime(dt)),
            CellValue::Bool(b) => Some(b.to_string()),
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() <= i32::MAX as f64 => {
                Some(*n as i32)
            }
            CellValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn format_datetime(dt: &NaiveDateTime) -> String {
    if dt.time() == chrono::NaiveTime::MIN {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

/// One sheet line keyed by the header row
pub type RawRow = IndexMap<String, CellValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_text() {
        assert_eq!(CellValue::Number(1001.0).as_text(), Some("1001".to_string()));
        assert_eq!(CellValue::Number(1.5).as_text(), Some("1.5".to_string()));
        assert_eq!(CellValue::Text("  Ana ".into()).as_text(), Some("Ana".to_string()));
        assert_eq!(CellValue::Text("   ".into()).as_text(), None);
        assert_eq!(CellValue::Empty.as_text(), None);

        let day = chrono::NaiveDate::from_ymd_opt(2005, 7, 15).unwrap();
        assert_eq!(
            CellValue::DateTime(day.and_hms_opt(0, 0, 0).unwrap()).as_text(),
            Some("2005-07-15".to_string())
        );
        assert_eq!(
            CellValue::DateTime(day.and_hms_opt(18, 0, 0).unwrap()).as_text(),
            Some("2005-07-15T18:00:00".to_string())
        );
    }

    #[test]
    fn test_as_integer() {
        assert_eq!(CellValue::Number(2022.0).as_integer(), Some(2022));
        assert_eq!(CellValue::Text(" 2023 ".into()).as_integer(), Some(2023));
        assert_eq!(CellValue::Number(2022.5).as_integer(), None);
        assert_eq!(CellValue::Text("n/a".into()).as_integer(), None);
    }
}
