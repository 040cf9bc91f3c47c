//! Row normalization: header re-keying, text folding and date parsing

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use super::{CellValue, RawRow};

/// Header names (folded) recognised as the city column
pub const CITY_HEADERS: &[&str] = &["cidade", "municipio", "city"];

/// Header names (folded) recognised as the birth date column
pub const BIRTH_DATE_HEADERS: &[&str] = &[
    "data de nascimento",
    "data nascimento",
    "dt nascimento",
    "nascimento",
    "birth_date",
];

/// Largest serial the 1900 date system can express (9999-12-31)
const MAX_SERIAL: f64 = 2_958_466.0;

static DAY_MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})[/-](\d{1,2})[/-](\d{2,4})$").expect("valid regex"));

/// ISO 8601 reduced precision: `YYYY` or `YYYY-MM`
static YEAR_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})(?:-(\d{2}))?$").expect("valid regex"));

/// Decompose, drop combining marks (U+0300..U+036F), lower-case and trim.
pub fn fold_text(s: &str) -> String {
    let stripped: String = s
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect();
    stripped.to_lowercase().trim().to_string()
}

/// Convert a spreadsheet serial number (1900 date system) to a date and time.
///
/// Serial 60 is the nonexistent 1900-02-29 kept by spreadsheet software; it
/// resolves to 1900-02-28.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 || serial >= MAX_SERIAL {
        return None;
    }

    let total_seconds = (serial * 86_400.0).round() as i64;
    let days = total_seconds.div_euclid(86_400);
    let seconds = total_seconds.rem_euclid(86_400);

    let base = if days < 60 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };

    base.checked_add_signed(Duration::days(days))?
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::seconds(seconds))
}

fn parse_day_month_year(s: &str) -> Option<NaiveDate> {
    let caps = DAY_MONTH_YEAR.captures(s)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year_text = &caps[3];
    let mut year: i32 = year_text.parse().ok()?;
    if year_text.len() == 2 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_year_month(s: &str) -> Option<NaiveDate> {
    let caps = YEAR_MONTH.captures(s)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn parse_iso(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Some(date) = parse_year_month(s) {
        return Some(date);
    }
    // Offsets are not applied: the calendar date as written is kept
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

fn parse_text_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    parse_day_month_year(s)
        .or_else(|| parse_iso(s))
        .or_else(|| {
            s.parse::<f64>()
                .ok()
                .and_then(serial_to_datetime)
                .map(|dt| dt.date())
        })
}

/// Resolve a birth date cell, in priority order: date-typed cell, serial
/// number, `D/M/Y` text, ISO 8601 text (including `YYYY` and `YYYY-MM`),
/// numeric text. Anything else is `None`.
pub fn normalize_date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::DateTime(dt) => Some(dt.date()),
        CellValue::IsoDateTime(s) => parse_iso(s.trim()).or_else(|| parse_text_date(s)),
        CellValue::Number(serial) => serial_to_datetime(*serial).map(|dt| dt.date()),
        CellValue::Text(s) => parse_text_date(s),
        CellValue::Empty | CellValue::Bool(_) => None,
    }
}

/// Canonical `YYYY-MM-DD` form of a date cell
pub fn canonical_date(cell: &CellValue) -> Option<String> {
    normalize_date(cell).map(|d| d.format("%Y-%m-%d").to_string())
}

/// A header-keyed row with its city folded and birth date resolved
#[derive(Debug, Clone)]
pub struct NormalizedRow {
    pub fields: RawRow,
    pub city: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl NormalizedRow {
    fn from_raw(fields: RawRow) -> Self {
        let city = find_field(&fields, CITY_HEADERS)
            .and_then(CellValue::as_text)
            .map(|c| fold_text(&c));
        let birth_date = find_field(&fields, BIRTH_DATE_HEADERS).and_then(normalize_date);
        Self {
            fields,
            city,
            birth_date,
        }
    }

    /// First non-empty cell whose folded header is one of `names`
    pub fn get(&self, names: &[&str]) -> Option<&CellValue> {
        find_field(&self.fields, names)
    }

    pub fn text(&self, names: &[&str]) -> Option<String> {
        self.get(names).and_then(CellValue::as_text)
    }
}

fn find_field<'a>(fields: &'a RawRow, names: &[&str]) -> Option<&'a CellValue> {
    fields
        .iter()
        .find(|(key, value)| names.contains(&fold_text(key).as_str()) && !value.is_empty())
        .map(|(_, value)| value)
}

/// Key every row from `header_row` onward by the header cells.
///
/// The header row itself is mapped too and is left for the city filter to
/// discard. Rows before the header are skipped, as are blank rows.
pub fn normalize_rows(rows: &[Vec<CellValue>], header_row: usize) -> Vec<NormalizedRow> {
    let header: Vec<Option<String>> = match rows.get(header_row) {
        Some(cells) => cells.iter().map(CellValue::as_text).collect(),
        None => return Vec::new(),
    };

    rows.iter()
        .skip(header_row)
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .map(|row| {
            let fields: RawRow = header
                .iter()
                .enumerate()
                .filter_map(|(idx, key)| {
                    let key = key.as_ref()?;
                    let value = row.get(idx).cloned().unwrap_or(CellValue::Empty);
                    Some((key.clone(), value))
                })
                .collect();
            NormalizedRow::from_raw(fields)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fold_text() {
        assert_eq!(fold_text("  Vitória Da Conquista "), "vitoria da conquista");
        assert_eq!(fold_text("SÃO PAULO"), "sao paulo");
        assert_eq!(fold_text("Matrícula"), "matricula");
    }

    #[test]
    fn test_serial_numbers() {
        assert_eq!(normalize_date(&CellValue::Number(38548.0)), Some(ymd(2005, 7, 15)));
        assert_eq!(
            normalize_date(&CellValue::DateTime(ymd(2005, 7, 15).and_hms_opt(18, 0, 0).unwrap())),
            Some(ymd(2005, 7, 15))
        );
        assert_eq!(normalize_date(&CellValue::Number(1.0)), Some(ymd(1900, 1, 1)));
        assert_eq!(normalize_date(&CellValue::Number(59.0)), Some(ymd(1900, 2, 28)));
        assert_eq!(normalize_date(&CellValue::Number(61.0)), Some(ymd(1900, 3, 1)));
        assert_eq!(normalize_date(&CellValue::Number(-3.0)), None);
        assert_eq!(normalize_date(&CellValue::Number(f64::NAN)), None);
    }

    #[test]
    fn test_serial_time_component() {
        let dt = serial_to_datetime(38548.5).unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2005-07-15 12:00:00");
    }

    #[test]
    fn test_day_month_year_text() {
        assert_eq!(normalize_date(&text("15/07/2005")), Some(ymd(2005, 7, 15)));
        assert_eq!(normalize_date(&text("5-7-2005")), Some(ymd(2005, 7, 5)));
        assert_eq!(normalize_date(&text("15/07/05")), Some(ymd(2005, 7, 15)));
        assert_eq!(normalize_date(&text("01/01/99")), Some(ymd(2099, 1, 1)));
    }

    #[test]
    fn test_iso_and_numeric_text() {
        assert_eq!(normalize_date(&text("2005-07-15")), Some(ymd(2005, 7, 15)));
        assert_eq!(normalize_date(&text("2005-07-15T10:30:00Z")), Some(ymd(2005, 7, 15)));
        assert_eq!(normalize_date(&text("2005-07-15 10:30:00")), Some(ymd(2005, 7, 15)));
        assert_eq!(normalize_date(&text("38548")), Some(ymd(2005, 7, 15)));
        assert_eq!(normalize_date(&text("2005")), Some(ymd(2005, 1, 1)));
        assert_eq!(normalize_date(&text("2005-07")), Some(ymd(2005, 7, 1)));
        assert_eq!(normalize_date(&text("2005-13")), None);
        assert_eq!(
            normalize_date(&CellValue::IsoDateTime("2005-07-15T00:00:00".into())),
            Some(ymd(2005, 7, 15))
        );
    }

    #[test]
    fn test_offset_keeps_written_calendar_date() {
        assert_eq!(
            normalize_date(&text("2005-07-15T23:30:00-03:00")),
            Some(ymd(2005, 7, 15))
        );
    }

    #[test]
    fn test_unparseable_dates_are_none() {
        assert_eq!(normalize_date(&text("")), None);
        assert_eq!(normalize_date(&text("ontem")), None);
        assert_eq!(normalize_date(&text("31/02/2005")), None);
        assert_eq!(normalize_date(&CellValue::Empty), None);
        assert_eq!(normalize_date(&CellValue::Bool(true)), None);
    }

    #[test]
    fn test_canonical_date_is_idempotent() {
        for input in ["15/07/2005", "2005-07-15", "38548"] {
            let once = canonical_date(&text(input)).unwrap();
            let twice = canonical_date(&text(&once)).unwrap();
            assert_eq!(once, twice);
            assert_eq!(once, "2005-07-15");
        }
    }

    #[test]
    fn test_normalize_rows_uses_second_row_as_header() {
        let rows = vec![
            vec![text("Relação de alunos")],
            vec![text("Matrícula"), text("Nome"), text("Cidade"), text("Data de Nascimento")],
            vec![text("1001"), text("Ana"), text("Vitória Da Conquista"), text("15/07/2005")],
            vec![],
            vec![text("1002"), text("Bruno"), CellValue::Empty, CellValue::Number(38548.0)],
        ];

        let normalized = normalize_rows(&rows, 1);
        // header row, Ana, Bruno (blank row dropped)
        assert_eq!(normalized.len(), 3);

        assert_eq!(normalized[0].city.as_deref(), Some("cidade"));

        let ana = &normalized[1];
        assert_eq!(ana.city.as_deref(), Some("vitoria da conquista"));
        assert_eq!(ana.birth_date, Some(ymd(2005, 7, 15)));
        assert_eq!(ana.text(&["nome"]).as_deref(), Some("Ana"));
        assert_eq!(ana.fields.get("Matrícula"), Some(&text("1001")));

        let bruno = &normalized[2];
        assert_eq!(bruno.city, None);
        assert_eq!(bruno.birth_date, Some(ymd(2005, 7, 15)));
    }

    #[test]
    fn test_normalize_rows_without_header() {
        let rows = vec![vec![text("only a title")]];
        assert!(normalize_rows(&rows, 1).is_empty());
    }
}
