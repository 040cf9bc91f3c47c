//! Student spreadsheet import models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::spreadsheet::{fold_text, NormalizedRow};

/// Header names (folded) for each staging column
const REGISTRATION_HEADERS: &[&str] = &["matricula", "registration_number"];
const NAME_HEADERS: &[&str] = &["nome", "nome do aluno", "name"];
const COURSE_HEADERS: &[&str] = &["curso", "course"];
const ENTRY_YEAR_HEADERS: &[&str] = &["ano de ingresso", "ano ingresso", "ingresso", "entry_year"];
const RACE_HEADERS: &[&str] = &["raca/cor", "cor/raca", "raca", "cor", "race_or_color"];
const SEX_HEADERS: &[&str] = &["sexo", "genero", "sex"];

/// Row persisted in the `student_imports` staging table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ImportRecord {
    pub registration_number: String,
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub course: Option<String>,
    pub entry_year: Option<i32>,
    pub city: String,
    pub race_or_color: Option<String>,
    pub sex: Option<String>,
}

impl ImportRecord {
    /// Build a staging record from a row that already passed the city filter.
    /// Rows without a registration number yield `None`.
    pub fn from_row(row: &NormalizedRow, city: &str) -> Option<Self> {
        let registration_number = row.text(REGISTRATION_HEADERS)?;
        Some(Self {
            registration_number,
            name: row.text(NAME_HEADERS),
            birth_date: row.birth_date,
            course: row.text(COURSE_HEADERS),
            entry_year: row.get(ENTRY_YEAR_HEADERS).and_then(|c| c.as_integer()),
            city: city.to_string(),
            race_or_color: row.text(RACE_HEADERS),
            sex: row.text(SEX_HEADERS),
        })
    }
}

/// Import success body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportSummary {
    pub message: String,
    /// Rows written after the city filter
    pub total_importados: u64,
}

/// City predicate applied before writing
#[derive(Debug, Clone)]
pub struct CityFilter {
    target: String,
}

impl CityFilter {
    pub fn new(target: &str) -> Self {
        Self {
            target: fold_text(target),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn matches(&self, row: &NormalizedRow) -> bool {
        row.city.as_deref() == Some(self.target.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::{normalize_rows, CellValue};

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn sheet() -> Vec<Vec<CellValue>> {
        vec![
            vec![text("Alunos matriculados")],
            vec![
                text("Matrícula"),
                text("Nome"),
                text("Cidade"),
                text("Data de Nascimento"),
                text("Curso"),
                text("Ano de Ingresso"),
                text("Raça/Cor"),
                text("Sexo"),
            ],
            vec![
                CellValue::Number(1001.0),
                text("Ana"),
                text("Vitória Da Conquista"),
                text("15/07/2005"),
                text("Informática"),
                CellValue::Number(2022.0),
                text("Parda"),
                text("F"),
            ],
            vec![text("1002"), text("Caio"), text("Salvador")],
        ]
    }

    #[test]
    fn test_city_filter_is_folded() {
        let filter = CityFilter::new(" Vitória da Conquista ");
        assert_eq!(filter.target(), "vitoria da conquista");

        let rows = normalize_rows(&sheet(), 1);
        let kept: Vec<_> = rows.iter().filter(|r| filter.matches(r)).collect();
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_record_from_row() {
        let rows = normalize_rows(&sheet(), 1);
        let record = ImportRecord::from_row(&rows[1], "vitoria da conquista").unwrap();

        assert_eq!(record.registration_number, "1001");
        assert_eq!(record.name.as_deref(), Some("Ana"));
        assert_eq!(record.birth_date, NaiveDate::from_ymd_opt(2005, 7, 15));
        assert_eq!(record.course.as_deref(), Some("Informática"));
        assert_eq!(record.entry_year, Some(2022));
        assert_eq!(record.city, "vitoria da conquista");
        assert_eq!(record.race_or_color.as_deref(), Some("Parda"));
        assert_eq!(record.sex.as_deref(), Some("F"));
    }

    #[test]
    fn test_record_requires_registration_number() {
        let rows = normalize_rows(
            &[
                vec![],
                vec![text("Nome"), text("Cidade")],
                vec![text("Ana"), text("Vitória da Conquista")],
            ],
            1,
        );
        assert!(ImportRecord::from_row(&rows[1], "vitoria da conquista").is_none());
    }
}
