//! Student spreadsheet import
//!
//! Reader -> normalizer -> city filter -> staging upsert, run to completion
//! for each upload. Nothing is written unless at least one row survives the
//! filter, and the write is a single statement.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::{
    config::ImportConfig,
    error::ImportError,
    models::import_report::{CityFilter, ImportRecord, ImportSummary},
    repository::StagingStore,
    spreadsheet::{normalize_rows, read_first_sheet, CellValue},
};

#[derive(Clone)]
pub struct ImportService {
    store: Arc<dyn StagingStore>,
    header_row: usize,
    filter: CityFilter,
}

impl ImportService {
    pub fn new(store: Arc<dyn StagingStore>, config: &ImportConfig) -> Self {
        Self {
            store,
            header_row: config.header_row,
            filter: CityFilter::new(&config.target_city),
        }
    }

    /// Import an uploaded workbook into the staging table
    pub async fn import_students(&self, bytes: Vec<u8>) -> Result<ImportSummary, ImportError> {
        let rows = tokio::task::spawn_blocking(move || read_first_sheet(&bytes))
            .await
            .map_err(|e| ImportError::MalformedInput(format!("reader task failed: {}", e)))??;

        let records = self.prepare(&rows)?;
        let total = records.len() as u64;

        let batch = dedupe_last(records);
        if batch.len() as u64 != total {
            tracing::warn!(
                "{} duplicate registration numbers in upload, last occurrence kept",
                total - batch.len() as u64
            );
        }

        let affected = self
            .store
            .upsert_student_imports(&batch)
            .await
            .map_err(ImportError::Persistence)?;

        tracing::info!(
            "Imported {} students ({} staging rows affected)",
            total,
            affected
        );

        Ok(ImportSummary {
            message: "Students imported successfully".to_string(),
            total_importados: total,
        })
    }

    /// Normalize and filter sheet rows into staging records
    pub fn prepare(&self, rows: &[Vec<CellValue>]) -> Result<Vec<ImportRecord>, ImportError> {
        if rows.len() <= 1 {
            return Err(ImportError::EmptySheet);
        }

        let normalized = normalize_rows(rows, self.header_row);
        let scanned = normalized.len();

        let records: Vec<ImportRecord> = normalized
            .iter()
            .filter(|row| self.filter.matches(row))
            .filter_map(|row| {
                let record = ImportRecord::from_row(row, self.filter.target());
                if record.is_none() {
                    tracing::warn!("Skipping row without registration number");
                }
                record
            })
            .collect();

        tracing::debug!(
            "{} of {} rows kept for city '{}'",
            records.len(),
            scanned,
            self.filter.target()
        );

        if records.is_empty() {
            return Err(ImportError::NoMatchingRows(self.filter.target().to_string()));
        }

        Ok(records)
    }
}

/// Collapse repeated registration numbers, keeping the last values.
/// A single upsert statement cannot touch the same key twice.
fn dedupe_last(records: Vec<ImportRecord>) -> Vec<ImportRecord> {
    let mut by_key: IndexMap<String, ImportRecord> = IndexMap::with_capacity(records.len());
    for record in records {
        by_key.insert(record.registration_number.clone(), record);
    }
    by_key.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::staging::MockStagingStore;
    use chrono::NaiveDate;
    use rust_xlsxwriter::Workbook;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn service(store: MockStagingStore) -> ImportService {
        ImportService::new(Arc::new(store), &ImportConfig::default())
    }

    fn header() -> Vec<CellValue> {
        vec![
            text("Matrícula"),
            text("Nome"),
            text("Cidade"),
            text("Data de Nascimento"),
        ]
    }

    fn workbook(rows: &[&[&str]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                sheet.write_string(r as u32, c as u16, *value).unwrap();
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_single_row_sheet_is_empty() {
        let svc = service(MockStagingStore::new());
        assert!(matches!(svc.prepare(&[]), Err(ImportError::EmptySheet)));
        assert!(matches!(
            svc.prepare(&[vec![text("title")]]),
            Err(ImportError::EmptySheet)
        ));
    }

    #[test]
    fn test_other_cities_are_dropped() {
        let svc = service(MockStagingStore::new());
        let rows = vec![
            vec![text("Alunos")],
            header(),
            vec![text("1001"), text("Ana"), text("Salvador"), text("15/07/2005")],
        ];
        assert!(matches!(svc.prepare(&rows), Err(ImportError::NoMatchingRows(_))));
    }

    #[test]
    fn test_prepare_keeps_target_city() {
        let svc = service(MockStagingStore::new());
        let rows = vec![
            vec![text("Alunos")],
            header(),
            vec![text("1001"), text("Ana"), text("Vitória Da Conquista"), text("15/07/2005")],
            vec![text("1002"), text("Caio"), text("Salvador"), text("01/02/2006")],
            vec![text("1003"), text("Duda"), text("VITORIA DA CONQUISTA "), text("sem data")],
        ];

        let records = svc.prepare(&rows).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.city == "vitoria da conquista"));
        assert_eq!(records[0].birth_date, NaiveDate::from_ymd_opt(2005, 7, 15));
        assert_eq!(records[1].registration_number, "1003");
        assert_eq!(records[1].birth_date, None);
    }

    #[test]
    fn test_custom_header_row_and_city() {
        let config = ImportConfig {
            header_row: 0,
            target_city: "Salvador".to_string(),
            ..ImportConfig::default()
        };
        let svc = ImportService::new(Arc::new(MockStagingStore::new()), &config);
        let rows = vec![
            header(),
            vec![text("1002"), text("Caio"), text("Salvador"), text("01/02/2006")],
        ];
        let records = svc.prepare(&rows).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].city, "salvador");
    }

    #[test]
    fn test_dedupe_keeps_last_value() {
        let record = |name: &str| ImportRecord {
            registration_number: "1001".to_string(),
            name: Some(name.to_string()),
            birth_date: None,
            course: None,
            entry_year: None,
            city: "vitoria da conquista".to_string(),
            race_or_color: None,
            sex: None,
        };
        let batch = dedupe_last(vec![record("Ana"), record("Ana Maria")]);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].name.as_deref(), Some("Ana Maria"));
    }

    #[tokio::test]
    async fn test_import_writes_filtered_rows_once() {
        let mut store = MockStagingStore::new();
        store
            .expect_upsert_student_imports()
            .times(1)
            .withf(|records| {
                records.len() == 1
                    && records[0].registration_number == "1001"
                    && records[0].city == "vitoria da conquista"
                    && records[0].birth_date == NaiveDate::from_ymd_opt(2005, 7, 15)
            })
            .returning(|records| Ok(records.len() as u64));

        let bytes = workbook(&[
            &["Relação de alunos"],
            &["Matrícula", "Nome", "Cidade", "Data de Nascimento"],
            &["1001", "Ana", "Vitória Da Conquista", "15/07/2005"],
            &["1002", "Caio", "Salvador", "01/02/2006"],
        ]);

        let summary = service(store).import_students(bytes).await.unwrap();
        assert_eq!(summary.total_importados, 1);
    }

    #[tokio::test]
    async fn test_count_includes_repeated_registration() {
        let mut store = MockStagingStore::new();
        store
            .expect_upsert_student_imports()
            .times(1)
            .withf(|records| records.len() == 1 && records[0].name.as_deref() == Some("Ana Maria"))
            .returning(|_| Ok(1));

        let bytes = workbook(&[
            &["Relação de alunos"],
            &["Matrícula", "Nome", "Cidade"],
            &["1001", "Ana", "Vitória da Conquista"],
            &["1001", "Ana Maria", "Vitória da Conquista"],
        ]);

        let summary = service(store).import_students(bytes).await.unwrap();
        assert_eq!(summary.total_importados, 2);
    }

    #[tokio::test]
    async fn test_no_write_when_nothing_matches() {
        let mut store = MockStagingStore::new();
        store.expect_upsert_student_imports().times(0);

        let bytes = workbook(&[
            &["Relação de alunos"],
            &["Matrícula", "Nome", "Cidade"],
            &["1001", "Ana", "Salvador"],
        ]);

        let result = service(store).import_students(bytes).await;
        assert!(matches!(result, Err(ImportError::NoMatchingRows(_))));
    }

    #[tokio::test]
    async fn test_storage_failure_is_persistence_error() {
        let mut store = MockStagingStore::new();
        store
            .expect_upsert_student_imports()
            .returning(|_| Err(sqlx::Error::PoolTimedOut));

        let bytes = workbook(&[
            &["Relação de alunos"],
            &["Matrícula", "Cidade"],
            &["1001", "Vitória da Conquista"],
        ]);

        let result = service(store).import_students(bytes).await;
        assert!(matches!(result, Err(ImportError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_garbage_upload_is_malformed() {
        let mut store = MockStagingStore::new();
        store.expect_upsert_student_imports().times(0);

        let result = service(store).import_students(b"not a workbook".to_vec()).await;
        assert!(matches!(result, Err(ImportError::MalformedInput(_))));
    }
}
