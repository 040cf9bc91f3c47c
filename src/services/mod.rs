//! Business logic services

pub mod books;
pub mod classes;
pub mod copies;
pub mod dashboard;
pub mod imports;
pub mod librarians;
pub mod loans;
pub mod students;

use std::sync::Arc;

use crate::{
    config::ImportConfig,
    repository::{Repository, StagingStore},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub students: students::StudentsService,
    pub imports: imports::ImportService,
    pub classes: classes::ClassesService,
    pub books: books::BooksService,
    pub copies: copies::CopiesService,
    pub librarians: librarians::LibrariansService,
    pub loans: loans::LoansService,
    pub dashboard: dashboard::DashboardService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, import_config: &ImportConfig) -> Self {
        let staging: Arc<dyn StagingStore> = Arc::new(repository.clone());
        Self::with_staging(repository, import_config, staging)
    }

    /// Same as [`Services::new`] with a custom staging store for imports
    pub fn with_staging(
        repository: Repository,
        import_config: &ImportConfig,
        staging: Arc<dyn StagingStore>,
    ) -> Self {
        Self {
            students: students::StudentsService::new(repository.clone()),
            imports: imports::ImportService::new(staging, import_config),
            classes: classes::ClassesService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            copies: copies::CopiesService::new(repository.clone()),
            librarians: librarians::LibrariansService::new(repository.clone()),
            loans: loans::LoansService::new(repository.clone()),
            dashboard: dashboard::DashboardService::new(repository.clone()),
            repository,
        }
    }

    /// Check database connectivity
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        self.repository.ping().await
    }
}
