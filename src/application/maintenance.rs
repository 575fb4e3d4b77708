use crate::domain::error::DomainError;
use crate::domain::ports::maintenance::{ClearReport, MaintenanceRepository};
use std::sync::Arc;

pub struct MaintenanceUseCase {
    repo: Arc<dyn MaintenanceRepository>,
}

impl MaintenanceUseCase {
    pub fn new(repo: Arc<dyn MaintenanceRepository>) -> Self {
        Self { repo }
    }

    pub fn clear_all(&self) -> Result<ClearReport, DomainError> {
        let report = self.repo.clear_all()?;
        tracing::warn!(
            articles = report.articles,
            tags = report.tags,
            links = report.links,
            "database cleared"
        );
        Ok(report)
    }
}
