use crate::domain::error::DomainError;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClearReport {
    pub articles: usize,
    pub tags: usize,
    pub links: usize,
}

pub trait MaintenanceRepository: Send + Sync {
    /// Empties articles, tags and links in one transaction. The allowlist survives.
    fn clear_all(&self) -> Result<ClearReport, DomainError>;
}
