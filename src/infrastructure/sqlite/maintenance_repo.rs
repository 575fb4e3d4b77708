use crate::domain::error::DomainError;
use crate::domain::ports::maintenance::{ClearReport, MaintenanceRepository};
use crate::infrastructure::sqlite::{lock, SharedConnection};

pub struct SqliteMaintenanceRepo {
    conn: SharedConnection,
}

impl SqliteMaintenanceRepo {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

impl MaintenanceRepository for SqliteMaintenanceRepo {
    fn clear_all(&self) -> Result<ClearReport, DomainError> {
        let mut conn = lock(&self.conn)?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        // Links first so the count is not swallowed by the cascades.
        let links = tx
            .execute("DELETE FROM article_tags", [])
            .map_err(|e| DomainError::Database(format!("Failed to clear links: {e}")))?;
        let articles = tx
            .execute("DELETE FROM articles", [])
            .map_err(|e| DomainError::Database(format!("Failed to clear articles: {e}")))?;
        let tags = tx
            .execute("DELETE FROM tags", [])
            .map_err(|e| DomainError::Database(format!("Failed to clear tags: {e}")))?;
        tx.commit()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(ClearReport {
            articles,
            tags,
            links,
        })
    }
}
