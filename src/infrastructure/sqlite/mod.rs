pub mod article_repo;
pub mod maintenance_repo;
pub mod migrations;
pub mod stats_repo;
pub mod tag_repo;
pub mod user_repo;

use crate::domain::error::DomainError;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

/// The one connection opened at start and shared by every repository.
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Opens the database, switches on foreign keys (the link cascades depend
/// on it) and creates the schema if missing.
pub fn open(db_path: &str) -> Result<SharedConnection, DomainError> {
    let conn = Connection::open(db_path).map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
    conn.pragma_update(None, "journal_mode", "WAL")
        .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(|e| DomainError::Database(format!("Foreign key pragma error: {e}")))?;
    migrations::run_migrations(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

pub(crate) fn lock(conn: &SharedConnection) -> Result<MutexGuard<'_, Connection>, DomainError> {
    conn.lock().map_err(|e| DomainError::Database(e.to_string()))
}

pub(crate) fn parse_timestamp(idx: usize, value: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
