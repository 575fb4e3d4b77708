use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<String> for DomainError {
    fn from(s: String) -> Self {
        DomainError::Database(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_errors_are_storage_errors() {
        let err: DomainError = String::from("disk I/O error").into();
        assert!(matches!(err, DomainError::Database(ref m) if m == "disk I/O error"));
    }
}
