use crate::domain::entities::user::AuthorizedUser;
use crate::domain::error::DomainError;
use crate::domain::ports::user_repository::UserRepository;
use crate::domain::values::window::to_db_timestamp;
use crate::infrastructure::sqlite::{lock, parse_timestamp, SharedConnection};
use rusqlite::params;

pub struct SqliteUserRepo {
    conn: SharedConnection,
}

impl SqliteUserRepo {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn row_to_user(row: &rusqlite::Row) -> Result<AuthorizedUser, rusqlite::Error> {
        let added_str: String = row.get(1)?;
        Ok(AuthorizedUser {
            username: row.get(0)?,
            added_at: parse_timestamp(1, &added_str)?,
        })
    }
}

impl UserRepository for SqliteUserRepo {
    fn list(&self) -> Result<Vec<AuthorizedUser>, DomainError> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn
            .prepare("SELECT username, added_at FROM authorized_users ORDER BY username ASC")
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let users = stmt
            .query_map([], Self::row_to_user)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(users)
    }

    fn add(&self, username: &str) -> Result<AuthorizedUser, DomainError> {
        let conn = lock(&self.conn)?;
        let user = AuthorizedUser {
            username: username.to_string(),
            added_at: chrono::Utc::now(),
        };
        let rows = conn
            .execute(
                "INSERT OR IGNORE INTO authorized_users (username, added_at) VALUES (?1, ?2)",
                params![user.username, to_db_timestamp(&user.added_at)],
            )
            .map_err(|e| DomainError::Database(format!("Failed to add user: {e}")))?;
        if rows == 0 {
            return Err(DomainError::Conflict(format!(
                "User '{username}' is already authorized"
            )));
        }
        Ok(user)
    }

    fn remove(&self, username: &str) -> Result<bool, DomainError> {
        let conn = lock(&self.conn)?;
        let rows = conn
            .execute(
                "DELETE FROM authorized_users WHERE username = ?1",
                params![username],
            )
            .map_err(|e| DomainError::Database(format!("Failed to remove user: {e}")))?;
        Ok(rows > 0)
    }

    fn contains(&self, username: &str) -> Result<bool, DomainError> {
        let conn = lock(&self.conn)?;
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM authorized_users WHERE username = ?1)",
            params![username],
            |r| r.get(0),
        )
        .map_err(|e| DomainError::Database(e.to_string()))
    }

    fn seed(&self, usernames: &[String]) -> Result<usize, DomainError> {
        let mut conn = lock(&self.conn)?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let now = to_db_timestamp(&chrono::Utc::now());
        let mut inserted = 0;
        for name in usernames {
            inserted += tx
                .execute(
                    "INSERT OR IGNORE INTO authorized_users (username, added_at) VALUES (?1, ?2)",
                    params![name, now],
                )
                .map_err(|e| DomainError::Database(format!("Failed to seed user '{name}': {e}")))?;
        }
        tx.commit()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(inserted)
    }
}
