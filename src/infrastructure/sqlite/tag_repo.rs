use crate::domain::entities::tag::Tag;
use crate::domain::error::DomainError;
use crate::domain::ports::tag_repository::TagRepository;
use crate::domain::values::window::to_db_timestamp;
use crate::infrastructure::sqlite::{lock, parse_timestamp, SharedConnection};
use rusqlite::{params, Connection, OptionalExtension};

pub struct SqliteTagRepo {
    conn: SharedConnection,
}

impl SqliteTagRepo {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

pub(crate) fn row_to_tag(row: &rusqlite::Row) -> Result<Tag, rusqlite::Error> {
    let created_str: String = row.get(2)?;
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: parse_timestamp(2, &created_str)?,
    })
}

/// Lookup by exact name, inserting on miss. The returned row is re-read by
/// its storage-assigned id. Works on a plain connection or inside a
/// transaction.
pub(crate) fn get_or_create_tag(conn: &Connection, name: &str) -> Result<Tag, rusqlite::Error> {
    let existing = conn
        .query_row(
            "SELECT id, name, created_at FROM tags WHERE name = ?1",
            params![name],
            row_to_tag,
        )
        .optional()?;
    if let Some(tag) = existing {
        return Ok(tag);
    }

    conn.execute(
        "INSERT INTO tags (name, created_at) VALUES (?1, ?2)",
        params![name, to_db_timestamp(&chrono::Utc::now())],
    )?;
    let id = conn.last_insert_rowid();
    conn.query_row(
        "SELECT id, name, created_at FROM tags WHERE id = ?1",
        params![id],
        row_to_tag,
    )
}

pub(crate) fn tags_for_article(conn: &Connection, article_id: i64) -> Result<Vec<Tag>, rusqlite::Error> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.name, t.created_at
         FROM tags t
         JOIN article_tags at ON t.id = at.tag_id
         WHERE at.article_id = ?1
         ORDER BY t.name ASC",
    )?;
    let tags = stmt
        .query_map(params![article_id], row_to_tag)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tags)
}

impl TagRepository for SqliteTagRepo {
    fn get_or_create(&self, name: &str) -> Result<Tag, DomainError> {
        if name.is_empty() {
            return Err(DomainError::InvalidInput("Tag name must not be empty".into()));
        }
        let conn = lock(&self.conn)?;
        get_or_create_tag(&conn, name)
            .map_err(|e| DomainError::Database(format!("Failed to resolve tag '{name}': {e}")))
    }

    fn list(&self) -> Result<Vec<Tag>, DomainError> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn
            .prepare("SELECT id, name, created_at FROM tags ORDER BY name ASC")
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tags = stmt
            .query_map([], row_to_tag)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(tags)
    }

    fn tags_for_article(&self, article_id: i64) -> Result<Vec<Tag>, DomainError> {
        let conn = lock(&self.conn)?;
        tags_for_article(&conn, article_id).map_err(|e| DomainError::Database(e.to_string()))
    }
}
