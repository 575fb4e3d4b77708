use crate::domain::entities::article::{Article, ArticleUpdate, NewArticle};
use crate::domain::entities::tag::Tag;
use crate::domain::error::DomainError;
use crate::domain::ports::article_repository::ArticleRepository;
use crate::domain::values::article_status::ArticleStatus;
use crate::domain::values::window::to_db_timestamp;
use crate::infrastructure::sqlite::tag_repo::{get_or_create_tag, tags_for_article};
use crate::infrastructure::sqlite::{lock, parse_timestamp, SharedConnection};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;

const SELECT_COLS: &str = "id, title, description, status, added, author, author_name, modified_by, modified_by_name, modified_at, knowledge_article_id";

pub struct SqliteArticleRepo {
    conn: SharedConnection,
}

impl SqliteArticleRepo {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Maps the article columns; tags are attached by the caller.
    fn row_to_article(row: &rusqlite::Row) -> Result<Article, rusqlite::Error> {
        let status_str: String = row.get(3)?;
        let added_str: String = row.get(4)?;
        let modified_str: Option<String> = row.get(9)?;

        let status: ArticleStatus = status_str.parse().map_err(|e: String| {
            rusqlite::Error::FromSqlConversionFailure(3, Type::Text, e.into())
        })?;

        Ok(Article {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            status,
            added: parse_timestamp(4, &added_str)?,
            author: row.get(5)?,
            author_name: row.get(6)?,
            modified_by: row.get(7)?,
            modified_by_name: row.get(8)?,
            modified_at: modified_str.map(|s| parse_timestamp(9, &s)).transpose()?,
            knowledge_article_id: row.get(10)?,
            tags: Vec::new(),
        })
    }

    fn fetch_one(conn: &Connection, id: i64) -> Result<Option<Article>, rusqlite::Error> {
        let sql = format!("SELECT {} FROM articles WHERE id = ?1", SELECT_COLS);
        let article = conn
            .query_row(&sql, params![id], Self::row_to_article)
            .optional()?;
        match article {
            Some(mut article) => {
                article.tags = tags_for_article(conn, id)?;
                Ok(Some(article))
            }
            None => Ok(None),
        }
    }

    /// All links in one pass, grouped per article and ordered by tag name.
    fn all_links(conn: &Connection) -> Result<HashMap<i64, Vec<Tag>>, rusqlite::Error> {
        let mut stmt = conn.prepare(
            "SELECT at.article_id, t.id, t.name, t.created_at
             FROM article_tags at
             JOIN tags t ON t.id = at.tag_id
             ORDER BY t.name ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            let article_id: i64 = row.get(0)?;
            let created_str: String = row.get(3)?;
            Ok((
                article_id,
                Tag {
                    id: row.get(1)?,
                    name: row.get(2)?,
                    created_at: parse_timestamp(3, &created_str)?,
                },
            ))
        })?;

        let mut by_article: HashMap<i64, Vec<Tag>> = HashMap::new();
        for row in rows {
            let (article_id, tag) = row?;
            by_article.entry(article_id).or_default().push(tag);
        }
        Ok(by_article)
    }

    fn replace_links(conn: &Connection, article_id: i64, tag_names: &[String]) -> Result<(), rusqlite::Error> {
        conn.execute(
            "DELETE FROM article_tags WHERE article_id = ?1",
            params![article_id],
        )?;
        for name in tag_names {
            let tag = get_or_create_tag(conn, name)?;
            conn.execute(
                "INSERT INTO article_tags (article_id, tag_id) VALUES (?1, ?2)",
                params![article_id, tag.id],
            )?;
        }
        Ok(())
    }
}

impl ArticleRepository for SqliteArticleRepo {
    fn get_all(&self) -> Result<Vec<Article>, DomainError> {
        let conn = lock(&self.conn)?;
        let sql = format!(
            "SELECT {} FROM articles ORDER BY added DESC, id DESC",
            SELECT_COLS
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut articles = stmt
            .query_map([], Self::row_to_article)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let mut links = Self::all_links(&conn).map_err(|e| DomainError::Database(e.to_string()))?;
        for article in &mut articles {
            article.tags = links.remove(&article.id).unwrap_or_default();
        }
        Ok(articles)
    }

    fn get_by_id(&self, id: i64) -> Result<Option<Article>, DomainError> {
        let conn = lock(&self.conn)?;
        Self::fetch_one(&conn, id).map_err(|e| DomainError::Database(e.to_string()))
    }

    fn add(&self, article: &NewArticle) -> Result<i64, DomainError> {
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO articles (title, description, status, added, author, author_name)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                article.title,
                article.description,
                article.status.as_str(),
                to_db_timestamp(&article.added),
                article.author,
                article.author_name,
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to add article: {e}")))?;
        Ok(conn.last_insert_rowid())
    }

    fn update(&self, id: i64, update: &ArticleUpdate) -> Result<Option<Article>, DomainError> {
        if update.is_empty() {
            return Err(DomainError::InvalidInput("No fields to update".into()));
        }

        let mut assignments: Vec<String> = Vec::new();
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
        let mut set = |column: &str, value: Box<dyn rusqlite::types::ToSql>| {
            param_values.push(value);
            assignments.push(format!("{column} = ?{}", param_values.len()));
        };

        if let Some(title) = &update.title {
            set("title", Box::new(title.clone()));
        }
        if let Some(description) = &update.description {
            set("description", Box::new(description.clone()));
        }
        if let Some(status) = update.status {
            set("status", Box::new(status.as_str()));
        }
        if let Some(modified_by) = &update.modified_by {
            set("modified_by", Box::new(modified_by.clone()));
        }
        if let Some(modified_by_name) = &update.modified_by_name {
            set("modified_by_name", Box::new(modified_by_name.clone()));
        }
        if let Some(modified_at) = &update.modified_at {
            set("modified_at", Box::new(to_db_timestamp(modified_at)));
        }
        if let Some(reference) = &update.knowledge_article_id {
            set("knowledge_article_id", Box::new(reference.clone()));
        }

        let sql = format!(
            "UPDATE articles SET {} WHERE id = ?{}",
            assignments.join(", "),
            param_values.len() + 1
        );
        param_values.push(Box::new(id));

        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        let conn = lock(&self.conn)?;
        let rows = conn
            .execute(&sql, params_refs.as_slice())
            .map_err(|e| DomainError::Database(format!("Failed to update article {id}: {e}")))?;
        if rows == 0 {
            return Ok(None);
        }
        Self::fetch_one(&conn, id).map_err(|e| DomainError::Database(e.to_string()))
    }

    fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let conn = lock(&self.conn)?;
        let rows = conn
            .execute("DELETE FROM articles WHERE id = ?1", params![id])
            .map_err(|e| DomainError::Database(format!("Failed to delete article {id}: {e}")))?;
        Ok(rows > 0)
    }

    fn set_article_tags(&self, article_id: i64, tag_names: &[String]) -> Result<(), DomainError> {
        if tag_names.iter().any(|name| name.is_empty()) {
            return Err(DomainError::InvalidInput("Tag name must not be empty".into()));
        }

        let mut conn = lock(&self.conn)?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        // Dropping `tx` on the error path rolls everything back.
        Self::replace_links(&tx, article_id, tag_names).map_err(|e| {
            DomainError::Database(format!("Failed to set tags for article {article_id}: {e}"))
        })?;
        tx.commit()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(())
    }
}

