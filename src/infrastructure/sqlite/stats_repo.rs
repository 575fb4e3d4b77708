use crate::domain::error::DomainError;
use crate::domain::ports::stats_repository::{ArticleStats, StatsRepository, UserStats};
use crate::domain::values::window::StatsWindow;
use crate::infrastructure::sqlite::{lock, SharedConnection};
use rusqlite::params;
use std::collections::BTreeMap;

pub struct SqliteStatsRepo {
    conn: SharedConnection,
}

impl SqliteStatsRepo {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

impl StatsRepository for SqliteStatsRepo {
    fn get_stats(&self, window: &StatsWindow) -> Result<ArticleStats, DomainError> {
        let (start, end) = window.bounds(chrono::Utc::now());
        let conn = lock(&self.conn)?;
        conn.query_row(
            "SELECT
                COUNT(*),
                COALESCE(SUM(CASE WHEN added BETWEEN ?1 AND ?2 THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN modified_at BETWEEN ?1 AND ?2 THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN status = 'Backlog' THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN status = 'Documented' THEN 1 ELSE 0 END), 0)
             FROM articles",
            params![start, end],
            |r| {
                Ok(ArticleStats {
                    total_articles: r.get(0)?,
                    articles_added: r.get(1)?,
                    status_changes: r.get(2)?,
                    backlog_count: r.get(3)?,
                    documented_count: r.get(4)?,
                })
            },
        )
        .map_err(|e| DomainError::Database(format!("Failed to compute stats: {e}")))
    }

    fn get_user_stats(&self, window: &StatsWindow) -> Result<BTreeMap<String, UserStats>, DomainError> {
        let (start, end) = window.bounds(chrono::Utc::now());
        let conn = lock(&self.conn)?;
        let mut stmt = conn
            .prepare(
                "SELECT
                    COALESCE(author_name, ''),
                    COUNT(*),
                    COALESCE(SUM(CASE WHEN modified_at BETWEEN ?1 AND ?2 THEN 1 ELSE 0 END), 0)
                 FROM articles
                 WHERE added BETWEEN ?1 AND ?2
                 GROUP BY author_name",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![start, end], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    UserStats {
                        articles_added: row.get(1)?,
                        status_changes: row.get(2)?,
                    },
                ))
            })
            .map_err(|e| DomainError::Database(e.to_string()))?
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(rows)
    }

    fn documented_by(&self, display_name: &str) -> Result<usize, DomainError> {
        let conn = lock(&self.conn)?;
        conn.query_row(
            "SELECT COUNT(*) FROM articles WHERE modified_by_name = ?1 AND status = 'Documented'",
            params![display_name],
            |r| r.get(0),
        )
        .map_err(|e| DomainError::Database(e.to_string()))
    }
}
