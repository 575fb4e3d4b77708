use crate::domain::error::DomainError;
use crate::domain::values::window::StatsWindow;
use serde::Serialize;
use std::collections::BTreeMap;

/// `total_articles`, `backlog_count` and `documented_count` are a snapshot
/// of the whole table; only `articles_added` and `status_changes` honour
/// the window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleStats {
    pub total_articles: usize,
    pub articles_added: usize,
    pub status_changes: usize,
    pub backlog_count: usize,
    pub documented_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub articles_added: usize,
    pub status_changes: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub articles_added: usize,
    pub status_changes: usize,
    pub documented_count: usize,
}

pub trait StatsRepository: Send + Sync {
    fn get_stats(&self, window: &StatsWindow) -> Result<ArticleStats, DomainError>;
    /// Keyed by author display name, restricted to articles added in the window.
    fn get_user_stats(&self, window: &StatsWindow) -> Result<BTreeMap<String, UserStats>, DomainError>;
    /// Count of `Documented` articles last modified by `display_name`.
    fn documented_by(&self, display_name: &str) -> Result<usize, DomainError>;
}
