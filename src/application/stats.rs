use crate::domain::error::DomainError;
use crate::domain::ports::stats_repository::{ArticleStats, StatsRepository, UserStats, UserSummary};
use crate::domain::values::identity::Identity;
use crate::domain::values::window::StatsWindow;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    #[serde(rename = "Backlog")]
    pub backlog: usize,
    #[serde(rename = "Documented")]
    pub documented: usize,
}

/// Admin dashboard payload: the flat counters plus the per-author table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    #[serde(flatten)]
    pub stats: ArticleStats,
    pub status_breakdown: StatusBreakdown,
    pub user_stats: BTreeMap<String, UserStats>,
}

pub struct StatsUseCase {
    repo: Arc<dyn StatsRepository>,
}

impl StatsUseCase {
    pub fn new(repo: Arc<dyn StatsRepository>) -> Self {
        Self { repo }
    }

    pub fn stats(&self, window: &StatsWindow) -> Result<ArticleStats, DomainError> {
        self.repo.get_stats(window)
    }

    pub fn user_stats(&self, window: &StatsWindow) -> Result<BTreeMap<String, UserStats>, DomainError> {
        self.repo.get_user_stats(window)
    }

    pub fn report(&self, window: &StatsWindow) -> Result<StatsReport, DomainError> {
        let stats = self.repo.get_stats(window)?;
        let user_stats = self.repo.get_user_stats(window)?;
        Ok(StatsReport {
            status_breakdown: StatusBreakdown {
                backlog: stats.backlog_count,
                documented: stats.documented_count,
            },
            stats,
            user_stats,
        })
    }

    /// The caller's own numbers over the whole history.
    pub fn summary_for(&self, who: &Identity) -> Result<UserSummary, DomainError> {
        let mut per_user = self.repo.get_user_stats(&StatsWindow::default())?;
        let own = per_user.remove(&who.display).unwrap_or_default();
        Ok(UserSummary {
            articles_added: own.articles_added,
            status_changes: own.status_changes,
            documented_count: self.repo.documented_by(&who.display)?,
        })
    }
}
