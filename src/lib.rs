pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::articles::{ArticleDraft, ArticleUseCase};
use crate::application::maintenance::MaintenanceUseCase;
use crate::application::stats::{StatsReport, StatsUseCase};
use crate::application::users::UserUseCase;
use crate::domain::entities::article::Article;
use crate::domain::entities::tag::Tag;
use crate::domain::entities::user::AuthorizedUser;
use crate::domain::error::DomainError;
use crate::domain::ports::article_repository::ArticleRepository;
use crate::domain::ports::maintenance::{ClearReport, MaintenanceRepository};
use crate::domain::ports::stats_repository::{ArticleStats, StatsRepository, UserStats, UserSummary};
use crate::domain::ports::tag_repository::TagRepository;
use crate::domain::ports::user_repository::UserRepository;
use crate::domain::values::article_status::ArticleStatus;
use crate::domain::values::identity::Identity;
use crate::domain::values::window::StatsWindow;
use crate::infrastructure::sqlite::article_repo::SqliteArticleRepo;
use crate::infrastructure::sqlite::maintenance_repo::SqliteMaintenanceRepo;
use crate::infrastructure::sqlite::stats_repo::SqliteStatsRepo;
use crate::infrastructure::sqlite::tag_repo::SqliteTagRepo;
use crate::infrastructure::sqlite::user_repo::SqliteUserRepo;
use crate::infrastructure::sqlite::SharedConnection;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Application facade used by the HTTP handlers and the CLI.
///
/// Every operation runs its storage work on the blocking pool and is awaited
/// to completion; all repositories share the single connection.
pub struct KnowledgeBacklog {
    articles_uc: Arc<ArticleUseCase>,
    stats_uc: Arc<StatsUseCase>,
    users_uc: Arc<UserUseCase>,
    maintenance_uc: Arc<MaintenanceUseCase>,
}

impl KnowledgeBacklog {
    pub fn open(db_path: &str) -> Result<Self, DomainError> {
        let conn = infrastructure::sqlite::open(db_path)?;
        tracing::info!(db_path, "database opened");
        Ok(Self::with_connection(conn))
    }

    pub fn with_connection(conn: SharedConnection) -> Self {
        let article_repo: Arc<dyn ArticleRepository> = Arc::new(SqliteArticleRepo::new(conn.clone()));
        let tag_repo: Arc<dyn TagRepository> = Arc::new(SqliteTagRepo::new(conn.clone()));
        let stats_repo: Arc<dyn StatsRepository> = Arc::new(SqliteStatsRepo::new(conn.clone()));
        let user_repo: Arc<dyn UserRepository> = Arc::new(SqliteUserRepo::new(conn.clone()));
        let maintenance_repo: Arc<dyn MaintenanceRepository> = Arc::new(SqliteMaintenanceRepo::new(conn));

        Self {
            articles_uc: Arc::new(ArticleUseCase::new(article_repo, tag_repo)),
            stats_uc: Arc::new(StatsUseCase::new(stats_repo)),
            users_uc: Arc::new(UserUseCase::new(user_repo)),
            maintenance_uc: Arc::new(MaintenanceUseCase::new(maintenance_repo)),
        }
    }

    // Articles

    pub async fn articles(&self) -> Result<Vec<Article>, DomainError> {
        let uc = self.articles_uc.clone();
        blocking(move || uc.list()).await
    }

    pub async fn article_tags(&self, id: i64) -> Result<Option<Vec<Tag>>, DomainError> {
        let uc = self.articles_uc.clone();
        blocking(move || uc.tags_of(id)).await
    }

    pub async fn create_article(&self, draft: ArticleDraft, author: &Identity) -> Result<Article, DomainError> {
        let uc = self.articles_uc.clone();
        let author = author.clone();
        blocking(move || uc.create(draft, &author)).await
    }

    pub async fn change_status(
        &self,
        id: i64,
        status: ArticleStatus,
        knowledge_article_id: Option<String>,
        editor: &Identity,
    ) -> Result<Option<Article>, DomainError> {
        let uc = self.articles_uc.clone();
        let editor = editor.clone();
        blocking(move || uc.change_status(id, status, knowledge_article_id, &editor)).await
    }

    pub async fn replace_article(
        &self,
        id: i64,
        draft: ArticleDraft,
        editor: &Identity,
    ) -> Result<Option<Article>, DomainError> {
        let uc = self.articles_uc.clone();
        let editor = editor.clone();
        blocking(move || uc.replace(id, draft, &editor)).await
    }

    pub async fn delete_article(&self, id: i64) -> Result<bool, DomainError> {
        let uc = self.articles_uc.clone();
        blocking(move || uc.delete(id)).await
    }

    pub async fn tags(&self) -> Result<Vec<Tag>, DomainError> {
        let uc = self.articles_uc.clone();
        blocking(move || uc.all_tags()).await
    }

    // Statistics

    pub async fn stats(&self, window: StatsWindow) -> Result<ArticleStats, DomainError> {
        let uc = self.stats_uc.clone();
        blocking(move || uc.stats(&window)).await
    }

    pub async fn user_stats(&self, window: StatsWindow) -> Result<BTreeMap<String, UserStats>, DomainError> {
        let uc = self.stats_uc.clone();
        blocking(move || uc.user_stats(&window)).await
    }

    pub async fn stats_report(&self, window: StatsWindow) -> Result<StatsReport, DomainError> {
        let uc = self.stats_uc.clone();
        blocking(move || uc.report(&window)).await
    }

    pub async fn user_summary(&self, who: &Identity) -> Result<UserSummary, DomainError> {
        let uc = self.stats_uc.clone();
        let who = who.clone();
        blocking(move || uc.summary_for(&who)).await
    }

    // Allowlist

    pub async fn users(&self) -> Result<Vec<AuthorizedUser>, DomainError> {
        let uc = self.users_uc.clone();
        blocking(move || uc.list()).await
    }

    pub async fn add_user(&self, username: &str) -> Result<AuthorizedUser, DomainError> {
        let uc = self.users_uc.clone();
        let username = username.to_string();
        blocking(move || uc.add(&username)).await
    }

    pub async fn remove_user(&self, username: &str) -> Result<bool, DomainError> {
        let uc = self.users_uc.clone();
        let username = username.to_string();
        blocking(move || uc.remove(&username)).await
    }

    pub async fn is_authorized(&self, who: &Identity) -> Result<bool, DomainError> {
        let uc = self.users_uc.clone();
        let who = who.clone();
        blocking(move || uc.is_authorized(&who)).await
    }

    pub async fn seed_users(&self, usernames: Vec<String>) -> Result<usize, DomainError> {
        let uc = self.users_uc.clone();
        blocking(move || uc.seed(&usernames)).await
    }

    // Maintenance

    pub async fn clear_database(&self) -> Result<ClearReport, DomainError> {
        let uc = self.maintenance_uc.clone();
        blocking(move || uc.clear_all()).await
    }
}

async fn blocking<T, F>(f: F) -> Result<T, DomainError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| DomainError::Database(format!("Storage task failed: {e}")))?
}
