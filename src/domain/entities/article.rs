use crate::domain::entities::tag::Tag;
use crate::domain::values::article_status::ArticleStatus;
use crate::domain::values::identity::Identity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: ArticleStatus,
    pub added: DateTime<Utc>,
    pub author: Option<String>,
    pub author_name: Option<String>,
    pub modified_by: Option<String>,
    pub modified_by_name: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
    pub knowledge_article_id: Option<String>,
    pub tags: Vec<Tag>,
}

impl Article {
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Insert payload. The id is assigned by storage.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub description: String,
    pub status: ArticleStatus,
    pub added: DateTime<Utc>,
    pub author: String,
    pub author_name: String,
}

impl NewArticle {
    pub fn new(title: String, description: String, status: ArticleStatus, author: &Identity) -> Self {
        Self {
            title,
            description,
            status,
            added: Utc::now(),
            author: author.raw.clone(),
            author_name: author.display.clone(),
        }
    }
}

/// Partial update. `None` fields are left untouched, never nulled.
#[derive(Debug, Clone, Default)]
pub struct ArticleUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ArticleStatus>,
    pub modified_by: Option<String>,
    pub modified_by_name: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
    pub knowledge_article_id: Option<String>,
}

impl ArticleUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.modified_by.is_none()
            && self.modified_by_name.is_none()
            && self.modified_at.is_none()
            && self.knowledge_article_id.is_none()
    }

    /// Stamps the modification attribution fields with `who` at the current instant.
    pub fn modified_by(mut self, who: &Identity) -> Self {
        self.modified_by = Some(who.raw.clone());
        self.modified_by_name = Some(who.display.clone());
        self.modified_at = Some(Utc::now());
        self
    }
}
