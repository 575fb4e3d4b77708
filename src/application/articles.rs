use crate::domain::entities::article::{Article, ArticleUpdate, NewArticle};
use crate::domain::entities::tag::Tag;
use crate::domain::error::DomainError;
use crate::domain::ports::article_repository::ArticleRepository;
use crate::domain::ports::tag_repository::TagRepository;
use crate::domain::values::article_status::ArticleStatus;
use crate::domain::values::identity::Identity;
use std::collections::HashSet;
use std::sync::Arc;

/// Full article content as submitted on create or replace.
#[derive(Debug, Clone)]
pub struct ArticleDraft {
    pub title: String,
    pub description: String,
    pub status: ArticleStatus,
    /// `None` leaves the tag set alone on replace.
    pub tags: Option<Vec<String>>,
}

impl ArticleDraft {
    fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() || self.description.trim().is_empty() {
            return Err(DomainError::InvalidInput("Missing required fields".into()));
        }
        Ok(())
    }
}

pub struct ArticleUseCase {
    articles: Arc<dyn ArticleRepository>,
    tags: Arc<dyn TagRepository>,
}

impl ArticleUseCase {
    pub fn new(articles: Arc<dyn ArticleRepository>, tags: Arc<dyn TagRepository>) -> Self {
        Self { articles, tags }
    }

    pub fn list(&self) -> Result<Vec<Article>, DomainError> {
        self.articles.get_all()
    }

    /// `None` when the article does not exist.
    pub fn tags_of(&self, id: i64) -> Result<Option<Vec<Tag>>, DomainError> {
        match self.articles.get_by_id(id)? {
            Some(article) => Ok(Some(article.tags)),
            None => Ok(None),
        }
    }

    pub fn all_tags(&self) -> Result<Vec<Tag>, DomainError> {
        self.tags.list()
    }

    pub fn create(&self, draft: ArticleDraft, author: &Identity) -> Result<Article, DomainError> {
        draft.validate()?;
        let new_article = NewArticle::new(draft.title, draft.description, draft.status, author);
        let id = self.articles.add(&new_article)?;
        tracing::info!(article_id = id, author = %author.display, "article created");

        if let Some(names) = draft.tags {
            self.articles.set_article_tags(id, &normalize_tag_names(&names))?;
        }

        self.articles
            .get_by_id(id)?
            .ok_or_else(|| DomainError::NotFound(format!("Article {id} vanished after insert")))
    }

    /// Status change. The external reference is recorded only when moving to
    /// `Documented`; going back to `Backlog` keeps whatever was stored.
    pub fn change_status(
        &self,
        id: i64,
        status: ArticleStatus,
        knowledge_article_id: Option<String>,
        editor: &Identity,
    ) -> Result<Option<Article>, DomainError> {
        let reference = knowledge_article_id
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty() && status == ArticleStatus::Documented);
        let update = ArticleUpdate {
            status: Some(status),
            knowledge_article_id: reference,
            ..Default::default()
        }
        .modified_by(editor);

        let updated = self.articles.update(id, &update)?;
        if updated.is_some() {
            tracing::info!(article_id = id, %status, editor = %editor.display, "article status changed");
        }
        Ok(updated)
    }

    /// Overwrites content and status; replaces tags only when the draft carries them.
    pub fn replace(&self, id: i64, draft: ArticleDraft, editor: &Identity) -> Result<Option<Article>, DomainError> {
        draft.validate()?;
        let update = ArticleUpdate {
            title: Some(draft.title),
            description: Some(draft.description),
            status: Some(draft.status),
            ..Default::default()
        }
        .modified_by(editor);

        if self.articles.update(id, &update)?.is_none() {
            return Ok(None);
        }
        if let Some(names) = draft.tags {
            self.articles.set_article_tags(id, &normalize_tag_names(&names))?;
        }
        self.articles.get_by_id(id)
    }

    pub fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let deleted = self.articles.delete(id)?;
        if deleted {
            tracing::info!(article_id = id, "article deleted");
        }
        Ok(deleted)
    }
}

/// Trims, drops blanks and removes repeats (first occurrence wins) so the
/// tag-set transaction never trips over its own primary key.
pub fn normalize_tag_names(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .filter(|n| seen.insert(n.to_string()))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn normalize_keeps_first_occurrence_order() {
        let out = normalize_tag_names(&names(&["urgent", "infra", "urgent", " infra "]));
        assert_eq!(out, names(&["urgent", "infra"]));
    }

    #[test]
    fn normalize_drops_blank_names() {
        let out = normalize_tag_names(&names(&["", "  ", "ops"]));
        assert_eq!(out, names(&["ops"]));
    }

    #[test]
    fn normalize_is_case_sensitive() {
        let out = normalize_tag_names(&names(&["Infra", "infra"]));
        assert_eq!(out, names(&["Infra", "infra"]));
    }

    #[test]
    fn draft_requires_title_and_description() {
        let draft = ArticleDraft {
            title: " ".into(),
            description: "d".into(),
            status: ArticleStatus::Backlog,
            tags: None,
        };
        assert!(matches!(draft.validate(), Err(DomainError::InvalidInput(_))));
    }
}
