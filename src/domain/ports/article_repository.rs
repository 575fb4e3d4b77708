use crate::domain::entities::article::{Article, ArticleUpdate, NewArticle};
use crate::domain::error::DomainError;

pub trait ArticleRepository: Send + Sync {
    /// Every article, newest `added` first, each with its tags by name.
    fn get_all(&self) -> Result<Vec<Article>, DomainError>;
    fn get_by_id(&self, id: i64) -> Result<Option<Article>, DomainError>;
    /// Inserts without tags and returns the storage-assigned id.
    fn add(&self, article: &NewArticle) -> Result<i64, DomainError>;
    /// Applies the present fields. `InvalidInput` when nothing is present,
    /// `Ok(None)` when the id is unknown.
    fn update(&self, id: i64, update: &ArticleUpdate) -> Result<Option<Article>, DomainError>;
    fn delete(&self, id: i64) -> Result<bool, DomainError>;
    /// Replaces the full tag set in one transaction. Duplicate names fail
    /// the whole call and leave the previous set in place.
    fn set_article_tags(&self, article_id: i64, tag_names: &[String]) -> Result<(), DomainError>;
}
