use crate::domain::entities::tag::Tag;
use crate::domain::error::DomainError;

pub trait TagRepository: Send + Sync {
    /// Returns the existing tag with exactly this name, or creates it.
    fn get_or_create(&self, name: &str) -> Result<Tag, DomainError>;
    fn list(&self) -> Result<Vec<Tag>, DomainError>;
    fn tags_for_article(&self, article_id: i64) -> Result<Vec<Tag>, DomainError>;
}
