use crate::domain::entities::user::AuthorizedUser;
use crate::domain::error::DomainError;

pub trait UserRepository: Send + Sync {
    fn list(&self) -> Result<Vec<AuthorizedUser>, DomainError>;
    /// `Conflict` if the name is already present.
    fn add(&self, username: &str) -> Result<AuthorizedUser, DomainError>;
    fn remove(&self, username: &str) -> Result<bool, DomainError>;
    fn contains(&self, username: &str) -> Result<bool, DomainError>;
    /// Insert-or-ignore; returns how many names were new.
    fn seed(&self, usernames: &[String]) -> Result<usize, DomainError>;
}
