use crate::domain::entities::user::AuthorizedUser;
use crate::domain::error::DomainError;
use crate::domain::ports::user_repository::UserRepository;
use crate::domain::values::identity::{bare_username, Identity};
use std::sync::Arc;

pub struct UserUseCase {
    repo: Arc<dyn UserRepository>,
}

impl UserUseCase {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub fn list(&self) -> Result<Vec<AuthorizedUser>, DomainError> {
        self.repo.list()
    }

    pub fn add(&self, username: &str) -> Result<AuthorizedUser, DomainError> {
        let name = normalize_username(username)?;
        let user = self.repo.add(&name)?;
        tracing::info!(username = %name, "authorized user added");
        Ok(user)
    }

    pub fn remove(&self, username: &str) -> Result<bool, DomainError> {
        let name = normalize_username(username)?;
        let removed = self.repo.remove(&name)?;
        if removed {
            tracing::info!(username = %name, "authorized user removed");
        }
        Ok(removed)
    }

    pub fn is_authorized(&self, who: &Identity) -> Result<bool, DomainError> {
        if who.is_anonymous() {
            return Ok(false);
        }
        self.repo.contains(&who.display)
    }

    pub fn seed(&self, usernames: &[String]) -> Result<usize, DomainError> {
        let names = usernames
            .iter()
            .filter_map(|n| normalize_username(n).ok())
            .collect::<Vec<_>>();
        self.repo.seed(&names)
    }
}

/// Lowercased bare username; a `domain\` prefix is dropped so that entries
/// line up with `Identity::display`.
pub fn normalize_username(username: &str) -> Result<String, DomainError> {
    let lowered = username.trim().to_lowercase();
    let name = bare_username(&lowered).trim();
    if name.is_empty() {
        return Err(DomainError::InvalidInput("Username is required".into()));
    }
    Ok(name.to_string())
}
