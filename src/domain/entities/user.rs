use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Allowlist entry. `username` is the bare, lowercased name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizedUser {
    pub username: String,
    pub added_at: DateTime<Utc>,
}
