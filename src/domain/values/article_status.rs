use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workflow position of an article. Serialized with the capitalized names
/// stored in the `status` column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArticleStatus {
    #[default]
    Backlog,
    Documented,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Backlog => "Backlog",
            ArticleStatus::Documented => "Documented",
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ArticleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "backlog" => Ok(ArticleStatus::Backlog),
            "documented" => Ok(ArticleStatus::Documented),
            _ => Err(format!(
                "Unknown status: '{s}'. Use 'Backlog' or 'Documented'"
            )),
        }
    }
}
