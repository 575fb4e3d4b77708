//! Shared test helpers.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use kbacklog::application::articles::ArticleDraft;
use kbacklog::domain::entities::article::NewArticle;
use kbacklog::domain::values::article_status::ArticleStatus;
use kbacklog::domain::values::identity::Identity;
use kbacklog::infrastructure::sqlite::{self, SharedConnection};
use kbacklog::KnowledgeBacklog;

pub fn setup() -> KnowledgeBacklog {
    KnowledgeBacklog::open(":memory:").unwrap()
}

pub fn connection() -> SharedConnection {
    sqlite::open(":memory:").unwrap()
}

pub fn alice() -> Identity {
    Identity::from_header("CORP\\alice")
}

pub fn bob() -> Identity {
    Identity::from_header("bob")
}

pub fn draft(title: &str, description: &str, status: ArticleStatus, tags: Option<Vec<&str>>) -> ArticleDraft {
    ArticleDraft {
        title: title.to_string(),
        description: description.to_string(),
        status,
        tags: tags.map(|t| t.into_iter().map(String::from).collect()),
    }
}

pub fn new_article(title: &str, author: &Identity, added: DateTime<Utc>) -> NewArticle {
    let mut article = NewArticle::new(
        title.to_string(),
        format!("{title} description"),
        ArticleStatus::Backlog,
        author,
    );
    article.added = added;
    article
}

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

pub fn names(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}
