mod common;

use common::{alice, draft, setup};
use kbacklog::domain::error::DomainError;
use kbacklog::domain::values::article_status::ArticleStatus;
use kbacklog::domain::values::identity::Identity;
use kbacklog::KnowledgeBacklog;

#[tokio::test]
async fn test_add_list_remove() {
    let kb = setup();
    kb.add_user("Zed").await.unwrap();
    kb.add_user("CORP\\alice").await.unwrap();

    let users: Vec<String> = kb.users().await.unwrap().into_iter().map(|u| u.username).collect();
    assert_eq!(users, vec!["alice", "zed"]);

    assert!(kb.remove_user("ZED").await.unwrap());
    assert!(!kb.remove_user("zed").await.unwrap());
    assert_eq!(kb.users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_user_conflicts() {
    let kb = setup();
    kb.add_user("alice").await.unwrap();
    let result = kb.add_user("Alice").await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));
}

#[tokio::test]
async fn test_blank_username_rejected() {
    let kb = setup();
    assert!(matches!(kb.add_user("  ").await, Err(DomainError::InvalidInput(_))));
}

#[tokio::test]
async fn test_authorization_uses_bare_username() {
    let kb = setup();
    kb.add_user("alice").await.unwrap();

    assert!(kb.is_authorized(&alice()).await.unwrap());
    assert!(kb.is_authorized(&Identity::from_header("other/ALICE")).await.unwrap());
    assert!(!kb.is_authorized(&Identity::from_header("bob")).await.unwrap());
    assert!(!kb.is_authorized(&Identity::from_header("")).await.unwrap());
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let kb = setup();
    let seed = vec!["alice".to_string(), "Bob".to_string(), "".to_string()];
    assert_eq!(kb.seed_users(seed.clone()).await.unwrap(), 2);
    assert_eq!(kb.seed_users(seed).await.unwrap(), 0);
    assert_eq!(kb.users().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_clear_keeps_allowlist() {
    let kb = setup();
    kb.add_user("alice").await.unwrap();
    kb.create_article(draft("T", "D", ArticleStatus::Backlog, Some(vec!["a", "b"])), &alice())
        .await
        .unwrap();
    kb.create_article(draft("U", "D", ArticleStatus::Backlog, Some(vec!["a"])), &alice())
        .await
        .unwrap();

    let report = kb.clear_database().await.unwrap();
    assert_eq!(report.articles, 2);
    assert_eq!(report.tags, 2);
    assert_eq!(report.links, 3);

    assert!(kb.articles().await.unwrap().is_empty());
    assert!(kb.tags().await.unwrap().is_empty());
    assert_eq!(kb.users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("knowledge.db");
    let path = path.to_str().unwrap();

    {
        let kb = KnowledgeBacklog::open(path).unwrap();
        kb.add_user("alice").await.unwrap();
        kb.create_article(draft("T", "D", ArticleStatus::Backlog, Some(vec!["x"])), &alice())
            .await
            .unwrap();
    }

    let kb = KnowledgeBacklog::open(path).unwrap();
    let articles = kb.articles().await.unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].tag_names(), vec!["x"]);
    assert!(kb.is_authorized(&alice()).await.unwrap());
}
