mod common;

use common::{alice, at, bob, connection, draft, new_article, setup};
use kbacklog::domain::entities::article::ArticleUpdate;
use kbacklog::domain::error::DomainError;
use kbacklog::domain::ports::article_repository::ArticleRepository;
use kbacklog::domain::values::article_status::ArticleStatus;
use kbacklog::infrastructure::sqlite::article_repo::SqliteArticleRepo;

#[test]
fn test_add_then_get_matches_input() {
    let repo = SqliteArticleRepo::new(connection());
    let input = new_article("Title", &alice(), at(2024, 3, 1));
    let id = repo.add(&input).unwrap();

    let stored = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(stored.id, id);
    assert_eq!(stored.title, input.title);
    assert_eq!(stored.description, input.description);
    assert_eq!(stored.status, ArticleStatus::Backlog);
    assert_eq!(stored.added, input.added);
    assert_eq!(stored.author.as_deref(), Some("corp\\alice"));
    assert_eq!(stored.author_name.as_deref(), Some("alice"));
    assert!(stored.modified_at.is_none());
    assert!(stored.knowledge_article_id.is_none());
    assert!(stored.tags.is_empty());
}

#[test]
fn test_ids_are_assigned_by_storage() {
    let repo = SqliteArticleRepo::new(connection());
    let first = repo.add(&new_article("A", &alice(), at(2024, 3, 1))).unwrap();
    let second = repo.add(&new_article("B", &alice(), at(2024, 3, 1))).unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_get_missing_returns_none() {
    let repo = SqliteArticleRepo::new(connection());
    assert!(repo.get_by_id(42).unwrap().is_none());
}

#[test]
fn test_get_all_newest_first_with_empty_tags() {
    let repo = SqliteArticleRepo::new(connection());
    repo.add(&new_article("old", &alice(), at(2024, 1, 1))).unwrap();
    let newest = repo.add(&new_article("new", &alice(), at(2024, 6, 1))).unwrap();
    repo.add(&new_article("mid", &alice(), at(2024, 3, 1))).unwrap();
    repo.set_article_tags(newest, &["t".to_string()]).unwrap();

    let all = repo.get_all().unwrap();
    let titles: Vec<&str> = all.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["new", "mid", "old"]);
    assert_eq!(all[0].tag_names(), vec!["t"]);
    assert!(all[1].tags.is_empty());
    assert!(all[2].tags.is_empty());
}

#[test]
fn test_update_applies_only_present_fields() {
    let repo = SqliteArticleRepo::new(connection());
    let id = repo.add(&new_article("Keep", &alice(), at(2024, 3, 1))).unwrap();

    let updated = repo
        .update(
            id,
            &ArticleUpdate {
                status: Some(ArticleStatus::Documented),
                knowledge_article_id: Some("KB1".into()),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "Keep");
    assert_eq!(updated.status, ArticleStatus::Documented);
    assert_eq!(updated.knowledge_article_id.as_deref(), Some("KB1"));
    assert!(updated.modified_by.is_none());
}

#[test]
fn test_empty_update_is_rejected() {
    let repo = SqliteArticleRepo::new(connection());
    let id = repo.add(&new_article("A", &alice(), at(2024, 3, 1))).unwrap();
    let result = repo.update(id, &ArticleUpdate::default());
    assert!(matches!(result, Err(DomainError::InvalidInput(_))));
}

#[test]
fn test_update_missing_returns_none() {
    let repo = SqliteArticleRepo::new(connection());
    let result = repo
        .update(
            7,
            &ArticleUpdate {
                status: Some(ArticleStatus::Documented),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn test_delete_reports_whether_removed() {
    let repo = SqliteArticleRepo::new(connection());
    let id = repo.add(&new_article("A", &alice(), at(2024, 3, 1))).unwrap();
    assert!(repo.delete(id).unwrap());
    assert!(!repo.delete(id).unwrap());
    assert!(repo.get_by_id(id).unwrap().is_none());
}

#[tokio::test]
async fn test_example_scenario() {
    let kb = setup();
    let created = kb
        .create_article(draft("A", "D", ArticleStatus::Backlog, None), &alice())
        .await
        .unwrap();

    let all = kb.articles().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].status, ArticleStatus::Backlog);
    assert!(all[0].tags.is_empty());

    let replaced = kb
        .replace_article(
            created.id,
            draft("A", "D", ArticleStatus::Backlog, Some(vec!["urgent", "infra"])),
            &alice(),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(replaced.tag_names(), vec!["infra", "urgent"]);

    let documented = kb
        .change_status(created.id, ArticleStatus::Documented, Some("KB123".into()), &bob())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(documented.status, ArticleStatus::Documented);
    assert_eq!(documented.knowledge_article_id.as_deref(), Some("KB123"));
    assert_eq!(documented.title, "A");
    assert_eq!(documented.description, "D");
    assert_eq!(documented.modified_by_name.as_deref(), Some("bob"));
    assert!(documented.modified_at.is_some());
    assert_eq!(documented.tag_names(), vec!["infra", "urgent"]);
}

#[tokio::test]
async fn test_create_with_tags_deduplicates() {
    let kb = setup();
    let article = kb
        .create_article(
            draft("T", "D", ArticleStatus::Backlog, Some(vec!["ops", "ops", " ", "db"])),
            &alice(),
        )
        .await
        .unwrap();
    assert_eq!(article.tag_names(), vec!["db", "ops"]);
    assert_eq!(kb.tags().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_requires_fields() {
    let kb = setup();
    let result = kb
        .create_article(draft("", "D", ArticleStatus::Backlog, None), &alice())
        .await;
    assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    assert!(kb.articles().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_back_to_backlog_keeps_reference() {
    let kb = setup();
    let article = kb
        .create_article(draft("T", "D", ArticleStatus::Backlog, None), &alice())
        .await
        .unwrap();
    kb.change_status(article.id, ArticleStatus::Documented, Some("KB9".into()), &alice())
        .await
        .unwrap();

    let back = kb
        .change_status(article.id, ArticleStatus::Backlog, Some("IGNORED".into()), &alice())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(back.status, ArticleStatus::Backlog);
    assert_eq!(back.knowledge_article_id.as_deref(), Some("KB9"));
}

#[tokio::test]
async fn test_change_status_on_unknown_id() {
    let kb = setup();
    let result = kb
        .change_status(404, ArticleStatus::Documented, None, &alice())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_replace_without_tags_keeps_tags() {
    let kb = setup();
    let article = kb
        .create_article(draft("T", "D", ArticleStatus::Backlog, Some(vec!["keep"])), &alice())
        .await
        .unwrap();
    let replaced = kb
        .replace_article(article.id, draft("T2", "D2", ArticleStatus::Documented, None), &bob())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(replaced.title, "T2");
    assert_eq!(replaced.status, ArticleStatus::Documented);
    assert_eq!(replaced.tag_names(), vec!["keep"]);
    assert_eq!(replaced.author_name.as_deref(), Some("alice"));
    assert_eq!(replaced.modified_by_name.as_deref(), Some("bob"));
}

#[tokio::test]
async fn test_replace_unknown_id() {
    let kb = setup();
    let result = kb
        .replace_article(1, draft("T", "D", ArticleStatus::Backlog, Some(vec!["x"])), &alice())
        .await
        .unwrap();
    assert!(result.is_none());
    assert!(kb.tags().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_article_tags_for_missing_article() {
    let kb = setup();
    assert!(kb.article_tags(5).await.unwrap().is_none());
    let article = kb
        .create_article(draft("T", "D", ArticleStatus::Backlog, None), &alice())
        .await
        .unwrap();
    assert_eq!(kb.article_tags(article.id).await.unwrap(), Some(vec![]));
}
