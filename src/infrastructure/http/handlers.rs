use crate::application::articles::ArticleDraft;
use crate::domain::values::article_status::ArticleStatus;
use crate::domain::values::window::{parse_date, StatsWindow};
use crate::infrastructure::http::auth::{AdminUser, AuthorizedUser, CurrentUser};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::{ApiJson, OptionalJson};
use crate::infrastructure::http::SharedState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

/// Body of POST and PUT on articles. Everything is optional at the serde
/// level so missing fields surface as a 400 rather than a parse rejection.
/// `tags` is taken only when it is an array of strings; any other shape is
/// ignored and leaves the tag set alone.
#[derive(Debug, Default, Deserialize)]
pub struct ArticleBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub tags: Option<serde_json::Value>,
}

impl ArticleBody {
    fn into_draft(self) -> Result<ArticleDraft, ApiError> {
        let (title, description, status) = match (
            non_empty(self.title),
            non_empty(self.description),
            non_empty(self.status),
        ) {
            (Some(t), Some(d), Some(s)) => (t, d, s),
            _ => return Err(ApiError::BadRequest("Missing required fields".into())),
        };
        Ok(ArticleDraft {
            title,
            description,
            status: parse_status(&status)?,
            tags: self.tags.and_then(tag_list),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBody {
    pub status: Option<String>,
    pub knowledge_article_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsBody {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserBody {
    pub username: Option<String>,
}

fn tag_list(value: serde_json::Value) -> Option<Vec<String>> {
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(name) => Some(name),
                _ => None,
            })
            .collect(),
        _ => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_status(value: &str) -> Result<ArticleStatus, ApiError> {
    value.parse().map_err(ApiError::BadRequest)
}

fn article_not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Article {id} not found"))
}

// Articles

pub async fn list_articles(
    State(state): State<SharedState>,
    _user: AuthorizedUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.backlog.articles().await?))
}

pub async fn article_tags(
    State(state): State<SharedState>,
    _user: AuthorizedUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let tags = state
        .backlog
        .article_tags(id)
        .await?
        .ok_or_else(|| article_not_found(id))?;
    Ok(Json(tags))
}

pub async fn create_article(
    State(state): State<SharedState>,
    AuthorizedUser(user): AuthorizedUser,
    ApiJson(body): ApiJson<ArticleBody>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = body.into_draft()?;
    let article = state.backlog.create_article(draft, &user).await?;
    Ok((StatusCode::CREATED, Json(article)))
}

pub async fn change_status(
    State(state): State<SharedState>,
    AuthorizedUser(user): AuthorizedUser,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<StatusBody>,
) -> Result<impl IntoResponse, ApiError> {
    let status = non_empty(body.status)
        .ok_or_else(|| ApiError::BadRequest("Status is required".into()))?;
    let status = parse_status(&status)?;
    let article = state
        .backlog
        .change_status(id, status, body.knowledge_article_id, &user)
        .await?
        .ok_or_else(|| article_not_found(id))?;
    Ok(Json(article))
}

pub async fn replace_article(
    State(state): State<SharedState>,
    AuthorizedUser(user): AuthorizedUser,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<ArticleBody>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = body.into_draft()?;
    let article = state
        .backlog
        .replace_article(id, draft, &user)
        .await?
        .ok_or_else(|| article_not_found(id))?;
    Ok(Json(article))
}

pub async fn delete_article(
    State(state): State<SharedState>,
    _user: AuthorizedUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    if state.backlog.delete_article(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(article_not_found(id))
    }
}

pub async fn list_tags(
    State(state): State<SharedState>,
    _user: AuthorizedUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.backlog.tags().await?))
}

// Current user

pub async fn own_stats(
    State(state): State<SharedState>,
    AuthorizedUser(user): AuthorizedUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.backlog.user_summary(&user).await?))
}

pub async fn auth_user(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let authenticated = !user.raw.is_empty();
    let authorized = authenticated && state.backlog.is_authorized(&user).await?;
    Ok(Json(json!({
        "user": user.raw,
        "username": user.display,
        "isAuthenticated": authenticated,
        "isAuthorized": authorized,
        "isAdmin": state.config.is_admin(&user.display),
    })))
}

// Admin

pub async fn admin_stats(
    State(state): State<SharedState>,
    _admin: AdminUser,
    OptionalJson(body): OptionalJson<StatsBody>,
) -> Result<impl IntoResponse, ApiError> {
    let parse = |value: Option<String>| {
        non_empty(value)
            .map(|v| parse_date(&v))
            .transpose()
            .map_err(ApiError::BadRequest)
    };
    let window = StatsWindow::new(parse(body.start_date)?, parse(body.end_date)?);
    Ok(Json(state.backlog.stats_report(window).await?))
}

async fn usernames(state: &SharedState) -> Result<Vec<String>, ApiError> {
    Ok(state
        .backlog
        .users()
        .await?
        .into_iter()
        .map(|u| u.username)
        .collect())
}

pub async fn list_users(
    State(state): State<SharedState>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(json!({ "users": usernames(&state).await? })))
}

pub async fn add_user(
    State(state): State<SharedState>,
    _admin: AdminUser,
    ApiJson(body): ApiJson<UserBody>,
) -> Result<impl IntoResponse, ApiError> {
    let username = non_empty(body.username)
        .ok_or_else(|| ApiError::BadRequest("Username is required".into()))?;
    state.backlog.add_user(&username).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User added successfully",
            "users": usernames(&state).await?,
        })),
    ))
}

pub async fn remove_user(
    State(state): State<SharedState>,
    _admin: AdminUser,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.backlog.remove_user(&username).await? {
        return Err(ApiError::NotFound("User not found in authorized list".into()));
    }
    Ok(Json(json!({
        "message": "User removed successfully",
        "users": usernames(&state).await?,
    })))
}

pub async fn clear_database(
    State(state): State<SharedState>,
    AdminUser(admin): AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    tracing::warn!(admin = %admin.display, "clearing database");
    let report = state.backlog.clear_database().await?;
    Ok(Json(json!({
        "message": "Database cleared successfully",
        "articles": report.articles,
        "tags": report.tags,
        "links": report.links,
    })))
}
