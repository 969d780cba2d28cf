//! Document service handlers (MongoDB-backed)

use super::handlers::{single_store_health, AppError, HealthResponse};
use super::query::ListParams;
use crate::mongo::manager::start_of_year;
use crate::mongo::models::*;
use crate::mongo::{ContentManager, DocumentStore};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

/// State of the document service router
#[derive(Clone)]
pub struct DocumentServiceState {
    pub store: Arc<dyn DocumentStore>,
    pub content: Arc<ContentManager>,
}

impl DocumentServiceState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            content: Arc::new(ContentManager::new(store.clone())),
            store,
        }
    }
}

fn found<T>(items: Vec<T>, message: &str) -> Result<Json<Vec<T>>, AppError> {
    if items.is_empty() {
        Err(AppError::NotFound(message.to_string()))
    } else {
        Ok(Json(items))
    }
}

// ============================================================================
// Persons
// ============================================================================

pub async fn list_persons(
    State(state): State<DocumentServiceState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<PersonDocument>>, AppError> {
    Ok(Json(state.store.list_persons(params.validated_limit()).await?))
}

pub async fn get_person(
    State(state): State<DocumentServiceState>,
    Path(id): Path<i64>,
) -> Result<Json<PersonName>, AppError> {
    let person = state
        .store
        .get_person(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Person not found".into()))?;
    Ok(Json(PersonName {
        first_name: person.first_name,
        last_name: person.last_name,
    }))
}

pub async fn persons_by_city(
    State(state): State<DocumentServiceState>,
    Path(city_id): Path<i64>,
) -> Result<Json<Vec<PersonDocument>>, AppError> {
    Ok(Json(state.store.persons_by_city(city_id).await?))
}

// ============================================================================
// Posts
// ============================================================================

pub async fn list_posts(
    State(state): State<DocumentServiceState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<PostDocument>>, AppError> {
    Ok(Json(state.store.list_posts(params.validated_limit()).await?))
}

pub async fn get_post(
    State(state): State<DocumentServiceState>,
    Path(id): Path<i64>,
) -> Result<Json<PostSummary>, AppError> {
    let post = state
        .store
        .get_post(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".into()))?;
    Ok(Json(PostSummary::from(&post)))
}

/// Posts and comments of a creator, newest first; `[]` when there are none
pub async fn creator_content(
    State(state): State<DocumentServiceState>,
    Path(creator_id): Path<i64>,
) -> Result<Json<Vec<CreatorContentItem>>, AppError> {
    Ok(Json(state.content.creator_content(creator_id).await?))
}

pub async fn posts_by_creator(
    State(state): State<DocumentServiceState>,
    Path(creator_id): Path<i64>,
) -> Result<Json<Vec<PostWithForum>>, AppError> {
    let posts = state.content.posts_by_creator(creator_id).await?;
    found(posts, "No posts found for this creator")
}

pub async fn posts_by_country(
    State(state): State<DocumentServiceState>,
    Path(country_id): Path<i64>,
) -> Result<Json<Vec<PostDocument>>, AppError> {
    let posts = state.store.posts_by_country(country_id).await?;
    found(posts, "No posts found for this location")
}

/// Latest post of a creator after January 1st of `year`, as a 0/1 element array
pub async fn latest_post_since_year(
    State(state): State<DocumentServiceState>,
    Path((creator_id, year)): Path<(i64, i32)>,
) -> Result<Json<Vec<PostWithForum>>, AppError> {
    let since = start_of_year(year)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid year: {}", year)))?;
    let latest = state.content.latest_post_after(creator_id, since).await?;
    Ok(Json(latest.into_iter().collect()))
}

pub async fn posts_by_forum(
    State(state): State<DocumentServiceState>,
    Path(forum_id): Path<i64>,
) -> Result<Json<Vec<PostDocument>>, AppError> {
    let posts = state.store.posts_by_forum(forum_id).await?;
    found(posts, "No posts found for this forum")
}

// ============================================================================
// Comments
// ============================================================================

pub async fn list_comments(
    State(state): State<DocumentServiceState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<CommentDocument>>, AppError> {
    Ok(Json(state.store.list_comments(params.validated_limit()).await?))
}

pub async fn get_comment(
    State(state): State<DocumentServiceState>,
    Path(id): Path<i64>,
) -> Result<Json<CommentDocument>, AppError> {
    state
        .store
        .get_comment(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Comment not found".into()))
}

pub async fn comments_by_creator(
    State(state): State<DocumentServiceState>,
    Path(creator_id): Path<i64>,
) -> Result<Json<Vec<CommentDocument>>, AppError> {
    let comments = state.store.comments_by_creator(creator_id).await?;
    found(comments, "No comments found for this creator")
}

pub async fn comments_by_parent_post(
    State(state): State<DocumentServiceState>,
    Path(post_id): Path<i64>,
) -> Result<Json<Vec<CommentDocument>>, AppError> {
    let comments = state.store.comments_by_parent_post(post_id).await?;
    found(comments, "No comments found for this post")
}

pub async fn comments_by_country(
    State(state): State<DocumentServiceState>,
    Path(country_id): Path<i64>,
) -> Result<Json<Vec<CommentDocument>>, AppError> {
    let comments = state.store.comments_by_country(country_id).await?;
    found(comments, "No comments found for this location")
}

pub async fn reply_times(
    State(state): State<DocumentServiceState>,
    Json(req): Json<ReplyTimeRequest>,
) -> Result<Json<ReplyTimeResponse>, AppError> {
    let reply_times = state.content.reply_times(&req.comments).await?;
    Ok(Json(ReplyTimeResponse { reply_times }))
}

// ============================================================================
// Forums
// ============================================================================

pub async fn list_forums(
    State(state): State<DocumentServiceState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ForumDocument>>, AppError> {
    Ok(Json(state.store.list_forums(params.validated_limit()).await?))
}

pub async fn forums_by_moderator(
    State(state): State<DocumentServiceState>,
    Path(person_id): Path<i64>,
) -> Result<Json<Vec<ForumDocument>>, AppError> {
    let forums = state.store.forums_by_moderator(person_id).await?;
    found(forums, "No forums found for this moderator")
}

pub async fn get_forum(
    State(state): State<DocumentServiceState>,
    Path(id): Path<i64>,
) -> Result<Json<ForumTitle>, AppError> {
    state
        .store
        .get_forum(id)
        .await?
        .map(|forum| Json(ForumTitle { title: forum.title }))
        .ok_or_else(|| AppError::NotFound("Forum not found".into()))
}

/// Health check: 200 when MongoDB answers a ping, 503 otherwise
pub async fn health(
    State(state): State<DocumentServiceState>,
) -> (StatusCode, Json<HealthResponse>) {
    let ok = state.store.health_check().await.unwrap_or(false);
    single_store_health("mongodb", ok)
}
