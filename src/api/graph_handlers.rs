//! Graph service handlers (Neo4j-backed, `/api/people`, `/api/post`, `/api/comment`)

use super::handlers::{single_store_health, AppError, HealthResponse};
use crate::neo4j::models::*;
use crate::neo4j::SocialGraph;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

/// State of the graph service router
#[derive(Clone)]
pub struct GraphServiceState {
    pub graph: Arc<dyn SocialGraph>,
}

fn non_empty<T>(items: Vec<T>, message: &str) -> Result<Json<Vec<T>>, AppError> {
    if items.is_empty() {
        Err(AppError::NotFound(message.to_string()))
    } else {
        Ok(Json(items))
    }
}

// ============================================================================
// People
// ============================================================================

/// GET /api/people/known/{id}: persons directly KNOWS-connected to `id`
pub async fn known_people(
    State(state): State<GraphServiceState>,
    Path(person_id): Path<i64>,
) -> Result<Json<Vec<PersonSummary>>, AppError> {
    let people = state.graph.known_people(person_id).await?;
    non_empty(people, "No known people found for this person")
}

/// GET /api/people/fof/{id}
///
/// Persons two KNOWS hops away that are not already friends, ranked by
/// mutual friend count.
pub async fn friends_of_friends(
    State(state): State<GraphServiceState>,
    Path(person_id): Path<i64>,
) -> Result<Json<Vec<FriendOfFriend>>, AppError> {
    let fof = state.graph.friends_of_friends(person_id).await?;
    non_empty(fof, "No friends of friends found for this person")
}

/// GET /api/people/fof/{id}/total
pub async fn friends_of_friends_total(
    State(state): State<GraphServiceState>,
    Path(person_id): Path<i64>,
) -> Result<Json<FofTotal>, AppError> {
    let total_fof = state.graph.count_friends_of_friends(person_id).await?;
    Ok(Json(FofTotal { total_fof }))
}

/// GET /api/people/byLocation/{place_id}/byTag/{tag_id}. An empty match is
/// `200 []`, unlike the other people lookups.
pub async fn people_by_location_and_tag(
    State(state): State<GraphServiceState>,
    Path((place_id, tag_id)): Path<(i64, i64)>,
) -> Result<Json<Vec<PersonSummary>>, AppError> {
    let people = state
        .graph
        .people_by_location_and_tag(place_id, tag_id)
        .await?;
    Ok(Json(people))
}

/// GET /api/people/byOrganization/{kind}/{org_id}, where `kind` is
/// `company`, `university` or `institution`
pub async fn people_by_organization(
    State(state): State<GraphServiceState>,
    Path((kind, organization_id)): Path<(String, i64)>,
) -> Result<Json<Vec<OrganizationMember>>, AppError> {
    let kind: OrganizationKind = kind.parse().map_err(AppError::BadRequest)?;
    let members = state
        .graph
        .people_by_organization(kind, organization_id)
        .await?;
    non_empty(members, "No people found for this organization")
}

// ============================================================================
// Messages
// ============================================================================

/// GET /api/post/byUser/{id}: ids and kinds of everything a person created
pub async fn content_by_creator(
    State(state): State<GraphServiceState>,
    Path(person_id): Path<i64>,
) -> Result<Json<Vec<ContentRef>>, AppError> {
    Ok(Json(state.graph.content_by_creator(person_id).await?))
}

/// GET /api/post/forumTitle/{id}
pub async fn forum_title_of_post(
    State(state): State<GraphServiceState>,
    Path(post_id): Path<i64>,
) -> Result<Json<String>, AppError> {
    state
        .graph
        .forum_title_of_post(post_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No forum found for this post".into()))
}

/// GET /api/comment/repliesToOthers/{id}
///
/// Pairs of (reply, original) where the person replied to someone else.
pub async fn replies_to_others(
    State(state): State<GraphServiceState>,
    Path(person_id): Path<i64>,
) -> Result<Json<Vec<ReplyPair>>, AppError> {
    let pairs = state.graph.replies_to_others(person_id).await?;
    non_empty(pairs, "No replies to other people found for this person")
}

/// GET /api/comment/replies/{id}: the message a comment replies to
pub async fn original_message(
    State(state): State<GraphServiceState>,
    Path(comment_id): Path<i64>,
) -> Result<Json<OriginalMessage>, AppError> {
    state
        .graph
        .original_message(comment_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No original message found for this comment".into()))
}

/// Health check: 200 when Neo4j answers, 503 otherwise
pub async fn health(State(state): State<GraphServiceState>) -> (StatusCode, Json<HealthResponse>) {
    let ok = state.graph.health_check().await.unwrap_or(false);
    single_store_health("neo4j", ok)
}
