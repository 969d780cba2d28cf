//! Gateway handlers: the dashboard-facing API composed from both services

use super::handlers::{AppError, HealthResponse};
use super::query::{paginate, Page, PageParams};
use crate::gateway::aggregator::{MemberWithPosts, ReplyTimeStats};
use crate::gateway::error::empty_on_not_found;
use crate::gateway::{Aggregator, DocumentBackend, GraphBackend};
use crate::mongo::models::PersonName;
use crate::neo4j::models::*;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

const NO_DATA: &str = "No data available";
const NO_REPLIES: &str = "No comments found for the specified user ID.";

/// State of the gateway router
#[derive(Clone)]
pub struct GatewayState {
    pub aggregator: Arc<Aggregator>,
}

impl GatewayState {
    pub fn new(graph: Arc<dyn GraphBackend>, documents: Arc<dyn DocumentBackend>) -> Self {
        Self {
            aggregator: Arc::new(Aggregator::new(graph, documents)),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonIdQuery {
    pub person_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceIdQuery {
    pub place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatorIdQuery {
    pub id: Option<String>,
}

/// Parse a required numeric id from the query string
fn require_id(value: Option<&str>, name: &str) -> Result<i64, AppError> {
    let raw = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{} is required", name)))?;
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("{} must be an integer, got '{}'", name, raw)))
}

/// Paginate a search result; an empty result is a 404 envelope
fn page_or_not_found<T>(items: Vec<T>, params: &PageParams, message: &str) -> Result<Page<T>, AppError> {
    if items.is_empty() {
        return Err(AppError::NoResults(message.to_string()));
    }
    Ok(paginate(items, params))
}

// ============================================================================
// Persons
// ============================================================================

/// GET /person/id?personId=
pub async fn person_by_id(
    State(state): State<GatewayState>,
    Query(q): Query<PersonIdQuery>,
) -> Result<Json<PersonName>, AppError> {
    let person_id = require_id(q.person_id.as_deref(), "personId")?;
    match state.aggregator.documents().person_name(person_id).await {
        Ok(person) => Ok(Json(person)),
        Err(e) if e.is_not_found() => Err(AppError::NotFound("Person not found".into())),
        Err(e) => Err(e.into()),
    }
}

/// GET /person/byLocation/id?placeId=: raw person documents of a city
pub async fn persons_by_location(
    State(state): State<GatewayState>,
    Query(q): Query<PlaceIdQuery>,
) -> Result<Json<Vec<Value>>, AppError> {
    let place_id = require_id(q.place_id.as_deref(), "placeId")?;
    let persons = empty_on_not_found(state.aggregator.documents().persons_by_city(place_id).await)?;
    if persons.is_empty() {
        return Err(AppError::NotFound(
            "No person found for the specified location.".into(),
        ));
    }
    Ok(Json(persons))
}

/// GET /person/byLocation/{place_id}/byTag/{tag_id}
pub async fn persons_by_location_and_tag(
    State(state): State<GatewayState>,
    Path((place_id, tag_id)): Path<(i64, i64)>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<PersonSummary>>, AppError> {
    let people = empty_on_not_found(
        state
            .aggregator
            .graph()
            .people_by_location_and_tag(place_id, tag_id)
            .await,
    )?;
    Ok(Json(page_or_not_found(people, &params, NO_DATA)?))
}

/// GET /person/known/id?personId=, paginated
pub async fn known_people(
    State(state): State<GatewayState>,
    Query(q): Query<PersonIdQuery>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<PersonSummary>>, AppError> {
    let person_id = require_id(q.person_id.as_deref(), "personId")?;
    let people = empty_on_not_found(state.aggregator.graph().known_people(person_id).await)?;
    Ok(Json(page_or_not_found(
        people,
        &params,
        "No known person found for the specified ID.",
    )?))
}

/// GET /person/fof/id?personId=
///
/// The page carries `totalFoF` from the graph service. When that count is
/// unavailable it falls back to the number of friends of friends listed.
pub async fn friends_of_friends(
    State(state): State<GatewayState>,
    Query(q): Query<PersonIdQuery>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<FriendOfFriend>>, AppError> {
    let person_id = require_id(q.person_id.as_deref(), "personId")?;
    let graph = state.aggregator.graph();

    let (fof, total) = futures::join!(
        graph.friends_of_friends(person_id),
        graph.count_friends_of_friends(person_id)
    );
    let fof = empty_on_not_found(fof)?;
    let page = page_or_not_found(fof, &params, NO_DATA)?;

    let total_fof = match total {
        Ok(total) => total,
        Err(e) => {
            tracing::warn!("FoF total for person {} unavailable: {}", person_id, e);
            page.pagination.total as i64
        }
    };
    Ok(Json(page.with_extra("totalFoF", total_fof)))
}

// ============================================================================
// Comments
// ============================================================================

/// GET /comment/avgAnswer/id?personId=
pub async fn average_reply_time(
    State(state): State<GatewayState>,
    Query(q): Query<PersonIdQuery>,
) -> Result<Json<ReplyTimeStats>, AppError> {
    let person_id = require_id(q.person_id.as_deref(), "personId")?;
    state
        .aggregator
        .average_reply_time(person_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(NO_REPLIES.into()))
}

// ============================================================================
// Posts
// ============================================================================

/// A creator and one page of their enriched posts and comments
#[derive(Debug, Serialize)]
pub struct CreatorContent {
    pub creator: PersonName,
    pub content: Vec<Value>,
}

/// GET /post/creator/id?id=
///
/// A missing creator document is a 404 envelope. A document service outage
/// is a 502.
pub async fn content_by_creator(
    State(state): State<GatewayState>,
    Query(q): Query<CreatorIdQuery>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<CreatorContent>>, AppError> {
    let creator_id = require_id(q.id.as_deref(), "id")?;
    let aggregator = &state.aggregator;

    let refs = empty_on_not_found(aggregator.graph().content_by_creator(creator_id).await)?;
    if refs.is_empty() {
        return Err(AppError::NoResults(NO_DATA.into()));
    }

    let creator = match aggregator.documents().person_name(creator_id).await {
        Ok(creator) => creator,
        Err(e) if e.is_not_found() => {
            tracing::warn!("Creator {} has content but no person document", creator_id);
            return Err(AppError::NoResults("Creator not found".into()));
        }
        Err(e) => return Err(e.into()),
    };

    let page = paginate(refs, &params);
    let content = aggregator.enrich_content(&page.data).await;
    Ok(Json(page.map_data(vec![CreatorContent { creator, content }])))
}

/// GET /post/byOrganization/{kind}/{org_id}: members with their latest post
/// since joining
pub async fn posts_by_organization(
    State(state): State<GatewayState>,
    Path((kind, organization_id)): Path<(String, i64)>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<MemberWithPosts>>, AppError> {
    let kind: OrganizationKind = kind.parse().map_err(AppError::BadRequest)?;
    let aggregator = &state.aggregator;

    let members = empty_on_not_found(
        aggregator
            .graph()
            .people_by_organization(kind, organization_id)
            .await,
    )?;
    let mut page = page_or_not_found(members, &params, NO_DATA)?;

    // Only the members on this page are enriched
    let members = std::mem::take(&mut page.data);
    let data = aggregator.attach_recent_posts(members).await;
    Ok(Json(page.map_data(data)))
}

// ============================================================================
// Health
// ============================================================================

/// Gateway health: `ok` with both services up, `degraded` with one,
/// 503 `unhealthy` with none.
pub async fn health(State(state): State<GatewayState>) -> (StatusCode, Json<HealthResponse>) {
    let (graph, documents) = futures::join!(
        state.aggregator.graph().health(),
        state.aggregator.documents().health()
    );
    let graph_ok = graph.is_ok();
    let documents_ok = documents.is_ok();

    let (status, http_status) = match (graph_ok, documents_ok) {
        (true, true) => ("ok", StatusCode::OK),
        (false, false) => ("unhealthy", StatusCode::SERVICE_UNAVAILABLE),
        _ => ("degraded", StatusCode::OK),
    };

    (
        http_status,
        Json(HealthResponse::new(
            status,
            [("graphService", graph_ok), ("documentService", documents_ok)],
        )),
    )
}
