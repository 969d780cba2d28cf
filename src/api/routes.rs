//! API route definitions for the three services

use super::document_handlers::{self, DocumentServiceState};
use super::gateway_handlers::{self, GatewayState};
use super::graph_handlers::{self, GraphServiceState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the graph service router
pub fn create_graph_router(state: GraphServiceState) -> Router {
    Router::new()
        .route("/health", get(graph_handlers::health))
        // ====================================================================
        // People
        // ====================================================================
        .route("/api/people/known/{id}", get(graph_handlers::known_people))
        .route("/api/people/fof/{id}", get(graph_handlers::friends_of_friends))
        .route(
            "/api/people/fof/{id}/total",
            get(graph_handlers::friends_of_friends_total),
        )
        .route(
            "/api/people/byLocation/{place_id}/byTag/{tag_id}",
            get(graph_handlers::people_by_location_and_tag),
        )
        .route(
            "/api/people/byOrganization/{kind}/{org_id}",
            get(graph_handlers::people_by_organization),
        )
        // ====================================================================
        // Messages
        // ====================================================================
        .route("/api/post/byUser/{id}", get(graph_handlers::content_by_creator))
        .route(
            "/api/post/forumTitle/{id}",
            get(graph_handlers::forum_title_of_post),
        )
        .route(
            "/api/comment/repliesToOthers/{id}",
            get(graph_handlers::replies_to_others),
        )
        .route(
            "/api/comment/replies/{id}",
            get(graph_handlers::original_message),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors())
        .with_state(state)
}

/// Create the document service router
pub fn create_document_router(state: DocumentServiceState) -> Router {
    Router::new()
        .route("/health", get(document_handlers::health))
        // ====================================================================
        // Persons
        // ====================================================================
        .route("/api/person", get(document_handlers::list_persons))
        .route("/api/person/{id}", get(document_handlers::get_person))
        .route(
            "/api/person/byLocation/{id}",
            get(document_handlers::persons_by_city),
        )
        // ====================================================================
        // Posts
        // ====================================================================
        .route("/api/post", get(document_handlers::list_posts))
        .route("/api/post/{id}", get(document_handlers::get_post))
        .route(
            "/api/post/content/{id}",
            get(document_handlers::creator_content),
        )
        .route(
            "/api/post/creator/{id}",
            get(document_handlers::posts_by_creator),
        )
        .route(
            "/api/post/creator/{id}/date/{year}",
            get(document_handlers::latest_post_since_year),
        )
        .route(
            "/api/post/location/{id}",
            get(document_handlers::posts_by_country),
        )
        .route("/api/post/forum/{id}", get(document_handlers::posts_by_forum))
        // ====================================================================
        // Comments
        // ====================================================================
        .route("/api/comment", get(document_handlers::list_comments))
        .route("/api/comment/replyTime", post(document_handlers::reply_times))
        .route("/api/comment/{id}", get(document_handlers::get_comment))
        .route(
            "/api/comment/creator/{id}",
            get(document_handlers::comments_by_creator),
        )
        .route(
            "/api/comment/parent/{id}",
            get(document_handlers::comments_by_parent_post),
        )
        .route(
            "/api/comment/location/{id}",
            get(document_handlers::comments_by_country),
        )
        // ====================================================================
        // Forums
        // ====================================================================
        .route("/api/forum", get(document_handlers::list_forums))
        .route("/api/forum/{id}", get(document_handlers::get_forum))
        .route(
            "/api/forum/moderator/{id}",
            get(document_handlers::forums_by_moderator),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors())
        .with_state(state)
}

/// Create the gateway router
pub fn create_gateway_router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(gateway_handlers::health))
        // ====================================================================
        // Persons
        // ====================================================================
        .route("/person/id", get(gateway_handlers::person_by_id))
        .route(
            "/person/byLocation/id",
            get(gateway_handlers::persons_by_location),
        )
        .route(
            "/person/byLocation/{place_id}/byTag/{tag_id}",
            get(gateway_handlers::persons_by_location_and_tag),
        )
        .route("/person/known/id", get(gateway_handlers::known_people))
        .route("/person/fof/id", get(gateway_handlers::friends_of_friends))
        // ====================================================================
        // Comments
        // ====================================================================
        .route(
            "/comment/avgAnswer/id",
            get(gateway_handlers::average_reply_time),
        )
        // ====================================================================
        // Posts
        // ====================================================================
        .route("/post/creator/id", get(gateway_handlers::content_by_creator))
        .route(
            "/post/byOrganization/{kind}/{org_id}",
            get(gateway_handlers::posts_by_organization),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors())
        .with_state(state)
}
