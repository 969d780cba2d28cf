//! Backend traits for the two services the gateway aggregates.
//!
//! Document payloads the gateway only relays stay as `serde_json::Value`.

use super::error::UpstreamResult;
use crate::mongo::models::PersonName;
use crate::neo4j::models::*;
use async_trait::async_trait;
use serde_json::Value;

/// Calls into the graph service
#[async_trait]
pub trait GraphBackend: Send + Sync {
    async fn known_people(&self, person_id: i64) -> UpstreamResult<Vec<PersonSummary>>;

    async fn friends_of_friends(&self, person_id: i64) -> UpstreamResult<Vec<FriendOfFriend>>;

    async fn count_friends_of_friends(&self, person_id: i64) -> UpstreamResult<i64>;

    async fn people_by_location_and_tag(
        &self,
        place_id: i64,
        tag_id: i64,
    ) -> UpstreamResult<Vec<PersonSummary>>;

    async fn people_by_organization(
        &self,
        kind: OrganizationKind,
        organization_id: i64,
    ) -> UpstreamResult<Vec<OrganizationMember>>;

    async fn content_by_creator(&self, person_id: i64) -> UpstreamResult<Vec<ContentRef>>;

    async fn forum_title_of_post(&self, post_id: i64) -> UpstreamResult<String>;

    async fn replies_to_others(&self, person_id: i64) -> UpstreamResult<Vec<ReplyPair>>;

    async fn original_message(&self, comment_id: i64) -> UpstreamResult<OriginalMessage>;

    async fn health(&self) -> UpstreamResult<()>;
}

/// Calls into the document service
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    async fn person_name(&self, person_id: i64) -> UpstreamResult<PersonName>;

    async fn persons_by_city(&self, city_id: i64) -> UpstreamResult<Vec<Value>>;

    async fn post(&self, post_id: i64) -> UpstreamResult<Value>;

    async fn comment(&self, comment_id: i64) -> UpstreamResult<Value>;

    /// Latest post of a creator after January 1st of `year`, 0 or 1 element
    async fn latest_posts_since(&self, creator_id: i64, year: i64) -> UpstreamResult<Vec<Value>>;

    async fn reply_times(&self, pairs: &[ReplyPair]) -> UpstreamResult<Vec<f64>>;

    async fn health(&self) -> UpstreamResult<()>;
}
