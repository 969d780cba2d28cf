//! SocialGraph trait definition
//!
//! Defines the abstract interface for the Neo4j-backed social graph lookups.
//! Implemented by `Neo4jClient` and by the in-memory mock used in tests.

use crate::neo4j::models::*;
use anyhow::Result;
use async_trait::async_trait;

/// Abstract interface for all graph database lookups.
#[async_trait]
pub trait SocialGraph: Send + Sync {
    // ========================================================================
    // People
    // ========================================================================

    /// People the given person KNOWS (outgoing edges)
    async fn known_people(&self, person_id: i64) -> Result<Vec<PersonSummary>>;

    /// Distinct 2-hop neighbours that are neither the person nor a direct
    /// friend, ordered by mutual friend count (desc) then id
    async fn friends_of_friends(&self, person_id: i64) -> Result<Vec<FriendOfFriend>>;

    /// Number of distinct friends-of-friends
    async fn count_friends_of_friends(&self, person_id: i64) -> Result<i64>;

    /// People located in a place and interested in a tag
    async fn people_by_location_and_tag(
        &self,
        place_id: i64,
        tag_id: i64,
    ) -> Result<Vec<PersonSummary>>;

    /// People affiliated with an organisation, with the affiliation year
    async fn people_by_organization(
        &self,
        kind: OrganizationKind,
        organization_id: i64,
    ) -> Result<Vec<OrganizationMember>>;

    // ========================================================================
    // Messages
    // ========================================================================

    /// Posts and comments created by a person
    async fn content_by_creator(&self, person_id: i64) -> Result<Vec<ContentRef>>;

    /// Title of the forum containing a post
    async fn forum_title_of_post(&self, post_id: i64) -> Result<Option<String>>;

    /// Comments by a person replying to messages created by someone else
    async fn replies_to_others(&self, person_id: i64) -> Result<Vec<ReplyPair>>;

    /// The message a comment replies to
    async fn original_message(&self, comment_id: i64) -> Result<Option<OriginalMessage>>;

    // ========================================================================
    // Health
    // ========================================================================

    /// Check connectivity to the graph database
    async fn health_check(&self) -> Result<bool>;
}
