//! `SocialGraph` implementation for `Neo4jClient`.
//!
//! Every method simply delegates to the corresponding inherent method on `Neo4jClient`.

use async_trait::async_trait;

use super::client::Neo4jClient;
use super::models::*;
use super::traits::SocialGraph;

#[async_trait]
impl SocialGraph for Neo4jClient {
    async fn known_people(&self, person_id: i64) -> anyhow::Result<Vec<PersonSummary>> {
        self.known_people(person_id).await
    }

    async fn friends_of_friends(&self, person_id: i64) -> anyhow::Result<Vec<FriendOfFriend>> {
        self.friends_of_friends(person_id).await
    }

    async fn count_friends_of_friends(&self, person_id: i64) -> anyhow::Result<i64> {
        self.count_friends_of_friends(person_id).await
    }

    async fn people_by_location_and_tag(
        &self,
        place_id: i64,
        tag_id: i64,
    ) -> anyhow::Result<Vec<PersonSummary>> {
        self.people_by_location_and_tag(place_id, tag_id).await
    }

    async fn people_by_organization(
        &self,
        kind: OrganizationKind,
        organization_id: i64,
    ) -> anyhow::Result<Vec<OrganizationMember>> {
        self.people_by_organization(kind, organization_id).await
    }

    async fn content_by_creator(&self, person_id: i64) -> anyhow::Result<Vec<ContentRef>> {
        self.content_by_creator(person_id).await
    }

    async fn forum_title_of_post(&self, post_id: i64) -> anyhow::Result<Option<String>> {
        self.forum_title_of_post(post_id).await
    }

    async fn replies_to_others(&self, person_id: i64) -> anyhow::Result<Vec<ReplyPair>> {
        self.replies_to_others(person_id).await
    }

    async fn original_message(&self, comment_id: i64) -> anyhow::Result<Option<OriginalMessage>> {
        self.original_message(comment_id).await
    }

    async fn health_check(&self) -> anyhow::Result<bool> {
        self.health_check().await
    }
}
