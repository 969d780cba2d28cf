//! In-memory backends standing in for the two services in gateway tests.
//!
//! Lookups that the real services answer with 404 when empty return
//! `UpstreamError::NotFound` here as well.

use super::error::{UpstreamError, UpstreamResult};
use super::traits::{DocumentBackend, GraphBackend};
use crate::mongo::models::PersonName;
use crate::neo4j::models::*;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

fn not_found(service: &'static str, path: String) -> UpstreamError {
    UpstreamError::NotFound { service, path }
}

fn unavailable(service: &'static str, path: String) -> UpstreamError {
    UpstreamError::Status {
        service,
        path,
        status: 500,
        message: "Internal server error".to_string(),
    }
}

fn non_empty<T: Clone>(list: Option<&Vec<T>>, path: String) -> UpstreamResult<Vec<T>> {
    match list {
        Some(items) if !items.is_empty() => Ok(items.clone()),
        _ => Err(not_found("graph service", path)),
    }
}

// ============================================================================
// Graph backend
// ============================================================================

#[derive(Default)]
pub struct MockGraphBackend {
    pub known: RwLock<HashMap<i64, Vec<PersonSummary>>>,
    pub fof: RwLock<HashMap<i64, Vec<FriendOfFriend>>>,
    pub by_location_tag: RwLock<HashMap<(i64, i64), Vec<PersonSummary>>>,
    pub members: RwLock<HashMap<(OrganizationKind, i64), Vec<OrganizationMember>>>,
    pub content: RwLock<HashMap<i64, Vec<ContentRef>>>,
    pub forum_titles: RwLock<HashMap<i64, String>>,
    pub replies: RwLock<HashMap<i64, Vec<ReplyPair>>>,
    pub originals: RwLock<HashMap<i64, OriginalMessage>>,
    /// Every call answers 500
    pub failing: RwLock<bool>,
    /// Only the FoF total answers 500
    pub fail_fof_total: RwLock<bool>,
}

impl MockGraphBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_known(&self, person_id: i64, people: Vec<PersonSummary>) {
        self.known.write().await.insert(person_id, people);
    }

    pub async fn set_fof(&self, person_id: i64, fof: Vec<FriendOfFriend>) {
        self.fof.write().await.insert(person_id, fof);
    }

    pub async fn set_by_location_tag(&self, place_id: i64, tag_id: i64, people: Vec<PersonSummary>) {
        self.by_location_tag
            .write()
            .await
            .insert((place_id, tag_id), people);
    }

    pub async fn set_members(
        &self,
        kind: OrganizationKind,
        organization_id: i64,
        members: Vec<OrganizationMember>,
    ) {
        self.members
            .write()
            .await
            .insert((kind, organization_id), members);
    }

    pub async fn set_content(&self, person_id: i64, refs: Vec<ContentRef>) {
        self.content.write().await.insert(person_id, refs);
    }

    pub async fn set_forum_title(&self, post_id: i64, title: &str) {
        self.forum_titles
            .write()
            .await
            .insert(post_id, title.to_string());
    }

    pub async fn set_replies(&self, person_id: i64, pairs: Vec<ReplyPair>) {
        self.replies.write().await.insert(person_id, pairs);
    }

    pub async fn set_original(&self, comment_id: i64, original: OriginalMessage) {
        self.originals.write().await.insert(comment_id, original);
    }

    pub async fn set_failing(&self, failing: bool) {
        *self.failing.write().await = failing;
    }

    pub async fn set_fail_fof_total(&self, fail: bool) {
        *self.fail_fof_total.write().await = fail;
    }

    async fn check(&self, path: &str) -> UpstreamResult<()> {
        if *self.failing.read().await {
            return Err(unavailable("graph service", path.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl GraphBackend for MockGraphBackend {
    async fn known_people(&self, person_id: i64) -> UpstreamResult<Vec<PersonSummary>> {
        let path = format!("/api/people/known/{}", person_id);
        self.check(&path).await?;
        non_empty(self.known.read().await.get(&person_id), path)
    }

    async fn friends_of_friends(&self, person_id: i64) -> UpstreamResult<Vec<FriendOfFriend>> {
        let path = format!("/api/people/fof/{}", person_id);
        self.check(&path).await?;
        non_empty(self.fof.read().await.get(&person_id), path)
    }

    async fn count_friends_of_friends(&self, person_id: i64) -> UpstreamResult<i64> {
        let path = format!("/api/people/fof/{}/total", person_id);
        self.check(&path).await?;
        if *self.fail_fof_total.read().await {
            return Err(unavailable("graph service", path));
        }
        Ok(self
            .fof
            .read()
            .await
            .get(&person_id)
            .map_or(0, |f| f.len() as i64))
    }

    async fn people_by_location_and_tag(
        &self,
        place_id: i64,
        tag_id: i64,
    ) -> UpstreamResult<Vec<PersonSummary>> {
        self.check("/api/people/byLocation").await?;
        Ok(self
            .by_location_tag
            .read()
            .await
            .get(&(place_id, tag_id))
            .cloned()
            .unwrap_or_default())
    }

    async fn people_by_organization(
        &self,
        kind: OrganizationKind,
        organization_id: i64,
    ) -> UpstreamResult<Vec<OrganizationMember>> {
        let path = format!("/api/people/byOrganization/{}/{}", kind, organization_id);
        self.check(&path).await?;
        non_empty(self.members.read().await.get(&(kind, organization_id)), path)
    }

    async fn content_by_creator(&self, person_id: i64) -> UpstreamResult<Vec<ContentRef>> {
        self.check("/api/post/byUser").await?;
        Ok(self
            .content
            .read()
            .await
            .get(&person_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn forum_title_of_post(&self, post_id: i64) -> UpstreamResult<String> {
        let path = format!("/api/post/forumTitle/{}", post_id);
        self.check(&path).await?;
        self.forum_titles
            .read()
            .await
            .get(&post_id)
            .cloned()
            .ok_or_else(|| not_found("graph service", path))
    }

    async fn replies_to_others(&self, person_id: i64) -> UpstreamResult<Vec<ReplyPair>> {
        let path = format!("/api/comment/repliesToOthers/{}", person_id);
        self.check(&path).await?;
        non_empty(self.replies.read().await.get(&person_id), path)
    }

    async fn original_message(&self, comment_id: i64) -> UpstreamResult<OriginalMessage> {
        let path = format!("/api/comment/replies/{}", comment_id);
        self.check(&path).await?;
        self.originals
            .read()
            .await
            .get(&comment_id)
            .cloned()
            .ok_or_else(|| not_found("graph service", path))
    }

    async fn health(&self) -> UpstreamResult<()> {
        self.check("/health").await
    }
}

// ============================================================================
// Document backend
// ============================================================================

#[derive(Default)]
pub struct MockDocumentBackend {
    pub persons: RwLock<HashMap<i64, PersonName>>,
    pub cities: RwLock<HashMap<i64, Vec<Value>>>,
    pub posts: RwLock<HashMap<i64, Value>>,
    pub comments: RwLock<HashMap<i64, Value>>,
    /// (creator, year) → posts
    pub recent_posts: RwLock<HashMap<(i64, i64), Vec<Value>>>,
    /// Creators whose recent-post lookup answers 500
    pub failing_creators: RwLock<HashSet<i64>>,
    /// reply id → seconds
    pub reply_times: RwLock<HashMap<i64, f64>>,
    pub failing: RwLock<bool>,
}

impl MockDocumentBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_person(&self, id: i64, first_name: &str, last_name: &str) {
        self.persons.write().await.insert(
            id,
            PersonName {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
            },
        );
    }

    pub async fn set_city(&self, city_id: i64, persons: Vec<Value>) {
        self.cities.write().await.insert(city_id, persons);
    }

    pub async fn insert_post(&self, id: i64, post: Value) {
        self.posts.write().await.insert(id, post);
    }

    pub async fn insert_comment(&self, id: i64, comment: Value) {
        self.comments.write().await.insert(id, comment);
    }

    pub async fn set_recent_posts(&self, creator_id: i64, year: i64, posts: Vec<Value>) {
        self.recent_posts
            .write()
            .await
            .insert((creator_id, year), posts);
    }

    pub async fn fail_recent_posts_of(&self, creator_id: i64) {
        self.failing_creators.write().await.insert(creator_id);
    }

    pub async fn set_reply_time(&self, reply_id: i64, seconds: f64) {
        self.reply_times.write().await.insert(reply_id, seconds);
    }

    pub async fn set_failing(&self, failing: bool) {
        *self.failing.write().await = failing;
    }

    async fn check(&self, path: &str) -> UpstreamResult<()> {
        if *self.failing.read().await {
            return Err(unavailable("document service", path.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentBackend for MockDocumentBackend {
    async fn person_name(&self, person_id: i64) -> UpstreamResult<PersonName> {
        let path = format!("/api/person/{}", person_id);
        self.check(&path).await?;
        self.persons
            .read()
            .await
            .get(&person_id)
            .cloned()
            .ok_or_else(|| not_found("document service", path))
    }

    async fn persons_by_city(&self, city_id: i64) -> UpstreamResult<Vec<Value>> {
        self.check("/api/person/byLocation").await?;
        Ok(self
            .cities
            .read()
            .await
            .get(&city_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn post(&self, post_id: i64) -> UpstreamResult<Value> {
        let path = format!("/api/post/{}", post_id);
        self.check(&path).await?;
        self.posts
            .read()
            .await
            .get(&post_id)
            .cloned()
            .ok_or_else(|| not_found("document service", path))
    }

    async fn comment(&self, comment_id: i64) -> UpstreamResult<Value> {
        let path = format!("/api/comment/{}", comment_id);
        self.check(&path).await?;
        self.comments
            .read()
            .await
            .get(&comment_id)
            .cloned()
            .ok_or_else(|| not_found("document service", path))
    }

    async fn latest_posts_since(&self, creator_id: i64, year: i64) -> UpstreamResult<Vec<Value>> {
        let path = format!("/api/post/creator/{}/date/{}", creator_id, year);
        self.check(&path).await?;
        if self.failing_creators.read().await.contains(&creator_id) {
            return Err(unavailable("document service", path));
        }
        Ok(self
            .recent_posts
            .read()
            .await
            .get(&(creator_id, year))
            .cloned()
            .unwrap_or_default())
    }

    async fn reply_times(&self, pairs: &[ReplyPair]) -> UpstreamResult<Vec<f64>> {
        self.check("/api/comment/replyTime").await?;
        let times = self.reply_times.read().await;
        Ok(pairs
            .iter()
            .filter_map(|p| times.get(&p.reply_id).copied())
            .collect())
    }

    async fn health(&self) -> UpstreamResult<()> {
        self.check("/health").await
    }
}
