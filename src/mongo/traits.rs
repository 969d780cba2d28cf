//! DocumentStore trait abstracting the MongoDB collections.
//!
//! Lookups by id return `Option`; filtered lookups return possibly empty
//! vectors and leave "empty means 404" to the HTTP layer.

use crate::mongo::models::*;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait DocumentStore: Send + Sync {
    // ========================================================================
    // Persons
    // ========================================================================

    async fn list_persons(&self, limit: i64) -> Result<Vec<PersonDocument>>;

    async fn get_person(&self, id: i64) -> Result<Option<PersonDocument>>;

    async fn persons_by_city(&self, city_id: i64) -> Result<Vec<PersonDocument>>;

    // ========================================================================
    // Posts
    // ========================================================================

    async fn list_posts(&self, limit: i64) -> Result<Vec<PostDocument>>;

    async fn get_post(&self, id: i64) -> Result<Option<PostDocument>>;

    /// Posts of a creator, newest first
    async fn posts_by_creator(&self, creator_id: i64) -> Result<Vec<PostDocument>>;

    async fn posts_by_country(&self, country_id: i64) -> Result<Vec<PostDocument>>;

    /// Most recent post of a creator created strictly after `since`
    async fn latest_post_after(
        &self,
        creator_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Option<PostDocument>>;

    async fn posts_by_forum(&self, forum_id: i64) -> Result<Vec<PostDocument>>;

    // ========================================================================
    // Comments
    // ========================================================================

    async fn list_comments(&self, limit: i64) -> Result<Vec<CommentDocument>>;

    async fn get_comment(&self, id: i64) -> Result<Option<CommentDocument>>;

    /// Comments of a creator, newest first
    async fn comments_by_creator(&self, creator_id: i64) -> Result<Vec<CommentDocument>>;

    async fn comments_by_parent_post(&self, post_id: i64) -> Result<Vec<CommentDocument>>;

    async fn comments_by_country(&self, country_id: i64) -> Result<Vec<CommentDocument>>;

    // ========================================================================
    // Forums
    // ========================================================================

    async fn list_forums(&self, limit: i64) -> Result<Vec<ForumDocument>>;

    async fn get_forum(&self, id: i64) -> Result<Option<ForumDocument>>;

    async fn forums_by_moderator(&self, person_id: i64) -> Result<Vec<ForumDocument>>;

    // ========================================================================
    // Health
    // ========================================================================

    async fn health_check(&self) -> Result<bool>;
}
