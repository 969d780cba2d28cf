//! In-memory mock implementation of DocumentStore for testing.

use crate::mongo::models::*;
use crate::mongo::traits::DocumentStore;
use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory mock implementation of DocumentStore for testing.
pub struct MockDocumentStore {
    pub persons: RwLock<HashMap<i64, PersonDocument>>,
    pub posts: RwLock<HashMap<i64, PostDocument>>,
    pub comments: RwLock<HashMap<i64, CommentDocument>>,
    pub forums: RwLock<HashMap<i64, ForumDocument>>,
    /// Make `get_forum` fail, to exercise lookup error fallbacks
    pub fail_forum_lookups: RwLock<bool>,
    pub healthy: RwLock<bool>,
}

impl MockDocumentStore {
    pub fn new() -> Self {
        Self {
            persons: RwLock::new(HashMap::new()),
            posts: RwLock::new(HashMap::new()),
            comments: RwLock::new(HashMap::new()),
            forums: RwLock::new(HashMap::new()),
            fail_forum_lookups: RwLock::new(false),
            healthy: RwLock::new(true),
        }
    }

    pub async fn insert_person(&self, person: PersonDocument) {
        self.persons.write().await.insert(person.id, person);
    }

    pub async fn insert_post(&self, post: PostDocument) {
        self.posts.write().await.insert(post.id, post);
    }

    pub async fn insert_comment(&self, comment: CommentDocument) {
        self.comments.write().await.insert(comment.id, comment);
    }

    pub async fn insert_forum(&self, forum: ForumDocument) {
        self.forums.write().await.insert(forum.id, forum);
    }

    pub async fn set_fail_forum_lookups(&self, fail: bool) {
        *self.fail_forum_lookups.write().await = fail;
    }

    pub async fn set_healthy(&self, healthy: bool) {
        *self.healthy.write().await = healthy;
    }
}

impl Default for MockDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Values of a map filtered by `keep`, ordered by id
fn select<T: Clone>(map: &HashMap<i64, T>, id_of: fn(&T) -> i64, keep: impl Fn(&T) -> bool) -> Vec<T> {
    let mut items: Vec<T> = map.values().filter(|v| keep(v)).cloned().collect();
    items.sort_by_key(id_of);
    items
}

fn limited<T>(mut items: Vec<T>, limit: i64) -> Vec<T> {
    items.truncate(limit.max(0) as usize);
    items
}

#[async_trait]
impl DocumentStore for MockDocumentStore {
    async fn list_persons(&self, limit: i64) -> Result<Vec<PersonDocument>> {
        let persons = self.persons.read().await;
        Ok(limited(select(&persons, |p| p.id, |_| true), limit))
    }

    async fn get_person(&self, id: i64) -> Result<Option<PersonDocument>> {
        Ok(self.persons.read().await.get(&id).cloned())
    }

    async fn persons_by_city(&self, city_id: i64) -> Result<Vec<PersonDocument>> {
        let persons = self.persons.read().await;
        Ok(select(&persons, |p| p.id, |p| p.location_city_id == city_id))
    }

    async fn list_posts(&self, limit: i64) -> Result<Vec<PostDocument>> {
        let posts = self.posts.read().await;
        Ok(limited(select(&posts, |p| p.id, |_| true), limit))
    }

    async fn get_post(&self, id: i64) -> Result<Option<PostDocument>> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn posts_by_creator(&self, creator_id: i64) -> Result<Vec<PostDocument>> {
        let posts = self.posts.read().await;
        let mut items = select(&posts, |p| p.id, |p| p.creator_person_id == creator_id);
        items.sort_by(|a, b| b.creation_date.cmp(&a.creation_date));
        Ok(items)
    }

    async fn posts_by_country(&self, country_id: i64) -> Result<Vec<PostDocument>> {
        let posts = self.posts.read().await;
        Ok(select(&posts, |p| p.id, |p| {
            p.location_country_id == Some(country_id)
        }))
    }

    async fn latest_post_after(
        &self,
        creator_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Option<PostDocument>> {
        Ok(self
            .posts
            .read()
            .await
            .values()
            .filter(|p| p.creator_person_id == creator_id && p.creation_date > since)
            .max_by_key(|p| p.creation_date)
            .cloned())
    }

    async fn posts_by_forum(&self, forum_id: i64) -> Result<Vec<PostDocument>> {
        let posts = self.posts.read().await;
        Ok(select(&posts, |p| p.id, |p| {
            p.container_forum_id == Some(forum_id)
        }))
    }

    async fn list_comments(&self, limit: i64) -> Result<Vec<CommentDocument>> {
        let comments = self.comments.read().await;
        Ok(limited(select(&comments, |c| c.id, |_| true), limit))
    }

    async fn get_comment(&self, id: i64) -> Result<Option<CommentDocument>> {
        Ok(self.comments.read().await.get(&id).cloned())
    }

    async fn comments_by_creator(&self, creator_id: i64) -> Result<Vec<CommentDocument>> {
        let comments = self.comments.read().await;
        let mut items = select(&comments, |c| c.id, |c| c.creator_person_id == creator_id);
        items.sort_by(|a, b| b.creation_date.cmp(&a.creation_date));
        Ok(items)
    }

    async fn comments_by_parent_post(&self, post_id: i64) -> Result<Vec<CommentDocument>> {
        let comments = self.comments.read().await;
        Ok(select(&comments, |c| c.id, |c| c.parent_post_id == Some(post_id)))
    }

    async fn comments_by_country(&self, country_id: i64) -> Result<Vec<CommentDocument>> {
        let comments = self.comments.read().await;
        Ok(select(&comments, |c| c.id, |c| {
            c.location_country_id == Some(country_id)
        }))
    }

    async fn list_forums(&self, limit: i64) -> Result<Vec<ForumDocument>> {
        let forums = self.forums.read().await;
        Ok(limited(select(&forums, |f| f.id, |_| true), limit))
    }

    async fn get_forum(&self, id: i64) -> Result<Option<ForumDocument>> {
        if *self.fail_forum_lookups.read().await {
            bail!("forum collection unavailable");
        }
        Ok(self.forums.read().await.get(&id).cloned())
    }

    async fn forums_by_moderator(&self, person_id: i64) -> Result<Vec<ForumDocument>> {
        let forums = self.forums.read().await;
        Ok(select(&forums, |f| f.id, |f| f.moderator_person_id == person_id))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(*self.healthy.read().await)
    }
}
