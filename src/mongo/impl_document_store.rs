//! `DocumentStore` implementation for `MongoClient`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::client::MongoClient;
use super::models::*;
use super::traits::DocumentStore;

#[async_trait]
impl DocumentStore for MongoClient {
    async fn list_persons(&self, limit: i64) -> anyhow::Result<Vec<PersonDocument>> {
        self.list_persons(limit).await
    }

    async fn get_person(&self, id: i64) -> anyhow::Result<Option<PersonDocument>> {
        self.get_person(id).await
    }

    async fn persons_by_city(&self, city_id: i64) -> anyhow::Result<Vec<PersonDocument>> {
        self.persons_by_city(city_id).await
    }

    async fn list_posts(&self, limit: i64) -> anyhow::Result<Vec<PostDocument>> {
        self.list_posts(limit).await
    }

    async fn get_post(&self, id: i64) -> anyhow::Result<Option<PostDocument>> {
        self.get_post(id).await
    }

    async fn posts_by_creator(&self, creator_id: i64) -> anyhow::Result<Vec<PostDocument>> {
        self.posts_by_creator(creator_id).await
    }

    async fn posts_by_country(&self, country_id: i64) -> anyhow::Result<Vec<PostDocument>> {
        self.posts_by_country(country_id).await
    }

    async fn latest_post_after(
        &self,
        creator_id: i64,
        since: DateTime<Utc>,
    ) -> anyhow::Result<Option<PostDocument>> {
        self.latest_post_after(creator_id, since).await
    }

    async fn posts_by_forum(&self, forum_id: i64) -> anyhow::Result<Vec<PostDocument>> {
        self.posts_by_forum(forum_id).await
    }

    async fn list_comments(&self, limit: i64) -> anyhow::Result<Vec<CommentDocument>> {
        self.list_comments(limit).await
    }

    async fn get_comment(&self, id: i64) -> anyhow::Result<Option<CommentDocument>> {
        self.get_comment(id).await
    }

    async fn comments_by_creator(&self, creator_id: i64) -> anyhow::Result<Vec<CommentDocument>> {
        self.comments_by_creator(creator_id).await
    }

    async fn comments_by_parent_post(&self, post_id: i64) -> anyhow::Result<Vec<CommentDocument>> {
        self.comments_by_parent_post(post_id).await
    }

    async fn comments_by_country(&self, country_id: i64) -> anyhow::Result<Vec<CommentDocument>> {
        self.comments_by_country(country_id).await
    }

    async fn list_forums(&self, limit: i64) -> anyhow::Result<Vec<ForumDocument>> {
        self.list_forums(limit).await
    }

    async fn get_forum(&self, id: i64) -> anyhow::Result<Option<ForumDocument>> {
        self.get_forum(id).await
    }

    async fn forums_by_moderator(&self, person_id: i64) -> anyhow::Result<Vec<ForumDocument>> {
        self.forums_by_moderator(person_id).await
    }

    async fn health_check(&self) -> anyhow::Result<bool> {
        self.health_check().await
    }
}
