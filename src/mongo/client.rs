//! MongoDB client for the LDBC document collections

use super::models::*;
use anyhow::{Context, Result};
use bson::{doc, Document};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{Client, Collection, Database};
use serde::de::DeserializeOwned;

/// Client for MongoDB operations
pub struct MongoClient {
    db: Database,
}

impl MongoClient {
    /// Connect to MongoDB and select the database
    pub async fn new(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .context("Failed to create MongoDB client")?;
        let db = client.database(database);

        // The driver connects lazily; ping so a bad URI fails at startup
        db.run_command(doc! { "ping": 1 })
            .await
            .with_context(|| format!("Failed to connect to MongoDB at {}", uri))?;

        tracing::info!("Connected to MongoDB at {} (database '{}')", uri, database);
        Ok(Self { db })
    }

    fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection::<T>(name)
    }

    /// Run a filtered find and collect every document
    async fn find_all<T>(
        &self,
        name: &str,
        filter: Document,
        sort: Option<Document>,
        limit: Option<i64>,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send + Sync + Unpin,
    {
        let collection = self.collection::<T>(name);
        let mut find = collection.find(filter);
        if let Some(sort) = sort {
            find = find.sort(sort);
        }
        if let Some(limit) = limit {
            find = find.limit(limit);
        }

        let cursor = find
            .await
            .with_context(|| format!("Failed to query collection '{}'", name))?;
        cursor
            .try_collect()
            .await
            .with_context(|| format!("Failed to read documents from '{}'", name))
    }

    async fn find_by_id<T>(&self, name: &str, id: i64) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send + Sync + Unpin,
    {
        self.collection::<T>(name)
            .find_one(doc! { "id": id })
            .await
            .with_context(|| format!("Failed to fetch {} {}", name, id))
    }

    fn newest_first() -> Option<Document> {
        Some(doc! { "creationDate": -1 })
    }

    // ========================================================================
    // Persons
    // ========================================================================

    pub async fn list_persons(&self, limit: i64) -> Result<Vec<PersonDocument>> {
        self.find_all(collections::PERSON, doc! {}, None, Some(limit))
            .await
    }

    pub async fn get_person(&self, id: i64) -> Result<Option<PersonDocument>> {
        self.find_by_id(collections::PERSON, id).await
    }

    pub async fn persons_by_city(&self, city_id: i64) -> Result<Vec<PersonDocument>> {
        self.find_all(
            collections::PERSON,
            doc! { "LocationCityId": city_id },
            None,
            None,
        )
        .await
    }

    // ========================================================================
    // Posts
    // ========================================================================

    pub async fn list_posts(&self, limit: i64) -> Result<Vec<PostDocument>> {
        self.find_all(collections::POST, doc! {}, None, Some(limit))
            .await
    }

    pub async fn get_post(&self, id: i64) -> Result<Option<PostDocument>> {
        self.find_by_id(collections::POST, id).await
    }

    pub async fn posts_by_creator(&self, creator_id: i64) -> Result<Vec<PostDocument>> {
        self.find_all(
            collections::POST,
            doc! { "CreatorPersonId": creator_id },
            Self::newest_first(),
            None,
        )
        .await
    }

    pub async fn posts_by_country(&self, country_id: i64) -> Result<Vec<PostDocument>> {
        self.find_all(
            collections::POST,
            doc! { "LocationCountryId": country_id },
            None,
            None,
        )
        .await
    }

    pub async fn latest_post_after(
        &self,
        creator_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Option<PostDocument>> {
        let filter = doc! {
            "CreatorPersonId": creator_id,
            "creationDate": { "$gt": bson::DateTime::from_chrono(since) },
        };
        let mut posts = self
            .find_all(collections::POST, filter, Self::newest_first(), Some(1))
            .await?;
        Ok(posts.pop())
    }

    pub async fn posts_by_forum(&self, forum_id: i64) -> Result<Vec<PostDocument>> {
        self.find_all(
            collections::POST,
            doc! { "ContainerForumId": forum_id },
            None,
            None,
        )
        .await
    }

    // ========================================================================
    // Comments
    // ========================================================================

    pub async fn list_comments(&self, limit: i64) -> Result<Vec<CommentDocument>> {
        self.find_all(collections::COMMENT, doc! {}, None, Some(limit))
            .await
    }

    pub async fn get_comment(&self, id: i64) -> Result<Option<CommentDocument>> {
        self.find_by_id(collections::COMMENT, id).await
    }

    pub async fn comments_by_creator(&self, creator_id: i64) -> Result<Vec<CommentDocument>> {
        self.find_all(
            collections::COMMENT,
            doc! { "CreatorPersonId": creator_id },
            Self::newest_first(),
            None,
        )
        .await
    }

    pub async fn comments_by_parent_post(&self, post_id: i64) -> Result<Vec<CommentDocument>> {
        self.find_all(
            collections::COMMENT,
            doc! { "ParentPostId": post_id },
            None,
            None,
        )
        .await
    }

    pub async fn comments_by_country(&self, country_id: i64) -> Result<Vec<CommentDocument>> {
        self.find_all(
            collections::COMMENT,
            doc! { "LocationCountryId": country_id },
            None,
            None,
        )
        .await
    }

    // ========================================================================
    // Forums
    // ========================================================================

    pub async fn list_forums(&self, limit: i64) -> Result<Vec<ForumDocument>> {
        self.find_all(collections::FORUM, doc! {}, None, Some(limit))
            .await
    }

    pub async fn get_forum(&self, id: i64) -> Result<Option<ForumDocument>> {
        self.find_by_id(collections::FORUM, id).await
    }

    pub async fn forums_by_moderator(&self, person_id: i64) -> Result<Vec<ForumDocument>> {
        self.find_all(
            collections::FORUM,
            doc! { "ModeratorPersonId": person_id },
            None,
            None,
        )
        .await
    }

    // ========================================================================
    // Health
    // ========================================================================

    pub async fn health_check(&self) -> Result<bool> {
        match self.db.run_command(doc! { "ping": 1 }).await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!("MongoDB health check failed: {}", e);
                Ok(false)
            }
        }
    }
}
