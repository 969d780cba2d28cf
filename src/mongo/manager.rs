//! Document-side compositions that span several collections

use super::models::*;
use super::traits::DocumentStore;
use crate::neo4j::models::{ContentKind, ReplyPair};
use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use futures::future::join_all;
use std::sync::Arc;

/// Manager for forum titles, creator timelines and reply latencies
pub struct ContentManager {
    store: Arc<dyn DocumentStore>,
}

impl ContentManager {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    // ========================================================================
    // Forums
    // ========================================================================

    /// Resolve the title of a post's container forum. Never fails: a missing
    /// link, a missing forum and a lookup error each map to a fixed label.
    pub async fn forum_title(&self, forum_id: Option<i64>) -> String {
        let Some(forum_id) = forum_id else {
            return forum_titles::NO_FORUM.to_string();
        };

        match self.store.get_forum(forum_id).await {
            Ok(Some(forum)) => forum.title,
            Ok(None) => forum_titles::NOT_FOUND.to_string(),
            Err(e) => {
                tracing::warn!("Forum lookup failed for forum {}: {:#}", forum_id, e);
                forum_titles::LOOKUP_FAILED.to_string()
            }
        }
    }

    pub async fn with_forum(&self, post: PostDocument) -> PostWithForum {
        let forum_title = self.forum_title(post.container_forum_id).await;
        PostWithForum { post, forum_title }
    }

    // ========================================================================
    // Posts
    // ========================================================================

    /// Posts of a creator, newest first, each with its forum title
    pub async fn posts_by_creator(&self, creator_id: i64) -> Result<Vec<PostWithForum>> {
        let posts = self.store.posts_by_creator(creator_id).await?;
        Ok(join_all(posts.into_iter().map(|p| self.with_forum(p))).await)
    }

    /// Latest post of a creator published after `since`, with its forum title
    pub async fn latest_post_after(
        &self,
        creator_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Option<PostWithForum>> {
        match self.store.latest_post_after(creator_id, since).await? {
            Some(post) => Ok(Some(self.with_forum(post).await)),
            None => Ok(None),
        }
    }

    /// Posts and comments of a creator merged into one timeline, newest first
    pub async fn creator_content(&self, creator_id: i64) -> Result<Vec<CreatorContentItem>> {
        let (posts, comments) = futures::try_join!(
            self.store.posts_by_creator(creator_id),
            self.store.comments_by_creator(creator_id),
        )?;

        let posts = join_all(posts.into_iter().map(|post| async move {
            let forum_title = self.forum_title(post.container_forum_id).await;
            CreatorContentItem {
                id: post.id,
                creation_date: post.creation_date,
                content: post.content,
                kind: ContentKind::Post,
                container_forum_id: post.container_forum_id,
                forum_title: Some(forum_title),
                parent_post_id: None,
            }
        }))
        .await;

        let mut items = posts;
        items.extend(comments.into_iter().map(|comment| CreatorContentItem {
            id: comment.id,
            creation_date: comment.creation_date,
            content: Some(comment.content),
            kind: ContentKind::Comment,
            container_forum_id: None,
            forum_title: None,
            parent_post_id: comment.parent_post_id,
        }));

        items.sort_by(|a, b| b.creation_date.cmp(&a.creation_date));
        Ok(items)
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Seconds elapsed between each original message and its reply.
    ///
    /// Pairs whose reply comment or original message is missing are skipped,
    /// so the result may be shorter than the input.
    pub async fn reply_times(&self, pairs: &[ReplyPair]) -> Result<Vec<f64>> {
        let mut times = Vec::with_capacity(pairs.len());

        for pair in pairs {
            let Some(reply) = self.store.get_comment(pair.reply_id).await? else {
                tracing::debug!("Reply {} not found, skipping", pair.reply_id);
                continue;
            };
            let Some(original_date) = self.message_date(pair.original_id).await? else {
                tracing::debug!("Original message {} not found, skipping", pair.original_id);
                continue;
            };

            let elapsed = reply.creation_date - original_date;
            times.push(elapsed.num_milliseconds() as f64 / 1000.0);
        }

        Ok(times)
    }

    /// Creation date of a comment or post
    async fn message_date(&self, id: i64) -> Result<Option<DateTime<Utc>>> {
        if let Some(comment) = self.store.get_comment(id).await? {
            return Ok(Some(comment.creation_date));
        }
        Ok(self.store.get_post(id).await?.map(|p| p.creation_date))
    }
}

/// Midnight UTC on January 1st of `year`
pub fn start_of_year(year: i32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single()
}
