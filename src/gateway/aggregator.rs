//! Cross-service compositions served by the gateway

use super::error::{empty_on_not_found, UpstreamResult};
use super::traits::{DocumentBackend, GraphBackend};
use crate::neo4j::models::{ContentKind, ContentRef, OrganizationMember};
use futures::future::join_all;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;

pub const UNKNOWN_FORUM: &str = "Unknown Forum";
pub const FORUM_NOT_FOUND: &str = "Forum not found";
pub const PARENT_NOT_FOUND: &str = "Parent post not found";

/// Average reply latency of a person, split into calendar units
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyTimeStats {
    pub average_reply_time_seconds: Option<f64>,
    pub formatted: Option<FormattedDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_count: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormattedDuration {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl FormattedDuration {
    /// Split whole seconds into days, hours, minutes and seconds
    pub fn from_seconds(total: i64) -> Self {
        Self {
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
        }
    }
}

/// Statistics over a set of reply latencies in seconds
pub fn reply_time_stats(times: &[f64]) -> ReplyTimeStats {
    if times.is_empty() {
        return ReplyTimeStats {
            average_reply_time_seconds: None,
            formatted: None,
            reply_count: None,
        };
    }

    let average = times.iter().sum::<f64>() / times.len() as f64;
    ReplyTimeStats {
        average_reply_time_seconds: Some((average * 100.0).round() / 100.0),
        formatted: Some(FormattedDuration::from_seconds(average.floor() as i64)),
        reply_count: Some(times.len()),
    }
}

/// An organisation member with the posts published since joining
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberWithPosts {
    #[serde(flatten)]
    pub member: OrganizationMember,
    pub posts: Vec<Value>,
}

/// Gateway compositions over the graph and document backends
pub struct Aggregator {
    graph: Arc<dyn GraphBackend>,
    documents: Arc<dyn DocumentBackend>,
}

impl Aggregator {
    pub fn new(graph: Arc<dyn GraphBackend>, documents: Arc<dyn DocumentBackend>) -> Self {
        Self { graph, documents }
    }

    pub fn graph(&self) -> &dyn GraphBackend {
        self.graph.as_ref()
    }

    pub fn documents(&self) -> &dyn DocumentBackend {
        self.documents.as_ref()
    }

    /// Average time a person takes to answer other people's messages.
    ///
    /// Returns `None` when the person has not replied to anyone.
    pub async fn average_reply_time(&self, person_id: i64) -> UpstreamResult<Option<ReplyTimeStats>> {
        let pairs = empty_on_not_found(self.graph.replies_to_others(person_id).await)?;
        if pairs.is_empty() {
            return Ok(None);
        }

        let times = self.documents.reply_times(&pairs).await?;
        tracing::debug!(
            "Person {}: {} replies, {} with reply times",
            person_id,
            pairs.len(),
            times.len()
        );
        Ok(Some(reply_time_stats(&times)))
    }

    /// Attach document details to each content reference concurrently
    pub async fn enrich_content(&self, refs: &[ContentRef]) -> Vec<Value> {
        join_all(refs.iter().map(|r| self.enrich_one(*r))).await
    }

    async fn enrich_one(&self, content: ContentRef) -> Value {
        let mut item = Map::new();
        item.insert("id".into(), json!(content.id));
        item.insert("type".into(), json!(content.kind));

        let details = match content.kind {
            ContentKind::Post => self.documents.post(content.id).await,
            ContentKind::Comment => self.documents.comment(content.id).await,
        };
        match details {
            Ok(Value::Object(fields)) => item.extend(fields),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Details for {} {} unavailable: {}", content.kind.as_str(), content.id, e);
                return Value::Object(item);
            }
        }

        match content.kind {
            ContentKind::Post => {
                let title = match self.graph.forum_title_of_post(content.id).await {
                    Ok(title) if title.is_empty() => UNKNOWN_FORUM.to_string(),
                    Ok(title) => title,
                    Err(e) => {
                        tracing::warn!("Forum title for post {} unavailable: {}", content.id, e);
                        FORUM_NOT_FOUND.to_string()
                    }
                };
                item.insert("forumTitle".into(), json!(title));
            }
            ContentKind::Comment => {
                let parent = match self.graph.original_message(content.id).await {
                    Ok(original) => json!(original),
                    Err(e) => {
                        tracing::warn!("Parent of comment {} unavailable: {}", content.id, e);
                        json!({ "error": PARENT_NOT_FOUND })
                    }
                };
                item.insert("parentPost".into(), parent);
            }
        }

        Value::Object(item)
    }

    /// Fetch, for each member, their latest post since joining the organisation
    pub async fn attach_recent_posts(&self, members: Vec<OrganizationMember>) -> Vec<MemberWithPosts> {
        join_all(members.into_iter().map(|member| async move {
            let posts = match self
                .documents
                .latest_posts_since(member.id, member.since)
                .await
            {
                Ok(posts) => posts,
                Err(e) => {
                    tracing::warn!("Posts of person {} unavailable: {}", member.id, e);
                    Vec::new()
                }
            };
            MemberWithPosts { member, posts }
        }))
        .await
    }
}
