//! MongoDB document models for the LDBC collections
//!
//! Dates are stored as BSON dates and serialized to JSON as RFC 3339 strings.

use crate::neo4j::models::{ContentKind, ReplyPair};
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Collection names in the `ldbc` database
pub mod collections {
    pub const PERSON: &str = "person";
    pub const POST: &str = "post";
    pub const COMMENT: &str = "comment";
    pub const FORUM: &str = "forum";
}

// ============================================================================
// Documents
// ============================================================================

/// A `person` document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDocument {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default, deserialize_with = "optional_bson_datetime")]
    pub birthday: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "chrono_datetime_as_bson_datetime::deserialize")]
    pub creation_date: DateTime<Utc>,
    #[serde(rename = "locationIP", default)]
    pub location_ip: String,
    #[serde(default)]
    pub browser_used: String,
    #[serde(rename = "LocationCityId")]
    pub location_city_id: i64,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub email: String,
}

/// Name-only projection of a person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    pub first_name: String,
    pub last_name: String,
}

/// A `post` document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDocument {
    pub id: i64,
    #[serde(deserialize_with = "chrono_datetime_as_bson_datetime::deserialize")]
    pub creation_date: DateTime<Utc>,
    #[serde(default)]
    pub image_file: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(rename = "locationIP", default)]
    pub location_ip: String,
    #[serde(default)]
    pub browser_used: String,
    #[serde(default)]
    pub length: i64,
    #[serde(rename = "CreatorPersonId")]
    pub creator_person_id: i64,
    #[serde(rename = "ContainerForumId", default)]
    pub container_forum_id: Option<i64>,
    #[serde(rename = "LocationCountryId", default)]
    pub location_country_id: Option<i64>,
}

/// A `comment` document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDocument {
    pub id: i64,
    #[serde(deserialize_with = "chrono_datetime_as_bson_datetime::deserialize")]
    pub creation_date: DateTime<Utc>,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "locationIP", default)]
    pub location_ip: String,
    #[serde(default)]
    pub browser_used: String,
    #[serde(default)]
    pub length: i64,
    #[serde(rename = "CreatorPersonId")]
    pub creator_person_id: i64,
    #[serde(rename = "LocationCountryId", default)]
    pub location_country_id: Option<i64>,
    #[serde(rename = "ParentPostId", default)]
    pub parent_post_id: Option<i64>,
}

/// A `forum` document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumDocument {
    pub id: i64,
    pub title: String,
    #[serde(deserialize_with = "chrono_datetime_as_bson_datetime::deserialize")]
    pub creation_date: DateTime<Utc>,
    #[serde(rename = "ModeratorPersonId")]
    pub moderator_person_id: i64,
}

fn optional_bson_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<bson::DateTime> = Option::deserialize(deserializer)?;
    Ok(value.map(|d| d.to_chrono()))
}

// ============================================================================
// API views
// ============================================================================

/// Forum title resolved for a post
pub mod forum_titles {
    pub const NO_FORUM: &str = "No forum associated";
    pub const NOT_FOUND: &str = "Forum not found";
    pub const LOOKUP_FAILED: &str = "Error fetching forum";
}

/// A post together with the title of its container forum
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostWithForum {
    #[serde(flatten)]
    pub post: PostDocument,
    pub forum_title: String,
}

/// Reduced view of a single post
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub creation_date: DateTime<Utc>,
    pub content: Option<String>,
}

impl From<&PostDocument> for PostSummary {
    fn from(post: &PostDocument) -> Self {
        Self {
            id: post.id,
            kind: ContentKind::Post,
            creation_date: post.creation_date,
            content: post.content.clone(),
        }
    }
}

/// One entry of a creator's merged post/comment timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorContentItem {
    pub id: i64,
    pub creation_date: DateTime<Utc>,
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    #[serde(rename = "ContainerForumId", skip_serializing_if = "Option::is_none")]
    pub container_forum_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forum_title: Option<String>,
    #[serde(rename = "ParentPostId", skip_serializing_if = "Option::is_none")]
    pub parent_post_id: Option<i64>,
}

/// Forum title projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumTitle {
    pub title: String,
}

/// Body of `POST /api/comment/replyTime`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyTimeRequest {
    pub comments: Vec<ReplyPair>,
}

/// Reply latencies in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyTimeResponse {
    pub reply_times: Vec<f64>,
}
