//! Graph-side models returned by the social graph service

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// People
// ============================================================================

/// A person as exposed by the graph lookups (id plus display name)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSummary {
    pub id: i64,
    pub name: String,
    pub surname: String,
}

/// A 2-hop neighbour that is not already a direct friend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendOfFriend {
    pub id: i64,
    pub name: String,
    pub surname: String,
    /// Number of direct friends linking the two people
    pub mutual_friends: i64,
}

/// Distinct friends-of-friends count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FofTotal {
    #[serde(rename = "totalFoF")]
    pub total_fof: i64,
}

// ============================================================================
// Organisations
// ============================================================================

/// Kind of organisation a person is affiliated with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationKind {
    /// `WORK_AT`, affiliation year is `workFrom`
    Company,
    /// `STUDY_AT`, affiliation year is `classYear`
    University,
}

impl OrganizationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizationKind::Company => "company",
            OrganizationKind::University => "university",
        }
    }

    /// Relationship type linking a Person to the organisation
    pub fn relationship(&self) -> &'static str {
        match self {
            OrganizationKind::Company => "WORK_AT",
            OrganizationKind::University => "STUDY_AT",
        }
    }

    /// Relationship property holding the affiliation year
    pub fn since_property(&self) -> &'static str {
        match self {
            OrganizationKind::Company => "workFrom",
            OrganizationKind::University => "classYear",
        }
    }
}

impl fmt::Display for OrganizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrganizationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "company" => Ok(OrganizationKind::Company),
            "university" | "institution" => Ok(OrganizationKind::University),
            other => Err(format!(
                "Unknown organization type '{}' (expected 'company' or 'university')",
                other
            )),
        }
    }
}

/// A person affiliated with an organisation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationMember {
    pub id: i64,
    pub name: String,
    pub surname: String,
    /// Year the affiliation started
    pub since: i64,
    pub organization_type: OrganizationKind,
}

// ============================================================================
// Messages
// ============================================================================

/// Message label in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    Post,
    Comment,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Post => "Post",
            ContentKind::Comment => "Comment",
        }
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Post" => Ok(ContentKind::Post),
            "Comment" => Ok(ContentKind::Comment),
            other => Err(format!("Unknown content label '{}'", other)),
        }
    }
}

/// Reference to a message created by a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRef {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ContentKind,
}

/// A reply written by a person and the message it answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyPair {
    pub reply_id: i64,
    pub original_id: i64,
}

/// The message a comment replies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginalMessage {
    pub original_id: i64,
    pub original_type: ContentKind,
    pub id: i64,
    #[serde(default)]
    pub content: Option<String>,
}
