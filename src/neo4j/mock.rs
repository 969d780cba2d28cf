//! In-memory mock implementation of SocialGraph for testing.
//!
//! Mirrors the Cypher semantics of `Neo4jClient` over
//! `tokio::sync::RwLock<HashMap<K, V>>` collections.

use crate::neo4j::models::*;
use crate::neo4j::traits::SocialGraph;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use tokio::sync::RwLock;

/// A Post or Comment node with its outgoing edges
#[derive(Debug, Clone)]
pub struct MockMessage {
    pub kind: ContentKind,
    pub creator: i64,
    pub content: Option<String>,
    pub reply_of: Option<i64>,
}

/// In-memory mock implementation of SocialGraph for testing.
pub struct MockGraphStore {
    pub persons: RwLock<HashMap<i64, (String, String)>>,
    pub knows: RwLock<HashMap<i64, Vec<i64>>>,
    pub located_in: RwLock<HashMap<i64, i64>>,
    pub interests: RwLock<HashMap<i64, Vec<i64>>>,
    pub affiliations: RwLock<Vec<(i64, OrganizationKind, i64, i64)>>,
    pub messages: RwLock<HashMap<i64, MockMessage>>,
    /// post id → forum title
    pub post_forums: RwLock<HashMap<i64, String>>,
    pub healthy: RwLock<bool>,
}

impl MockGraphStore {
    /// Create a new empty MockGraphStore.
    pub fn new() -> Self {
        Self {
            persons: RwLock::new(HashMap::new()),
            knows: RwLock::new(HashMap::new()),
            located_in: RwLock::new(HashMap::new()),
            interests: RwLock::new(HashMap::new()),
            affiliations: RwLock::new(Vec::new()),
            messages: RwLock::new(HashMap::new()),
            post_forums: RwLock::new(HashMap::new()),
            healthy: RwLock::new(true),
        }
    }

    pub async fn add_person(&self, id: i64, first_name: &str, last_name: &str) {
        self.persons
            .write()
            .await
            .insert(id, (first_name.to_string(), last_name.to_string()));
    }

    /// Add a directed KNOWS edge
    pub async fn add_knows(&self, from: i64, to: i64) {
        self.knows.write().await.entry(from).or_default().push(to);
    }

    pub async fn set_location(&self, person_id: i64, place_id: i64) {
        self.located_in.write().await.insert(person_id, place_id);
    }

    pub async fn add_interest(&self, person_id: i64, tag_id: i64) {
        self.interests
            .write()
            .await
            .entry(person_id)
            .or_default()
            .push(tag_id);
    }

    pub async fn add_affiliation(
        &self,
        person_id: i64,
        kind: OrganizationKind,
        organization_id: i64,
        since: i64,
    ) {
        self.affiliations
            .write()
            .await
            .push((person_id, kind, organization_id, since));
    }

    pub async fn add_post(&self, id: i64, creator: i64, content: Option<&str>, forum: Option<&str>) {
        self.messages.write().await.insert(
            id,
            MockMessage {
                kind: ContentKind::Post,
                creator,
                content: content.map(str::to_string),
                reply_of: None,
            },
        );
        if let Some(title) = forum {
            self.post_forums.write().await.insert(id, title.to_string());
        }
    }

    pub async fn add_comment(&self, id: i64, creator: i64, content: &str, reply_of: i64) {
        self.messages.write().await.insert(
            id,
            MockMessage {
                kind: ContentKind::Comment,
                creator,
                content: Some(content.to_string()),
                reply_of: Some(reply_of),
            },
        );
    }

    pub async fn set_healthy(&self, healthy: bool) {
        *self.healthy.write().await = healthy;
    }

    async fn summary(&self, id: i64) -> Option<PersonSummary> {
        self.persons
            .read()
            .await
            .get(&id)
            .map(|(name, surname)| PersonSummary {
                id,
                name: name.clone(),
                surname: surname.clone(),
            })
    }

    /// fof id → mutual friend count
    async fn fof_counts(&self, person_id: i64) -> BTreeMap<i64, i64> {
        let knows = self.knows.read().await;
        let direct: HashSet<i64> = knows.get(&person_id).cloned().unwrap_or_default().into_iter().collect();

        let mut counts = BTreeMap::new();
        for friend in &direct {
            let mut seen = HashSet::new();
            for fof in knows.get(friend).into_iter().flatten() {
                if *fof == person_id || direct.contains(fof) || !seen.insert(*fof) {
                    continue;
                }
                *counts.entry(*fof).or_insert(0) += 1;
            }
        }
        counts
    }
}

impl Default for MockGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SocialGraph for MockGraphStore {
    async fn known_people(&self, person_id: i64) -> Result<Vec<PersonSummary>> {
        let mut ids = self
            .knows
            .read()
            .await
            .get(&person_id)
            .cloned()
            .unwrap_or_default();
        ids.sort_unstable();

        let mut people = Vec::new();
        for id in ids {
            if let Some(p) = self.summary(id).await {
                people.push(p);
            }
        }
        Ok(people)
    }

    async fn friends_of_friends(&self, person_id: i64) -> Result<Vec<FriendOfFriend>> {
        let counts = self.fof_counts(person_id).await;

        let mut result = Vec::new();
        for (id, mutual) in counts {
            if let Some(p) = self.summary(id).await {
                result.push(FriendOfFriend {
                    id,
                    name: p.name,
                    surname: p.surname,
                    mutual_friends: mutual,
                });
            }
        }
        result.sort_by(|a, b| b.mutual_friends.cmp(&a.mutual_friends).then(a.id.cmp(&b.id)));
        Ok(result)
    }

    async fn count_friends_of_friends(&self, person_id: i64) -> Result<i64> {
        Ok(self.fof_counts(person_id).await.len() as i64)
    }

    async fn people_by_location_and_tag(
        &self,
        place_id: i64,
        tag_id: i64,
    ) -> Result<Vec<PersonSummary>> {
        let located = self.located_in.read().await;
        let interests = self.interests.read().await;
        let mut ids: Vec<i64> = located
            .iter()
            .filter(|(pid, place)| {
                **place == place_id
                    && interests.get(*pid).is_some_and(|tags| tags.contains(&tag_id))
            })
            .map(|(pid, _)| *pid)
            .collect();
        ids.sort_unstable();
        drop(located);
        drop(interests);

        let mut people = Vec::new();
        for id in ids {
            if let Some(p) = self.summary(id).await {
                people.push(p);
            }
        }
        Ok(people)
    }

    async fn people_by_organization(
        &self,
        kind: OrganizationKind,
        organization_id: i64,
    ) -> Result<Vec<OrganizationMember>> {
        let mut matches: Vec<(i64, i64)> = self
            .affiliations
            .read()
            .await
            .iter()
            .filter(|(_, k, org, _)| *k == kind && *org == organization_id)
            .map(|(pid, _, _, since)| (*since, *pid))
            .collect();
        matches.sort_unstable();

        let mut members = Vec::new();
        for (since, id) in matches {
            if let Some(p) = self.summary(id).await {
                members.push(OrganizationMember {
                    id,
                    name: p.name,
                    surname: p.surname,
                    since,
                    organization_type: kind,
                });
            }
        }
        Ok(members)
    }

    async fn content_by_creator(&self, person_id: i64) -> Result<Vec<ContentRef>> {
        let mut refs: Vec<ContentRef> = self
            .messages
            .read()
            .await
            .iter()
            .filter(|(_, m)| m.creator == person_id)
            .map(|(id, m)| ContentRef {
                id: *id,
                kind: m.kind,
            })
            .collect();
        refs.sort_by_key(|r| r.id);
        Ok(refs)
    }

    async fn forum_title_of_post(&self, post_id: i64) -> Result<Option<String>> {
        Ok(self.post_forums.read().await.get(&post_id).cloned())
    }

    async fn replies_to_others(&self, person_id: i64) -> Result<Vec<ReplyPair>> {
        let messages = self.messages.read().await;
        let mut pairs: Vec<ReplyPair> = messages
            .iter()
            .filter(|(_, m)| m.kind == ContentKind::Comment && m.creator == person_id)
            .filter_map(|(id, m)| {
                let original_id = m.reply_of?;
                let original = messages.get(&original_id)?;
                (original.creator != person_id).then_some(ReplyPair {
                    reply_id: *id,
                    original_id,
                })
            })
            .collect();
        pairs.sort_by_key(|p| p.reply_id);
        Ok(pairs)
    }

    async fn original_message(&self, comment_id: i64) -> Result<Option<OriginalMessage>> {
        let messages = self.messages.read().await;
        let Some(original_id) = messages
            .get(&comment_id)
            .filter(|m| m.kind == ContentKind::Comment)
            .and_then(|m| m.reply_of)
        else {
            return Ok(None);
        };
        Ok(messages.get(&original_id).map(|original| OriginalMessage {
            original_id,
            original_type: original.kind,
            id: original_id,
            content: original.content.clone(),
        }))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(*self.healthy.read().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::seeded_graph;

    #[tokio::test]
    async fn test_fof_excludes_self_and_direct_friends() {
        let graph = seeded_graph().await;
        let fof = graph.friends_of_friends(1).await.unwrap();
        let ids: Vec<i64> = fof.iter().map(|f| f.id).collect();
        assert!(!ids.contains(&1));
        assert!(!ids.contains(&2));
        assert!(!ids.contains(&3));
        assert_eq!(ids, vec![4, 5]);
        // 4 is reachable through both 2 and 3
        assert_eq!(fof[0].mutual_friends, 2);
        assert_eq!(graph.count_friends_of_friends(1).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_replies_to_others_skips_self_replies() {
        let graph = seeded_graph().await;
        let pairs = graph.replies_to_others(1).await.unwrap();
        assert_eq!(
            pairs,
            vec![ReplyPair {
                reply_id: 301,
                original_id: 200
            }]
        );
    }

    #[tokio::test]
    async fn test_original_message_of_post_is_none() {
        let graph = seeded_graph().await;
        assert!(graph.original_message(200).await.unwrap().is_none());
        let original = graph.original_message(301).await.unwrap().unwrap();
        assert_eq!(original.original_type, ContentKind::Post);
        assert_eq!(original.id, 200);
    }
}
