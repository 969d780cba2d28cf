//! Neo4j client for the LDBC social graph

use super::models::*;
use anyhow::{Context, Result};
use neo4rs::{query, Graph, Query, Row};
use std::sync::Arc;

/// Client for Neo4j operations
pub struct Neo4jClient {
    graph: Arc<Graph>,
}

impl Neo4jClient {
    /// Create a new Neo4j client
    pub async fn new(uri: &str, user: &str, password: &str) -> Result<Self> {
        let graph = Graph::new(uri, user, password)
            .await
            .context("Failed to connect to Neo4j")?;

        let client = Self {
            graph: Arc::new(graph),
        };

        client.init_indexes().await;
        tracing::info!("Connected to Neo4j at {}", uri);

        Ok(client)
    }

    /// Create lookup indexes on LDBC node ids. The dataset is imported
    /// externally, so failures only degrade query speed.
    async fn init_indexes(&self) {
        let indexes = [
            "CREATE INDEX person_id IF NOT EXISTS FOR (p:Person) ON (p.id)",
            "CREATE INDEX post_id IF NOT EXISTS FOR (p:Post) ON (p.id)",
            "CREATE INDEX comment_id IF NOT EXISTS FOR (c:Comment) ON (c.id)",
            "CREATE INDEX forum_id IF NOT EXISTS FOR (f:Forum) ON (f.id)",
            "CREATE INDEX place_id IF NOT EXISTS FOR (p:Place) ON (p.id)",
            "CREATE INDEX tag_id IF NOT EXISTS FOR (t:Tag) ON (t.id)",
            "CREATE INDEX organisation_id IF NOT EXISTS FOR (o:Organisation) ON (o.id)",
        ];

        for index in indexes {
            if let Err(e) = self.graph.run(query(index)).await {
                tracing::warn!("Index creation skipped: {}", e);
            }
        }
    }

    /// Execute a parameterized Cypher query and collect all rows
    pub(crate) async fn execute_with_params(&self, q: Query) -> Result<Vec<Row>> {
        let mut result = self.graph.execute(q).await?;
        let mut rows = Vec::new();
        while let Some(row) = result.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    // ========================================================================
    // People
    // ========================================================================

    /// People the given person KNOWS
    pub async fn known_people(&self, person_id: i64) -> Result<Vec<PersonSummary>> {
        let q = query(
            r#"
            MATCH (p:Person {id: $person_id})-[:KNOWS]->(friend:Person)
            RETURN friend.id AS id, friend.firstName AS name, friend.lastName AS surname
            ORDER BY id
            "#,
        )
        .param("person_id", person_id);

        let rows = self
            .execute_with_params(q)
            .await
            .context("Failed to query known people")?;
        rows.iter().map(row_to_person).collect()
    }

    /// Friends-of-friends with their mutual friend count
    pub async fn friends_of_friends(&self, person_id: i64) -> Result<Vec<FriendOfFriend>> {
        let q = query(
            r#"
            MATCH (p:Person {id: $person_id})-[:KNOWS]->(friend:Person)-[:KNOWS]->(fof:Person)
            WHERE fof <> p AND NOT (p)-[:KNOWS]->(fof)
            RETURN fof.id AS id, fof.firstName AS name, fof.lastName AS surname,
                   count(DISTINCT friend) AS mutualFriends
            ORDER BY mutualFriends DESC, id ASC
            "#,
        )
        .param("person_id", person_id);

        let rows = self
            .execute_with_params(q)
            .await
            .context("Failed to query friends of friends")?;

        rows.iter()
            .map(|row| {
                Ok(FriendOfFriend {
                    id: row.get("id")?,
                    name: row.get("name").unwrap_or_default(),
                    surname: row.get("surname").unwrap_or_default(),
                    mutual_friends: row.get("mutualFriends")?,
                })
            })
            .collect()
    }

    /// Number of distinct friends-of-friends
    pub async fn count_friends_of_friends(&self, person_id: i64) -> Result<i64> {
        let q = query(
            r#"
            MATCH (p:Person {id: $person_id})-[:KNOWS]->(:Person)-[:KNOWS]->(fof:Person)
            WHERE fof <> p AND NOT (p)-[:KNOWS]->(fof)
            RETURN count(DISTINCT fof) AS total
            "#,
        )
        .param("person_id", person_id);

        let rows = self.execute_with_params(q).await?;
        match rows.first() {
            Some(row) => Ok(row.get("total")?),
            None => Ok(0),
        }
    }

    /// People located in a place and interested in a tag
    pub async fn people_by_location_and_tag(
        &self,
        place_id: i64,
        tag_id: i64,
    ) -> Result<Vec<PersonSummary>> {
        let q = query(
            r#"
            MATCH (p:Person)-[:IS_LOCATED_IN]->(:Place {id: $place_id}),
                  (p)-[:HAS_INTEREST]->(:Tag {id: $tag_id})
            RETURN p.id AS id, p.firstName AS name, p.lastName AS surname
            ORDER BY id
            "#,
        )
        .param("place_id", place_id)
        .param("tag_id", tag_id);

        let rows = self
            .execute_with_params(q)
            .await
            .context("Failed to query people by location and tag")?;
        rows.iter().map(row_to_person).collect()
    }

    /// People affiliated with an organisation
    pub async fn people_by_organization(
        &self,
        kind: OrganizationKind,
        organization_id: i64,
    ) -> Result<Vec<OrganizationMember>> {
        // Relationship type and property cannot be parameters; both come
        // from the closed OrganizationKind enum.
        let cypher = format!(
            r#"
            MATCH (p:Person)-[r:{rel}]->(:Organisation {{id: $org_id}})
            RETURN p.id AS id, p.firstName AS name, p.lastName AS surname, r.{since} AS since
            ORDER BY since, id
            "#,
            rel = kind.relationship(),
            since = kind.since_property(),
        );
        let q = query(&cypher).param("org_id", organization_id);

        let rows = self
            .execute_with_params(q)
            .await
            .context("Failed to query people by organization")?;

        rows.iter()
            .map(|row| {
                Ok(OrganizationMember {
                    id: row.get("id")?,
                    name: row.get("name").unwrap_or_default(),
                    surname: row.get("surname").unwrap_or_default(),
                    since: row.get("since")?,
                    organization_type: kind,
                })
            })
            .collect()
    }

    // ========================================================================
    // Messages
    // ========================================================================

    /// Posts and comments created by a person
    pub async fn content_by_creator(&self, person_id: i64) -> Result<Vec<ContentRef>> {
        let q = query(
            r#"
            MATCH (content)-[:HAS_CREATOR]->(:Person {id: $person_id})
            WHERE content:Post OR content:Comment
            RETURN content.id AS id,
                   CASE WHEN content:Post THEN 'Post' ELSE 'Comment' END AS type
            ORDER BY id
            "#,
        )
        .param("person_id", person_id);

        let rows = self
            .execute_with_params(q)
            .await
            .context("Failed to query content by creator")?;

        rows.iter()
            .map(|row| {
                Ok(ContentRef {
                    id: row.get("id")?,
                    kind: parse_kind(row)?,
                })
            })
            .collect()
    }

    /// Title of the forum containing a post
    pub async fn forum_title_of_post(&self, post_id: i64) -> Result<Option<String>> {
        let q = query(
            r#"
            MATCH (f:Forum)-[:CONTAINER_OF]->(:Post {id: $post_id})
            RETURN f.title AS title
            LIMIT 1
            "#,
        )
        .param("post_id", post_id);

        let rows = self.execute_with_params(q).await?;
        Ok(rows.first().and_then(|row| row.get::<String>("title").ok()))
    }

    /// Comments by a person replying to someone else's message
    pub async fn replies_to_others(&self, person_id: i64) -> Result<Vec<ReplyPair>> {
        let q = query(
            r#"
            MATCH (reply:Comment)-[:HAS_CREATOR]->(author:Person {id: $person_id})
            MATCH (reply)-[:REPLY_OF]->(original)-[:HAS_CREATOR]->(other:Person)
            WHERE other <> author
            RETURN reply.id AS replyId, original.id AS originalId
            ORDER BY replyId
            "#,
        )
        .param("person_id", person_id);

        let rows = self
            .execute_with_params(q)
            .await
            .context("Failed to query replies to others")?;

        rows.iter()
            .map(|row| {
                Ok(ReplyPair {
                    reply_id: row.get("replyId")?,
                    original_id: row.get("originalId")?,
                })
            })
            .collect()
    }

    /// The message a comment replies to
    pub async fn original_message(&self, comment_id: i64) -> Result<Option<OriginalMessage>> {
        let q = query(
            r#"
            MATCH (:Comment {id: $comment_id})-[:REPLY_OF]->(original)
            RETURN original.id AS id,
                   CASE WHEN original:Post THEN 'Post' ELSE 'Comment' END AS type,
                   original.content AS content
            LIMIT 1
            "#,
        )
        .param("comment_id", comment_id);

        let rows = self.execute_with_params(q).await?;
        let Some(row) = rows.first() else {
            return Ok(None);
        };

        let id: i64 = row.get("id")?;
        Ok(Some(OriginalMessage {
            original_id: id,
            original_type: parse_kind(row)?,
            id,
            content: row.get::<String>("content").ok(),
        }))
    }

    // ========================================================================
    // Health
    // ========================================================================

    /// Check connectivity to Neo4j
    pub async fn health_check(&self) -> Result<bool> {
        match self.graph.execute(query("RETURN 1 AS ok")).await {
            Ok(mut stream) => Ok(stream.next().await.is_ok()),
            Err(e) => {
                tracing::warn!("Neo4j health check failed: {}", e);
                Ok(false)
            }
        }
    }
}

fn row_to_person(row: &Row) -> Result<PersonSummary> {
    Ok(PersonSummary {
        id: row.get("id")?,
        name: row.get("name").unwrap_or_default(),
        surname: row.get("surname").unwrap_or_default(),
    })
}

fn parse_kind(row: &Row) -> Result<ContentKind> {
    let label: String = row.get("type")?;
    label.parse().map_err(anyhow::Error::msg)
}
