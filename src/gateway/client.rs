//! HTTP client for the graph and document services

use super::error::{UpstreamError, UpstreamResult};
use super::traits::{DocumentBackend, GraphBackend};
use crate::mongo::models::{PersonName, ReplyTimeRequest, ReplyTimeResponse};
use crate::neo4j::models::*;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

const GRAPH_SERVICE: &str = "graph service";
const DOCUMENT_SERVICE: &str = "document service";

/// Backend talking to both services over HTTP with one pooled client
pub struct HttpBackend {
    client: Client,
    graph_url: String,
    document_url: String,
}

impl HttpBackend {
    pub fn new(graph_url: &str, document_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            graph_url: graph_url.trim_end_matches('/').to_string(),
            document_url: document_url.trim_end_matches('/').to_string(),
        })
    }

    fn base(&self, service: &'static str) -> &str {
        if service == GRAPH_SERVICE {
            &self.graph_url
        } else {
            &self.document_url
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        service: &'static str,
        path: &str,
    ) -> UpstreamResult<T> {
        let url = format!("{}{}", self.base(service), path);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { service, source })?;
        decode(service, path, response).await
    }

    async fn post_json<B, T>(&self, service: &'static str, path: &str, body: &B) -> UpstreamResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base(service), path);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { service, source })?;
        decode(service, path, response).await
    }

    async fn check_health(&self, service: &'static str) -> UpstreamResult<()> {
        let path = "/health";
        let response = self
            .client
            .get(format!("{}{}", self.base(service), path))
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { service, source })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(UpstreamError::Status {
                service,
                path: path.to_string(),
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            })
        }
    }
}

/// Map a response to the typed body or an `UpstreamError`
async fn decode<T: DeserializeOwned>(
    service: &'static str,
    path: &str,
    response: Response,
) -> UpstreamResult<T> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(UpstreamError::NotFound {
            service,
            path: path.to_string(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| UpstreamError::Transport { service, source })?;

    if !status.is_success() {
        return Err(UpstreamError::Status {
            service,
            path: path.to_string(),
            status: status.as_u16(),
            message: error_message(&body),
        });
    }

    serde_json::from_slice(&body).map_err(|e| UpstreamError::Decode {
        service,
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// `message` field of a JSON error body, or the raw body text
fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned())
}

#[async_trait]
impl GraphBackend for HttpBackend {
    async fn known_people(&self, person_id: i64) -> UpstreamResult<Vec<PersonSummary>> {
        self.get_json(GRAPH_SERVICE, &format!("/api/people/known/{}", person_id))
            .await
    }

    async fn friends_of_friends(&self, person_id: i64) -> UpstreamResult<Vec<FriendOfFriend>> {
        self.get_json(GRAPH_SERVICE, &format!("/api/people/fof/{}", person_id))
            .await
    }

    async fn count_friends_of_friends(&self, person_id: i64) -> UpstreamResult<i64> {
        let total: FofTotal = self
            .get_json(GRAPH_SERVICE, &format!("/api/people/fof/{}/total", person_id))
            .await?;
        Ok(total.total_fof)
    }

    async fn people_by_location_and_tag(
        &self,
        place_id: i64,
        tag_id: i64,
    ) -> UpstreamResult<Vec<PersonSummary>> {
        self.get_json(
            GRAPH_SERVICE,
            &format!("/api/people/byLocation/{}/byTag/{}", place_id, tag_id),
        )
        .await
    }

    async fn people_by_organization(
        &self,
        kind: OrganizationKind,
        organization_id: i64,
    ) -> UpstreamResult<Vec<OrganizationMember>> {
        self.get_json(
            GRAPH_SERVICE,
            &format!("/api/people/byOrganization/{}/{}", kind, organization_id),
        )
        .await
    }

    async fn content_by_creator(&self, person_id: i64) -> UpstreamResult<Vec<ContentRef>> {
        self.get_json(GRAPH_SERVICE, &format!("/api/post/byUser/{}", person_id))
            .await
    }

    async fn forum_title_of_post(&self, post_id: i64) -> UpstreamResult<String> {
        self.get_json(GRAPH_SERVICE, &format!("/api/post/forumTitle/{}", post_id))
            .await
    }

    async fn replies_to_others(&self, person_id: i64) -> UpstreamResult<Vec<ReplyPair>> {
        self.get_json(
            GRAPH_SERVICE,
            &format!("/api/comment/repliesToOthers/{}", person_id),
        )
        .await
    }

    async fn original_message(&self, comment_id: i64) -> UpstreamResult<OriginalMessage> {
        self.get_json(GRAPH_SERVICE, &format!("/api/comment/replies/{}", comment_id))
            .await
    }

    async fn health(&self) -> UpstreamResult<()> {
        self.check_health(GRAPH_SERVICE).await
    }
}

#[async_trait]
impl DocumentBackend for HttpBackend {
    async fn person_name(&self, person_id: i64) -> UpstreamResult<PersonName> {
        self.get_json(DOCUMENT_SERVICE, &format!("/api/person/{}", person_id))
            .await
    }

    async fn persons_by_city(&self, city_id: i64) -> UpstreamResult<Vec<Value>> {
        self.get_json(
            DOCUMENT_SERVICE,
            &format!("/api/person/byLocation/{}", city_id),
        )
        .await
    }

    async fn post(&self, post_id: i64) -> UpstreamResult<Value> {
        self.get_json(DOCUMENT_SERVICE, &format!("/api/post/{}", post_id))
            .await
    }

    async fn comment(&self, comment_id: i64) -> UpstreamResult<Value> {
        self.get_json(DOCUMENT_SERVICE, &format!("/api/comment/{}", comment_id))
            .await
    }

    async fn latest_posts_since(&self, creator_id: i64, year: i64) -> UpstreamResult<Vec<Value>> {
        self.get_json(
            DOCUMENT_SERVICE,
            &format!("/api/post/creator/{}/date/{}", creator_id, year),
        )
        .await
    }

    async fn reply_times(&self, pairs: &[ReplyPair]) -> UpstreamResult<Vec<f64>> {
        let request = ReplyTimeRequest {
            comments: pairs.to_vec(),
        };
        let response: ReplyTimeResponse = self
            .post_json(DOCUMENT_SERVICE, "/api/comment/replyTime", &request)
            .await?;
        Ok(response.reply_times)
    }

    async fn health(&self) -> UpstreamResult<()> {
        self.check_health(DOCUMENT_SERVICE).await
    }
}
