//! LDBC Social
//!
//! Query services over an LDBC SNB social-network dataset:
//! - Document service backed by MongoDB (persons, posts, comments, forums)
//! - Graph service backed by Neo4j (KNOWS, HAS_CREATOR, REPLY_OF, ... topology)
//! - Gateway that fans out to both services and paginates merged results

pub mod api;
pub mod gateway;
pub mod mongo;
pub mod neo4j;


use anyhow::Result;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: ServerYamlConfig,
    pub neo4j: Neo4jYamlConfig,
    pub mongodb: MongoYamlConfig,
    pub gateway: GatewayYamlConfig,
}

/// Listen ports for the three services
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerYamlConfig {
    pub gateway_port: u16,
    pub graph_port: u16,
    pub document_port: u16,
}

impl Default for ServerYamlConfig {
    fn default() -> Self {
        Self {
            gateway_port: 3003,
            graph_port: 3002,
            document_port: 3001,
        }
    }
}

/// Neo4j configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Neo4jYamlConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl Default for Neo4jYamlConfig {
    fn default() -> Self {
        Self {
            uri: "neo4j://localhost:7687".into(),
            user: "neo4j".into(),
            password: "Neo4jProject".into(),
        }
    }
}

/// MongoDB configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MongoYamlConfig {
    pub uri: String,
    pub database: String,
}

impl Default for MongoYamlConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".into(),
            database: "ldbc".into(),
        }
    }
}

/// Gateway upstream configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayYamlConfig {
    pub graph_service_url: String,
    pub document_service_url: String,
    pub timeout_secs: u64,
}

impl Default for GatewayYamlConfig {
    fn default() -> Self {
        Self {
            graph_service_url: "http://localhost:3002".into(),
            document_service_url: "http://localhost:3001".into(),
            timeout_secs: 30,
        }
    }
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: String,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub gateway_port: u16,
    pub graph_port: u16,
    pub document_port: u16,
    pub graph_service_url: String,
    pub document_service_url: String,
    pub upstream_timeout: Duration,
}

impl Config {
    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "config.yaml" in CWD.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        let yaml = Self::load_yaml(yaml_path);

        Ok(Self {
            neo4j_uri: std::env::var("NEO4J_URI").unwrap_or(yaml.neo4j.uri),
            neo4j_user: std::env::var("NEO4J_USER").unwrap_or(yaml.neo4j.user),
            neo4j_password: std::env::var("NEO4J_PASSWORD").unwrap_or(yaml.neo4j.password),
            mongodb_uri: std::env::var("MONGODB_URI").unwrap_or(yaml.mongodb.uri),
            mongodb_database: std::env::var("MONGODB_DATABASE").unwrap_or(yaml.mongodb.database),
            gateway_port: env_parse("GATEWAY_PORT").unwrap_or(yaml.server.gateway_port),
            graph_port: env_parse("GRAPH_SERVICE_PORT").unwrap_or(yaml.server.graph_port),
            document_port: env_parse("DOCUMENT_SERVICE_PORT")
                .unwrap_or(yaml.server.document_port),
            graph_service_url: std::env::var("GRAPH_SERVICE_URL")
                .unwrap_or(yaml.gateway.graph_service_url),
            document_service_url: std::env::var("DOCUMENT_SERVICE_URL")
                .unwrap_or(yaml.gateway.document_service_url),
            upstream_timeout: Duration::from_secs(
                env_parse("UPSTREAM_TIMEOUT_SECS").unwrap_or(yaml.gateway.timeout_secs),
            ),
        })
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> YamlConfig {
        let default_path = Path::new("config.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    YamlConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                YamlConfig::default()
            }
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.parse().ok())
}

// ============================================================================
// Server entry points
// ============================================================================

/// Start the Neo4j-backed graph service
pub async fn start_graph_service(config: Config) -> Result<()> {
    let client =
        neo4j::Neo4jClient::new(&config.neo4j_uri, &config.neo4j_user, &config.neo4j_password)
            .await?;
    let state = api::GraphServiceState {
        graph: Arc::new(client),
    };
    serve(api::create_graph_router(state), config.graph_port, "graph service").await
}

/// Start the MongoDB-backed document service
pub async fn start_document_service(config: Config) -> Result<()> {
    let client = mongo::MongoClient::new(&config.mongodb_uri, &config.mongodb_database).await?;
    let state = api::DocumentServiceState::new(Arc::new(client));
    serve(
        api::create_document_router(state),
        config.document_port,
        "document service",
    )
    .await
}

/// Start the aggregation gateway
pub async fn start_gateway(config: Config) -> Result<()> {
    let backend = Arc::new(gateway::HttpBackend::new(
        &config.graph_service_url,
        &config.document_service_url,
        config.upstream_timeout,
    )?);
    tracing::info!(
        "Gateway upstreams: graph={} documents={}",
        config.graph_service_url,
        config.document_service_url
    );
    let state = api::GatewayState::new(backend.clone(), backend);
    serve(api::create_gateway_router(state), config.gateway_port, "gateway").await
}

async fn serve(router: axum::Router, port: u16, name: &str) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("{} listening on http://{}", name, addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("{} shut down", name);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

// ============================================================================
// Tests
// ============================================================================
