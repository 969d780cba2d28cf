//! LDBC Social - Server
//!
//! Runs one of the three services: the gateway, the Neo4j graph service or
//! the MongoDB document service.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use ldbc_social::Config;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ldbc-social")]
#[command(about = "LDBC social-network query services")]
struct Cli {
    /// Path to a YAML config file (defaults to ./config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a service
    Serve {
        /// Which service to run
        #[arg(value_enum)]
        service: Service,

        /// Port to listen on (overrides config.yaml and env)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Service {
    /// Aggregation gateway (default port 3003)
    Gateway,
    /// Neo4j-backed graph service (default port 3002)
    Graph,
    /// MongoDB-backed document service (default port 3001)
    Documents,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json);

    let mut config = Config::from_yaml_and_env(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { service, port } => match service {
            Service::Gateway => {
                if let Some(port) = port {
                    config.gateway_port = port;
                }
                ldbc_social::start_gateway(config).await
            }
            Service::Graph => {
                if let Some(port) = port {
                    config.graph_port = port;
                }
                ldbc_social::start_graph_service(config).await
            }
            Service::Documents => {
                if let Some(port) = port {
                    config.document_port = port;
                }
                ldbc_social::start_document_service(config).await
            }
        },
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,ldbc_social=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
