//! Document Validation Server
//!
//! Accepts base64-encoded PDFs together with the content they must contain
//! and reports, per document:
//!
//! - which required groups of alternative phrases are present
//! - how closely each validate target is approximated anywhere in the text
//! - the average of those fuzzy scores
//!
//! Every submission is stored in SQLite and can be fetched back by id.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod store;

use api::{handle_get_document, handle_health, handle_validate_document};
use store::DocumentStore;

/// Command-line arguments for the validation server
#[derive(Parser, Debug)]
#[command(name = "validation-server")]
#[command(about = "Validates PDF documents for required content and fuzzy matches")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "8000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:documents.db?mode=rwc")]
    database_url: String,

    /// Deadline for text extraction and for validation, in milliseconds
    #[arg(long, env = "VALIDATION_TIMEOUT_MS", default_value = "10000")]
    timeout_ms: u64,

    /// Rate limit: requests per second per IP
    #[arg(long, env = "RATE_LIMIT", default_value = "10")]
    rate_limit: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: DocumentStore,
    /// Per-step deadline in milliseconds
    pub timeout_ms: u64,
}

/// Routes shared by the binary and the HTTP tests
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/validate_document", post(handle_validate_document))
        .route("/validate_document/", post(handle_validate_document))
        .route("/get_document/:id", get(handle_get_document))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting validation server on {}:{}", args.host, args.port);

    let store = DocumentStore::connect(&args.database_url).await?;

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("rate limit must be greater than zero"))?,
    );

    let state = AppState {
        store,
        timeout_ms: args.timeout_ms,
    };

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = app_router(state)
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!("Validation timeout: {}ms", args.timeout_ms);

    // The governor keys on the peer address, which needs connect info
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
