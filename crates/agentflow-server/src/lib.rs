//! agentflow server library
//!
//! Provides the HTTP server: the streaming `/process` pipeline endpoint and
//! the `/chat` assistant.

pub mod routes;
pub mod state;

use agentflow_core::config::{ConfigError, ServerConfig};
use agentflow_core::{AgentflowConfig, Runtime};
use axum::{
    extract::State,
    http::HeaderValue,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Once;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use state::AppState;

static TRACING_INIT: Once = Once::new();

/// What the binary was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Load configuration and serve HTTP
    Serve,
    /// Print a sample `.agentflow.toml` and exit
    PrintConfig,
}

impl Command {
    /// Parse command-line arguments (program name excluded); unknown flags are ignored
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Self {
        if args.into_iter().any(|arg| arg == "--print-config") {
            Command::PrintConfig
        } else {
            Command::Serve
        }
    }
}

/// Initialize tracing subscriber (only once)
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(
                std::env::var("RUST_LOG").unwrap_or_else(|_| {
                    "agentflow_server=debug,agentflow_core=info,tower_http=debug".into()
                }),
            ))
            .with(tracing_subscriber::fmt::layer())
            .init();
    });
}

/// CORS policy from the configured origins
pub fn cors_layer(server: &ServerConfig) -> Result<CorsLayer, ConfigError> {
    if server.allows_any_origin() {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = server
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin.trim())
                .map_err(|_| ConfigError::InvalidOrigin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Credentials rule out wildcards, so methods and headers are mirrored
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Build the Axum router with all routes
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/agents", get(routes::list_agents))
        .route("/process", get(routes::process))
        .route("/chat", post(routes::chat))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve `runtime` with the given server settings
pub async fn run_server(config: &ServerConfig, runtime: Runtime) -> anyhow::Result<()> {
    init_tracing();

    let cors = cors_layer(config)?;
    let app = build_router(AppState::new(runtime), cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Pipeline endpoint: GET http://{}/process?text=...", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load `.env` and configuration, then serve
///
/// A missing credential fails here, before the listener is bound.
pub async fn run() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }

    init_tracing();
    tracing::info!("Starting agentflow server...");

    let cwd = std::env::current_dir()?;
    let config: AgentflowConfig = agentflow_core::load_config(&cwd)?;
    let runtime = Runtime::from_config(&config)?;

    run_server(&config.server, runtime).await
}

/// Liveness plus the readiness of every role's provider
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let orchestrator = state.orchestrator.clone();
    let assistant = state.assistant.clone();

    // Some providers check readiness over the network
    let roles = tokio::task::spawn_blocking(move || {
        let mut roles = orchestrator.role_status();
        roles.push(assistant.role_status());
        roles
    })
    .await;

    let (status, roles) = match roles {
        Ok(roles) if roles.iter().all(|r| r.ready) => ("ok", roles),
        Ok(roles) => ("degraded", roles),
        Err(e) => {
            tracing::error!(error = %e, "health worker panicked");
            ("error", Vec::new())
        }
    };

    Json(serde_json::json!({
        "status": status,
        "version": agentflow_core::version(),
        "roles": roles
    }))
}
