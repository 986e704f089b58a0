//! SWBATTLE Server - HTTP API for the battle game
//!
//! This crate provides the web backend:
//! - GraphQL API over the resource catalog
//! - Battle endpoints backed by a server-side session
//! - Static file serving for the web client

mod error;
mod graphql;
mod routes;
mod state;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub use error::ApiError;
pub use graphql::{build_schema, CatalogSchema};
pub use state::{BattleView, CardEntry, ServerState};

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
    /// Catalog snapshot to load at startup and rewrite after every mutation
    pub data_path: Option<PathBuf>,
    /// Seed for battle selection (None = random)
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8003,
            static_dir: "web".to_string(),
            data_path: None,
            seed: None,
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);
    let schema = build_schema(state.clone());

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Catalog GraphQL API
        .route(
            "/api/graphql",
            get(routes::graphql::graphiql).post(routes::graphql::graphql_handler),
        )
        // Battle API
        .route("/api/battle", get(routes::battle::get_battle))
        .route("/api/battle/play", post(routes::battle::play_battle))
        .route("/api/battle/category", post(routes::battle::switch_category))
        .layer(Extension(schema))
        .layer(CorsLayer::permissive())
        // Shared state
        .with_state(state)
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::from_config(&config)?);
    let router = create_router(&config, state);

    tracing::info!("SWBATTLE Server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("GraphQL explorer at http://localhost:{}/api/graphql", config.port);
    tracing::info!("Static files served from: {}", config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
