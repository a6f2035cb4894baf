use axum::{
    Json, Router,
    middleware,
    routing::{get, post},
};
use chrono::Duration;

use std::{net::SocketAddr, sync::Arc};

use crate::{auth, categories, transactions, users};
use api_types::Health;
use engine::Engine;

/// Runtime options of the HTTP layer.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Mount point of the versioned API, e.g. `/api/v1`.
    pub api_prefix: String,
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_prefix: "/api/v1".to_string(),
            jwt_secret: "change-me".to_string(),
            token_ttl: Duration::hours(24),
        }
    }
}

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub tokens: auth::TokenKeys,
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}

pub fn router(engine: Engine, config: &ServerConfig) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
        tokens: auth::TokenKeys::new(config.jwt_secret.as_bytes(), config.token_ttl),
    };

    let protected = Router::new()
        .route(
            "/transactions",
            post(transactions::create).get(transactions::list),
        )
        .route("/transactions/categories", get(categories::user_categories))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_principal,
        ));

    let public = Router::new()
        .route("/categories", get(categories::taxonomy))
        .route("/auth/register", post(users::register))
        .route("/auth/login", post(users::login));

    let api = public.merge(protected);
    let prefix = config.api_prefix.trim_end_matches('/');
    let api = if prefix.is_empty() {
        api
    } else {
        Router::new().nest(prefix, api)
    };

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
}

pub async fn run(engine: Engine, config: ServerConfig, addr: SocketAddr) {
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, config, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    config: ServerConfig,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}{}", addr, config.api_prefix);

    axum::serve(listener, router(engine, &config)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    config: ServerConfig,
    listener: tokio::net::TcpListener,
) -> Result<SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, config, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
