use api_types::ErrorResponse;
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use auth::{AuthError, Claims, Principal, TokenKeys};
pub use server::{ServerConfig, ServerState, router, run, run_with_listener, spawn_with_listener};

mod auth;
mod categories;
mod server;
mod transactions;
mod users;

pub mod types {
    pub mod auth {
        pub use api_types::auth::{AuthResponse, LoginRequest, RegisterRequest, UserView};
    }

    pub mod transaction {
        pub use api_types::transaction::{TransactionListQuery, TransactionNew, TransactionView};
    }

    pub mod category {
        pub use api_types::category::CategoryTaxonomy;
    }
}

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    Auth(AuthError),
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Validation(_) => StatusCode::BAD_REQUEST,
        EngineError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::InvalidId(_) | EngineError::Hashing(_) | EngineError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn body_for_engine_error(err: EngineError) -> ErrorResponse {
    match err {
        EngineError::Validation(violations) => ErrorResponse {
            error: violations.to_string(),
            details: violations.messages(),
        },
        EngineError::ExistingKey(key) => ErrorResponse {
            error: key,
            details: Vec::new(),
        },
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            internal_error()
        }
        EngineError::InvalidId(_) | EngineError::Hashing(_) => {
            tracing::error!("engine failure: {err}");
            internal_error()
        }
        other => ErrorResponse {
            error: other.to_string(),
            details: Vec::new(),
        },
    }
}

fn internal_error() -> ErrorResponse {
    ErrorResponse {
        error: "internal server error".to_string(),
        details: Vec::new(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), body_for_engine_error(err)),
            ServerError::Auth(AuthError::Issue(err)) => {
                tracing::error!("failed to issue token: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, internal_error())
            }
            ServerError::Auth(err) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse {
                    error: err.to_string(),
                    details: Vec::new(),
                },
            ),
            ServerError::Generic(error) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error,
                    details: Vec::new(),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<AuthError> for ServerError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}
