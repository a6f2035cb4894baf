//! Account endpoints: sign-up and login, both answering with a bearer token.

use api_types::auth::{AuthResponse, LoginRequest, RegisterRequest, UserView};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use engine::{Credentials, LoginInput, Registration, RegistrationInput};

use crate::{ServerError, server::ServerState};

fn auth_response(state: &ServerState, user: engine::User) -> Result<AuthResponse, ServerError> {
    let token = state.tokens.issue(&user)?;
    Ok(AuthResponse {
        user: UserView {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
        },
        token,
    })
}

pub async fn register(
    State(state): State<ServerState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ServerError> {
    let Json(payload) = payload.map_err(|err| ServerError::Generic(err.body_text()))?;

    let registration = Registration::parse(&RegistrationInput {
        email: payload.email,
        password: payload.password,
        first_name: payload.first_name,
        last_name: payload.last_name,
    })?;
    let user = state.engine.register_user(registration).await?;
    tracing::info!("new account {}", user.id);

    Ok((StatusCode::CREATED, Json(auth_response(&state, user)?)))
}

pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ServerError> {
    let Json(payload) = payload.map_err(|err| ServerError::Generic(err.body_text()))?;

    let credentials = Credentials::parse(&LoginInput {
        email: payload.email,
        password: payload.password,
    })?;
    let user = state.engine.authenticate(credentials).await?;

    Ok(Json(auth_response(&state, user)?))
}
