use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{LoginRequest, PublicUser, RegisterRequest};
use super::extractor::is_valid_username;
use super::password::{hash_password, verify_password};
use super::repo::User;
use crate::error::ApiError;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    payload.username = payload.username.trim().to_string();

    if !is_valid_username(&payload.username) {
        warn!(username = %payload.username, "invalid username");
        return Err(ApiError::BadRequest("Invalid username".into()));
    }

    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::BadRequest("Password too short".into()));
    }

    let hash = hash_password(&payload.password)?;

    // A passwordless row may already exist from X-User traffic; registering
    // claims it. A row that already has a password is taken.
    let user = match User::find_by_username(&state.db, &payload.username).await? {
        Some(existing) if existing.password_hash.is_some() => {
            warn!(username = %payload.username, "username already registered");
            return Err(ApiError::Conflict("Username already registered".into()));
        }
        Some(existing) => User::set_password(&state.db, existing.id, &hash).await?,
        None => User::create(&state.db, &payload.username, &hash).await?,
    };

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(PublicUser {
            id: user.id,
            username: user.username,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    payload.username = payload.username.trim().to_string();

    let user = match User::find_by_username(&state.db, &payload.username).await? {
        Some(u) => u,
        None => {
            warn!(username = %payload.username, "login unknown username");
            return Err(ApiError::Unauthorized("Invalid credentials".into()));
        }
    };

    let Some(hash) = user.password_hash.as_deref() else {
        warn!(username = %payload.username, "login without registered password");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    };

    if !verify_password(&payload.password, hash)? {
        warn!(username = %payload.username, user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok(Json(PublicUser {
        id: user.id,
        username: user.username,
    }))
}
