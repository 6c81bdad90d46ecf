use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument};

use super::dto::{CategoryResponse, CreateCategoryRequest};
use super::repo;
use crate::auth::Identity;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/:name", delete(delete_category))
}

/// First listing for a user seeds the default set.
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
    Identity(user_id): Identity,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let mut rows = repo::list_by_user(&state.db, user_id).await?;
    if rows.is_empty() {
        repo::seed_defaults(&state.db, user_id).await?;
        rows = repo::list_by_user(&state.db, user_id).await?;
    }
    Ok(Json(rows.into_iter().map(CategoryResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn create_category(
    State(state): State<AppState>,
    Identity(user_id): Identity,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("name is required".into()));
    }

    let category = repo::create(&state.db, user_id, name).await?;
    info!(user_id = %user_id, category = %category.name, "category created");
    Ok(Json(category.into()))
}

#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    Identity(user_id): Identity,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    repo::delete_by_name(&state.db, user_id, &name).await?;
    info!(user_id = %user_id, category = %name, "category deleted");
    Ok(Json(json!({ "success": true })))
}
