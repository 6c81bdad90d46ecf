use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{BudgetResponse, SetBudgetRequest};
use super::repo;
use crate::auth::Identity;
use crate::error::ApiError;
use crate::month::is_valid_month;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/budgets", get(list_budgets).post(set_budget))
}

#[instrument(skip(state))]
pub async fn list_budgets(
    State(state): State<AppState>,
    Identity(user_id): Identity,
) -> Result<Json<Vec<BudgetResponse>>, ApiError> {
    let rows = repo::list_by_user(&state.db, user_id).await?;
    Ok(Json(rows.into_iter().map(BudgetResponse::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn set_budget(
    State(state): State<AppState>,
    Identity(user_id): Identity,
    Json(payload): Json<SetBudgetRequest>,
) -> Result<Json<BudgetResponse>, ApiError> {
    if !is_valid_month(&payload.month) {
        return Err(ApiError::BadRequest("Invalid month".into()));
    }
    if payload.amount.is_sign_negative() {
        return Err(ApiError::BadRequest("amount must be non-negative".into()));
    }

    let budget = repo::upsert(&state.db, user_id, &payload.month, payload.amount).await?;
    info!(user_id = %user_id, month = %budget.month, "budget set");
    Ok(Json(budget.into()))
}
