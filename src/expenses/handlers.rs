use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{ExpenseFilter, ExpenseRequest, ExpenseResponse};
use super::repo;
use super::services::render_csv;
use crate::auth::Identity;
use crate::categories;
use crate::error::ApiError;
use crate::month::is_valid_month;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/export", get(export_expenses))
        .route("/expenses/:id", put(update_expense).delete(delete_expense))
}

#[instrument(skip(state))]
pub async fn list_expenses(
    State(state): State<AppState>,
    Identity(user_id): Identity,
    Query(filter): Query<ExpenseFilter>,
) -> Result<Json<Vec<ExpenseResponse>>, ApiError> {
    let filter = filter.normalized();
    if let Some(month) = filter.month.as_deref() {
        if !is_valid_month(month) {
            return Err(ApiError::BadRequest("Invalid month filter".into()));
        }
    }

    let rows = repo::list_by_user(&state.db, user_id, &filter).await?;
    Ok(Json(rows.into_iter().map(ExpenseResponse::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_expense(
    State(state): State<AppState>,
    Identity(user_id): Identity,
    Json(payload): Json<ExpenseRequest>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    validate_amount(payload.amount)?;

    let category_id = match payload.category.as_deref() {
        Some(name) if !name.trim().is_empty() => Some(
            categories::repo::resolve_or_create(&state.db, user_id, name.trim()).await?,
        ),
        _ => None,
    };

    let record = repo::insert(
        &state.db,
        user_id,
        category_id,
        payload.date,
        payload.amount,
        &payload.note,
    )
    .await?;

    info!(user_id = %user_id, expense_id = %record.id, "expense created");

    // The original API reports uncategorized creations as "Other".
    let category = payload
        .category
        .filter(|n| !n.trim().is_empty())
        .map(|n| n.trim().to_string())
        .or_else(|| Some("Other".to_string()));

    Ok(Json(ExpenseResponse {
        id: record.id,
        date: record.date,
        amount: record.amount,
        note: record.note,
        category,
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_expense(
    State(state): State<AppState>,
    Identity(user_id): Identity,
    Path(id): Path<Uuid>,
    Json(payload): Json<ExpenseRequest>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    validate_amount(payload.amount)?;

    let category = payload
        .category
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from);
    let category_id = match category.as_deref() {
        Some(name) => Some(categories::repo::resolve_or_create(&state.db, user_id, name).await?),
        None => None,
    };

    let record = repo::update(
        &state.db,
        user_id,
        id,
        category_id,
        payload.date,
        payload.amount,
        &payload.note,
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Not found".into()))?;

    info!(user_id = %user_id, expense_id = %record.id, "expense updated");
    Ok(Json(ExpenseResponse {
        id: record.id,
        date: record.date,
        amount: record.amount,
        note: record.note,
        category,
    }))
}

#[instrument(skip(state))]
pub async fn delete_expense(
    State(state): State<AppState>,
    Identity(user_id): Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    repo::delete(&state.db, user_id, id).await?;
    info!(user_id = %user_id, expense_id = %id, "expense deleted");
    Ok(Json(json!({ "success": true })))
}

#[instrument(skip(state))]
pub async fn export_expenses(
    State(state): State<AppState>,
    Identity(user_id): Identity,
) -> Result<Response, ApiError> {
    let rows = repo::list_all_by_user(&state.db, user_id).await?;
    let body = render_csv(&rows)?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"expenses.csv\"",
            ),
        ],
        body,
    )
        .into_response())
}

fn validate_amount(amount: Decimal) -> Result<(), ApiError> {
    if amount.is_sign_negative() {
        return Err(ApiError::BadRequest("amount must be non-negative".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(validate_amount(dec!(-0.01)).is_err());
        assert!(validate_amount(dec!(0)).is_ok());
        assert!(validate_amount(dec!(19.99)).is_ok());
    }
}
