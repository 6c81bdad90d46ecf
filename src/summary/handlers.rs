use axum::{extract::State, routing::get, Json, Router};
use rust_decimal::Decimal;
use tracing::instrument;

use super::dto::{CategoryTotal, MonthTotal, SummaryResponse};
use super::services;
use crate::auth::Identity;
use crate::budgets;
use crate::categories;
use crate::error::ApiError;
use crate::expenses::{self, repo::Expense};
use crate::month::current_month;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(overview))
        .route("/summary/by-category", get(summary_by_category))
        .route("/summary/monthly", get(summary_monthly))
}

#[instrument(skip(state))]
pub async fn overview(
    State(state): State<AppState>,
    Identity(user_id): Identity,
) -> Result<Json<SummaryResponse>, ApiError> {
    let expenses = all_expenses(&state, user_id).await?;
    let category_count = categories::repo::count_by_user(&state.db, user_id).await?;

    let month = current_month();
    let month_total = services::total_for_month(&expenses, &month);
    let budget = budgets::repo::amount_for_month(&state.db, user_id, &month)
        .await?
        .unwrap_or(Decimal::ZERO);

    Ok(Json(SummaryResponse {
        total_spent: services::total(&expenses),
        expense_count: expenses.len(),
        category_count,
        remaining: budget - month_total,
        month,
        month_total,
        budget,
    }))
}

#[instrument(skip(state))]
pub async fn summary_by_category(
    State(state): State<AppState>,
    Identity(user_id): Identity,
) -> Result<Json<Vec<CategoryTotal>>, ApiError> {
    let expenses = all_expenses(&state, user_id).await?;
    Ok(Json(services::by_category(&expenses)))
}

#[instrument(skip(state))]
pub async fn summary_monthly(
    State(state): State<AppState>,
    Identity(user_id): Identity,
) -> Result<Json<Vec<MonthTotal>>, ApiError> {
    let expenses = all_expenses(&state, user_id).await?;
    Ok(Json(services::by_month(&expenses)))
}

async fn all_expenses(state: &AppState, user_id: uuid::Uuid) -> anyhow::Result<Vec<Expense>> {
    expenses::repo::list_all_by_user(&state.db, user_id).await
}
