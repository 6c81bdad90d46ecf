use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Budget {
    pub month: String,
    pub amount: Decimal,
}

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Budget>> {
    let rows = sqlx::query_as::<_, Budget>(
        r#"
        SELECT month, amount
        FROM budgets
        WHERE user_id = $1
        ORDER BY month DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// One budget per user per month; setting it again overwrites the amount.
pub async fn upsert(
    db: &PgPool,
    user_id: Uuid,
    month: &str,
    amount: Decimal,
) -> anyhow::Result<Budget> {
    let row = sqlx::query_as::<_, Budget>(
        r#"
        INSERT INTO budgets (user_id, month, amount)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, month)
        DO UPDATE SET amount = EXCLUDED.amount
        RETURNING month, amount
        "#,
    )
    .bind(user_id)
    .bind(month)
    .bind(amount)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn amount_for_month(
    db: &PgPool,
    user_id: Uuid,
    month: &str,
) -> anyhow::Result<Option<Decimal>> {
    let amount: Option<Decimal> =
        sqlx::query_scalar(r#"SELECT amount FROM budgets WHERE user_id = $1 AND month = $2"#)
            .bind(user_id)
            .bind(month)
            .fetch_optional(db)
            .await?;
    Ok(amount)
}
