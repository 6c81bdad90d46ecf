use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use time::Date;
use uuid::Uuid;

use super::dto::ExpenseFilter;

/// Expense joined with its category name. A null category means the category
/// was deleted (or never set).
#[derive(Debug, Clone, FromRow)]
pub struct Expense {
    pub id: Uuid,
    pub date: Date,
    pub amount: Decimal,
    pub note: String,
    pub category: Option<String>,
}

/// Bare row as stored, without the category join.
#[derive(Debug, Clone, FromRow)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub date: Date,
    pub amount: Decimal,
    pub note: String,
}

pub async fn list_by_user(
    db: &PgPool,
    user_id: Uuid,
    filter: &ExpenseFilter,
) -> anyhow::Result<Vec<Expense>> {
    let rows = sqlx::query_as::<_, Expense>(
        r#"
        SELECT e.id, e.date, e.amount, e.note, c.name AS category
        FROM expenses e
        LEFT JOIN categories c ON e.category_id = c.id
        WHERE e.user_id = $1
          AND ($2::text IS NULL OR c.name = $2)
          AND ($3::text IS NULL OR to_char(e.date, 'YYYY-MM') = $3)
          AND ($4::text IS NULL OR e.note ILIKE '%' || $4 || '%' ESCAPE '\')
        ORDER BY e.date DESC
        "#,
    )
    .bind(user_id)
    .bind(filter.category.as_deref())
    .bind(filter.month.as_deref())
    .bind(filter.q.as_deref().map(escape_like))
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// The note search is a literal substring match; LIKE metacharacters in the
/// query must not act as wildcards.
fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Full unfiltered listing, newest date first.
pub async fn list_all_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Expense>> {
    list_by_user(db, user_id, &ExpenseFilter::default()).await
}

pub async fn insert(
    db: &PgPool,
    user_id: Uuid,
    category_id: Option<Uuid>,
    date: Date,
    amount: Decimal,
    note: &str,
) -> anyhow::Result<ExpenseRecord> {
    let row = sqlx::query_as::<_, ExpenseRecord>(
        r#"
        INSERT INTO expenses (user_id, category_id, date, amount, note)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, date, amount, note
        "#,
    )
    .bind(user_id)
    .bind(category_id)
    .bind(date)
    .bind(amount)
    .bind(note)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// None when the id does not belong to this user.
pub async fn update(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
    category_id: Option<Uuid>,
    date: Date,
    amount: Decimal,
    note: &str,
) -> anyhow::Result<Option<ExpenseRecord>> {
    let row = sqlx::query_as::<_, ExpenseRecord>(
        r#"
        UPDATE expenses
        SET date = $3, amount = $4, note = $5, category_id = $6
        WHERE id = $1 AND user_id = $2
        RETURNING id, date, amount, note
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(date)
    .bind(amount)
    .bind(note)
    .bind(category_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<()> {
    sqlx::query(r#"DELETE FROM expenses WHERE id = $1 AND user_id = $2"#)
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_c"), "a\\_c");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn escape_like_leaves_plain_text_alone() {
        assert_eq!(escape_like("weekly groceries"), "weekly groceries");
        assert_eq!(escape_like(""), "");
    }

    #[test]
    fn escape_like_handles_mixed_input() {
        assert_eq!(escape_like("100%_off\\deal"), "100\\%\\_off\\\\deal");
    }
}
