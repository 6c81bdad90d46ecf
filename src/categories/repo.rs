use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Seeded on a user's first category listing.
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Groceries",
    "Transport",
    "Dining",
    "Utilities",
    "Entertainment",
    "Other",
];

#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Category>> {
    let rows = sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name
        FROM categories
        WHERE user_id = $1
        ORDER BY name
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn count_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<i64> {
    let count: i64 =
        sqlx::query_scalar(r#"SELECT COUNT(*) FROM categories WHERE user_id = $1"#)
            .bind(user_id)
            .fetch_one(db)
            .await?;
    Ok(count)
}

pub async fn seed_defaults(db: &PgPool, user_id: Uuid) -> anyhow::Result<()> {
    for name in DEFAULT_CATEGORIES {
        sqlx::query(
            r#"
            INSERT INTO categories (user_id, name)
            VALUES ($1, $2)
            ON CONFLICT (user_id, name) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(name)
        .execute(db)
        .await?;
    }
    Ok(())
}

/// Inserts the category, or returns the existing row on a duplicate name.
pub async fn create(db: &PgPool, user_id: Uuid, name: &str) -> anyhow::Result<Category> {
    let inserted = sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (user_id, name)
        VALUES ($1, $2)
        ON CONFLICT (user_id, name) DO NOTHING
        RETURNING id, name
        "#,
    )
    .bind(user_id)
    .bind(name)
    .fetch_optional(db)
    .await?;

    if let Some(category) = inserted {
        return Ok(category);
    }

    let existing = sqlx::query_as::<_, Category>(
        r#"SELECT id, name FROM categories WHERE user_id = $1 AND name = $2"#,
    )
    .bind(user_id)
    .bind(name)
    .fetch_one(db)
    .await?;
    Ok(existing)
}

/// Resolves a category name to its id, creating the row when missing.
pub async fn resolve_or_create(db: &PgPool, user_id: Uuid, name: &str) -> anyhow::Result<Uuid> {
    Ok(create(db, user_id, name).await?.id)
}

pub async fn delete_by_name(db: &PgPool, user_id: Uuid, name: &str) -> anyhow::Result<()> {
    sqlx::query(r#"DELETE FROM categories WHERE user_id = $1 AND name = $2"#)
        .bind(user_id)
        .bind(name)
        .execute(db)
        .await?;
    Ok(())
}
