use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Category, Subcategory};

pub async fn list_categories(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT *
        FROM categories
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn list_subcategories(
    pool: &PgPool,
    category_id: Uuid,
) -> Result<Vec<Subcategory>, sqlx::Error> {
    sqlx::query_as::<_, Subcategory>(
        r#"
        SELECT *
        FROM subcategories
        WHERE category_id = $1
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await
}
