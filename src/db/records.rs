use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::common::RecordError;
use crate::models::{ChangeSet, ModerationStatus, Record, RecordInsert, RecordKind};

pub async fn create_record(pool: &PgPool, data: &RecordInsert) -> Result<Record, RecordError> {
    let record = sqlx::query_as::<_, Record>(
        r#"
        INSERT INTO records
            (reporter_id, kind, status, main_headline, subheadline, description,
             media_url, category_assignments)
        VALUES ($1, $2, 'pending', $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(data.reporter_id)
    .bind(data.kind.as_str())
    .bind(&data.main_headline)
    .bind(&data.subheadline)
    .bind(&data.description)
    .bind(data.media_url.as_deref())
    .bind(Json(&data.category_assignments))
    .fetch_one(pool)
    .await?;

    Ok(record)
}

pub async fn get_record(pool: &PgPool, kind: RecordKind, id: Uuid) -> Result<Record, RecordError> {
    let record = sqlx::query_as::<_, Record>(
        r#"
        SELECT *
        FROM records
        WHERE id = $1 AND kind = $2
        "#,
    )
    .bind(id)
    .bind(kind.as_str())
    .fetch_optional(pool)
    .await?;

    record.ok_or(RecordError::NotFound(id))
}

pub async fn list_records(
    pool: &PgPool,
    kind: RecordKind,
    reporter_id: Uuid,
    status: Option<ModerationStatus>,
) -> Result<Vec<Record>, RecordError> {
    let records = if let Some(status) = status {
        sqlx::query_as::<_, Record>(
            r#"
            SELECT *
            FROM records
            WHERE kind = $1 AND reporter_id = $2 AND status = $3
            ORDER BY created_at DESC
            "#,
        )
        .bind(kind.as_str())
        .bind(reporter_id)
        .bind(status.as_str())
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as::<_, Record>(
            r#"
            SELECT *
            FROM records
            WHERE kind = $1 AND reporter_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(kind.as_str())
        .bind(reporter_id)
        .fetch_all(pool)
        .await?
    };

    Ok(records)
}

/// Applies a change set to a stored record. Absent fields keep their stored
/// values; `updated_at` is refreshed on every applied change.
pub async fn update_record(
    pool: &PgPool,
    kind: RecordKind,
    id: Uuid,
    changes: &ChangeSet,
    media_url: Option<&str>,
) -> Result<Record, RecordError> {
    let record = sqlx::query_as::<_, Record>(
        r#"
        UPDATE records
        SET
            reporter_id = COALESCE($1, reporter_id),
            main_headline = COALESCE($2, main_headline),
            subheadline = COALESCE($3, subheadline),
            description = COALESCE($4, description),
            category_assignments = COALESCE($5, category_assignments),
            media_url = COALESCE($6, media_url),
            updated_at = now()
        WHERE id = $7 AND kind = $8
        RETURNING *
        "#,
    )
    .bind(changes.reporter_id)
    .bind(changes.main_headline.as_deref())
    .bind(changes.subheadline.as_deref())
    .bind(changes.description.as_deref())
    .bind(changes.category_assignments.as_ref().map(Json))
    .bind(media_url)
    .bind(id)
    .bind(kind.as_str())
    .fetch_optional(pool)
    .await?;

    record.ok_or(RecordError::NotFound(id))
}

/// Storage hook for the external reviewer workflow.
pub async fn set_moderation_status(
    pool: &PgPool,
    id: Uuid,
    status: ModerationStatus,
) -> Result<Record, RecordError> {
    let record = sqlx::query_as::<_, Record>(
        r#"
        UPDATE records
        SET status = $1, updated_at = now()
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(status.as_str())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    record.ok_or(RecordError::NotFound(id))
}

pub async fn delete_record(pool: &PgPool, kind: RecordKind, id: Uuid) -> Result<Record, RecordError> {
    let record = sqlx::query_as::<_, Record>(
        r#"
        DELETE FROM records
        WHERE id = $1 AND kind = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(kind.as_str())
    .fetch_optional(pool)
    .await?;

    record.ok_or(RecordError::NotFound(id))
}
