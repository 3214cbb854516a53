use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

use std::time::Duration;

use crate::common::{AuthError, GeneralError};
use crate::models::{OtpChallenge, Reporter, ReporterCreate, ReporterIden};

pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self, GeneralError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn add_reporter(
        &mut self,
        data: &ReporterCreate,
    ) -> Result<Reporter, AuthError> {
        let reporter = sqlx::query_as::<_, Reporter>(
            r#"
            INSERT INTO reporters (email, display_name) VALUES ($1, $2)
            ON CONFLICT (email) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(&data.email)
        .bind(&data.display_name)
        .fetch_optional(&self.pool)
        .await?;

        match reporter {
            Some(r) => Ok(r),
            None => Err(AuthError::AlreadyExists((&data.email).into())),
        }
    }

    pub async fn get_reporter(
        &self,
        data: &ReporterIden,
    ) -> Result<Reporter, AuthError> {
        let (id, email): (Option<Uuid>, Option<String>) = match data {
            ReporterIden::Id(id) => (Some(*id), None),
            ReporterIden::Email(email) => (None, Some(email.clone())),
        };

        let result = sqlx::query_as::<_, Reporter>(
            r#"SELECT * FROM reporters WHERE id = $1 OR email = $2"#,
        )
        .bind(id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        match result {
            Some(r) => Ok(r),
            None => Err(AuthError::NotFound(data.clone())),
        }
    }

    /// Issues a login challenge, replacing any outstanding one for the same
    /// reporter.
    pub async fn store_challenge(
        &mut self,
        reporter_id: Uuid,
        code_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<OtpChallenge, AuthError> {
        let challenge = sqlx::query_as::<_, OtpChallenge>(
            r#"
            INSERT INTO otp_challenges (reporter_id, code_hash, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (reporter_id) DO UPDATE
            SET code_hash = EXCLUDED.code_hash,
                expires_at = EXCLUDED.expires_at,
                created_at = now()
            RETURNING *
            "#,
        )
        .bind(reporter_id)
        .bind(code_hash)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(challenge)
    }

    /// Removes and returns the outstanding challenge. Every verification
    /// attempt consumes it, matched or not, so codes cannot be brute-forced
    /// against a single challenge row.
    pub async fn take_challenge(
        &mut self,
        reporter_id: Uuid,
    ) -> Result<OtpChallenge, AuthError> {
        let challenge = sqlx::query_as::<_, OtpChallenge>(
            r#"
            DELETE FROM otp_challenges
            WHERE reporter_id = $1
            RETURNING *
            "#,
        )
        .bind(reporter_id)
        .fetch_optional(&self.pool)
        .await?;

        match challenge {
            Some(c) => Ok(c),
            None => Err(AuthError::ChallengeMissing(reporter_id.into())),
        }
    }
}
