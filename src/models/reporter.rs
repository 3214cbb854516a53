use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use std::fmt;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Reporter {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct ReporterCreate {
    pub email: String,
    pub display_name: String,
}

/// One outstanding login code per reporter. Issuing a new code replaces the
/// previous row; verification deletes it, so a code can never be replayed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, FromRow)]
pub struct OtpChallenge {
    pub reporter_id: Uuid,
    pub code_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl OtpChallenge {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum ReporterIden {
    Id(Uuid),
    Email(String),
}

impl fmt::Display for ReporterIden {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReporterIden::Id(id) => write!(f, "ID {}", id),
            ReporterIden::Email(email) => write!(f, "email '{}'", email),
        }
    }
}

impl From<Uuid> for ReporterIden {
    fn from(id: Uuid) -> Self {
        ReporterIden::Id(id)
    }
}

impl From<String> for ReporterIden {
    fn from(email: String) -> Self {
        ReporterIden::Email(email)
    }
}

impl From<&String> for ReporterIden {
    fn from(email: &String) -> Self {
        ReporterIden::Email(email.clone())
    }
}

impl From<&str> for ReporterIden {
    fn from(email: &str) -> Self {
        ReporterIden::Email(email.to_string())
    }
}
