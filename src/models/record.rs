use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{CategoryAssignments, ChangeSet, ModerationStatus, RecordKind};
use crate::common::ValidationError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Record {
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub kind: RecordKind,
    pub status: ModerationStatus,
    pub main_headline: String,
    pub subheadline: String,
    pub description: String,
    pub media_url: Option<String>,
    #[sqlx(json)]
    pub category_assignments: CategoryAssignments,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Concrete row values for a freshly created record. Built from a validated
/// [`ChangeSet`] so the insert path never touches half-filled form state.
#[derive(Debug, Clone)]
pub struct RecordInsert {
    pub reporter_id: Uuid,
    pub kind: RecordKind,
    pub main_headline: String,
    pub subheadline: String,
    pub description: String,
    pub media_url: Option<String>,
    pub category_assignments: CategoryAssignments,
}

impl RecordInsert {
    /// The creation flow validates required fields before this point, but the
    /// conversion still reports anything missing instead of panicking.
    pub fn from_change_set(
        kind: RecordKind,
        changes: ChangeSet,
        media_url: Option<String>,
    ) -> Result<Self, ValidationError> {
        let mut missing = Vec::new();

        if changes.reporter_id.is_none() {
            missing.push("reporter_id");
        }
        if changes.main_headline.is_none() {
            missing.push("main_headline");
        }
        if changes.description.is_none() {
            missing.push("description");
        }
        if changes.category_assignments.is_none() {
            missing.push("category_assignments");
        }

        let (
            Some(reporter_id),
            Some(main_headline),
            Some(description),
            Some(category_assignments),
        ) = (
            changes.reporter_id,
            changes.main_headline,
            changes.description,
            changes.category_assignments,
        )
        else {
            return Err(ValidationError::MissingFields(missing));
        };

        Ok(RecordInsert {
            reporter_id,
            kind,
            main_headline,
            subheadline: changes.subheadline.unwrap_or_default(),
            description,
            media_url,
            category_assignments,
        })
    }
}
