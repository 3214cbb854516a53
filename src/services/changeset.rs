//! Field-level diffing between a stored record and submitted form state.
//!
//! Moderated content must never be blanked out by a partial edit, and a
//! resubmission with nothing changed must never reach the database (it would
//! reset the moderation workflow). Both rules live here, behind one schema,
//! so every entry point enforces them identically.

use crate::common::ValidationError;
use crate::models::{ChangeOutcome, ChangeSet, EditCandidate, Record};

/// Fields that must be present and non-blank when creating a record.
/// The tracked diff schema itself is [`EditCandidate::FIELDS`]; `media` is
/// required on creation but never diffed.
pub const REQUIRED_ON_CREATE: &[&str] = &[
    "reporter_id",
    "main_headline",
    "subheadline",
    "description",
    "category_assignments",
    "media",
];

/// Builds the minimal payload for a submission.
///
/// With no `original` (creation) every required field must be filled and the
/// full candidate passes through undiffed. With an `original` (edit) only
/// fields that differ are kept, blank candidate fields are dropped rather
/// than overwriting stored content, and a replacement media file always rides
/// along. An edit that changes nothing comes back as [`ChangeOutcome::NoOp`].
pub fn build_change_set(
    original: Option<&Record>,
    candidate: &EditCandidate,
) -> Result<ChangeOutcome, ValidationError> {
    match original {
        None => build_for_create(candidate),
        Some(record) => {
            if record.id.is_nil() {
                return Err(ValidationError::MissingIdentifier);
            }
            Ok(build_for_edit(record, candidate))
        }
    }
}

fn build_for_create(candidate: &EditCandidate) -> Result<ChangeOutcome, ValidationError> {
    let missing: Vec<&'static str> = REQUIRED_ON_CREATE
        .iter()
        .filter(|field| !is_filled(candidate, field))
        .copied()
        .collect();

    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    Ok(ChangeOutcome::Changes(ChangeSet {
        id: None,
        reporter_id: candidate.reporter_id,
        main_headline: candidate.main_headline.clone(),
        subheadline: candidate.subheadline.clone(),
        description: candidate.description.clone(),
        category_assignments: candidate.category_assignments.clone(),
        media: candidate.media.clone(),
    }))
}

fn build_for_edit(record: &Record, candidate: &EditCandidate) -> ChangeOutcome {
    let changes = ChangeSet {
        id: Some(record.id),
        reporter_id: candidate
            .reporter_id
            .filter(|id| *id != record.reporter_id),
        main_headline: diff_text(&candidate.main_headline, &record.main_headline),
        subheadline: diff_text(&candidate.subheadline, &record.subheadline),
        description: diff_text(&candidate.description, &record.description),
        category_assignments: candidate
            .category_assignments
            .clone()
            .filter(|assignments| {
                !assignments.is_empty() && *assignments != record.category_assignments
            }),
        media: candidate.media.clone(),
    };

    if changes.is_empty() {
        ChangeOutcome::NoOp
    } else {
        ChangeOutcome::Changes(changes)
    }
}

fn diff_text(candidate: &Option<String>, original: &str) -> Option<String> {
    candidate
        .as_deref()
        .filter(|value| !value.trim().is_empty() && *value != original)
        .map(str::to_string)
}

fn is_filled(candidate: &EditCandidate, field: &str) -> bool {
    match field {
        "reporter_id" => candidate.reporter_id.is_some(),
        "main_headline" => has_text(&candidate.main_headline),
        "subheadline" => has_text(&candidate.subheadline),
        "description" => has_text(&candidate.description),
        "category_assignments" => candidate
            .category_assignments
            .as_ref()
            .is_some_and(|assignments| !assignments.is_empty()),
        "media" => candidate.media.is_some(),
        _ => true,
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}
