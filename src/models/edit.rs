use field_names::FieldNames;
use uuid::Uuid;

use super::CategoryAssignments;

/// A file picked in the editor, held in memory until the web layer persists
/// it and turns it into a `media_url`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MediaUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Editor form state as submitted, one slot per tracked field. `FIELDS` is
/// the tracked-field schema; the media file rides alongside but is not a
/// diffable field.
#[derive(Debug, Clone, Default, FieldNames)]
#[field_names(vis = "pub")]
pub struct EditCandidate {
    pub reporter_id: Option<Uuid>,
    pub main_headline: Option<String>,
    pub subheadline: Option<String>,
    pub description: Option<String>,
    pub category_assignments: Option<CategoryAssignments>,
    #[field_names(skip)]
    pub media: Option<MediaUpload>,
}

impl EditCandidate {
    pub fn fields() -> &'static [&'static str] {
        &Self::FIELDS
    }
}

/// The minimal payload to apply: only the fields that actually changed, plus
/// the record identifier when editing an existing row.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ChangeSet {
    pub id: Option<Uuid>,
    pub reporter_id: Option<Uuid>,
    pub main_headline: Option<String>,
    pub subheadline: Option<String>,
    pub description: Option<String>,
    pub category_assignments: Option<CategoryAssignments>,
    pub media: Option<MediaUpload>,
}

impl ChangeSet {
    /// True when no field carries a change. The identifier alone does not
    /// count; a payload of just an id updates nothing.
    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            Self {
                id: _,
                reporter_id: None,
                main_headline: None,
                subheadline: None,
                description: None,
                category_assignments: None,
                media: None,
            }
        )
    }

    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.reporter_id.is_some() {
            fields.push("reporter_id");
        }
        if self.main_headline.is_some() {
            fields.push("main_headline");
        }
        if self.subheadline.is_some() {
            fields.push("subheadline");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.category_assignments.is_some() {
            fields.push("category_assignments");
        }
        if self.media.is_some() {
            fields.push("media");
        }
        fields
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ChangeOutcome {
    /// Nothing differs from the stored record; no write should be made.
    NoOp,
    Changes(ChangeSet),
}

impl ChangeOutcome {
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }

    pub fn into_changes(self) -> Option<ChangeSet> {
        match self {
            Self::NoOp => None,
            Self::Changes(changes) => Some(changes),
        }
    }
}
