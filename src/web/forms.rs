use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::Deserialize;
use uuid::Uuid;

use newsdesk::models::{CategoryAssignments, EditCandidate, MediaUpload, ModerationStatus};

#[derive(Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub display_name: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
}

#[derive(Deserialize)]
pub struct VerifyOtpForm {
    pub email: String,
    pub otp: String,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub status: Option<ModerationStatus>,
}

#[derive(Deserialize)]
pub struct StatusForm {
    pub status: ModerationStatus,
}

/// The submission/edit form body. Every field is optional at the wire level;
/// what is actually required depends on whether this is a creation or an
/// edit, which is the change-set builder's call, not the parser's.
#[derive(Debug, MultipartForm)]
pub struct RecordForm {
    pub reporter_id: Option<Text<Uuid>>,
    pub main_headline: Option<Text<String>>,
    pub subheadline: Option<Text<String>>,
    pub description: Option<Text<String>>,
    /// JSON object: category id -> array of subcategory ids.
    pub category_assignments: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub media: Option<TempFile>,
}

impl RecordForm {
    pub async fn into_candidate(self) -> Result<EditCandidate, String> {
        let category_assignments = match self.category_assignments {
            Some(text) => Some(
                serde_json::from_str::<CategoryAssignments>(&text.0)
                    .map_err(|e| format!("invalid category_assignments: {e}"))?,
            ),
            None => None,
        };

        let media = match self.media {
            Some(file) => Some(
                read_upload(file)
                    .await
                    .map_err(|e| format!("could not read uploaded file: {e}"))?,
            ),
            None => None,
        };

        Ok(EditCandidate {
            reporter_id: self.reporter_id.map(|t| t.0),
            main_headline: self.main_headline.map(|t| t.0),
            subheadline: self.subheadline.map(|t| t.0),
            description: self.description.map(|t| t.0),
            category_assignments,
            media,
        })
    }
}

async fn read_upload(file: TempFile) -> std::io::Result<MediaUpload> {
    let bytes = tokio::fs::read(file.file.path()).await?;

    Ok(MediaUpload {
        file_name: file.file_name.unwrap_or_else(|| "upload".to_string()),
        content_type: file.content_type.map(|m| m.to_string()),
        bytes,
    })
}
