use actix_web::{HttpRequest, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use newsdesk::models::MediaUpload;

use std::path::Path;

pub fn current_reporter_id(req: &HttpRequest) -> Option<Uuid> {
    // MVP auth/session.
    // Priority: cookie -> request header -> env var.
    let cookie_val = req
        .cookie("nd_rid")
        .map(|c| c.value().trim().to_string())
        .filter(|s| !s.is_empty())
        .and_then(|s| Uuid::parse_str(&s).ok());

    if cookie_val.is_some() {
        return cookie_val;
    }

    let header_val = req
        .headers()
        .get("X-Newsdesk-Reporter-Id")
        .or_else(|| req.headers().get("X-Reporter-Id"))
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| Uuid::parse_str(s).ok());

    header_val.or_else(|| {
        std::env::var("NEWSDESK_REPORTER_ID")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .and_then(|s| Uuid::parse_str(&s).ok())
    })
}

pub fn require_reporter(req: &HttpRequest) -> Result<Uuid, HttpResponse> {
    match current_reporter_id(req) {
        Some(rid) => Ok(rid),
        None => Err(HttpResponse::Unauthorized().json(json!({
            "error": "login required"
        }))),
    }
}

pub fn json_error(message: impl std::fmt::Display) -> serde_json::Value {
    json!({ "error": message.to_string() })
}

/// Writes an uploaded file under the media root with a generated name and
/// returns the public path records store. The original filename only
/// contributes its extension; everything else about it is untrusted.
pub async fn save_media(media_root: &Path, upload: &MediaUpload) -> std::io::Result<String> {
    let extension = Path::new(&upload.file_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "bin".to_string());

    let name = format!("{}.{}", Uuid::new_v4(), extension);

    tokio::fs::create_dir_all(media_root).await?;
    tokio::fs::write(media_root.join(&name), &upload.bytes).await?;

    Ok(format!("/media/{}", name))
}
