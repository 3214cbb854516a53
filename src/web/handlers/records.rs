use actix_multipart::form::MultipartForm;
use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, post, put, web};
use serde_json::json;
use uuid::Uuid;

use newsdesk::common::RecordError;
use newsdesk::db;
use newsdesk::log_err;
use newsdesk::models::{ChangeOutcome, RecordInsert, RecordKind};
use newsdesk::services::changeset::build_change_set;
use newsdesk::services::embeds::rewrite_embeds;

use crate::web::forms::{ListQuery, RecordForm, StatusForm};
use crate::web::helpers::{json_error, require_reporter, save_media};
use crate::web::state::AppState;

fn parse_kind(segment: &str) -> Option<RecordKind> {
    match segment {
        "news" => Some(RecordKind::News),
        "blogs" => Some(RecordKind::Blog),
        _ => None,
    }
}

#[post("/admin/{kind:news|blogs}")]
pub async fn create_record(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    form: MultipartForm<RecordForm>,
) -> impl Responder {
    let session_reporter = match require_reporter(&req) {
        Ok(rid) => rid,
        Err(resp) => return resp,
    };

    let Some(kind) = parse_kind(&path.into_inner()) else {
        return HttpResponse::NotFound().json(json_error("unknown record kind"));
    };

    let mut candidate = match form.into_inner().into_candidate().await {
        Ok(c) => c,
        Err(msg) => return HttpResponse::BadRequest().json(json_error(msg)),
    };
    if candidate.reporter_id.is_none() {
        candidate.reporter_id = Some(session_reporter);
    }

    let changes = match build_change_set(None, &candidate) {
        Ok(ChangeOutcome::Changes(changes)) => changes,
        Ok(ChangeOutcome::NoOp) => return HttpResponse::NoContent().finish(),
        Err(e) => {
            return HttpResponse::BadRequest().json(json!({
                "error": e.to_string(),
                "missing_fields": e.missing_fields(),
            }));
        }
    };

    let media_url = match &changes.media {
        Some(upload) => match save_media(&state.media_root, upload).await {
            Ok(url) => Some(url),
            Err(e) => {
                log::error!("storing uploaded media failed: {}", e);
                return HttpResponse::InternalServerError()
                    .json(json_error("could not store uploaded media"));
            }
        },
        None => None,
    };

    let insert = match RecordInsert::from_change_set(kind, changes, media_url) {
        Ok(insert) => insert,
        Err(e) => return HttpResponse::BadRequest().json(json_error(e)),
    };

    match db::create_record(&state.pool, &insert).await {
        Ok(record) => HttpResponse::Created().json(record),
        Err(e) => {
            log_err!(
                state.pool,
                "records.create",
                json!({ "reporter_id": insert.reporter_id, "kind": kind })
            );
            log::error!("creating record failed: {}", e);
            HttpResponse::InternalServerError().json(json_error("could not create record"))
        }
    }
}

#[get("/admin/{kind:news|blogs}/reporter/{reporter_id}")]
pub async fn list_records(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(String, Uuid)>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    if let Err(resp) = require_reporter(&req) {
        return resp;
    }

    let (kind_segment, reporter_id) = path.into_inner();
    let Some(kind) = parse_kind(&kind_segment) else {
        return HttpResponse::NotFound().json(json_error("unknown record kind"));
    };

    match db::list_records(&state.pool, kind, reporter_id, query.status).await {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => {
            log::error!("listing records failed: {}", e);
            HttpResponse::InternalServerError().json(json_error("could not list records"))
        }
    }
}

#[get("/admin/{kind:news|blogs}/{id}")]
pub async fn get_record(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(String, Uuid)>,
) -> impl Responder {
    if let Err(resp) = require_reporter(&req) {
        return resp;
    }

    let (kind_segment, id) = path.into_inner();
    let Some(kind) = parse_kind(&kind_segment) else {
        return HttpResponse::NotFound().json(json_error("unknown record kind"));
    };

    match db::get_record(&state.pool, kind, id).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e @ RecordError::NotFound(_)) => HttpResponse::NotFound().json(json_error(e)),
        Err(e) => {
            log::error!("loading record failed: {}", e);
            HttpResponse::InternalServerError().json(json_error("could not load record"))
        }
    }
}

#[put("/admin/{kind:news|blogs}/{id}")]
pub async fn update_record(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(String, Uuid)>,
    form: MultipartForm<RecordForm>,
) -> impl Responder {
    if let Err(resp) = require_reporter(&req) {
        return resp;
    }

    let (kind_segment, id) = path.into_inner();
    let Some(kind) = parse_kind(&kind_segment) else {
        return HttpResponse::NotFound().json(json_error("unknown record kind"));
    };

    let original = match db::get_record(&state.pool, kind, id).await {
        Ok(record) => record,
        Err(e @ RecordError::NotFound(_)) => {
            return HttpResponse::NotFound().json(json_error(e));
        }
        Err(e) => {
            log::error!("loading record failed: {}", e);
            return HttpResponse::InternalServerError().json(json_error("could not load record"));
        }
    };

    let candidate = match form.into_inner().into_candidate().await {
        Ok(c) => c,
        Err(msg) => return HttpResponse::BadRequest().json(json_error(msg)),
    };

    let changes = match build_change_set(Some(&original), &candidate) {
        Ok(ChangeOutcome::Changes(changes)) => changes,
        Ok(ChangeOutcome::NoOp) => return HttpResponse::NoContent().finish(),
        Err(e) => return HttpResponse::BadRequest().json(json_error(e)),
    };

    let media_url = match &changes.media {
        Some(upload) => match save_media(&state.media_root, upload).await {
            Ok(url) => Some(url),
            Err(e) => {
                log::error!("storing uploaded media failed: {}", e);
                return HttpResponse::InternalServerError()
                    .json(json_error("could not store uploaded media"));
            }
        },
        None => None,
    };

    match db::update_record(&state.pool, kind, id, &changes, media_url.as_deref()).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e @ RecordError::NotFound(_)) => HttpResponse::NotFound().json(json_error(e)),
        Err(e) => {
            log_err!(
                state.pool,
                "records.update",
                json!({ "id": id, "changed": changes.changed_fields() })
            );
            log::error!("updating record failed: {}", e);
            HttpResponse::InternalServerError().json(json_error("could not update record"))
        }
    }
}

/// Called by the reviewer workflow, not the dashboard's edit form. Status is
/// deliberately outside the change-set schema.
#[put("/admin/{kind:news|blogs}/{id}/status")]
pub async fn set_record_status(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(String, Uuid)>,
    form: web::Json<StatusForm>,
) -> impl Responder {
    if let Err(resp) = require_reporter(&req) {
        return resp;
    }

    let (kind_segment, id) = path.into_inner();
    let Some(kind) = parse_kind(&kind_segment) else {
        return HttpResponse::NotFound().json(json_error("unknown record kind"));
    };

    if let Err(e @ RecordError::NotFound(_)) = db::get_record(&state.pool, kind, id).await {
        return HttpResponse::NotFound().json(json_error(e));
    }

    match db::set_moderation_status(&state.pool, id, form.status).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e @ RecordError::NotFound(_)) => HttpResponse::NotFound().json(json_error(e)),
        Err(e) => {
            log::error!("updating moderation status failed: {}", e);
            HttpResponse::InternalServerError().json(json_error("could not update status"))
        }
    }
}

#[delete("/admin/{kind:news|blogs}/{id}")]
pub async fn delete_record(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(String, Uuid)>,
) -> impl Responder {
    if let Err(resp) = require_reporter(&req) {
        return resp;
    }

    let (kind_segment, id) = path.into_inner();
    let Some(kind) = parse_kind(&kind_segment) else {
        return HttpResponse::NotFound().json(json_error("unknown record kind"));
    };

    match db::delete_record(&state.pool, kind, id).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e @ RecordError::NotFound(_)) => HttpResponse::NotFound().json(json_error(e)),
        Err(e) => {
            log::error!("deleting record failed: {}", e);
            HttpResponse::InternalServerError().json(json_error("could not delete record"))
        }
    }
}

/// Read-only display form of a record's description: bare media links become
/// inline embeds, then the whole thing is sanitized. Rewrite first, sanitize
/// second; the rewriter's output is never trusted as-is.
#[get("/admin/{kind:news|blogs}/{id}/rendered")]
pub async fn rendered_description(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(String, Uuid)>,
) -> impl Responder {
    if let Err(resp) = require_reporter(&req) {
        return resp;
    }

    let (kind_segment, id) = path.into_inner();
    let Some(kind) = parse_kind(&kind_segment) else {
        return HttpResponse::NotFound().json(json_error("unknown record kind"));
    };

    let record = match db::get_record(&state.pool, kind, id).await {
        Ok(record) => record,
        Err(e @ RecordError::NotFound(_)) => {
            return HttpResponse::NotFound().json(json_error(e));
        }
        Err(e) => {
            log::error!("loading record failed: {}", e);
            return HttpResponse::InternalServerError().json(json_error("could not load record"));
        }
    };

    let rewritten = rewrite_embeds(&record.description);
    let sanitized = sanitize_rendered(&rewritten);

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(sanitized)
}

fn sanitize_rendered(html: &str) -> String {
    ammonia::Builder::default()
        .add_tags(["iframe", "video", "source"])
        .add_tag_attributes("iframe", ["src", "frameborder", "allowfullscreen"])
        .add_tag_attributes("video", ["controls"])
        .add_tag_attributes("source", ["src", "type"])
        .add_tag_attributes("a", ["target"])
        .clean(html)
        .to_string()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_record)
        .service(list_records)
        .service(rendered_description)
        .service(set_record_status)
        .service(get_record)
        .service(update_record)
        .service(delete_record);
}
