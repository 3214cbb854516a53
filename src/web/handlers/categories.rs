use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use uuid::Uuid;

use newsdesk::db;

use crate::web::helpers::{json_error, require_reporter};
use crate::web::state::AppState;

#[get("/admin/categories/getall")]
pub async fn categories_getall(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Err(resp) = require_reporter(&req) {
        return resp;
    }

    match db::list_categories(&state.pool).await {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(e) => {
            log::error!("listing categories failed: {}", e);
            HttpResponse::InternalServerError().json(json_error("could not load categories"))
        }
    }
}

/// The dashboard's category picker fetches subcategories per category as the
/// reporter toggles categories on.
#[get("/admin/subcategories/service/{id}")]
pub async fn subcategories_for_category(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) = require_reporter(&req) {
        return resp;
    }

    let category_id = path.into_inner();
    match db::list_subcategories(&state.pool, category_id).await {
        Ok(subcategories) => HttpResponse::Ok().json(subcategories),
        Err(e) => {
            log::error!("listing subcategories failed: {}", e);
            HttpResponse::InternalServerError().json(json_error("could not load subcategories"))
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(categories_getall)
        .service(subcategories_for_category);
}
