use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponse, Responder, post, web};
use chrono::Utc;
use serde_json::json;
use std::time::Duration;

use newsdesk::common::AuthError;
use newsdesk::db::Database;
use newsdesk::log_err;
use newsdesk::models::{ReporterCreate, ReporterIden};
use newsdesk::services::auth::OtpManager;

use crate::web::forms::{LoginForm, RegisterForm, VerifyOtpForm};
use crate::web::helpers::json_error;
use crate::web::security::validate_email;
use crate::web::state::AppState;

#[post("/reporter/auth/register")]
pub async fn register(
    state: web::Data<AppState>,
    form: web::Json<RegisterForm>,
) -> impl Responder {
    let email = form.email.trim().to_lowercase();
    if !validate_email(&email) {
        return HttpResponse::BadRequest().json(json_error("a valid email is required"));
    }

    let display_name = form.display_name.trim().to_string();
    if display_name.is_empty() {
        return HttpResponse::BadRequest().json(json_error("a display name is required"));
    }

    let mut db = Database::from_pool(state.pool.clone());

    match db.add_reporter(&ReporterCreate { email, display_name }).await {
        Ok(reporter) => HttpResponse::Created().json(reporter),
        Err(e @ AuthError::AlreadyExists(_)) => {
            HttpResponse::Conflict().json(json_error(e))
        }
        Err(e) => {
            log::error!("registration failed: {}", e);
            HttpResponse::InternalServerError().json(json_error("registration failed"))
        }
    }
}

#[post("/reporter/auth/login")]
pub async fn login(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Json<LoginForm>,
) -> impl Responder {
    let email = form.email.trim().to_lowercase();
    if !validate_email(&email) {
        return HttpResponse::BadRequest().json(json_error("a valid email is required"));
    }

    let client_ip = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string();

    if !state.rate_limiter.check_rate_limit(
        &format!("otp-issue:{}:{}", client_ip, email),
        3,                        // 3 codes
        Duration::from_secs(900), // per 15 minutes
    ) {
        return HttpResponse::TooManyRequests().json(json_error(AuthError::Throttled));
    }

    let mut db = Database::from_pool(state.pool.clone());

    let reporter = match db.get_reporter(&ReporterIden::Email(email.clone())).await {
        Ok(r) => r,
        Err(e @ AuthError::NotFound(_)) => {
            return HttpResponse::NotFound().json(json_error(e));
        }
        Err(e) => {
            log::error!("login lookup failed: {}", e);
            return HttpResponse::InternalServerError().json(json_error("login failed"));
        }
    };

    let code = OtpManager::generate_code();
    let code_hash = match OtpManager::hash_code(&code) {
        Ok(h) => h,
        Err(e) => {
            log::error!("otp hashing failed: {}", e);
            return HttpResponse::InternalServerError().json(json_error("login failed"));
        }
    };

    let expires_at = OtpManager::expires_at(Utc::now());

    if let Err(e) = db.store_challenge(reporter.id, &code_hash, expires_at).await {
        log_err!(state.pool, "auth.login", json!({ "email": email }));
        log::error!("storing login challenge failed: {}", e);
        return HttpResponse::InternalServerError().json(json_error("login failed"));
    }

    // Delivery belongs to the operator's mail pipeline; the debug line keeps
    // local logins usable without one.
    log::info!(target: "newsdesk", "login code issued for reporter {}", reporter.id);
    log::debug!(target: "newsdesk", "login code for {}: {}", email, code);

    HttpResponse::Ok().json(json!({
        "reporter_id": reporter.id,
        "expires_at": expires_at,
    }))
}

#[post("/reporter/auth/verify-otp")]
pub async fn verify_otp(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Json<VerifyOtpForm>,
) -> impl Responder {
    let client_ip = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string();

    if !state.rate_limiter.check_rate_limit(
        &format!("otp-verify:{}", client_ip),
        10,                       // 10 attempts
        Duration::from_secs(300), // per 5 minutes
    ) {
        return HttpResponse::TooManyRequests().json(json_error(AuthError::Throttled));
    }

    let email = form.email.trim().to_lowercase();
    let mut db = Database::from_pool(state.pool.clone());

    let reporter = match db.get_reporter(&ReporterIden::Email(email)).await {
        Ok(r) => r,
        Err(e @ AuthError::NotFound(_)) => {
            return HttpResponse::NotFound().json(json_error(e));
        }
        Err(e) => {
            log::error!("verify lookup failed: {}", e);
            return HttpResponse::InternalServerError().json(json_error("verification failed"));
        }
    };

    // The challenge is consumed by the attempt, matched or not.
    let challenge = match db.take_challenge(reporter.id).await {
        Ok(c) => c,
        Err(e @ AuthError::ChallengeMissing(_)) => {
            return HttpResponse::Unauthorized().json(json_error(e));
        }
        Err(e) => {
            log::error!("taking login challenge failed: {}", e);
            return HttpResponse::InternalServerError().json(json_error("verification failed"));
        }
    };

    if challenge.is_expired_at(Utc::now()) {
        return HttpResponse::Unauthorized().json(json_error(AuthError::CodeExpired));
    }

    match OtpManager::verify_code(form.otp.trim(), &challenge.code_hash) {
        Ok(true) => {}
        Ok(false) => {
            return HttpResponse::Unauthorized().json(json_error(AuthError::CodeMismatch));
        }
        Err(e) => {
            log::error!("otp verification failed: {}", e);
            return HttpResponse::InternalServerError().json(json_error("verification failed"));
        }
    }

    let cookie = Cookie::build("nd_rid", reporter.id.to_string())
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(actix_web::cookie::time::Duration::days(7))
        .finish();

    HttpResponse::Ok().cookie(cookie).json(json!({
        "reporter_id": reporter.id,
        "display_name": reporter.display_name,
    }))
}

#[post("/reporter/auth/logout")]
pub async fn logout() -> impl Responder {
    let mut cookie = Cookie::build("nd_rid", "")
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .finish();
    cookie.make_removal();

    HttpResponse::Ok().cookie(cookie).json(json!({ "ok": true }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(register)
        .service(login)
        .service(verify_otp)
        .service(logout);
}
