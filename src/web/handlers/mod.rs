pub mod auth;
pub mod categories;
pub mod records;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    auth::configure(cfg);
    categories::configure(cfg);
    records::configure(cfg);
}
