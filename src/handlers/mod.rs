pub mod registration_handlers;

use actix_web::{HttpResponse, web};

/// Register the app's routes. App data, middleware and the default service
/// are left to the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(actix_files::Files::new("/static", "./static"))
        .route("/", web::get().to(registration_handlers::page))
        .route("/", web::post().to(registration_handlers::submit));
}

pub async fn not_found() -> HttpResponse {
    let html = include_str!("../../templates/errors/404.html");
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
