pub mod api_handlers;
pub mod export_handlers;
pub mod suggestion_handlers;

use actix_web::web;

use crate::errors::not_found_page;

/// Register every route. `/suggestions/new` and `/suggestions/refresh` come
/// before `/suggestions/{id}/...` to keep routing unambiguous.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(actix_files::Files::new("/static", "./static"))
        .route("/", web::get().to(suggestion_handlers::index))
        .route("/suggestions/new", web::get().to(suggestion_handlers::new_form))
        .route("/suggestions", web::post().to(suggestion_handlers::create))
        .route("/suggestions/refresh", web::post().to(suggestion_handlers::refresh))
        .route("/suggestions/export/{format}", web::get().to(export_handlers::download))
        .route("/suggestions/{id}/approve", web::post().to(suggestion_handlers::approve))
        .route("/suggestions/{id}/reject", web::post().to(suggestion_handlers::reject))
        .route("/api/suggestions", web::get().to(api_handlers::list))
        .default_service(web::to(|| async { not_found_page() }));
}
