use actix_web::{HttpResponse, web};

use crate::state::PortalState;

/// GET /api/suggestions - current rows with their decisions, in display order.
pub async fn list(state: web::Data<PortalState>) -> HttpResponse {
    HttpResponse::Ok().json(state.rows())
}
