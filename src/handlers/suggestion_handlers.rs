use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::errors::{AppError, render};
use crate::models::suggestion::{Decision, SuggestionForm, draft_from_form};
use crate::session::csrf;
use crate::session::flash::set_flash;
use crate::state::PortalState;
use crate::templates_structs::{ExportLink, PageContext, SuggestionDashboardTemplate};

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

fn back_to_dashboard() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", "/"))
        .finish()
}

fn dashboard(
    state: &PortalState,
    session: &Session,
    modal_open: bool,
) -> Result<HttpResponse, AppError> {
    let tmpl = SuggestionDashboardTemplate {
        ctx: PageContext::build(session, &state.config),
        rows: state.rows(),
        exports: ExportLink::all(),
        modal_open,
    };
    render(tmpl)
}

/// GET /
pub async fn index(
    state: web::Data<PortalState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    dashboard(&state, &session, false)
}

/// GET /suggestions/new
/// Dashboard with the creation modal open.
pub async fn new_form(
    state: web::Data<PortalState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    dashboard(&state, &session, true)
}

/// POST /suggestions
/// Adds the proposal locally at the top of the list, then posts it to the
/// proposal service. A failed post keeps the local record.
pub async fn create(
    state: web::Data<PortalState>,
    session: Session,
    form: web::Form<SuggestionForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let draft = draft_from_form(&form);
    let (_, outcome) = state.submit(draft).await;

    match outcome {
        Ok(()) => set_flash(&session, "Suggestion submitted"),
        Err(_) => set_flash(
            &session,
            "Suggestion added to the list, but the proposal service did not accept it",
        ),
    }
    Ok(back_to_dashboard())
}

/// POST /suggestions/refresh
pub async fn refresh(
    state: web::Data<PortalState>,
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    match state.refresh().await {
        Ok(count) => set_flash(&session, format!("Loaded {count} suggestions")),
        Err(e) => {
            log::error!("Failed to fetch project suggestions: {e}");
            set_flash(
                &session,
                "Could not reach the proposal service; showing the last loaded suggestions",
            );
        }
    }
    Ok(back_to_dashboard())
}

async fn decide(
    state: &PortalState,
    session: &Session,
    id: i64,
    decision: Decision,
) -> HttpResponse {
    match state.decide(id, decision).await {
        None => set_flash(session, "That suggestion is no longer listed"),
        Some(Err(_)) => set_flash(
            session,
            format!(
                "{} locally; the proposal service did not confirm it",
                decision.label()
            ),
        ),
        Some(Ok(())) => {}
    }
    back_to_dashboard()
}

/// POST /suggestions/{id}/approve
pub async fn approve(
    state: web::Data<PortalState>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    Ok(decide(&state, &session, path.into_inner(), Decision::Approved).await)
}

/// POST /suggestions/{id}/reject
pub async fn reject(
    state: web::Data<PortalState>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    Ok(decide(&state, &session, path.into_inner(), Decision::Rejected).await)
}
