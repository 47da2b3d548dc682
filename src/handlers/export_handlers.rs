use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::errors::AppError;
use crate::export::{self, ExportFormat};
use crate::session::flash::set_flash;
use crate::state::PortalState;

/// GET /suggestions/export/{format}
/// Download the current list as csv, xlsx, pdf, doc or ppt.
pub async fn download(
    state: web::Data<PortalState>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let format = ExportFormat::from_slug(&path.into_inner()).ok_or(AppError::NotFound)?;
    let records = state.snapshot();

    match export::export(format, &records) {
        Ok(file) => Ok(HttpResponse::Ok()
            .content_type(file.content_type)
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", file.file_name),
            ))
            .body(file.bytes)),
        Err(e) => {
            log::error!("{e}");
            set_flash(
                &session,
                format!("Could not create {}", format.file_name()),
            );
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/"))
                .finish())
        }
    }
}
