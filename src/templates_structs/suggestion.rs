use askama::Template;

use super::PageContext;
use crate::export::ExportFormat;
use crate::models::suggestion::SuggestionRow;

pub struct ExportLink {
    pub href: String,
    pub label: &'static str,
    pub file_name: &'static str,
}

impl ExportLink {
    pub fn all() -> Vec<ExportLink> {
        ExportFormat::ALL
            .iter()
            .map(|format| ExportLink {
                href: format!("/suggestions/export/{}", format.slug()),
                label: format.label(),
                file_name: format.file_name(),
            })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "suggestions/dashboard.html")]
pub struct SuggestionDashboardTemplate {
    pub ctx: PageContext,
    pub rows: Vec<SuggestionRow>,
    pub exports: Vec<ExportLink>,
    pub modal_open: bool,
}
