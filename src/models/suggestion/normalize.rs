use std::sync::LazyLock;

use regex::Regex;

use super::types::*;

/// Leading decimal literal, the part a lenient float parse would consume.
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?").expect("valid leading-number regex")
});

/// `$` followed by the plain string form of the amount (`42000` -> `$42000`).
pub fn format_currency(amount: f64) -> String {
    format!("${amount}")
}

fn percentage(value: Option<f64>) -> i64 {
    value.map(|v| v.round() as i64).unwrap_or(0)
}

/// Convert one remote record into display shape. Missing fields become
/// empty strings, `$0` or zero scores.
pub fn normalize(item: ApiProjectSuggestion) -> SuggestionDraft {
    let scores = item.project_scores.unwrap_or_default();
    SuggestionDraft {
        remote_id: item.id,
        work_name: item.work_name.unwrap_or_default(),
        estimated_cost: format_currency(item.estimated_cost.unwrap_or(0.0)),
        scores: ScoreGroup {
            projected_cost: format_currency(scores.projected_cost.unwrap_or(0.0)),
            safety: percentage(scores.safety),
            compliance: percentage(scores.compliance),
            environmental: percentage(scores.environmental),
            efficiency: percentage(scores.efficiency),
            innovation: percentage(scores.innovation),
        },
        images: Vec::new(),
        files: Vec::new(),
    }
}

pub fn normalize_all(items: Vec<ApiProjectSuggestion>) -> Vec<SuggestionDraft> {
    items.into_iter().map(normalize).collect()
}

/// A freshly submitted proposal. Scores start at zero and the projected cost
/// at `"0"` whatever cost was typed; scoring happens on the remote side.
pub fn new_local_draft(
    work_name: &str,
    estimated_cost: &str,
    images: Vec<String>,
    files: Vec<FileLink>,
) -> SuggestionDraft {
    SuggestionDraft {
        remote_id: None,
        work_name: work_name.to_string(),
        estimated_cost: estimated_cost.to_string(),
        scores: ScoreGroup {
            projected_cost: "0".to_string(),
            ..ScoreGroup::default()
        },
        images,
        files,
    }
}

/// Draft built from the creation form. URL fields hold one entry per line.
pub fn draft_from_form(form: &SuggestionForm) -> SuggestionDraft {
    let images = split_lines(&form.image_urls);
    let files = split_lines(&form.file_urls)
        .iter()
        .map(|url| FileLink::from_url(url))
        .collect();
    new_local_draft(&form.work_name, &form.estimated_cost, images, files)
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Numeric cost sent to the remote service: the first `$` is dropped and the
/// leading number parsed (`"$42,000"` -> `42`). Anything unparsable is `0`.
pub fn parse_cost(typed: &str) -> f64 {
    let without_symbol = typed.replacen('$', "", 1);
    LEADING_NUMBER
        .find(without_symbol.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

pub fn submission_payload(draft: &SuggestionDraft) -> NewProposalPayload {
    NewProposalPayload {
        work_name: draft.work_name.clone(),
        estimated_cost: parse_cost(&draft.estimated_cost),
        project_scores: NewProposalScores::default(),
    }
}
