use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ── Wire types (remote proposal service) ──────────────────────────

/// Proposal as returned by the remote service. Every field is optional and
/// decoded leniently: a field of the wrong type reads as missing instead of
/// failing the whole list. The normalizer fills the gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiProjectSuggestion {
    #[serde(
        rename = "Id",
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,
    #[serde(rename = "WorkName", default, deserialize_with = "lenient_text")]
    pub work_name: Option<String>,
    #[serde(rename = "EstimatedCost", default, deserialize_with = "lenient_number")]
    pub estimated_cost: Option<f64>,
    #[serde(rename = "ProjectScores", default, deserialize_with = "lenient_scores")]
    pub project_scores: Option<ApiProjectScores>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiProjectScores {
    #[serde(default, deserialize_with = "lenient_number")]
    pub projected_cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub safety: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub compliance: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub environmental: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub efficiency: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub innovation: Option<f64>,
}

/// Integer ids, also when sent as a numeric string. Anything else is `None`.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_scores<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<ApiProjectScores>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// Body element posted to the remote service for a new proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProposalPayload {
    #[serde(rename = "WorkName")]
    pub work_name: String,
    #[serde(rename = "EstimatedCost")]
    pub estimated_cost: f64,
    #[serde(rename = "ProjectScores")]
    pub project_scores: NewProposalScores,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewProposalScores {
    pub projected_cost: f64,
    pub safety: f64,
    pub compliance: f64,
    pub environmental: f64,
    pub efficiency: f64,
    pub innovation: f64,
}

// ── Display types ─────────────────────────────────────────────────

/// Six-metric evaluation attached to a suggestion.
///
/// Serializes with camelCase keys in declaration order; the DOC export dumps
/// it verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreGroup {
    pub projected_cost: String,
    pub safety: i64,
    pub compliance: i64,
    pub environmental: i64,
    pub efficiency: i64,
    pub innovation: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLink {
    pub name: String,
    pub url: String,
}

impl FileLink {
    /// Link whose display name is the last path segment of `url`.
    pub fn from_url(url: &str) -> Self {
        let trimmed = url.trim_end_matches('/');
        let path = trimmed.split(['?', '#']).next().unwrap_or(trimmed);
        let name = path
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(trimmed);
        FileLink {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// A suggestion before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionDraft {
    /// Id carried by the remote record, kept when it does not clash.
    pub remote_id: Option<i64>,
    pub work_name: String,
    pub estimated_cost: String,
    pub scores: ScoreGroup,
    pub images: Vec<String>,
    pub files: Vec<FileLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: i64,
    pub work_name: String,
    pub estimated_cost: String,
    pub scores: ScoreGroup,
    pub images: Vec<String>,
    pub files: Vec<FileLink>,
}

impl Suggestion {
    pub fn from_draft(id: i64, draft: SuggestionDraft) -> Self {
        Suggestion {
            id,
            work_name: draft.work_name,
            estimated_cost: draft.estimated_cost,
            scores: draft.scores,
            images: draft.images,
            files: draft.files,
        }
    }
}

/// Reviewer disposition. `Undecided` is never stored; it is what a missing
/// entry in the decision map reads as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approved,
    Rejected,
    #[default]
    Undecided,
}

impl Decision {
    pub fn is_approved(&self) -> bool {
        *self == Decision::Approved
    }

    pub fn is_rejected(&self) -> bool {
        *self == Decision::Rejected
    }

    pub fn is_undecided(&self) -> bool {
        *self == Decision::Undecided
    }

    pub fn label(&self) -> &'static str {
        match self {
            Decision::Approved => "Approved",
            Decision::Rejected => "Rejected",
            Decision::Undecided => "Undecided",
        }
    }
}

/// Percentage metrics shown as score bars, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreMetric {
    Safety,
    Compliance,
    Environmental,
    Efficiency,
    Innovation,
}

impl ScoreMetric {
    pub const ALL: [ScoreMetric; 5] = [
        ScoreMetric::Safety,
        ScoreMetric::Compliance,
        ScoreMetric::Environmental,
        ScoreMetric::Efficiency,
        ScoreMetric::Innovation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ScoreMetric::Safety => "Safety",
            ScoreMetric::Compliance => "Compliance",
            ScoreMetric::Environmental => "Environmental",
            ScoreMetric::Efficiency => "Efficiency",
            ScoreMetric::Innovation => "Innovation",
        }
    }

    pub fn value(&self, scores: &ScoreGroup) -> i64 {
        match self {
            ScoreMetric::Safety => scores.safety,
            ScoreMetric::Compliance => scores.compliance,
            ScoreMetric::Environmental => scores.environmental,
            ScoreMetric::Efficiency => scores.efficiency,
            ScoreMetric::Innovation => scores.innovation,
        }
    }
}

/// One horizontal score bar. `width` is the value clamped to 0..=100.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBar {
    pub label: &'static str,
    pub value: i64,
    pub width: u8,
}

impl ScoreBar {
    pub fn new(metric: ScoreMetric, scores: &ScoreGroup) -> Self {
        let value = metric.value(scores);
        ScoreBar {
            label: metric.label(),
            value,
            width: value.clamp(0, 100) as u8,
        }
    }

    pub fn all(scores: &ScoreGroup) -> Vec<ScoreBar> {
        ScoreMetric::ALL
            .iter()
            .map(|metric| ScoreBar::new(*metric, scores))
            .collect()
    }
}

/// Suggestion as shown in the dashboard table.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionRow {
    /// 1-based position in store order.
    pub position: usize,
    #[serde(flatten)]
    pub record: Suggestion,
    pub decision: Decision,
    #[serde(skip)]
    pub bars: Vec<ScoreBar>,
}

/// Form input for creating a suggestion.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionForm {
    pub work_name: String,
    pub estimated_cost: String,
    /// One image URL per line.
    #[serde(default)]
    pub image_urls: String,
    /// One file URL per line.
    #[serde(default)]
    pub file_urls: String,
    pub csrf_token: String,
}
