use super::ExportError;
use crate::models::suggestion::Suggestion;

/// Plain-text stand-in for a Word document: one block per record with the
/// score group dumped as JSON.
pub fn doc_text(records: &[Suggestion]) -> Result<String, ExportError> {
    let blocks = records
        .iter()
        .enumerate()
        .map(|(index, s)| -> Result<String, ExportError> {
            let scores = serde_json::to_string(&s.scores)?;
            Ok(format!(
                "#{} - {}\nEstimated: {}\nScores: {}\n",
                index + 1,
                s.work_name,
                s.estimated_cost,
                scores
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(blocks.join("\n\n"))
}

/// Plain-text stand-in for a slide deck: one line per record.
pub fn ppt_text(records: &[Suggestion]) -> String {
    records
        .iter()
        .enumerate()
        .map(|(index, s)| format!("Slide {}: {} ({})", index + 1, s.work_name, s.estimated_cost))
        .collect::<Vec<_>>()
        .join("\n")
}
