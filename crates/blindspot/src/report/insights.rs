use super::engine::{CalculationResult, ScoredReport};
use super::rubric::{OverrideAction, Rubric};
use serde::Serialize;

/// Copy shown for a trait whose matched threshold carries no override content.
pub const DEFAULT_TRAIT_CONTENT: &str =
    "Description of this trait and its implications on your behavior.";

/// Computable results ordered by descending score.
///
/// Ties keep rubric order. A `limit` of `None` or `Some(0)` keeps every entry.
pub fn top_blindspots(results: &[CalculationResult], limit: Option<usize>) -> Vec<&CalculationResult> {
    let mut ranked: Vec<&CalculationResult> = results
        .iter()
        .filter(|result| result.is_computable())
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

    if let Some(limit) = limit.filter(|limit| *limit > 0) {
        ranked.truncate(limit);
    }

    ranked
}

/// Every override action of the section, in trait order.
pub fn consolidated_actions(results: &[CalculationResult]) -> Vec<OverrideAction> {
    results
        .iter()
        .filter_map(|result| result.override_actions.as_ref())
        .flatten()
        .cloned()
        .collect()
}

pub fn display_content(result: &CalculationResult) -> &str {
    result
        .override_content
        .as_deref()
        .unwrap_or(DEFAULT_TRAIT_CONTENT)
}

#[derive(Debug, Clone, Serialize)]
pub struct BlindspotView {
    pub trait_name: String,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_label: Option<String>,
    pub threshold_color: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<OverrideAction>,
}

impl BlindspotView {
    fn from_result(result: &CalculationResult) -> Self {
        Self {
            trait_name: result.trait_name.clone(),
            score: result.score,
            threshold_label: result.threshold_label.clone(),
            threshold_color: result.threshold_color.clone(),
            content: display_content(result).to_string(),
            actions: result.override_actions.clone().unwrap_or_default(),
        }
    }
}

/// Per-section digest backing the category tabs of a report.
#[derive(Debug, Clone, Serialize)]
pub struct SectionInsight {
    pub section_name: String,
    pub description: String,
    pub top_blindspots: Vec<BlindspotView>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consolidated_actions: Vec<OverrideAction>,
    pub uncomputable_traits: usize,
}

pub fn section_insights(
    rubric: &Rubric,
    report: &ScoredReport,
    limit: Option<usize>,
) -> Vec<SectionInsight> {
    report
        .sections()
        .iter()
        .map(|section| {
            let description = rubric
                .section(&section.section_name)
                .map(|authored| authored.description.clone())
                .unwrap_or_default();

            SectionInsight {
                section_name: section.section_name.clone(),
                description,
                top_blindspots: top_blindspots(&section.results, limit)
                    .into_iter()
                    .map(BlindspotView::from_result)
                    .collect(),
                consolidated_actions: consolidated_actions(&section.results),
                uncomputable_traits: section
                    .results
                    .iter()
                    .filter(|result| !result.is_computable())
                    .count(),
            }
        })
        .collect()
}
