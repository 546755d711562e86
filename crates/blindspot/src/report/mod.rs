//! Blindspot report scoring.
//!
//! Raw survey results are normalized against the scale catalog, then scored
//! through an authored rubric into per-section trait results that the
//! presentation layer renders as report tabs.

pub mod catalog;
pub mod engine;
pub mod import;
pub mod insights;
pub mod normalizer;
pub mod router;
pub mod rubric;
pub mod service;
pub mod threshold;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, ScaleCatalog, STANDARD_SCALE_COUNT};
pub use engine::{CalculationResult, ReportScoringEngine, ScoredReport, SectionScores};
pub use import::{read_survey_results, read_survey_results_from_path, SurveyImportError, SurveyResult};
pub use insights::{
    consolidated_actions, display_content, section_insights, top_blindspots, BlindspotView,
    SectionInsight, DEFAULT_TRAIT_CONTENT,
};
pub use normalizer::{normalize, RawScore, RawScores, ScoreVector, NEUTRAL_SCORE};
pub use router::report_router;
pub use rubric::{
    LineDirection, LineStrength, OverrideAction, Rubric, Section, ThresholdOverride, Trait,
    TraitLine,
};
pub use service::{ReportScoringService, RespondentReport, ScoringServiceError};
pub use threshold::{find_matching_threshold, Threshold, NO_THRESHOLD_COLOR};
