use super::catalog::ScaleCatalog;
use super::normalizer::NEUTRAL_SCORE;
use super::rubric::{LineDirection, OverrideAction, Rubric, Trait};
use super::threshold::{find_matching_threshold, Threshold, NO_THRESHOLD_COLOR};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::debug;

/// Stateless scorer applying a rubric to a normalized score vector.
#[derive(Debug, Clone)]
pub struct ReportScoringEngine {
    catalog: ScaleCatalog,
}

impl ReportScoringEngine {
    pub fn new(catalog: ScaleCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ScaleCatalog {
        &self.catalog
    }

    /// Scores every trait of every section, preserving rubric order.
    ///
    /// Never fails: unknown scales are skipped, traits without a scorable line
    /// score NaN and unmatched thresholds leave the classification empty.
    pub fn score(&self, rubric: &Rubric, scores: &[f64], thresholds: &[Threshold]) -> ScoredReport {
        let mut report = ScoredReport::default();

        for section in &rubric.sections {
            let results = section
                .traits
                .iter()
                .map(|definition| self.score_trait(rubric, definition, scores, thresholds))
                .collect();
            report.insert(section.name.clone(), results);
        }

        report
    }

    fn score_trait(
        &self,
        rubric: &Rubric,
        definition: &Trait,
        scores: &[f64],
        thresholds: &[Threshold],
    ) -> CalculationResult {
        let score = self.weighted_score(rubric, definition, scores);
        let matched = find_matching_threshold(score, thresholds);
        let details = matched.and_then(|threshold| definition.threshold_overrides.get(&threshold.id));

        CalculationResult {
            trait_name: definition.name.clone(),
            score,
            threshold_label: matched.map(|threshold| threshold.label.clone()),
            threshold_color: matched
                .map_or(NO_THRESHOLD_COLOR, Threshold::display_color)
                .to_string(),
            threshold_id: matched.map(|threshold| threshold.id.clone()),
            override_content: details
                .filter(|details| !details.content.is_empty())
                .map(|details| details.content.clone()),
            override_actions: details.map(|details| details.actions.clone()),
        }
    }

    fn weighted_score(&self, rubric: &Rubric, definition: &Trait, scores: &[f64]) -> f64 {
        let mut contribution = 0.0;
        let mut total_weight = 0.0;

        for line in &definition.lines {
            let Some(index) = self.catalog.index_of(&line.scale) else {
                debug!(trait_name = %definition.name, scale = %line.scale, "skipping line for unknown scale");
                continue;
            };

            let score = scores.get(index).copied().unwrap_or(NEUTRAL_SCORE);
            let weight = rubric.weight_for(line.strength());
            contribution += match line.direction() {
                LineDirection::Positive => score * weight,
                LineDirection::Negative => (100.0 - score) * weight,
            };
            total_weight += weight;
        }

        if total_weight == 0.0 || total_weight.is_nan() {
            debug!(trait_name = %definition.name, "trait has no scorable lines");
            return f64::NAN;
        }

        round_to_hundredths(contribution / total_weight)
    }
}

/// Two-decimal rounding of the exact binary value; exact ties round away from zero.
pub(crate) fn round_to_hundredths(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let doubled = value * 200.0;
    let exact = value.mul_add(200.0, -doubled) == 0.0;
    if exact && doubled.fract() == 0.0 && doubled % 2.0 != 0.0 {
        return (doubled.abs() + 1.0).copysign(value) / 200.0;
    }

    format!("{value:.2}").parse().unwrap_or(value)
}

/// Scored trait ready for presentation.
///
/// `score` is NaN when no line of the trait referenced a known scale; callers
/// treat such entries as "no data".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub trait_name: String,
    pub score: f64,
    pub threshold_label: Option<String>,
    pub threshold_color: String,
    pub threshold_id: Option<String>,
    pub override_content: Option<String>,
    pub override_actions: Option<Vec<OverrideAction>>,
}

impl CalculationResult {
    pub fn is_computable(&self) -> bool {
        !self.score.is_nan()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionScores {
    pub section_name: String,
    pub results: Vec<CalculationResult>,
}

/// Section name to ordered trait results, in rubric order.
///
/// A section name authored twice keeps its first position and the results of
/// its last occurrence. Serializes as a JSON object with keys in rubric order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoredReport {
    sections: Vec<SectionScores>,
}

impl ScoredReport {
    fn insert(&mut self, section_name: String, results: Vec<CalculationResult>) {
        match self
            .sections
            .iter_mut()
            .find(|section| section.section_name == section_name)
        {
            Some(existing) => existing.results = results,
            None => self.sections.push(SectionScores {
                section_name,
                results,
            }),
        }
    }

    pub fn get(&self, section_name: &str) -> Option<&[CalculationResult]> {
        self.sections
            .iter()
            .find(|section| section.section_name == section_name)
            .map(|section| section.results.as_slice())
    }

    pub fn sections(&self) -> &[SectionScores] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl Serialize for ScoredReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(&section.section_name, &section.results)?;
        }
        map.end()
    }
}
