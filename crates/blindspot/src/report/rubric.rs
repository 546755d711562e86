use super::threshold::Threshold;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_STRONG_WEIGHT: f64 = 1.0;
pub const DEFAULT_MODERATE_WEIGHT: f64 = 0.5;
/// Weight of a line authored without any strength.
pub const UNSPECIFIED_STRENGTH_WEIGHT: f64 = 1.0;

/// Authored mapping from assessment scales to report sections and traits.
///
/// Every field is optional in the source document so a partially authored
/// rubric still scores; gaps resolve through the accessor methods below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rubric {
    pub uuid: String,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub is_test: bool,
    pub strong_weight: Option<f64>,
    pub moderate_weight: Option<f64>,
    pub sections: Vec<Section>,
    pub thresholds: Vec<Threshold>,
}

impl Rubric {
    pub fn strong_weight(&self) -> f64 {
        authored_weight_or(self.strong_weight, DEFAULT_STRONG_WEIGHT)
    }

    pub fn moderate_weight(&self) -> f64 {
        authored_weight_or(self.moderate_weight, DEFAULT_MODERATE_WEIGHT)
    }

    pub fn weight_for(&self, strength: Option<LineStrength>) -> f64 {
        match strength {
            None => UNSPECIFIED_STRENGTH_WEIGHT,
            Some(LineStrength::Strong) => self.strong_weight(),
            Some(LineStrength::Moderate) => self.moderate_weight(),
        }
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().rev().find(|section| section.name == name)
    }
}

/// Absent, zero and NaN weights all fall back to `default`.
pub fn authored_weight_or(weight: Option<f64>, default: f64) -> f64 {
    match weight {
        Some(value) if value != 0.0 && !value.is_nan() => value,
        _ => default,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub name: String,
    pub description: String,
    pub traits: Vec<Trait>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trait {
    pub name: String,
    pub description: String,
    pub lines: Vec<TraitLine>,
    /// Keyed by threshold id.
    #[serde(rename = "thresholdOverrides")]
    pub threshold_overrides: BTreeMap<String, ThresholdOverride>,
}

/// One scale's contribution to a trait score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraitLine {
    #[serde(rename = "e3_scale")]
    pub scale: String,
    pub strength: Option<String>,
    pub direction: Option<String>,
    pub notes: String,
}

impl TraitLine {
    pub fn strength(&self) -> Option<LineStrength> {
        LineStrength::resolve(self.strength.as_deref())
    }

    pub fn direction(&self) -> LineDirection {
        LineDirection::resolve(self.direction.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineStrength {
    Strong,
    Moderate,
}

impl LineStrength {
    /// Empty strings count as absent; anything other than "strong" is moderate.
    pub fn resolve(raw: Option<&str>) -> Option<Self> {
        match raw {
            None | Some("") => None,
            Some(value) if value.eq_ignore_ascii_case("strong") => Some(Self::Strong),
            Some(_) => Some(Self::Moderate),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Moderate => "Moderate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineDirection {
    Positive,
    Negative,
}

impl LineDirection {
    /// Only "negative" (any case) inverts a scale.
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.eq_ignore_ascii_case("negative") => Self::Negative,
            _ => Self::Positive,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
        }
    }
}

/// Content substituted into a trait when its score lands in a given threshold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdOverride {
    pub content: String,
    pub actions: Vec<OverrideAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OverrideAction {
    pub label: String,
    pub description: String,
}

impl<'de> Deserialize<'de> for OverrideAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Detailed {
            #[serde(default)]
            label: String,
            #[serde(default)]
            description: String,
        }

        // Older rubrics list actions as bare labels.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Authored {
            Detailed(Detailed),
            Label(String),
        }

        Ok(match Authored::deserialize(deserializer)? {
            Authored::Detailed(Detailed { label, description }) => Self { label, description },
            Authored::Label(label) => Self {
                label,
                description: String::new(),
            },
        })
    }
}
