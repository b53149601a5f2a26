use crate::error::ScoreDocError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Score systems in their fixed priority order. The derived `Ord` is the
/// tie-break order used by the recommender and the report layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreSystemId {
    HasBled,
    WellsDvt,
    WellsPe,
    Sofa,
    Cha2ds2Vasc,
    #[serde(rename = "curb-65")]
    Curb65,
    Gcs,
}

impl ScoreSystemId {
    pub const ALL: [ScoreSystemId; 7] = [
        ScoreSystemId::HasBled,
        ScoreSystemId::WellsDvt,
        ScoreSystemId::WellsPe,
        ScoreSystemId::Sofa,
        ScoreSystemId::Cha2ds2Vasc,
        ScoreSystemId::Curb65,
        ScoreSystemId::Gcs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScoreSystemId::HasBled => "has-bled",
            ScoreSystemId::WellsDvt => "wells-dvt",
            ScoreSystemId::WellsPe => "wells-pe",
            ScoreSystemId::Sofa => "sofa",
            ScoreSystemId::Cha2ds2Vasc => "cha2ds2-vasc",
            ScoreSystemId::Curb65 => "curb-65",
            ScoreSystemId::Gcs => "gcs",
        }
    }

    /// Display name, identical across locales.
    pub fn display_name(self) -> &'static str {
        match self {
            ScoreSystemId::HasBled => "HAS-BLED",
            ScoreSystemId::WellsDvt => "Wells (DVT)",
            ScoreSystemId::WellsPe => "Wells (PE)",
            ScoreSystemId::Sofa => "SOFA",
            ScoreSystemId::Cha2ds2Vasc => "CHA₂DS₂-VASc",
            ScoreSystemId::Curb65 => "CURB-65",
            ScoreSystemId::Gcs => "GCS",
        }
    }

    /// Documented valid range of a computed value.
    pub fn range(self) -> (f64, f64) {
        match self {
            ScoreSystemId::HasBled => (0.0, 9.0),
            ScoreSystemId::WellsDvt => (-2.0, 9.0),
            ScoreSystemId::WellsPe => (0.0, 12.5),
            ScoreSystemId::Sofa => (0.0, 24.0),
            ScoreSystemId::Cha2ds2Vasc => (0.0, 9.0),
            ScoreSystemId::Curb65 => (0.0, 5.0),
            ScoreSystemId::Gcs => (3.0, 15.0),
        }
    }

    pub fn reference_url(self) -> &'static str {
        match self {
            ScoreSystemId::HasBled => {
                "https://www.mdcalc.com/calc/1099/has-bled-score-major-bleeding-risk"
            }
            ScoreSystemId::WellsDvt => "https://www.mdcalc.com/calc/18/wells-criteria-dvt",
            ScoreSystemId::WellsPe => {
                "https://www.mdcalc.com/calc/115/wells-criteria-pulmonary-embolism"
            }
            ScoreSystemId::Sofa => {
                "https://www.mdcalc.com/calc/39/sofa-score-sequential-organ-failure-assessment"
            }
            ScoreSystemId::Cha2ds2Vasc => {
                "https://www.mdcalc.com/calc/801/cha2ds2-vasc-score-stroke-risk-atrial-fibrillation"
            }
            ScoreSystemId::Curb65 => {
                "https://www.mdcalc.com/calc/324/curb-65-score-pneumonia-severity"
            }
            ScoreSystemId::Gcs => "https://www.mdcalc.com/calc/64/glasgow-coma-scale-score-gcs",
        }
    }
}

impl fmt::Display for ScoreSystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoreSystemId {
    type Err = ScoreDocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '₂'))
            .map(|c| if c == '₂' { '2' } else { c.to_ascii_lowercase() })
            .collect();
        match key.as_str() {
            "hasbled" => Ok(ScoreSystemId::HasBled),
            "wellsdvt" => Ok(ScoreSystemId::WellsDvt),
            "wellspe" => Ok(ScoreSystemId::WellsPe),
            "sofa" => Ok(ScoreSystemId::Sofa),
            "cha2ds2vasc" => Ok(ScoreSystemId::Cha2ds2Vasc),
            "curb65" => Ok(ScoreSystemId::Curb65),
            "gcs" | "glasgowcomascale" => Ok(ScoreSystemId::Gcs),
            "wells" => Err(ScoreDocError::InvalidInput(format!(
                "score type '{s}' is ambiguous; use wells-dvt or wells-pe"
            ))),
            _ => Err(ScoreDocError::UnknownScoreSystem(s.to_string())),
        }
    }
}

/// Parse a requested score type where `all` (or an empty string) means no
/// specific system.
pub fn parse_requested(s: &str) -> Result<Option<ScoreSystemId>, ScoreDocError> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Low,
    Moderate,
    High,
}

/// One part of a composite score (a SOFA organ system, a GCS component).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    pub name: String,
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,
}

impl SubScore {
    pub fn computed(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value: Some(value),
            missing_fields: Vec::new(),
        }
    }

    pub fn missing(name: &str, missing_fields: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            value: None,
            missing_fields,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScoreResult {
    Computed {
        value: f64,
        contributing_fields: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        band: Option<Band>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        components: Vec<SubScore>,
    },
    NotComputable {
        missing_fields: Vec<String>,
        reason: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        components: Vec<SubScore>,
    },
}

impl ScoreResult {
    pub fn computed(value: f64, contributing_fields: Vec<String>, band: Option<Band>) -> Self {
        ScoreResult::Computed {
            value,
            contributing_fields: sorted_unique(contributing_fields),
            band,
            components: Vec::new(),
        }
    }

    pub fn not_computable(missing_fields: Vec<String>) -> Self {
        let missing_fields = sorted_unique(missing_fields);
        let reason = format!("missing required fields: {}", missing_fields.join(", "));
        ScoreResult::NotComputable {
            missing_fields,
            reason,
            components: Vec::new(),
        }
    }

    pub fn with_components(mut self, parts: Vec<SubScore>) -> Self {
        match &mut self {
            ScoreResult::Computed { components, .. }
            | ScoreResult::NotComputable { components, .. } => *components = parts,
        }
        self
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            ScoreResult::Computed { value, .. } => Some(*value),
            ScoreResult::NotComputable { .. } => None,
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, ScoreResult::Computed { .. })
    }

    pub fn missing_fields(&self) -> &[String] {
        match self {
            ScoreResult::Computed { .. } => &[],
            ScoreResult::NotComputable { missing_fields, .. } => missing_fields,
        }
    }

    pub fn components(&self) -> &[SubScore] {
        match self {
            ScoreResult::Computed { components, .. }
            | ScoreResult::NotComputable { components, .. } => components,
        }
    }
}

fn sorted_unique(mut fields: Vec<String>) -> Vec<String> {
    fields.sort();
    fields.dedup();
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_form_labels_and_ids() {
        assert_eq!("HAS-BLED".parse::<ScoreSystemId>().ok(), Some(ScoreSystemId::HasBled));
        assert_eq!("CHA2DS2VASc".parse::<ScoreSystemId>().ok(), Some(ScoreSystemId::Cha2ds2Vasc));
        assert_eq!("CHA₂DS₂-VASc".parse::<ScoreSystemId>().ok(), Some(ScoreSystemId::Cha2ds2Vasc));
        assert_eq!("CURB65".parse::<ScoreSystemId>().ok(), Some(ScoreSystemId::Curb65));
        assert_eq!("wells-pe".parse::<ScoreSystemId>().ok(), Some(ScoreSystemId::WellsPe));
        assert_eq!("gcs".parse::<ScoreSystemId>().ok(), Some(ScoreSystemId::Gcs));
    }

    #[test]
    fn bare_wells_is_rejected_as_ambiguous() {
        let err = "WELLS".parse::<ScoreSystemId>().expect_err("WELLS should be ambiguous");
        assert!(err.to_string().contains("wells-dvt"));
    }

    #[test]
    fn all_means_no_specific_system() {
        assert_eq!(parse_requested("ALL").expect("ALL should parse"), None);
        assert_eq!(
            parse_requested("sofa").expect("sofa should parse"),
            Some(ScoreSystemId::Sofa)
        );
        assert!(parse_requested("apache").is_err());
    }

    #[test]
    fn not_computable_sorts_and_dedups_missing_fields() {
        let result = ScoreResult::not_computable(vec![
            "urea".to_string(),
            "age".to_string(),
            "urea".to_string(),
        ]);
        assert_eq!(result.missing_fields(), ["age", "urea"]);
        assert!(!result.is_computed());
    }

    #[test]
    fn display_order_follows_priority() {
        let mut ids = vec![ScoreSystemId::Gcs, ScoreSystemId::HasBled, ScoreSystemId::Sofa];
        ids.sort();
        assert_eq!(
            ids,
            vec![ScoreSystemId::HasBled, ScoreSystemId::Sofa, ScoreSystemId::Gcs]
        );
    }
}
