use crate::calculators::Calculator;
use crate::types::findings::Findings;
use crate::types::score::{Band, ScoreResult, ScoreSystemId, SubScore};

/// Glasgow Coma Scale: eye (1–4) + verbal (1–5) + motor (1–6). Range 3–15.
pub struct Gcs;

const REQUIRED: &[&str] = &["gcs_eye", "gcs_motor", "gcs_verbal"];

const COMPONENTS: [(&str, &str); 3] = [
    ("eye", "gcs_eye"),
    ("verbal", "gcs_verbal"),
    ("motor", "gcs_motor"),
];

impl Calculator for Gcs {
    fn id(&self) -> ScoreSystemId {
        ScoreSystemId::Gcs
    }

    fn required_fields(&self) -> &'static [&'static str] {
        REQUIRED
    }

    fn compute(&self, findings: &Findings) -> ScoreResult {
        let components: Vec<SubScore> = COMPONENTS
            .iter()
            .map(|(name, field)| match findings.number(field) {
                Some(value) => SubScore::computed(name, value),
                None => SubScore::missing(name, vec![field.to_string()]),
            })
            .collect();

        let missing: Vec<String> = components
            .iter()
            .flat_map(|component| component.missing_fields.iter().cloned())
            .collect();
        if !missing.is_empty() {
            return ScoreResult::not_computable(missing).with_components(components);
        }

        let total = components.iter().filter_map(|c| c.value).sum();
        let contributing = COMPONENTS.iter().map(|(_, field)| field.to_string()).collect();
        ScoreResult::computed(total, contributing, Some(band(total))).with_components(components)
    }
}

/// Severity: 13–15 mild, 9–12 moderate, 3–8 severe.
fn band(total: f64) -> Band {
    if total <= 8.0 {
        Band::High
    } else if total <= 12.0 {
        Band::Moderate
    } else {
        Band::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::test_support::findings;
    use serde_json::json;

    #[test]
    fn total_is_sum_of_components() {
        let result = Gcs.compute(&findings(json!({"gcs_eye": 3, "gcs_verbal": 4, "gcs_motor": 6})));
        match result {
            ScoreResult::Computed {
                value,
                band,
                components,
                ..
            } => {
                assert_eq!(value, 13.0);
                assert_eq!(band, Some(Band::Low));
                assert_eq!(components.len(), 3);
            }
            other => panic!("expected computed score, got {other:?}"),
        }
    }

    #[test]
    fn missing_verbal_is_named_and_other_components_still_reported() {
        let result = Gcs.compute(&findings(json!({"gcs_eye": 2, "gcs_motor": 5})));
        assert_eq!(result.missing_fields(), ["gcs_verbal"]);
        let components = result.components();
        assert_eq!(components[0].value, Some(2.0));
        assert_eq!(components[1].value, None);
        assert_eq!(components[1].missing_fields, vec!["gcs_verbal"]);
        assert_eq!(components[2].value, Some(5.0));
    }

    #[test]
    fn range_bounds_are_three_and_fifteen() {
        let lowest = Gcs.compute(&findings(json!({"gcs_eye": 1, "gcs_verbal": 1, "gcs_motor": 1})));
        assert_eq!(lowest.value(), Some(3.0));
        let highest = Gcs.compute(&findings(json!({"gcs_eye": 4, "gcs_verbal": 5, "gcs_motor": 6})));
        assert_eq!(highest.value(), Some(15.0));
    }

    #[test]
    fn out_of_range_component_is_not_computable() {
        let result = Gcs.compute(&findings(json!({"gcs_eye": 5, "gcs_verbal": 5, "gcs_motor": 6})));
        assert_eq!(result.missing_fields(), ["gcs_eye"]);
    }
}
