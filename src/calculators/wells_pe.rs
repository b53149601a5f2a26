use crate::calculators::{missing_fields, Calculator, Tally};
use crate::types::findings::Findings;
use crate::types::score::{Band, ScoreResult, ScoreSystemId};

/// Wells criteria for pulmonary embolism, original weighted table. Range
/// 0–12.5 in half-point steps.
pub struct WellsPe;

const REQUIRED: &[&str] = &[
    "active_cancer",
    "clinical_signs_dvt",
    "heart_rate",
    "hemoptysis",
    "immobilization_or_surgery",
    "pe_most_likely_diagnosis",
    "previous_vte",
];

const TACHYCARDIA: f64 = 100.0;

impl Calculator for WellsPe {
    fn id(&self) -> ScoreSystemId {
        ScoreSystemId::WellsPe
    }

    fn required_fields(&self) -> &'static [&'static str] {
        REQUIRED
    }

    fn compute(&self, findings: &Findings) -> ScoreResult {
        let missing = missing_fields(findings, REQUIRED);
        if !missing.is_empty() {
            return ScoreResult::not_computable(missing);
        }

        let mut tally = Tally::default();
        tally.add_flag(findings, "clinical_signs_dvt", 3.0);
        tally.add_flag(findings, "pe_most_likely_diagnosis", 3.0);
        tally.add_if(
            findings.number("heart_rate").is_some_and(|hr| hr > TACHYCARDIA),
            "heart_rate",
            1.5,
        );
        tally.add_flag(findings, "immobilization_or_surgery", 1.5);
        tally.add_flag(findings, "previous_vte", 1.5);
        tally.add_flag(findings, "hemoptysis", 1.0);
        tally.add_flag(findings, "active_cancer", 1.0);

        let (value, contributing) = tally.into_parts();
        ScoreResult::computed(value, contributing, Some(band(value)))
    }
}

fn band(value: f64) -> Band {
    if value > 6.0 {
        Band::High
    } else if value >= 2.0 {
        Band::Moderate
    } else {
        Band::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::test_support::{findings, without};
    use serde_json::json;

    fn breathless_patient() -> serde_json::Value {
        json!({
            "active_cancer": false,
            "clinical_signs_dvt": false,
            "heart_rate": 112,
            "hemoptysis": true,
            "immobilization_or_surgery": false,
            "pe_most_likely_diagnosis": false,
            "previous_vte": false
        })
    }

    #[test]
    fn tachycardia_and_hemoptysis_is_moderate() {
        match WellsPe.compute(&findings(breathless_patient())) {
            ScoreResult::Computed {
                value,
                band,
                contributing_fields,
                ..
            } => {
                assert_eq!(value, 2.5);
                assert_eq!(band, Some(Band::Moderate));
                assert_eq!(contributing_fields, vec!["heart_rate", "hemoptysis"]);
            }
            other => panic!("expected computed score, got {other:?}"),
        }
    }

    #[test]
    fn heart_rate_of_one_hundred_is_not_tachycardia() {
        let mut raw = breathless_patient();
        raw["heart_rate"] = json!(100);
        let result = WellsPe.compute(&findings(raw));
        assert_eq!(result.value(), Some(1.0));
    }

    #[test]
    fn previous_vte_can_come_from_previous_dvt() {
        let mut raw = without(&breathless_patient(), "previous_vte");
        raw["previous_dvt"] = json!(true);
        let result = WellsPe.compute(&findings(raw));
        assert_eq!(result.value(), Some(4.0));
    }

    #[test]
    fn all_criteria_reach_maximum() {
        let result = WellsPe.compute(&findings(json!({
            "active_cancer": true,
            "clinical_signs_dvt": true,
            "heart_rate": 130,
            "hemoptysis": true,
            "immobilization_or_surgery": true,
            "pe_most_likely_diagnosis": true,
            "previous_vte": true
        })));
        assert_eq!(result.value(), Some(12.5));
    }

    #[test]
    fn each_missing_required_field_is_named_exactly() {
        let raw = breathless_patient();
        for field in REQUIRED {
            let result = WellsPe.compute(&findings(without(&raw, field)));
            assert_eq!(result.missing_fields(), [field.to_string()]);
        }
    }
}
