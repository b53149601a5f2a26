use crate::calculators::{missing_fields, Calculator, Tally};
use crate::types::findings::Findings;
use crate::types::score::{Band, ScoreResult, ScoreSystemId};

/// Wells criteria for deep vein thrombosis. Range −2 to 9.
pub struct WellsDvt;

/// Criterion → points. Also the token set accepted in `dvt_risk_factors`.
pub const CRITERIA: &[(&str, f64)] = &[
    ("active_cancer", 1.0),
    ("bedridden_recently", 1.0),
    ("calf_swelling", 1.0),
    ("collateral_superficial_veins", 1.0),
    ("entire_leg_swollen", 1.0),
    ("localized_tenderness_deep_veins", 1.0),
    ("pitting_edema", 1.0),
    ("paralysis_or_recent_cast", 1.0),
    ("previous_dvt", 1.0),
    ("alternative_diagnosis_likely", -2.0),
];

const REQUIRED: &[&str] = &[
    "active_cancer",
    "bedridden_recently",
    "calf_swelling",
    "collateral_superficial_veins",
    "entire_leg_swollen",
    "localized_tenderness_deep_veins",
    "pitting_edema",
    "paralysis_or_recent_cast",
    "previous_dvt",
    "alternative_diagnosis_likely",
];

impl Calculator for WellsDvt {
    fn id(&self) -> ScoreSystemId {
        ScoreSystemId::WellsDvt
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
        for (field, points) in CRITERIA {
            tally.add_flag(findings, field, *points);
        }
        let (value, contributing) = tally.into_parts();
        ScoreResult::computed(value, contributing, Some(band(value)))
    }
}

fn band(value: f64) -> Band {
    if value >= 3.0 {
        Band::High
    } else if value >= 1.0 {
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

    fn swollen_leg() -> serde_json::Value {
        json!({
            "active_cancer": false,
            "bedridden_recently": true,
            "calf_swelling": true,
            "collateral_superficial_veins": false,
            "entire_leg_swollen": false,
            "localized_tenderness_deep_veins": true,
            "pitting_edema": false,
            "paralysis_or_recent_cast": false,
            "previous_dvt": false,
            "alternative_diagnosis_likely": false
        })
    }

    #[test]
    fn required_fields_match_criteria_table() {
        let names: Vec<_> = CRITERIA.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, REQUIRED.to_vec());
    }

    #[test]
    fn three_criteria_is_high_probability() {
        match WellsDvt.compute(&findings(swollen_leg())) {
            ScoreResult::Computed { value, band, .. } => {
                assert_eq!(value, 3.0);
                assert_eq!(band, Some(Band::High));
            }
            other => panic!("expected computed score, got {other:?}"),
        }
    }

    #[test]
    fn alternative_diagnosis_subtracts_two() {
        let mut raw = swollen_leg();
        raw["alternative_diagnosis_likely"] = json!(true);
        match WellsDvt.compute(&findings(raw)) {
            ScoreResult::Computed { value, band, .. } => {
                assert_eq!(value, 1.0);
                assert_eq!(band, Some(Band::Moderate));
            }
            other => panic!("expected computed score, got {other:?}"),
        }
    }

    #[test]
    fn minimum_is_minus_two() {
        let result = WellsDvt.compute(&findings(json!({
            "dvt_risk_factors": ["alternative_diagnosis_likely"]
        })));
        assert_eq!(result.value(), Some(-2.0));
    }

    #[test]
    fn checklist_input_is_computable() {
        let result = WellsDvt.compute(&findings(json!({
            "dvt_risk_factors": ["calf_swelling", "pitting_edema"]
        })));
        assert_eq!(result.value(), Some(2.0));
    }

    #[test]
    fn each_missing_required_field_is_named_exactly() {
        let raw = swollen_leg();
        for field in REQUIRED {
            let result = WellsDvt.compute(&findings(without(&raw, field)));
            assert_eq!(result.missing_fields(), [field.to_string()]);
        }
    }
}
