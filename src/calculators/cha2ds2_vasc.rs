use crate::calculators::{missing_fields, Calculator, Tally};
use crate::types::findings::Findings;
use crate::types::score::{Band, ScoreResult, ScoreSystemId};

/// CHA₂DS₂-VASc: stroke risk in non-valvular atrial fibrillation. Range 0–9.
pub struct Cha2ds2Vasc;

const REQUIRED: &[&str] = &[
    "age",
    "congestive_heart_failure",
    "diabetes",
    "history_stroke",
    "hypertension",
    "sex",
    "vascular_disease",
];

impl Calculator for Cha2ds2Vasc {
    fn id(&self) -> ScoreSystemId {
        ScoreSystemId::Cha2ds2Vasc
    }

    fn required_fields(&self) -> &'static [&'static str] {
        REQUIRED
    }

    fn compute(&self, findings: &Findings) -> ScoreResult {
        let missing = missing_fields(findings, REQUIRED);
        if !missing.is_empty() {
            return ScoreResult::not_computable(missing);
        }
        let Some(age) = findings.number("age") else {
            return ScoreResult::not_computable(vec!["age".to_string()]);
        };
        let female = findings.category("sex") == Some("female");

        let mut tally = Tally::default();
        tally.add_flag(findings, "congestive_heart_failure", 1.0);
        tally.add_flag(findings, "hypertension", 1.0);
        tally.add_if(age >= 75.0, "age", 2.0);
        tally.add_flag(findings, "diabetes", 1.0);
        tally.add_flag(findings, "history_stroke", 2.0);
        tally.add_flag(findings, "vascular_disease", 1.0);
        tally.add_if((65.0..75.0).contains(&age), "age", 1.0);
        tally.add_if(female, "sex", 1.0);

        let (value, contributing) = tally.into_parts();
        // Female sex alone does not raise the risk category.
        let risk_points = if female { value - 1.0 } else { value };
        ScoreResult::computed(value, contributing, Some(band(risk_points)))
    }
}

fn band(risk_points: f64) -> Band {
    if risk_points >= 2.0 {
        Band::High
    } else if risk_points >= 1.0 {
        Band::Moderate
    } else {
        Band::Low
    }
}
