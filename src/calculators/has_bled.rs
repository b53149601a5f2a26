use crate::calculators::{missing_fields, Calculator, Tally};
use crate::types::findings::Findings;
use crate::types::score::{Band, ScoreResult, ScoreSystemId};

/// HAS-BLED: 1-year major bleeding risk on anticoagulation. Nine binary
/// criteria, one point each. Range 0–9.
pub struct HasBled;

const REQUIRED: &[&str] = &[
    "age",
    "alcohol_drug_use",
    "history_bleeding",
    "history_stroke",
    "inr_labile",
    "liver_impaired",
    "renal_impaired",
];

const OPTIONAL: &[&str] = &["antiplatelet_nsaid", "systolic_bp", "uncontrolled_hypertension"];

/// Systolic pressure above which hypertension counts as uncontrolled.
const UNCONTROLLED_SYSTOLIC: f64 = 160.0;

impl Calculator for HasBled {
    fn id(&self) -> ScoreSystemId {
        ScoreSystemId::HasBled
    }

    fn required_fields(&self) -> &'static [&'static str] {
        REQUIRED
    }

    fn optional_fields(&self) -> &'static [&'static str] {
        OPTIONAL
    }

    fn compute(&self, findings: &Findings) -> ScoreResult {
        let missing = missing_fields(findings, REQUIRED);
        if !missing.is_empty() {
            return ScoreResult::not_computable(missing);
        }

        let mut tally = Tally::default();
        match findings.flag("uncontrolled_hypertension") {
            Some(flag) => tally.add_if(flag, "uncontrolled_hypertension", 1.0),
            // The measured pressure only stands in when the criterion is unstated.
            None => tally.add_if(
                findings
                    .number("systolic_bp")
                    .is_some_and(|sbp| sbp > UNCONTROLLED_SYSTOLIC),
                "systolic_bp",
                1.0,
            ),
        }
        tally.add_flag(findings, "renal_impaired", 1.0);
        tally.add_flag(findings, "liver_impaired", 1.0);
        tally.add_flag(findings, "history_stroke", 1.0);
        tally.add_flag(findings, "history_bleeding", 1.0);
        tally.add_flag(findings, "inr_labile", 1.0);
        tally.add_if(
            findings.number("age").is_some_and(|age| age > 65.0),
            "age",
            1.0,
        );
        tally.add_flag(findings, "antiplatelet_nsaid", 1.0);
        tally.add_flag(findings, "alcohol_drug_use", 1.0);

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
