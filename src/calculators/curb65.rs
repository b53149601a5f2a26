use crate::calculators::{missing_fields, Calculator, Tally};
use crate::types::findings::Findings;
use crate::types::score::{Band, ScoreResult, ScoreSystemId};

/// CURB-65: community-acquired pneumonia severity. Five criteria, one point
/// each. Range 0–5.
pub struct Curb65;

const REQUIRED: &[&str] = &[
    "age",
    "confusion",
    "diastolic_bp",
    "respiratory_rate",
    "systolic_bp",
    "urea",
];

const UREA_MMOL_L: f64 = 7.0;
const RESPIRATORY_RATE: f64 = 30.0;
const SYSTOLIC: f64 = 90.0;
const DIASTOLIC: f64 = 60.0;

impl Calculator for Curb65 {
    fn id(&self) -> ScoreSystemId {
        ScoreSystemId::Curb65
    }

    /// Blood pressure is one criterion met by either pressure, so only the
    /// pressures that could still change the outcome are reported missing.
    fn required_fields(&self) -> &'static [&'static str] {
        REQUIRED
    }

    fn compute(&self, findings: &Findings) -> ScoreResult {
        let mut missing = missing_fields(findings, &["age", "confusion", "respiratory_rate", "urea"]);

        let systolic = findings.number("systolic_bp");
        let diastolic = findings.number("diastolic_bp");
        let low_systolic = systolic.is_some_and(|sbp| sbp < SYSTOLIC);
        let low_diastolic = diastolic.is_some_and(|dbp| dbp <= DIASTOLIC);
        if !low_systolic && !low_diastolic {
            if systolic.is_none() {
                missing.push("systolic_bp".to_string());
            }
            if diastolic.is_none() {
                missing.push("diastolic_bp".to_string());
            }
        }

        if !missing.is_empty() {
            return ScoreResult::not_computable(missing);
        }

        let mut tally = Tally::default();
        tally.add_flag(findings, "confusion", 1.0);
        tally.add_if(
            findings.number("urea").is_some_and(|urea| urea > UREA_MMOL_L),
            "urea",
            1.0,
        );
        tally.add_if(
            findings
                .number("respiratory_rate")
                .is_some_and(|rr| rr >= RESPIRATORY_RATE),
            "respiratory_rate",
            1.0,
        );
        if low_systolic {
            tally.add_if(true, "systolic_bp", 1.0);
        } else {
            tally.add_if(low_diastolic, "diastolic_bp", 1.0);
        }
        tally.add_if(
            findings.number("age").is_some_and(|age| age >= 65.0),
            "age",
            1.0,
        );

        let (value, contributing) = tally.into_parts();
        ScoreResult::computed(value, contributing, Some(band(value)))
    }
}

fn band(value: f64) -> Band {
    if value >= 3.0 {
        Band::High
    } else if value >= 2.0 {
        Band::Moderate
    } else {
        Band::Low
    }
}
