//! Score calculators. One pure calculator per score system, all behind the
//! `Calculator` trait.
//!
//! Every calculator follows the same rule: if a required field is unknown the
//! result is `NotComputable` naming exactly the missing fields. Clinical
//! variables are never defaulted.

pub mod cha2ds2_vasc;
pub mod curb65;
pub mod gcs;
pub mod has_bled;
pub mod sofa;
pub mod wells_dvt;
pub mod wells_pe;

use crate::normalize::catalog::{self, FieldKind};
use crate::types::findings::Findings;
use crate::types::score::{ScoreResult, ScoreSystemId};

/// Trait implemented by each clinical score system.
pub trait Calculator: Send + Sync {
    fn id(&self) -> ScoreSystemId;

    /// Fields whose absence makes the score not computable.
    fn required_fields(&self) -> &'static [&'static str];

    /// Fields that add points when known but are never required.
    fn optional_fields(&self) -> &'static [&'static str] {
        &[]
    }

    fn compute(&self, findings: &Findings) -> ScoreResult;
}

/// Return all registered calculators in priority order.
pub fn all_calculators() -> Vec<Box<dyn Calculator>> {
    vec![
        Box::new(has_bled::HasBled),
        Box::new(wells_dvt::WellsDvt),
        Box::new(wells_pe::WellsPe),
        Box::new(sofa::Sofa),
        Box::new(cha2ds2_vasc::Cha2ds2Vasc),
        Box::new(curb65::Curb65),
        Box::new(gcs::Gcs),
    ]
}

/// Look up the calculator for a score system.
pub fn get_calculator(id: ScoreSystemId) -> Box<dyn Calculator> {
    match id {
        ScoreSystemId::HasBled => Box::new(has_bled::HasBled),
        ScoreSystemId::WellsDvt => Box::new(wells_dvt::WellsDvt),
        ScoreSystemId::WellsPe => Box::new(wells_pe::WellsPe),
        ScoreSystemId::Sofa => Box::new(sofa::Sofa),
        ScoreSystemId::Cha2ds2Vasc => Box::new(cha2ds2_vasc::Cha2ds2Vasc),
        ScoreSystemId::Curb65 => Box::new(curb65::Curb65),
        ScoreSystemId::Gcs => Box::new(gcs::Gcs),
    }
}

pub(crate) fn missing_fields(findings: &Findings, fields: &[&str]) -> Vec<String> {
    fields
        .iter()
        .filter(|field| !has_value(findings, field))
        .map(|field| field.to_string())
        .collect()
}

/// True when `field` holds a value of the kind the catalog declares for it.
/// A number stored as a flag is as unusable as no value at all.
pub(crate) fn has_value(findings: &Findings, field: &str) -> bool {
    match catalog::lookup(field).map(|spec| spec.kind) {
        Some(FieldKind::Number { .. }) => findings.number(field).is_some(),
        Some(FieldKind::Flag) => findings.flag(field).is_some(),
        Some(FieldKind::Category(_) | FieldKind::Date) => findings.category(field).is_some(),
        Some(FieldKind::List) => findings.list(field).is_some(),
        None => findings.is_known(field),
    }
}

/// Running point total plus the fields that actually contributed points.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    total: f64,
    contributing: Vec<String>,
}

impl Tally {
    pub(crate) fn add_if(&mut self, condition: bool, field: &str, points: f64) {
        if condition {
            self.total += points;
            self.contributing.push(field.to_string());
        }
    }

    /// Count a flag only when it is known to be present.
    pub(crate) fn add_flag(&mut self, findings: &Findings, field: &str, points: f64) {
        self.add_if(findings.flag(field) == Some(true), field, points);
    }

    pub(crate) fn into_parts(self) -> (f64, Vec<String>) {
        (self.total, self.contributing)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::normalize::normalize;
    use crate::types::findings::Findings;
    use serde_json::Value;

    pub(crate) fn findings(raw: Value) -> Findings {
        normalize(&raw).expect("test findings should normalize")
    }

    /// Drop one key from a JSON object fixture.
    pub(crate) fn without(raw: &Value, key: &str) -> Value {
        let mut raw = raw.clone();
        raw.as_object_mut()
            .expect("fixture should be an object")
            .remove(key);
        raw
    }
}
