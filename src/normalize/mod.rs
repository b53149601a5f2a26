//! Findings normalizer: raw JSON object in, typed and bounds-checked
//! `Findings` out.
//!
//! Only a structurally malformed record fails the whole call. Individual
//! values that cannot be coerced or fall outside their valid range become
//! `Unknown` with a recorded rejection.

pub mod aliases;
pub mod catalog;

use crate::calculators::wells_dvt;
use crate::error::{Result, ScoreDocError};
use crate::types::findings::{Findings, Rejection, Value};
use aliases::{clean_key, AliasTable};
use catalog::{FieldKind, FieldSpec};
use chrono::{Datelike, NaiveDate};
use serde_json::Value as Json;
use std::collections::{BTreeMap, BTreeSet};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    aliases: AliasTable,
}

/// Normalize with the built-in alias table only.
pub fn normalize(raw: &Json) -> Result<Findings> {
    Normalizer::default().normalize(raw)
}

impl Normalizer {
    pub fn with_aliases(extra: &BTreeMap<String, String>) -> Self {
        Self {
            aliases: AliasTable::with_extra(extra),
        }
    }

    pub fn normalize(&self, raw: &Json) -> Result<Findings> {
        let object = raw.as_object().ok_or_else(|| {
            ScoreDocError::InvalidInput(format!(
                "findings must be a JSON object, got {}",
                json_type(raw)
            ))
        })?;

        let mut state = State::default();
        for (key, value) in object {
            if value.is_object() {
                return Err(ScoreDocError::InvalidInput(format!(
                    "field '{key}' has a nested object value"
                )));
            }
            let resolved = self.aliases.resolve(key);
            let normalized = match catalog::lookup(&resolved.canonical) {
                Some(spec) => match coerce(spec, value, resolved.factor) {
                    Ok(v) => v,
                    Err(reason) => {
                        state.reject(&resolved.canonical, reason.clone());
                        Value::unknown_because(reason)
                    }
                },
                None => {
                    tracing::debug!(field = %resolved.canonical, "keeping unrecognized field untyped");
                    untyped(value)
                }
            };
            state.insert(key, &resolved.canonical, normalized);
        }

        self.expand_dvt_checklist(&mut state);
        derive_age(&mut state);
        derive_map(&mut state);
        derive_previous_vte(&mut state);

        Ok(Findings::from_parts(
            state.values,
            state.rejections,
            state.derived,
        ))
    }

    /// A supplied `dvt_risk_factors` list is the complete Wells-DVT checklist:
    /// listed criteria are present, the rest absent unless given explicitly.
    fn expand_dvt_checklist(&self, state: &mut State) {
        let Some(Value::List(tokens)) = state.values.get("dvt_risk_factors").cloned() else {
            return;
        };

        let mut listed = Vec::new();
        for token in &tokens {
            let canonical = self.aliases.resolve(token).canonical;
            if wells_dvt::CRITERIA.iter().any(|(name, _)| *name == canonical) {
                listed.push(canonical);
            } else {
                state.rejections.push(Rejection {
                    field: "dvt_risk_factors".to_string(),
                    reason: format!("unrecognized Wells DVT criterion '{token}'"),
                });
            }
        }

        for (name, _) in wells_dvt::CRITERIA {
            if state.values.contains_key(*name) {
                continue;
            }
            let present = listed.iter().any(|item| item == name);
            state.values.insert(name.to_string(), Value::Flag(present));
            state.derived.push(name.to_string());
        }
    }
}

#[derive(Default)]
struct State {
    values: BTreeMap<String, Value>,
    sources: BTreeMap<String, String>,
    conflicts: BTreeSet<String>,
    rejections: Vec<Rejection>,
    derived: Vec<String>,
}

impl State {
    fn reject(&mut self, field: &str, reason: String) {
        tracing::debug!(field, %reason, "rejected finding");
        self.rejections.push(Rejection {
            field: field.to_string(),
            reason,
        });
    }

    /// Two raw keys resolving to one field must agree; otherwise the field is
    /// unknown. An unknown value never conflicts with a known one.
    fn insert(&mut self, raw_key: &str, canonical: &str, value: Value) {
        match self.values.get(canonical) {
            Some(_) if !value.is_known() => {}
            Some(existing) if !existing.is_known() && !self.conflicts.contains(canonical) => {
                self.values.insert(canonical.to_string(), value);
                self.sources
                    .insert(canonical.to_string(), raw_key.to_string());
            }
            Some(existing) if existing != &value => {
                let first = self.sources.get(canonical).cloned().unwrap_or_default();
                let reason = format!("conflicting values from '{first}' and '{raw_key}'");
                self.conflicts.insert(canonical.to_string());
                self.reject(canonical, reason.clone());
                self.values
                    .insert(canonical.to_string(), Value::unknown_because(reason));
            }
            Some(_) => {}
            None => {
                self.values.insert(canonical.to_string(), value);
                self.sources
                    .insert(canonical.to_string(), raw_key.to_string());
            }
        }
    }

    fn number(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(Value::Number(n)) => Some(*n),
            _ => None,
        }
    }

    fn flag(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(Value::Flag(b)) => Some(*b),
            _ => None,
        }
    }

    fn date(&self, name: &str) -> Option<NaiveDate> {
        match self.values.get(name) {
            Some(Value::Category(text)) => NaiveDate::parse_from_str(text, DATE_FORMAT).ok(),
            _ => None,
        }
    }
}

fn coerce(spec: &FieldSpec, value: &Json, factor: Option<f64>) -> std::result::Result<Value, String> {
    if value.is_null() {
        return Ok(Value::unknown());
    }
    if let Json::String(text) = value {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("unknown") {
            return Ok(Value::unknown());
        }
    }

    match spec.kind {
        FieldKind::Number {
            min,
            max,
            integer,
            unit,
        } => {
            let raw = match value {
                Json::Number(n) => n.as_f64(),
                Json::String(text) => text.trim().parse::<f64>().ok(),
                _ => None,
            }
            .ok_or_else(|| format!("expected a number, got {}", json_type(value)))?;
            let n = raw * factor.unwrap_or(1.0);
            if !n.is_finite() {
                return Err("value is not finite".to_string());
            }
            if integer && n.fract() != 0.0 {
                return Err(format!("value {n} must be a whole number"));
            }
            if n < min || n > max {
                return Err(format!("value {n} outside valid range [{min}, {max}] {unit}"));
            }
            Ok(Value::Number(n))
        }
        FieldKind::Flag => coerce_flag(value)
            .map(Value::Flag)
            .ok_or_else(|| format!("expected a yes/no value, got {value}")),
        FieldKind::Category(allowed) => {
            let text = value
                .as_str()
                .ok_or_else(|| format!("expected text, got {}", json_type(value)))?;
            let key = clean_key(text);
            let canonical = match key.as_str() {
                "m" | "man" => "male",
                "f" | "woman" => "female",
                other => other,
            };
            allowed
                .iter()
                .find(|option| **option == canonical)
                .map(|option| Value::Category(option.to_string()))
                .ok_or_else(|| format!("'{text}' is not one of {}", allowed.join(", ")))
        }
        FieldKind::Date => {
            let text = value
                .as_str()
                .ok_or_else(|| format!("expected an ISO date, got {}", json_type(value)))?;
            NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
                .map(|date| Value::Category(date.format(DATE_FORMAT).to_string()))
                .map_err(|e| format!("invalid date '{text}': {e}"))
        }
        FieldKind::List => match value {
            Json::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(clean_key)
                        .ok_or_else(|| format!("list items must be text, got {}", json_type(item)))
                })
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(Value::List),
            Json::String(text) => Ok(Value::List(
                text.split(',')
                    .map(clean_key)
                    .filter(|item| !item.is_empty())
                    .collect(),
            )),
            other => Err(format!("expected a list, got {}", json_type(other))),
        },
    }
}

fn coerce_flag(value: &Json) -> Option<bool> {
    match value {
        Json::Bool(b) => Some(*b),
        Json::Number(n) => match n.as_f64() {
            Some(v) if v == 1.0 => Some(true),
            Some(v) if v == 0.0 => Some(false),
            _ => None,
        },
        Json::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" | "present" | "positive" => Some(true),
            "false" | "no" | "n" | "0" | "absent" | "negative" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn untyped(value: &Json) -> Value {
    match value {
        Json::Null => Value::unknown(),
        Json::Bool(b) => Value::Flag(*b),
        Json::Number(n) => n.as_f64().map(Value::Number).unwrap_or_else(Value::unknown),
        Json::String(text) => Value::Category(text.clone()),
        Json::Array(items) => Value::List(
            items
                .iter()
                .map(|item| match item {
                    Json::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect(),
        ),
        Json::Object(_) => Value::unknown(),
    }
}

fn derive_age(state: &mut State) {
    if state.values.contains_key("age") {
        return;
    }
    let (Some(born), Some(seen)) = (state.date("date_of_birth"), state.date("encounter_date"))
    else {
        return;
    };
    if seen < born {
        state.reject("age", "encounter_date precedes date_of_birth".to_string());
        return;
    }
    let mut years = seen.year() - born.year();
    if (seen.month(), seen.day()) < (born.month(), born.day()) {
        years -= 1;
    }
    let age = f64::from(years);
    if age > 130.0 {
        state.reject("age", format!("derived age {age} outside valid range [0, 130] years"));
        return;
    }
    state.values.insert("age".to_string(), Value::Number(age));
    state.derived.push("age".to_string());
}

fn derive_map(state: &mut State) {
    if state.values.contains_key("map") {
        return;
    }
    let (Some(systolic), Some(diastolic)) =
        (state.number("systolic_bp"), state.number("diastolic_bp"))
    else {
        return;
    };
    let map = (systolic + 2.0 * diastolic) / 3.0;
    state.values.insert("map".to_string(), Value::Number(map));
    state.derived.push("map".to_string());
}

fn derive_previous_vte(state: &mut State) {
    if state.values.contains_key("previous_vte") {
        return;
    }
    let derived = match (state.flag("previous_dvt"), state.flag("previous_pe")) {
        (Some(true), _) | (_, Some(true)) => true,
        (Some(false), Some(false)) => false,
        _ => return,
    };
    state
        .values
        .insert("previous_vte".to_string(), Value::Flag(derived));
    state.derived.push("previous_vte".to_string());
}

fn json_type(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_non_object_input() {
        let err = normalize(&json!([1, 2, 3])).expect_err("arrays are malformed");
        assert!(matches!(err, ScoreDocError::InvalidInput(_)));
    }

    #[test]
    fn rejects_nested_objects() {
        let err = normalize(&json!({"vitals": {"hr": 80}})).expect_err("nested objects are malformed");
        assert!(err.to_string().contains("vitals"));
    }

    #[test]
    fn out_of_range_values_become_unknown_with_reason() {
        let findings = normalize(&json!({"age": -4, "respiratory_rate": 22}))
            .expect("partial failure should not abort");
        assert!(!findings.is_known("age"));
        assert_eq!(findings.number("respiratory_rate"), Some(22.0));
        assert_eq!(findings.rejections().len(), 1);
        assert_eq!(findings.rejections()[0].field, "age");
        assert!(findings.rejections()[0].reason.contains("outside valid range"));
    }

    #[test]
    fn resolves_aliases_and_converts_units() {
        let findings = normalize(&json!({"BP": "120", "RR": 31, "BUN": 28, "Gender": "F"}))
            .expect("aliases should normalize");
        assert_eq!(findings.number("systolic_bp"), Some(120.0));
        assert_eq!(findings.number("respiratory_rate"), Some(31.0));
        let urea = findings.number("urea").expect("bun converts to urea");
        assert!((urea - 9.996).abs() < 1e-9);
        assert_eq!(findings.category("sex"), Some("female"));
    }

    #[test]
    fn null_and_unknown_strings_are_unknown_without_rejection() {
        let findings = normalize(&json!({"confusion": null, "urea": "unknown"}))
            .expect("unknowns should normalize");
        assert!(!findings.is_known("confusion"));
        assert!(!findings.is_known("urea"));
        assert!(findings.rejections().is_empty());
    }

    #[test]
    fn coerces_flag_spellings() {
        let findings = normalize(&json!({"confusion": "yes", "diabetes": 0, "hemoptysis": "absent"}))
            .expect("flags should normalize");
        assert_eq!(findings.flag("confusion"), Some(true));
        assert_eq!(findings.flag("diabetes"), Some(false));
        assert_eq!(findings.flag("hemoptysis"), Some(false));
    }

    #[test]
    fn gcs_components_must_be_whole_numbers() {
        let findings = normalize(&json!({"gcs_eye": 2.5, "gcs_motor": 7}))
            .expect("partial failure should not abort");
        assert!(!findings.is_known("gcs_eye"));
        assert!(!findings.is_known("gcs_motor"));
        assert_eq!(findings.rejections().len(), 2);
    }

    #[test]
    fn conflicting_aliases_make_field_unknown() {
        let findings = normalize(&json!({"sbp": 120, "systolic_bp": 95}))
            .expect("conflict is a partial failure");
        assert!(!findings.is_known("systolic_bp"));
        assert!(findings
            .rejections()
            .iter()
            .any(|rejection| rejection.reason.contains("conflicting")));
    }

    #[test]
    fn unknown_alias_does_not_erase_known_value() {
        let findings = normalize(&json!({"bp": null, "systolic_bp": 120}))
            .expect("findings should normalize");
        assert_eq!(findings.number("systolic_bp"), Some(120.0));
        assert!(findings.rejections().is_empty());

        let findings = normalize(&json!({"sbp": 135, "systolic_bp": "unknown"}))
            .expect("findings should normalize");
        assert_eq!(findings.number("systolic_bp"), Some(135.0));
        assert!(findings.rejections().is_empty());
    }

    #[test]
    fn dvt_checklist_fills_unlisted_criteria_as_absent() {
        let findings = normalize(&json!({
            "dvt_risk_factors": ["calf swelling", "cancer", "sunburn"],
            "previous_dvt": true
        }))
        .expect("checklist should normalize");
        assert_eq!(findings.flag("calf_swelling"), Some(true));
        assert_eq!(findings.flag("active_cancer"), Some(true));
        assert_eq!(findings.flag("pitting_edema"), Some(false));
        assert_eq!(findings.flag("previous_dvt"), Some(true));
        assert!(findings
            .rejections()
            .iter()
            .any(|rejection| rejection.reason.contains("sunburn")));
    }

    #[test]
    fn derives_age_from_dates() {
        let findings = normalize(&json!({
            "date_of_birth": "1950-06-15",
            "encounter_date": "2024-06-14"
        }))
        .expect("dates should normalize");
        assert_eq!(findings.number("age"), Some(73.0));
        assert!(findings.derived().iter().any(|name| name == "age"));
    }

    #[test]
    fn explicit_age_wins_over_dates() {
        let findings = normalize(&json!({
            "age": 40,
            "date_of_birth": "1950-06-15",
            "encounter_date": "2024-06-14"
        }))
        .expect("dates should normalize");
        assert_eq!(findings.number("age"), Some(40.0));
        assert!(findings.derived().is_empty());
    }

    #[test]
    fn derives_map_and_previous_vte() {
        let findings = normalize(&json!({
            "systolic_bp": 120,
            "diastolic_bp": 60,
            "previous_pe": true
        }))
        .expect("derivations should normalize");
        assert_eq!(findings.number("map"), Some(80.0));
        assert_eq!(findings.flag("previous_vte"), Some(true));
    }

    #[test]
    fn previous_vte_stays_unknown_when_history_is_partial() {
        let findings =
            normalize(&json!({"previous_dvt": false})).expect("partial history should normalize");
        assert!(!findings.is_known("previous_vte"));
    }

    #[test]
    fn configured_alias_is_applied() {
        let mut extra = BTreeMap::new();
        extra.insert("sys_bp".to_string(), "systolic_bp".to_string());
        let findings = Normalizer::with_aliases(&extra)
            .normalize(&json!({"sys_bp": 88}))
            .expect("configured alias should normalize");
        assert_eq!(findings.number("systolic_bp"), Some(88.0));
    }

    #[test]
    fn unrecognized_fields_are_kept_untyped() {
        let findings =
            normalize(&json!({"ward": "ICU-3"})).expect("extra fields should normalize");
        assert_eq!(findings.category("ward"), Some("ICU-3"));
    }
}
