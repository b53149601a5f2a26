use crate::normalize::catalog;
use std::collections::BTreeMap;

/// Alias → canonical field, with an optional multiplicative unit conversion.
pub const ALIASES: &[(&str, &str, Option<f64>)] = &[
    ("bp", "systolic_bp", None),
    ("sbp", "systolic_bp", None),
    ("systolic", "systolic_bp", None),
    ("blood_pressure_systolic", "systolic_bp", None),
    ("dbp", "diastolic_bp", None),
    ("diastolic", "diastolic_bp", None),
    ("blood_pressure_diastolic", "diastolic_bp", None),
    ("mean_arterial_pressure", "map", None),
    ("hr", "heart_rate", None),
    ("pulse", "heart_rate", None),
    ("rr", "respiratory_rate", None),
    ("resp_rate", "respiratory_rate", None),
    ("bun", "urea", Some(0.357)),
    ("urea_mmol_l", "urea", None),
    ("cr", "creatinine", None),
    ("creatinine_umol_l", "creatinine", Some(1.0 / 88.4)),
    ("plt", "platelet_count", None),
    ("platelets", "platelet_count", None),
    ("bili", "bilirubin", None),
    ("total_bilirubin", "bilirubin", None),
    ("pf_ratio", "pao2_fio2_ratio", None),
    ("p_f_ratio", "pao2_fio2_ratio", None),
    ("sf_ratio", "spo2_fio2_ratio", None),
    ("s_f_ratio", "spo2_fio2_ratio", None),
    ("vasopressor_dose", "norepinephrine_dose", None),
    ("noradrenaline_dose", "norepinephrine_dose", None),
    ("adrenaline_dose", "epinephrine_dose", None),
    ("gcs", "gcs_total", None),
    ("gcs_e", "gcs_eye", None),
    ("gcs_v", "gcs_verbal", None),
    ("gcs_m", "gcs_motor", None),
    ("gender", "sex", None),
    ("dob", "date_of_birth", None),
    ("stroke", "history_stroke", None),
    ("stroke_tia", "history_stroke", None),
    ("bleeding_history", "history_bleeding", None),
    ("prior_bleeding", "history_bleeding", None),
    ("anticoagulated", "on_anticoagulant", None),
    ("anticoagulant", "on_anticoagulant", None),
    ("labile_inr", "inr_labile", None),
    ("chf", "congestive_heart_failure", None),
    ("heart_failure", "congestive_heart_failure", None),
    ("htn", "hypertension", None),
    ("dm", "diabetes", None),
    ("af", "atrial_fibrillation", None),
    ("afib", "atrial_fibrillation", None),
    ("ventilated", "mechanical_ventilation", None),
    ("respiratory_support", "mechanical_ventilation", None),
    ("icu", "icu_admission", None),
    ("sepsis", "suspected_sepsis", None),
    ("pneumonia", "suspected_pneumonia", None),
    ("cancer", "active_cancer", None),
];

/// Resolved field name plus the conversion factor to apply to numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub canonical: String,
    pub factor: Option<f64>,
}

/// Lower-case a raw key and fold separators to underscores.
pub fn clean_key(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        match c {
            ' ' | '-' | '/' | '.' => {
                if !out.ends_with('_') {
                    out.push('_');
                }
            }
            c => out.extend(c.to_lowercase()),
        }
    }
    out.trim_matches('_').to_string()
}

#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    extra: BTreeMap<String, String>,
}

impl AliasTable {
    pub fn with_extra(extra: &BTreeMap<String, String>) -> Self {
        let extra = extra
            .iter()
            .map(|(alias, target)| (clean_key(alias), clean_key(target)))
            .collect();
        Self { extra }
    }

    /// Canonical names resolve to themselves; fixed aliases take precedence
    /// over configured ones. Unknown keys pass through cleaned.
    pub fn resolve(&self, raw: &str) -> Resolved {
        let key = clean_key(raw);
        if catalog::lookup(&key).is_some() {
            return Resolved {
                canonical: key,
                factor: None,
            };
        }
        if let Some((_, canonical, factor)) = ALIASES.iter().find(|(alias, _, _)| *alias == key) {
            return Resolved {
                canonical: canonical.to_string(),
                factor: *factor,
            };
        }
        if let Some(canonical) = self.extra.get(&key) {
            return Resolved {
                canonical: canonical.clone(),
                factor: None,
            };
        }
        Resolved {
            canonical: key,
            factor: None,
        }
    }
}
