//! Fixed summary and justification templates for each supported locale.
//! Locale only changes wording; numbers are formatted identically.

use crate::types::report::Locale;
use crate::types::score::Band;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    /// `{name}: {value} ({band}).`
    Computed,
    /// `{name}: {value}.`
    ComputedNoBand,
    /// `{name} could not be calculated; missing: {fields}.`
    NotComputable,
    Requested,
    NothingComputed,
    NoOtherScores,
    /// `{name} is relevant because of: {triggers}.`
    Justification,
}

pub fn text(locale: Locale, msg: Msg) -> &'static str {
    match (locale, msg) {
        (_, Msg::Computed) => "{name}: {value} ({band}).",
        (_, Msg::ComputedNoBand) => "{name}: {value}.",

        (Locale::En, Msg::NotComputable) => "{name} could not be calculated; missing: {fields}.",
        (Locale::De, Msg::NotComputable) => {
            "{name} konnte nicht berechnet werden; fehlende Angaben: {fields}."
        }
        (Locale::Nl, Msg::NotComputable) => {
            "{name} kon niet worden berekend; ontbrekende gegevens: {fields}."
        }

        (Locale::En, Msg::Requested) => "requested",
        (Locale::De, Msg::Requested) => "angefordert",
        (Locale::Nl, Msg::Requested) => "aangevraagd",

        (Locale::En, Msg::NothingComputed) => {
            "No score could be calculated from the provided findings. Minimum missing data per score:"
        }
        (Locale::De, Msg::NothingComputed) => {
            "Aus den vorliegenden Befunden konnte kein Score berechnet werden. Fehlende Mindestangaben je Score:"
        }
        (Locale::Nl, Msg::NothingComputed) => {
            "Uit de aangeleverde bevindingen kon geen score worden berekend. Ontbrekende minimale gegevens per score:"
        }

        (Locale::En, Msg::NoOtherScores) => "No other scores could be calculated.",
        (Locale::De, Msg::NoOtherScores) => "Keine weiteren Scores berechenbar.",
        (Locale::Nl, Msg::NoOtherScores) => "Geen andere scores berekenbaar.",

        (Locale::En, Msg::Justification) => "{name} is relevant because of: {triggers}.",
        (Locale::De, Msg::Justification) => "{name} ist relevant aufgrund von: {triggers}.",
        (Locale::Nl, Msg::Justification) => "{name} is relevant vanwege: {triggers}.",
    }
}

pub fn band_label(locale: Locale, band: Band) -> &'static str {
    match (locale, band) {
        (Locale::En, Band::Low) => "low",
        (Locale::En, Band::Moderate) => "moderate",
        (Locale::En, Band::High) => "high",
        (Locale::De, Band::Low) => "niedrig",
        (Locale::De, Band::Moderate) => "mittel",
        (Locale::De, Band::High) => "hoch",
        (Locale::Nl, Band::Low) => "laag",
        (Locale::Nl, Band::Moderate) => "matig",
        (Locale::Nl, Band::High) => "hoog",
    }
}

/// Human label for a recommender trigger id. Unknown ids fall back to the id.
pub fn trigger_label(locale: Locale, trigger: &str) -> String {
    let label = match (locale, trigger) {
        (Locale::En, "on_anticoagulant") => "on anticoagulant",
        (Locale::De, "on_anticoagulant") => "laufende Antikoagulation",
        (Locale::Nl, "on_anticoagulant") => "gebruik van antistolling",
        (Locale::En, "history_bleeding") => "bleeding history",
        (Locale::De, "history_bleeding") => "Blutung in der Vorgeschichte",
        (Locale::Nl, "history_bleeding") => "voorgeschiedenis van bloeding",
        (Locale::En, "atrial_fibrillation") => "atrial fibrillation",
        (Locale::De, "atrial_fibrillation") => "Vorhofflimmern",
        (Locale::Nl, "atrial_fibrillation") => "atriumfibrilleren",
        (Locale::En, "inr_labile") => "labile INR",
        (Locale::De, "inr_labile") => "labiler INR",
        (Locale::Nl, "inr_labile") => "labiele INR",
        (Locale::En, "suspected_dvt") => "suspected deep vein thrombosis",
        (Locale::De, "suspected_dvt") => "Verdacht auf tiefe Venenthrombose",
        (Locale::Nl, "suspected_dvt") => "verdenking op diepe veneuze trombose",
        (Locale::En, "calf_swelling") => "calf swelling",
        (Locale::De, "calf_swelling") => "Wadenschwellung",
        (Locale::Nl, "calf_swelling") => "kuitzwelling",
        (Locale::En, "entire_leg_swollen") => "entire leg swollen",
        (Locale::De, "entire_leg_swollen") => "Schwellung des ganzen Beins",
        (Locale::Nl, "entire_leg_swollen") => "gehele been gezwollen",
        (Locale::En, "localized_tenderness_deep_veins") => "tenderness along deep veins",
        (Locale::De, "localized_tenderness_deep_veins") => "Druckschmerz entlang der tiefen Venen",
        (Locale::Nl, "localized_tenderness_deep_veins") => "drukpijn langs de diepe venen",
        (Locale::En, "pitting_edema") => "pitting edema",
        (Locale::De, "pitting_edema") => "eindrückbares Ödem",
        (Locale::Nl, "pitting_edema") => "pitting oedeem",
        (Locale::En, "suspected_pe") => "suspected pulmonary embolism",
        (Locale::De, "suspected_pe") => "Verdacht auf Lungenembolie",
        (Locale::Nl, "suspected_pe") => "verdenking op longembolie",
        (Locale::En, "hemoptysis") => "hemoptysis",
        (Locale::De, "hemoptysis") => "Hämoptyse",
        (Locale::Nl, "hemoptysis") => "hemoptoë",
        (Locale::En, "clinical_signs_dvt") => "clinical signs of DVT",
        (Locale::De, "clinical_signs_dvt") => "klinische Zeichen einer TVT",
        (Locale::Nl, "clinical_signs_dvt") => "klinische tekenen van DVT",
        (Locale::En, "dyspnea") => "dyspnea",
        (Locale::De, "dyspnea") => "Dyspnoe",
        (Locale::Nl, "dyspnea") => "dyspneu",
        (Locale::En, "pleuritic_chest_pain") => "pleuritic chest pain",
        (Locale::De, "pleuritic_chest_pain") => "atemabhängige Thoraxschmerzen",
        (Locale::Nl, "pleuritic_chest_pain") => "pleuritische pijn op de borst",
        (Locale::En, "icu_admission") => "ICU admission",
        (Locale::De, "icu_admission") => "Aufnahme auf die Intensivstation",
        (Locale::Nl, "icu_admission") => "opname op de IC",
        (Locale::En, "suspected_sepsis") => "suspected sepsis",
        (Locale::De, "suspected_sepsis") => "Verdacht auf Sepsis",
        (Locale::Nl, "suspected_sepsis") => "verdenking op sepsis",
        (Locale::En, "mechanical_ventilation") => "mechanical ventilation",
        (Locale::De, "mechanical_ventilation") => "maschinelle Beatmung",
        (Locale::Nl, "mechanical_ventilation") => "mechanische beademing",
        (Locale::En, "vasopressor_support") => "vasopressor support",
        (Locale::De, "vasopressor_support") => "Vasopressortherapie",
        (Locale::Nl, "vasopressor_support") => "vasopressieve ondersteuning",
        (Locale::En, "hypotension") => "mean arterial pressure below 70 mmHg",
        (Locale::De, "hypotension") => "arterieller Mitteldruck unter 70 mmHg",
        (Locale::Nl, "hypotension") => "gemiddelde arteriële druk onder 70 mmHg",
        (Locale::En, "history_stroke") => "stroke history",
        (Locale::De, "history_stroke") => "Schlaganfall in der Vorgeschichte",
        (Locale::Nl, "history_stroke") => "voorgeschiedenis van beroerte",
        (Locale::En, "suspected_pneumonia") => "suspected pneumonia",
        (Locale::De, "suspected_pneumonia") => "Verdacht auf Pneumonie",
        (Locale::Nl, "suspected_pneumonia") => "verdenking op pneumonie",
        (Locale::En, "confusion") => "confusion",
        (Locale::De, "confusion") => "Verwirrtheit",
        (Locale::Nl, "confusion") => "verwardheid",
        (Locale::En, "tachypnea") => "respiratory rate of 30 or more",
        (Locale::De, "tachypnea") => "Atemfrequenz von 30 oder mehr",
        (Locale::Nl, "tachypnea") => "ademfrequentie van 30 of meer",
        (Locale::En, "head_injury") => "head injury",
        (Locale::De, "head_injury") => "Kopfverletzung",
        (Locale::Nl, "head_injury") => "hoofdletsel",
        (Locale::En, "altered_consciousness") => "altered consciousness",
        (Locale::De, "altered_consciousness") => "Bewusstseinsstörung",
        (Locale::Nl, "altered_consciousness") => "verminderd bewustzijn",
        (Locale::En, "gcs_recorded") => "GCS findings recorded",
        (Locale::De, "gcs_recorded") => "GCS-Befunde dokumentiert",
        (Locale::Nl, "gcs_recorded") => "GCS-bevindingen vastgelegd",
        _ => return trigger.to_string(),
    };
    label.to_string()
}

/// Substitute `{key}` placeholders.
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{key}}}"), value)
    })
}

/// Whole numbers print without a fraction, half points with one decimal.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_replaces_every_placeholder() {
        let rendered = fill(
            text(Locale::En, Msg::NotComputable),
            &[("name", "GCS"), ("fields", "gcs_verbal")],
        );
        assert_eq!(rendered, "GCS could not be calculated; missing: gcs_verbal.");
    }

    #[test]
    fn format_value_keeps_numbers_locale_neutral() {
        assert_eq!(format_value(2.0), "2");
        assert_eq!(format_value(-2.0), "-2");
        assert_eq!(format_value(4.5), "4.5");
    }

    #[test]
    fn every_locale_has_distinct_wording() {
        let en = text(Locale::En, Msg::NothingComputed);
        let de = text(Locale::De, Msg::NothingComputed);
        let nl = text(Locale::Nl, Msg::NothingComputed);
        assert_ne!(en, de);
        assert_ne!(de, nl);
        assert_eq!(trigger_label(Locale::De, "confusion"), "Verwirrtheit");
        assert_eq!(trigger_label(Locale::En, "custom"), "custom");
    }
}
