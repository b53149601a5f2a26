//! Canonical findings fields, their kinds and valid ranges.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Number {
        min: f64,
        max: f64,
        integer: bool,
        unit: &'static str,
    },
    Flag,
    Category(&'static [&'static str]),
    Date,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn number(name: &'static str, min: f64, max: f64, unit: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Number {
            min,
            max,
            integer: false,
            unit,
        },
    }
}

const fn integer(name: &'static str, min: f64, max: f64) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Number {
            min,
            max,
            integer: true,
            unit: "points",
        },
    }
}

const fn flag(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Flag,
    }
}

pub const SEXES: &[&str] = &["female", "male"];

pub const FIELDS: &[FieldSpec] = &[
    // demographics
    number("age", 0.0, 130.0, "years"),
    FieldSpec {
        name: "sex",
        kind: FieldKind::Category(SEXES),
    },
    FieldSpec {
        name: "date_of_birth",
        kind: FieldKind::Date,
    },
    FieldSpec {
        name: "encounter_date",
        kind: FieldKind::Date,
    },
    // vitals
    number("systolic_bp", 0.0, 300.0, "mmHg"),
    number("diastolic_bp", 0.0, 250.0, "mmHg"),
    number("map", 0.0, 250.0, "mmHg"),
    number("heart_rate", 0.0, 300.0, "beats/min"),
    number("respiratory_rate", 0.0, 80.0, "breaths/min"),
    // laboratory
    number("urea", 0.0, 100.0, "mmol/L"),
    number("creatinine", 0.0, 30.0, "mg/dL"),
    number("urine_output", 0.0, 20000.0, "mL/day"),
    number("platelet_count", 0.0, 2000.0, "10^3/uL"),
    number("bilirubin", 0.0, 60.0, "mg/dL"),
    number("inr", 0.5, 20.0, "ratio"),
    number("pao2_fio2_ratio", 0.0, 800.0, "mmHg"),
    number("spo2_fio2_ratio", 0.0, 500.0, "ratio"),
    // vasopressors
    number("dopamine_dose", 0.0, 50.0, "ug/kg/min"),
    number("dobutamine_dose", 0.0, 50.0, "ug/kg/min"),
    number("epinephrine_dose", 0.0, 5.0, "ug/kg/min"),
    number("norepinephrine_dose", 0.0, 5.0, "ug/kg/min"),
    // neurology
    integer("gcs_eye", 1.0, 4.0),
    integer("gcs_verbal", 1.0, 5.0),
    integer("gcs_motor", 1.0, 6.0),
    integer("gcs_total", 3.0, 15.0),
    flag("confusion"),
    flag("altered_consciousness"),
    flag("head_injury"),
    // history and comorbidities
    flag("history_stroke"),
    flag("history_bleeding"),
    flag("on_anticoagulant"),
    flag("renal_impaired"),
    flag("liver_impaired"),
    flag("inr_labile"),
    flag("alcohol_drug_use"),
    flag("antiplatelet_nsaid"),
    flag("uncontrolled_hypertension"),
    flag("hypertension"),
    flag("congestive_heart_failure"),
    flag("diabetes"),
    flag("vascular_disease"),
    flag("atrial_fibrillation"),
    flag("mechanical_ventilation"),
    flag("icu_admission"),
    flag("suspected_sepsis"),
    flag("suspected_pneumonia"),
    // venous thromboembolism
    flag("active_cancer"),
    flag("bedridden_recently"),
    flag("calf_swelling"),
    flag("collateral_superficial_veins"),
    flag("entire_leg_swollen"),
    flag("localized_tenderness_deep_veins"),
    flag("pitting_edema"),
    flag("paralysis_or_recent_cast"),
    flag("previous_dvt"),
    flag("previous_pe"),
    flag("previous_vte"),
    flag("alternative_diagnosis_likely"),
    flag("clinical_signs_dvt"),
    flag("pe_most_likely_diagnosis"),
    flag("immobilization_or_surgery"),
    flag("hemoptysis"),
    flag("suspected_dvt"),
    flag("suspected_pe"),
    flag("dyspnea"),
    flag("pleuritic_chest_pain"),
    FieldSpec {
        name: "dvt_risk_factors",
        kind: FieldKind::List,
    },
];

pub fn lookup(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|spec| spec.name == name)
}
