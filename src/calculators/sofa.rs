//! Sequential Organ Failure Assessment.
//!
//! Six organ systems, each scored 0–4 and summed (0–24). The total is
//! all-or-nothing: if any organ sub-score cannot be computed the whole SOFA
//! is `NotComputable`, although every sub-score is still reported as a
//! component.

use crate::calculators::{has_value, Calculator};
use crate::types::findings::Findings;
use crate::types::score::{ScoreResult, ScoreSystemId, SubScore};

pub struct Sofa;

const REQUIRED: &[&str] = &[
    "bilirubin",
    "creatinine",
    "gcs_total",
    "map",
    "pao2_fio2_ratio",
    "platelet_count",
];

const OPTIONAL: &[&str] = &[
    "dobutamine_dose",
    "dopamine_dose",
    "epinephrine_dose",
    "gcs_eye",
    "gcs_motor",
    "gcs_verbal",
    "mechanical_ventilation",
    "norepinephrine_dose",
    "spo2_fio2_ratio",
    "urine_output",
];

/// Outcome of one organ system.
#[derive(Debug, Clone, PartialEq)]
enum Organ {
    Scored { points: f64, fields: Vec<String> },
    Missing(Vec<String>),
}

impl Organ {
    fn scored(points: f64, fields: &[&str]) -> Self {
        Organ::Scored {
            points,
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    fn missing(fields: &[&str]) -> Self {
        Organ::Missing(fields.iter().map(|f| f.to_string()).collect())
    }
}

impl Calculator for Sofa {
    fn id(&self) -> ScoreSystemId {
        ScoreSystemId::Sofa
    }

    fn required_fields(&self) -> &'static [&'static str] {
        REQUIRED
    }

    fn optional_fields(&self) -> &'static [&'static str] {
        OPTIONAL
    }

    fn compute(&self, findings: &Findings) -> ScoreResult {
        let organs = [
            ("respiratory", respiratory(findings)),
            ("coagulation", coagulation(findings)),
            ("liver", liver(findings)),
            ("cardiovascular", cardiovascular(findings)),
            ("cns", cns(findings)),
            ("renal", renal(findings)),
        ];

        let mut total = 0.0;
        let mut contributing = Vec::new();
        let mut missing = Vec::new();
        let mut components = Vec::with_capacity(organs.len());

        for (name, organ) in organs {
            match organ {
                Organ::Scored { points, fields } => {
                    total += points;
                    if points > 0.0 {
                        contributing.extend(fields);
                    }
                    components.push(SubScore::computed(name, points));
                }
                Organ::Missing(fields) => {
                    missing.extend(fields.iter().cloned());
                    components.push(SubScore::missing(name, fields));
                }
            }
        }

        let result = if missing.is_empty() {
            ScoreResult::computed(total, contributing, None)
        } else {
            ScoreResult::not_computable(missing)
        };
        result.with_components(components)
    }
}

fn respiratory(findings: &Findings) -> Organ {
    let (points, ratio_field) = if let Some(pf) = findings.number("pao2_fio2_ratio") {
        let points = match pf {
            pf if pf >= 400.0 => 0.0,
            pf if pf >= 300.0 => 1.0,
            pf if pf >= 200.0 => 2.0,
            pf if pf >= 100.0 => 3.0,
            _ => 4.0,
        };
        (points, "pao2_fio2_ratio")
    } else if let Some(sf) = findings.number("spo2_fio2_ratio") {
        let points = match sf {
            sf if sf > 400.0 => 0.0,
            sf if sf > 315.0 => 1.0,
            sf if sf > 235.0 => 2.0,
            sf if sf > 150.0 => 3.0,
            _ => 4.0,
        };
        (points, "spo2_fio2_ratio")
    } else {
        return Organ::missing(&["pao2_fio2_ratio"]);
    };

    if points < 3.0 {
        return Organ::scored(points, &[ratio_field]);
    }
    // Levels 3 and 4 require respiratory support.
    match findings.flag("mechanical_ventilation") {
        Some(true) => Organ::scored(points, &[ratio_field, "mechanical_ventilation"]),
        Some(false) => Organ::scored(2.0, &[ratio_field]),
        None => Organ::missing(&["mechanical_ventilation"]),
    }
}

fn coagulation(findings: &Findings) -> Organ {
    let Some(platelets) = findings.number("platelet_count") else {
        return Organ::missing(&["platelet_count"]);
    };
    let points = match platelets {
        p if p >= 150.0 => 0.0,
        p if p >= 100.0 => 1.0,
        p if p >= 50.0 => 2.0,
        p if p >= 20.0 => 3.0,
        _ => 4.0,
    };
    Organ::scored(points, &["platelet_count"])
}

fn liver(findings: &Findings) -> Organ {
    let Some(bilirubin) = findings.number("bilirubin") else {
        return Organ::missing(&["bilirubin"]);
    };
    let points = match bilirubin {
        b if b < 1.2 => 0.0,
        b if b < 2.0 => 1.0,
        b if b < 6.0 => 2.0,
        b if b < 12.0 => 3.0,
        _ => 4.0,
    };
    Organ::scored(points, &["bilirubin"])
}

fn cardiovascular(findings: &Findings) -> Organ {
    let dose = |field: &str| findings.number(field).filter(|d| *d > 0.0);
    let dopamine = dose("dopamine_dose");
    let dobutamine = dose("dobutamine_dose");
    let epinephrine = dose("epinephrine_dose");
    let norepinephrine = dose("norepinephrine_dose");

    let mut used = Vec::new();
    if dopamine.is_some() {
        used.push("dopamine_dose");
    }
    if dobutamine.is_some() {
        used.push("dobutamine_dose");
    }
    if epinephrine.is_some() {
        used.push("epinephrine_dose");
    }
    if norepinephrine.is_some() {
        used.push("norepinephrine_dose");
    }

    let above = |dose: Option<f64>, limit: f64| dose.is_some_and(|d| d > limit);
    if above(dopamine, 15.0) || above(epinephrine, 0.1) || above(norepinephrine, 0.1) {
        return Organ::scored(4.0, &used);
    }
    if above(dopamine, 5.0) || epinephrine.is_some() || norepinephrine.is_some() {
        return Organ::scored(3.0, &used);
    }
    if dopamine.is_some() || dobutamine.is_some() {
        return Organ::scored(2.0, &used);
    }

    match findings.number("map") {
        Some(map) if map < 70.0 => Organ::scored(1.0, &["map"]),
        Some(_) => Organ::scored(0.0, &["map"]),
        None => Organ::missing(&["map"]),
    }
}

fn cns(findings: &Findings) -> Organ {
    const COMPONENTS: [&str; 3] = ["gcs_eye", "gcs_motor", "gcs_verbal"];

    let (gcs, fields): (f64, Vec<&str>) = if let Some(total) = findings.number("gcs_total") {
        (total, vec!["gcs_total"])
    } else {
        let known: Vec<_> = COMPONENTS
            .iter()
            .copied()
            .filter(|field| has_value(findings, field))
            .collect();
        if known.is_empty() {
            return Organ::missing(&["gcs_total"]);
        }
        if known.len() < COMPONENTS.len() {
            let missing: Vec<_> = COMPONENTS
                .iter()
                .copied()
                .filter(|field| !has_value(findings, field))
                .collect();
            return Organ::missing(&missing);
        }
        let sum = COMPONENTS
            .iter()
            .filter_map(|field| findings.number(field))
            .sum();
        (sum, COMPONENTS.to_vec())
    };

    let points = match gcs {
        g if g >= 15.0 => 0.0,
        g if g >= 13.0 => 1.0,
        g if g >= 10.0 => 2.0,
        g if g >= 6.0 => 3.0,
        _ => 4.0,
    };
    Organ::scored(points, &fields)
}

fn renal(findings: &Findings) -> Organ {
    let creatinine = findings.number("creatinine").map(|cr| {
        let points = match cr {
            cr if cr < 1.2 => 0.0,
            cr if cr < 2.0 => 1.0,
            cr if cr < 3.5 => 2.0,
            cr if cr < 5.0 => 3.0,
            _ => 4.0,
        };
        (points, "creatinine")
    });
    let urine = findings.number("urine_output").map(|uo| {
        let points = match uo {
            uo if uo < 200.0 => 4.0,
            uo if uo < 500.0 => 3.0,
            _ => 0.0,
        };
        (points, "urine_output")
    });

    match (creatinine, urine) {
        (None, None) => Organ::missing(&["creatinine"]),
        (Some((points, field)), None) | (None, Some((points, field))) => {
            Organ::scored(points, &[field])
        }
        (Some(cr), Some(uo)) => {
            let (points, field) = if uo.0 > cr.0 { uo } else { cr };
            Organ::scored(points, &[field])
        }
    }
}
