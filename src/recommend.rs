//! Rule-based tool recommender. Each score system has a fixed set of trigger
//! indicators; systems are ranked by matched triggers, ties broken by the
//! fixed priority order of `ScoreSystemId`.

use crate::i18n::{self, Msg};
use crate::types::findings::Findings;
use crate::types::report::{Locale, RecommendedTool, ToolRecommendation};
use crate::types::score::ScoreSystemId;

#[derive(Debug, Clone, Copy)]
enum Check {
    Flag(&'static str),
    AtLeast(&'static str, f64),
    Below(&'static str, f64),
    AnyPositive(&'static [&'static str]),
    AnyKnown(&'static [&'static str]),
}

impl Check {
    fn matches(self, findings: &Findings) -> bool {
        match self {
            Check::Flag(field) => findings.flag(field) == Some(true),
            Check::AtLeast(field, limit) => findings.number(field).is_some_and(|v| v >= limit),
            Check::Below(field, limit) => findings.number(field).is_some_and(|v| v < limit),
            Check::AnyPositive(fields) => fields
                .iter()
                .any(|field| findings.number(field).is_some_and(|v| v > 0.0)),
            Check::AnyKnown(fields) => fields.iter().any(|field| findings.is_known(field)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Trigger {
    id: &'static str,
    check: Check,
}

const fn flag(id: &'static str) -> Trigger {
    Trigger {
        id,
        check: Check::Flag(id),
    }
}

const VASOPRESSORS: &[&str] = &[
    "dopamine_dose",
    "dobutamine_dose",
    "epinephrine_dose",
    "norepinephrine_dose",
];

const GCS_FIELDS: &[&str] = &["gcs_eye", "gcs_verbal", "gcs_motor", "gcs_total"];

fn triggers(system: ScoreSystemId) -> &'static [Trigger] {
    const HAS_BLED: &[Trigger] = &[
        flag("on_anticoagulant"),
        flag("history_bleeding"),
        flag("atrial_fibrillation"),
        flag("inr_labile"),
    ];
    const WELLS_DVT: &[Trigger] = &[
        flag("suspected_dvt"),
        flag("calf_swelling"),
        flag("entire_leg_swollen"),
        flag("localized_tenderness_deep_veins"),
        flag("pitting_edema"),
    ];
    const WELLS_PE: &[Trigger] = &[
        flag("suspected_pe"),
        flag("hemoptysis"),
        flag("clinical_signs_dvt"),
        flag("dyspnea"),
        flag("pleuritic_chest_pain"),
    ];
    const SOFA: &[Trigger] = &[
        flag("icu_admission"),
        flag("suspected_sepsis"),
        flag("mechanical_ventilation"),
        Trigger {
            id: "vasopressor_support",
            check: Check::AnyPositive(VASOPRESSORS),
        },
        Trigger {
            id: "hypotension",
            check: Check::Below("map", 70.0),
        },
    ];
    const CHA2DS2_VASC: &[Trigger] = &[flag("atrial_fibrillation"), flag("history_stroke")];
    const CURB65: &[Trigger] = &[
        flag("suspected_pneumonia"),
        flag("confusion"),
        Trigger {
            id: "tachypnea",
            check: Check::AtLeast("respiratory_rate", 30.0),
        },
    ];
    const GCS: &[Trigger] = &[
        flag("head_injury"),
        flag("altered_consciousness"),
        flag("confusion"),
        Trigger {
            id: "gcs_recorded",
            check: Check::AnyKnown(GCS_FIELDS),
        },
    ];

    match system {
        ScoreSystemId::HasBled => HAS_BLED,
        ScoreSystemId::WellsDvt => WELLS_DVT,
        ScoreSystemId::WellsPe => WELLS_PE,
        ScoreSystemId::Sofa => SOFA,
        ScoreSystemId::Cha2ds2Vasc => CHA2DS2_VASC,
        ScoreSystemId::Curb65 => CURB65,
        ScoreSystemId::Gcs => GCS,
    }
}

/// Rank the score systems applicable to `findings`. Systems with no matched
/// trigger are left out.
pub fn recommend(findings: &Findings, locale: Locale) -> ToolRecommendation {
    let mut matched: Vec<(ScoreSystemId, Vec<&'static str>)> = ScoreSystemId::ALL
        .iter()
        .map(|system| {
            let ids = triggers(*system)
                .iter()
                .filter(|trigger| trigger.check.matches(findings))
                .map(|trigger| trigger.id)
                .collect::<Vec<_>>();
            (*system, ids)
        })
        .filter(|(_, ids)| !ids.is_empty())
        .collect();

    matched.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then(a.0.cmp(&b.0)));

    let tools = matched
        .into_iter()
        .enumerate()
        .map(|(index, (system, ids))| {
            let labels = ids
                .iter()
                .map(|id| i18n::trigger_label(locale, id))
                .collect::<Vec<_>>()
                .join(", ");
            RecommendedTool {
                rank: index + 1,
                system,
                matched_triggers: ids.iter().map(|id| id.to_string()).collect(),
                justification: i18n::fill(
                    i18n::text(locale, Msg::Justification),
                    &[("name", system.display_name()), ("triggers", labels.as_str())],
                ),
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(count = tools.len(), "ranked applicable score systems");
    ToolRecommendation { tools }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use serde_json::json;

    fn findings(raw: serde_json::Value) -> Findings {
        normalize(&raw).expect("test findings should normalize")
    }

    #[test]
    fn suspected_dvt_recommends_wells_dvt() {
        let rec = recommend(&findings(json!({"suspected_dvt": true})), Locale::En);
        assert_eq!(rec.systems(), vec![ScoreSystemId::WellsDvt]);
        assert_eq!(rec.tools[0].rank, 1);
        assert!(rec.tools[0].justification.contains("suspected deep vein thrombosis"));
    }

    #[test]
    fn more_triggers_rank_higher() {
        let rec = recommend(
            &findings(json!({
                "on_anticoagulant": true,
                "suspected_pneumonia": true,
                "confusion": true,
                "respiratory_rate": 32
            })),
            Locale::En,
        );
        // CURB-65: 3 triggers, GCS: 1 (confusion), HAS-BLED: 1.
        assert_eq!(
            rec.systems(),
            vec![ScoreSystemId::Curb65, ScoreSystemId::HasBled, ScoreSystemId::Gcs]
        );
        let ranks: Vec<_> = rec.tools.iter().map(|tool| tool.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn ties_follow_fixed_priority_order() {
        let rec = recommend(
            &findings(json!({
                "head_injury": true,
                "suspected_pneumonia": true,
                "atrial_fibrillation": true,
                "icu_admission": true,
                "hemoptysis": true,
                "suspected_dvt": true
            })),
            Locale::En,
        );
        assert_eq!(
            rec.systems(),
            vec![
                ScoreSystemId::HasBled,
                ScoreSystemId::WellsDvt,
                ScoreSystemId::WellsPe,
                ScoreSystemId::Sofa,
                ScoreSystemId::Cha2ds2Vasc,
                ScoreSystemId::Curb65,
                ScoreSystemId::Gcs,
            ]
        );
    }

    #[test]
    fn false_and_unknown_values_do_not_trigger() {
        let rec = recommend(
            &findings(json!({"on_anticoagulant": false, "suspected_dvt": null})),
            Locale::En,
        );
        assert!(rec.is_empty());
    }

    #[test]
    fn justification_follows_locale_but_ranking_does_not() {
        let raw = json!({"atrial_fibrillation": true, "history_stroke": true});
        let en = recommend(&findings(raw.clone()), Locale::En);
        let nl = recommend(&findings(raw), Locale::Nl);
        assert_eq!(en.systems(), nl.systems());
        assert!(nl.tools[0].justification.contains("vanwege"));
        assert_ne!(en.tools[0].justification, nl.tools[0].justification);
    }
}
