use crate::i18n::{self, Msg};
use crate::types::report::Locale;
use crate::types::score::{ScoreResult, ScoreSystemId};
use std::collections::BTreeMap;

/// Compose the templated summary. `included` holds the systems surfaced in
/// the report; `all` holds every calculator outcome so the nothing-computed
/// case can list what each system still needs. Never returns an empty string.
pub fn compose(
    requested: Option<ScoreSystemId>,
    included: &BTreeMap<ScoreSystemId, ScoreResult>,
    all: &BTreeMap<ScoreSystemId, ScoreResult>,
    locale: Locale,
) -> String {
    let mut lines = Vec::new();
    let any_computed = all.values().any(ScoreResult::is_computed);

    if !any_computed {
        lines.push(i18n::text(locale, Msg::NothingComputed).to_string());
        for (id, result) in requested_first(requested, all) {
            lines.push(line(id, result, requested, locale));
        }
    } else {
        for (id, result) in requested_first(requested, included) {
            lines.push(line(id, result, requested, locale));
        }
        if requested.is_some() && included.len() == 1 {
            lines.push(i18n::text(locale, Msg::NoOtherScores).to_string());
        }
    }

    lines.join("\n")
}

fn requested_first(
    requested: Option<ScoreSystemId>,
    results: &BTreeMap<ScoreSystemId, ScoreResult>,
) -> Vec<(ScoreSystemId, &ScoreResult)> {
    let mut ordered: Vec<_> = results.iter().map(|(id, result)| (*id, result)).collect();
    ordered.sort_by_key(|(id, _)| (Some(*id) != requested, *id));
    ordered
}

fn line(
    id: ScoreSystemId,
    result: &ScoreResult,
    requested: Option<ScoreSystemId>,
    locale: Locale,
) -> String {
    let name = if requested == Some(id) {
        format!(
            "{} ({})",
            id.display_name(),
            i18n::text(locale, Msg::Requested)
        )
    } else {
        id.display_name().to_string()
    };

    match result {
        ScoreResult::Computed { value, band, .. } => {
            let value = i18n::format_value(*value);
            match band {
                Some(band) => i18n::fill(
                    i18n::text(locale, Msg::Computed),
                    &[
                        ("name", name.as_str()),
                        ("value", value.as_str()),
                        ("band", i18n::band_label(locale, *band)),
                    ],
                ),
                None => i18n::fill(
                    i18n::text(locale, Msg::ComputedNoBand),
                    &[("name", name.as_str()), ("value", value.as_str())],
                ),
            }
        }
        ScoreResult::NotComputable { missing_fields, .. } => {
            let fields = missing_fields.join(", ");
            i18n::fill(
                i18n::text(locale, Msg::NotComputable),
                &[("name", name.as_str()), ("fields", fields.as_str())],
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::score::Band;

    fn gcs_missing() -> ScoreResult {
        ScoreResult::not_computable(vec!["gcs_verbal".to_string()])
    }

    #[test]
    fn nothing_computed_lists_every_system() {
        let mut all = BTreeMap::new();
        all.insert(ScoreSystemId::Gcs, gcs_missing());
        all.insert(
            ScoreSystemId::Curb65,
            ScoreResult::not_computable(vec!["urea".to_string()]),
        );
        let included: BTreeMap<_, _> = all
            .iter()
            .filter(|(id, _)| **id == ScoreSystemId::Gcs)
            .map(|(id, r)| (*id, r.clone()))
            .collect();

        let summary = compose(Some(ScoreSystemId::Gcs), &included, &all, Locale::En);
        let lines: Vec<_> = summary.lines().collect();
        assert!(lines[0].starts_with("No score could be calculated"));
        assert_eq!(
            lines[1],
            "GCS (requested) could not be calculated; missing: gcs_verbal."
        );
        assert_eq!(lines[2], "CURB-65 could not be calculated; missing: urea.");
    }

    #[test]
    fn computed_line_includes_band() {
        let mut all = BTreeMap::new();
        all.insert(
            ScoreSystemId::HasBled,
            ScoreResult::computed(2.0, vec!["age".to_string()], Some(Band::Moderate)),
        );
        let summary = compose(None, &all, &all, Locale::En);
        assert_eq!(summary, "HAS-BLED: 2 (moderate).");
    }

    #[test]
    fn requested_only_result_notes_no_other_scores() {
        let mut all = BTreeMap::new();
        all.insert(
            ScoreSystemId::Curb65,
            ScoreResult::computed(1.0, vec!["age".to_string()], Some(Band::Low)),
        );
        all.insert(ScoreSystemId::Gcs, gcs_missing());
        let mut included = BTreeMap::new();
        included.insert(ScoreSystemId::Curb65, all[&ScoreSystemId::Curb65].clone());

        let summary = compose(Some(ScoreSystemId::Curb65), &included, &all, Locale::De);
        assert_eq!(
            summary,
            "CURB-65 (angefordert): 1 (niedrig).\nKeine weiteren Scores berechenbar."
        );
    }
}
