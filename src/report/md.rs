use crate::i18n;
use crate::types::report::{ScoreReport, ToolRecommendation};
use crate::types::score::ScoreResult;

pub fn to_markdown(report: &ScoreReport) -> String {
    let mut output = String::new();
    output.push_str("# Score Report\n\n");
    if let Some(requested) = report.requested_score {
        output.push_str(&format!("Requested score: {}\n\n", requested.display_name()));
    }

    output.push_str("## Scores\n\n");
    if report.scores.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for (id, result) in &report.scores {
            match result {
                ScoreResult::Computed {
                    value,
                    band,
                    contributing_fields,
                    ..
                } => {
                    let band = band
                        .map(|band| format!(" ({})", i18n::band_label(report.locale, band)))
                        .unwrap_or_default();
                    output.push_str(&format!(
                        "- {}: {}{}\n",
                        id.display_name(),
                        i18n::format_value(*value),
                        band
                    ));
                    if !contributing_fields.is_empty() {
                        output.push_str(&format!(
                            "  - contributing: {}\n",
                            contributing_fields.join(", ")
                        ));
                    }
                }
                ScoreResult::NotComputable { missing_fields, .. } => {
                    output.push_str(&format!(
                        "- {}: not computable (missing: {})\n",
                        id.display_name(),
                        missing_fields.join(", ")
                    ));
                }
            }
            for component in result.components() {
                let value = component
                    .value
                    .map(i18n::format_value)
                    .unwrap_or_else(|| "n/a".to_string());
                output.push_str(&format!("  - {}: {}\n", component.name, value));
            }
        }
        output.push('\n');
    }

    output.push_str("## Summary\n\n");
    output.push_str(&report.summary);
    output.push_str("\n\n");

    output.push_str("## Recommended Tools\n\n");
    push_tools(&mut output, &report.recommendations);

    if !report.rejected_fields.is_empty() {
        output.push_str("\n## Rejected Fields\n\n");
        for rejection in &report.rejected_fields {
            output.push_str(&format!("- {}: {}\n", rejection.field, rejection.reason));
        }
    }

    output.push_str(&format!("\nFindings digest: {}\n", report.findings_digest));
    output
}

pub fn recommendation_to_markdown(recommendation: &ToolRecommendation) -> String {
    let mut output = String::from("# Recommended Tools\n\n");
    push_tools(&mut output, recommendation);
    output
}

fn push_tools(output: &mut String, recommendation: &ToolRecommendation) {
    if recommendation.is_empty() {
        output.push_str("- none\n");
        return;
    }
    for tool in &recommendation.tools {
        output.push_str(&format!(
            "{}. {}: {}\n",
            tool.rank,
            tool.system.display_name(),
            tool.justification
        ));
    }
}
