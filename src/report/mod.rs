pub mod json;
pub mod md;
pub mod summary;

use crate::error::{Result, ScoreDocError};
use crate::types::report::{Request, ScoreReport, ToolRecommendation};
use crate::types::score::{ScoreResult, ScoreSystemId};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(report: &ScoreReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(ScoreDocError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}

/// Merge calculator outcomes and the recommendation into one report.
///
/// Without a requested score every outcome is surfaced. With one, the
/// requested system is always surfaced and any other system only when it was
/// computed. Computed values outside their documented range are a defect and
/// fail the whole build.
pub fn build_report(
    request: &Request,
    results: BTreeMap<ScoreSystemId, ScoreResult>,
    recommendation: ToolRecommendation,
) -> Result<ScoreReport> {
    for (id, result) in &results {
        check_range(*id, result)?;
    }

    let scores: BTreeMap<ScoreSystemId, ScoreResult> = results
        .iter()
        .filter(|(id, result)| match request.requested_score {
            None => true,
            Some(requested) => **id == requested || result.is_computed(),
        })
        .map(|(id, result)| (*id, result.clone()))
        .collect();

    let summary = summary::compose(request.requested_score, &scores, &results, request.locale);

    Ok(ScoreReport {
        requested_score: request.requested_score,
        locale: request.locale,
        scores,
        summary,
        recommendations: recommendation,
        findings_digest: findings_digest(request)?,
        rejected_fields: request.findings.rejections().to_vec(),
    })
}

fn check_range(id: ScoreSystemId, result: &ScoreResult) -> Result<()> {
    let Some(value) = result.value() else {
        return Ok(());
    };
    let (min, max) = id.range();
    if value.is_finite() && (min..=max).contains(&value) {
        return Ok(());
    }
    tracing::error!(system = %id, value, min, max, "computed score outside documented range");
    Err(ScoreDocError::InternalInconsistency {
        system: id.display_name().to_string(),
        value,
        min,
        max,
    })
}

/// SHA-256 over the canonical JSON of the normalized findings.
fn findings_digest(request: &Request) -> Result<String> {
    let canonical = serde_json::to_vec(&request.findings)?;
    let digest = Sha256::digest(&canonical);
    Ok(digest.iter().map(|byte| format!("{byte:02x}")).collect())
}
