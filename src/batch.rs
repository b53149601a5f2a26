use crate::engine::Engine;
use crate::error::{Result, ScoreDocError};
use crate::normalize::Normalizer;
use crate::types::report::{Locale, Request, ScoreReport};
use crate::types::score::ScoreSystemId;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Serialize)]
pub struct BatchEntry {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ScoreReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct BatchOutcome {
    pub entries: Vec<BatchEntry>,
}

impl BatchOutcome {
    pub fn evaluated(&self) -> usize {
        self.entries.iter().filter(|e| e.report.is_some()).count()
    }

    pub fn skipped(&self) -> usize {
        self.entries.iter().filter(|e| e.error.is_some()).count()
    }

    pub fn complete(&self) -> usize {
        self.entries
            .iter()
            .filter_map(|e| e.report.as_ref())
            .filter(|report| report.is_complete())
            .count()
    }
}

/// Every `*.json` file under `root`, sorted by path.
pub fn discover(root: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    paths
}

/// Evaluate every findings file under `root`. Files with malformed findings
/// are recorded and skipped; runtime failures abort the batch.
pub fn run(
    root: &Path,
    engine: &Engine,
    normalizer: &Normalizer,
    requested: Option<ScoreSystemId>,
    locale: Locale,
) -> Result<BatchOutcome> {
    if !root.is_dir() {
        return Err(ScoreDocError::PathNotFound(root.display().to_string()));
    }

    let mut outcome = BatchOutcome::default();
    for path in discover(root) {
        match evaluate_file(&path, engine, normalizer, requested, locale) {
            Ok(report) => outcome.entries.push(BatchEntry {
                path,
                report: Some(report),
                error: None,
            }),
            Err(e) if e.is_invalid_input() => {
                tracing::warn!(path = %path.display(), error = %e, "skipping findings file");
                outcome.entries.push(BatchEntry {
                    path,
                    report: None,
                    error: Some(e.to_string()),
                });
            }
            Err(e) => return Err(e),
        }
    }
    Ok(outcome)
}

fn evaluate_file(
    path: &Path,
    engine: &Engine,
    normalizer: &Normalizer,
    requested: Option<ScoreSystemId>,
    locale: Locale,
) -> Result<ScoreReport> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ScoreDocError::from_read(e, &path.display().to_string()))?;
    let raw: serde_json::Value = serde_json::from_str(&content)?;
    let findings = normalizer.normalize(&raw)?;
    let request = Request::new(findings)
        .with_requested(requested)
        .with_locale(locale);
    engine.evaluate(&request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn discover_finds_nested_json_files_in_order() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::create_dir_all(dir.path().join("ward/b")).expect("nested dir should create");
        fs::write(dir.path().join("ward/b/z.json"), "{}").expect("file should write");
        fs::write(dir.path().join("a.json"), "{}").expect("file should write");
        fs::write(dir.path().join("notes.txt"), "x").expect("file should write");

        let found = discover(dir.path());
        assert_eq!(
            found,
            vec![dir.path().join("a.json"), dir.path().join("ward/b/z.json")]
        );
    }

    #[test]
    fn run_skips_malformed_files_and_counts_complete_reports() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(
            dir.path().join("gcs.json"),
            r#"{"gcs_eye": 4, "gcs_verbal": 5, "gcs_motor": 6}"#,
        )
        .expect("file should write");
        fs::write(dir.path().join("list.json"), "[1, 2]").expect("file should write");
        fs::write(dir.path().join("broken.json"), "{").expect("file should write");

        let outcome = run(
            dir.path(),
            &Engine::default(),
            &Normalizer::default(),
            Some(ScoreSystemId::Gcs),
            Locale::En,
        )
        .expect("batch should run");

        assert_eq!(outcome.entries.len(), 3);
        assert_eq!(outcome.evaluated(), 1);
        assert_eq!(outcome.skipped(), 2);
        assert_eq!(outcome.complete(), 1);
    }

    #[test]
    fn run_skips_files_that_are_not_utf8() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(
            dir.path().join("a.json"),
            r#"{"gcs_eye": 4, "gcs_verbal": 5, "gcs_motor": 6}"#,
        )
        .expect("file should write");
        fs::write(dir.path().join("b.json"), [0xff, 0xfe, b'{', b'}'])
            .expect("file should write");

        let outcome = run(
            dir.path(),
            &Engine::default(),
            &Normalizer::default(),
            None,
            Locale::En,
        )
        .expect("undecodable file should not abort the batch");

        assert_eq!(outcome.evaluated(), 1);
        assert_eq!(outcome.skipped(), 1);
        let skipped = outcome
            .entries
            .iter()
            .find(|entry| entry.error.is_some())
            .expect("one entry should be skipped");
        assert_eq!(skipped.path, dir.path().join("b.json"));
    }

    #[test]
    fn run_rejects_missing_directory() {
        let dir = TempDir::new().expect("temp dir should be created");
        let missing = dir.path().join("nope");
        let err = run(
            &missing,
            &Engine::default(),
            &Normalizer::default(),
            None,
            Locale::En,
        )
        .expect_err("missing directory should fail");
        assert!(matches!(err, ScoreDocError::PathNotFound(_)));
    }
}
