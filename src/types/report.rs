use crate::error::ScoreDocError;
use crate::types::findings::{Findings, Rejection};
use crate::types::score::{ScoreResult, ScoreSystemId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    De,
    Nl,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::De => "de",
            Locale::Nl => "nl",
        }
    }
}

impl FromStr for Locale {
    type Err = ScoreDocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "de" => Ok(Locale::De),
            "nl" => Ok(Locale::Nl),
            other => Err(ScoreDocError::UnknownLocale(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Request {
    pub findings: Findings,
    pub requested_score: Option<ScoreSystemId>,
    pub locale: Locale,
}

impl Request {
    pub fn new(findings: Findings) -> Self {
        Self {
            findings,
            requested_score: None,
            locale: Locale::default(),
        }
    }

    pub fn with_requested(mut self, requested: Option<ScoreSystemId>) -> Self {
        self.requested_score = requested;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedTool {
    pub rank: usize,
    pub system: ScoreSystemId,
    pub matched_triggers: Vec<String>,
    pub justification: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolRecommendation {
    pub tools: Vec<RecommendedTool>,
}

impl ToolRecommendation {
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn systems(&self) -> Vec<ScoreSystemId> {
        self.tools.iter().map(|tool| tool.system).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub requested_score: Option<ScoreSystemId>,
    pub locale: Locale,
    pub scores: BTreeMap<ScoreSystemId, ScoreResult>,
    pub summary: String,
    pub recommendations: ToolRecommendation,
    pub findings_digest: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejected_fields: Vec<Rejection>,
}

impl ScoreReport {
    pub fn computed_count(&self) -> usize {
        self.scores.values().filter(|result| result.is_computed()).count()
    }

    /// True when the requested score was computed or, without a request, when
    /// at least one score was.
    pub fn is_complete(&self) -> bool {
        match self.requested_score {
            Some(id) => self.scores.get(&id).is_some_and(ScoreResult::is_computed),
            None => self.computed_count() > 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_parses_case_insensitively() {
        assert_eq!("DE".parse::<Locale>().ok(), Some(Locale::De));
        assert_eq!(" nl ".parse::<Locale>().ok(), Some(Locale::Nl));
        assert!("fr".parse::<Locale>().is_err());
        assert_eq!(Locale::default(), Locale::En);
    }
}
