use crate::error::ScoreDocError;
use crate::normalize::aliases::clean_key;
use crate::normalize::catalog;
use crate::types::report::Locale;
use crate::types::score::{parse_requested, ScoreSystemId};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreDocConfig {
    pub defaults: Option<DefaultsConfig>,
    pub engine: Option<EngineConfig>,
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefaultsConfig {
    pub locale: Option<String>,
    pub score: Option<String>,
    pub format: Option<OutputFormatSetting>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormatSetting {
    Md,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    pub workers: Option<usize>,
}

impl ScoreDocConfig {
    pub fn locale(&self) -> Result<Locale, ScoreDocError> {
        match self.defaults.as_ref().and_then(|d| d.locale.as_deref()) {
            Some(locale) => locale.parse(),
            None => Ok(Locale::default()),
        }
    }

    pub fn requested_score(&self) -> Result<Option<ScoreSystemId>, ScoreDocError> {
        match self.defaults.as_ref().and_then(|d| d.score.as_deref()) {
            Some(score) => parse_requested(score),
            None => Ok(None),
        }
    }

    pub fn format(&self) -> OutputFormatSetting {
        self.defaults
            .as_ref()
            .and_then(|d| d.format)
            .unwrap_or(OutputFormatSetting::Md)
    }

    pub fn workers(&self) -> Option<usize> {
        self.engine.as_ref().and_then(|engine| engine.workers)
    }

    pub fn validate(&self) -> Result<(), ScoreDocError> {
        self.locale()
            .map_err(|e| ScoreDocError::ConfigParse(format!("defaults.locale: {e}")))?;
        self.requested_score()
            .map_err(|e| ScoreDocError::ConfigParse(format!("defaults.score: {e}")))?;

        if self.workers() == Some(0) {
            return Err(ScoreDocError::ConfigParse(
                "engine.workers must be at least 1".to_string(),
            ));
        }

        // Keys are compared the way the normalizer resolves them.
        for (alias, target) in &self.aliases {
            if catalog::lookup(&clean_key(alias)).is_some() {
                return Err(ScoreDocError::ConfigParse(format!(
                    "alias '{alias}' shadows a canonical field"
                )));
            }
            if catalog::lookup(&clean_key(target)).is_none() {
                return Err(ScoreDocError::ConfigParse(format!(
                    "alias '{alias}' points at unknown field '{target}'"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config_uses_defaults() {
        let cfg: ScoreDocConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(cfg.locale().expect("default locale"), Locale::En);
        assert_eq!(cfg.requested_score().expect("default score"), None);
        assert_eq!(cfg.format(), OutputFormatSetting::Md);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[defaults]
locale = "nl"
score = "CURB-65"
format = "json"

[engine]
workers = 2

[aliases]
"sys_bp" = "systolic_bp"
"#;
        let cfg: ScoreDocConfig = toml::from_str(toml_str).expect("full config should parse");
        assert_eq!(cfg.locale().expect("locale should parse"), Locale::Nl);
        assert_eq!(
            cfg.requested_score().expect("score should parse"),
            Some(ScoreSystemId::Curb65)
        );
        assert_eq!(cfg.format(), OutputFormatSetting::Json);
        assert_eq!(cfg.workers(), Some(2));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_unknown_locale() {
        let cfg: ScoreDocConfig =
            toml::from_str("[defaults]\nlocale = \"fr\"\n").expect("config should parse");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_workers() {
        let cfg: ScoreDocConfig =
            toml::from_str("[engine]\nworkers = 0\n").expect("config should parse");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_alias_to_unknown_field() {
        let cfg: ScoreDocConfig =
            toml::from_str("[aliases]\n\"foo\" = \"not_a_field\"\n").expect("config should parse");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_alias_shadowing_canonical_field() {
        let cfg: ScoreDocConfig =
            toml::from_str("[aliases]\n\"age\" = \"urea\"\n").expect("config should parse");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_compares_aliases_after_key_cleaning() {
        let shadowing: ScoreDocConfig =
            toml::from_str("[aliases]\n\"AGE\" = \"urea\"\n").expect("config should parse");
        assert!(shadowing.validate().is_err());

        let spaced_target: ScoreDocConfig =
            toml::from_str("[aliases]\n\"x\" = \"Systolic BP\"\n").expect("config should parse");
        assert!(spaced_target.validate().is_ok());
    }
}
