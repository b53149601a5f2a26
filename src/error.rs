use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreDocError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown score system: {0}")]
    UnknownScoreSystem(String),

    #[error("unknown locale: {0} (expected en, de or nl)")]
    UnknownLocale(String),

    #[error("internal inconsistency: {system} computed {value}, outside documented range [{min}, {max}]")]
    InternalInconsistency {
        system: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScoreDocError {
    /// Classify a failed read of a findings document. Undecodable text is the
    /// caller's data, anything else is the environment.
    pub fn from_read(error: std::io::Error, source: &str) -> Self {
        if error.kind() == std::io::ErrorKind::InvalidData {
            ScoreDocError::InvalidInput(format!("{source} is not valid UTF-8 text"))
        } else {
            ScoreDocError::Io(error)
        }
    }

    /// Errors caused by the caller's data rather than the runtime environment.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ScoreDocError::InvalidInput(_)
                | ScoreDocError::UnknownScoreSystem(_)
                | ScoreDocError::UnknownLocale(_)
                | ScoreDocError::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ScoreDocError>;
