//! Domain error types.

/// Top-level error type for pairview.
#[derive(Debug, thiserror::Error)]
pub enum PairviewError {
    #[error("no data for ticker {ticker}")]
    DataNotFound { ticker: String },

    #[error("invalid selection: {reason}")]
    InvalidSelection { reason: String },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PairviewError {
    pub fn invalid_selection(reason: impl Into<String>) -> Self {
        PairviewError::InvalidSelection {
            reason: reason.into(),
        }
    }
}

impl From<&PairviewError> for std::process::ExitCode {
    fn from(err: &PairviewError) -> Self {
        let code: u8 = match err {
            PairviewError::Io(_) => 1,
            PairviewError::ConfigParse { .. }
            | PairviewError::ConfigMissing { .. }
            | PairviewError::ConfigInvalid { .. } => 2,
            PairviewError::DataSource { .. } => 3,
            PairviewError::InvalidSelection { .. } => 4,
            PairviewError::DataNotFound { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
