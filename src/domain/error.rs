//! Domain error types.
//!
//! Undefined indicator values (short history, division by zero) are not
//! errors; they surface as `None` in the indicator rows.

/// Top-level error type for signalbench.
#[derive(Debug, thiserror::Error)]
pub enum SignalbenchError {
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

    #[error("unsupported strategy '{name}' (expected one of: sma, ema, macd)")]
    UnsupportedStrategy { name: String },

    #[error("invalid parameterization {params}: {reason}")]
    InvalidParameterization { params: String, reason: String },

    #[error("no buy or sell signals in series")]
    EmptySignalSet,

    #[error("no price data for {ticker} ({interval})")]
    NoData { ticker: String, interval: String },

    #[error("invalid price series at row {row}: {reason}")]
    InvalidSeries { row: usize, reason: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SignalbenchError {
    /// Process exit status for this error family.
    pub fn exit_status(&self) -> u8 {
        match self {
            SignalbenchError::Io(_) => 1,
            SignalbenchError::ConfigParse { .. }
            | SignalbenchError::ConfigMissing { .. }
            | SignalbenchError::ConfigInvalid { .. } => 2,
            SignalbenchError::Data { .. } | SignalbenchError::InvalidSeries { .. } => 3,
            SignalbenchError::UnsupportedStrategy { .. }
            | SignalbenchError::InvalidParameterization { .. } => 4,
            SignalbenchError::NoData { .. } | SignalbenchError::EmptySignalSet => 5,
        }
    }
}

impl From<&SignalbenchError> for std::process::ExitCode {
    fn from(err: &SignalbenchError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
