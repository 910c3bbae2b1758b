/// Error surfaced by the `citypop` binary, carrying the process exit code.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failure of a dataset load.
///
/// Row-level validation failures are not represented here: invalid rows are
/// dropped during ingest and never abort a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The source text could not be fetched or read.
    SourceUnavailable { location: String, reason: String },
    /// The text did not yield a header row.
    Parse(String),
}

impl LoadError {
    pub fn unavailable(location: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::SourceUnavailable {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceUnavailable { location, reason } => {
                write!(f, "Source '{location}' is unavailable: {reason}")
            }
            Self::Parse(message) => write!(f, "Failed to parse city table: {message}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        let exit_code = match err {
            LoadError::SourceUnavailable { .. } => 4,
            LoadError::Parse(_) => 2,
        };
        AppError::new(exit_code, err.to_string())
    }
}
