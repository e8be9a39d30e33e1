use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    /// The engine was built without a usable run mode. Fatal.
    #[error("invalid configuration: no run mode matched")]
    NoRunMode,

    #[error("unknown {kind} '{name}'")]
    Unknown { kind: &'static str, name: String },
}

/// Errors loading an event feed or replay file.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("failed to read feed {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse feed {path}: {reason}")]
    Parse { path: String, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A collaborator failed while handling a request or driving the run loop.
    #[error("{collaborator} error: {reason}")]
    Collaborator {
        collaborator: &'static str,
        reason: String,
    },
}

impl Error {
    /// Build a collaborator failure.
    pub fn collaborator(collaborator: &'static str, reason: impl Into<String>) -> Self {
        Self::Collaborator {
            collaborator,
            reason: reason.into(),
        }
    }

    /// Process exit status for this error category.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Feed(_) | Self::Csv(_) => 3,
            Self::Collaborator { .. } => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<&Error> for std::process::ExitCode {
    fn from(err: &Error) -> Self {
        std::process::ExitCode::from(err.exit_code())
    }
}
