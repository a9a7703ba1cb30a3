use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Input data is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("Invalid record on row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("Invalid payload range [{min}, {max}]: {reason}")]
    InvalidRange { min: f64, max: f64, reason: String },

    #[error("Chart rendering failed: {message}")]
    RenderError { message: String },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Bad user input on a running dashboard; the caller can retry.
    Low,
    /// Configuration is unusable.
    Medium,
    /// Input data could not be loaded.
    High,
    /// Runtime failure (I/O, rendering, server).
    Critical,
}

impl DashError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::RenderError {
            message: message.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidRange { .. } => ErrorSeverity::Low,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorSeverity::Medium
            }
            Self::CsvError(_) | Self::MissingColumn { .. } | Self::InvalidRecord { .. } => {
                ErrorSeverity::High
            }
            Self::ZipError(_)
            | Self::IoError(_)
            | Self::SerializationError(_)
            | Self::RenderError { .. }
            | Self::ServerError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                format!("Launch data file not found: {}", e)
            }
            Self::MissingColumn { column } => {
                format!("The launch data file has no '{}' column", column)
            }
            Self::InvalidRecord { row, reason } => {
                format!("Launch data row {} is not usable: {}", row, reason)
            }
            Self::InvalidRange { min, max, .. } => {
                format!("Payload range {} - {} kg is not valid", min, max)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                "Check the --data path or the [data] path entry in the config file"
            }
            Self::MissingColumn { .. } => {
                "The file needs the columns 'Launch Site', 'Payload Mass (kg)', 'Booster Version Category' and 'class'"
            }
            Self::InvalidRecord { .. } | Self::CsvError(_) => {
                "Fix the offending row in the launch data file and restart"
            }
            Self::InvalidRange { .. } => "Pick a minimum payload that is not above the maximum",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags"
            }
            Self::ServerError { .. } => "Make sure the bind address is free and reachable",
            _ => "Re-run with -v for more detail",
        }
    }
}

pub type Result<T> = std::result::Result<T, DashError>;
