use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgeError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Bad user input or configuration, fixable by the caller.
    High,
    /// The history file or output could not be handled.
    Critical,
}

impl AgeError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        AgeError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AgeError::InvalidInput { .. } => ErrorCategory::Input,
            AgeError::ConfigError { .. } | AgeError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            AgeError::CsvError(_) | AgeError::IoError(_) | AgeError::SerializationError(_) => {
                ErrorCategory::Storage
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            AgeError::InvalidInput { message } => message.clone(),
            AgeError::ConfigError { message } => format!("Configuration problem: {}", message),
            AgeError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            AgeError::CsvError(_) => "The DOB history file could not be read or written".to_string(),
            AgeError::IoError(e) => format!("File access failed: {}", e),
            AgeError::SerializationError(_) => "Could not produce JSON output".to_string(),
        }
    }

    /// Process exit code for the binary.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Enter the date of birth as YYYY-MM-DD HH:MM:SS, not in the future",
            ErrorCategory::Configuration => "Check the command-line flags and the TOML config file",
            ErrorCategory::Storage => "Check that the history file path is writable and is valid CSV",
        }
    }
}

pub type Result<T> = std::result::Result<T, AgeError>;
