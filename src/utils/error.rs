use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShelfError {
    #[error("IO error while {operation} '{}': {source}", .path.display())]
    IoError {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Source directory does not exist: {}", .path.display())]
    SourceMissing { path: PathBuf },

    #[error("Failed to move '{}' to '{}': {source}", .from.display(), .to.display())]
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("{} job(s) failed: {}", .failed.len(), .failed.join(", "))]
    PlanFailed { failed: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    FileSystem,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 依嚴重程度對應的行程結束碼
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ShelfError {
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ShelfError::IoError {
            operation,
            path: path.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ShelfError::IoError { .. }
            | ShelfError::SourceMissing { .. }
            | ShelfError::MoveFailed { .. }
            | ShelfError::PlanFailed { .. } => ErrorCategory::FileSystem,
            ShelfError::ConfigValidationError { .. }
            | ShelfError::InvalidConfigValueError { .. }
            | ShelfError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ShelfError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        // 來源目錄不存在視同使用者輸入錯誤，結束碼 1
        if let ShelfError::SourceMissing { .. } = self {
            return ErrorSeverity::High;
        }

        match self.category() {
            // 設定錯誤: 使用者修正參數後即可重跑
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::FileSystem => ErrorSeverity::Medium,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ShelfError::IoError { path, .. } => format!(
                "Check that '{}' exists and that you have permission to access it",
                path.display()
            ),
            ShelfError::SourceMissing { .. } => {
                "Create the source directory, fix the path, or allow skipping a missing source"
                    .to_string()
            }
            ShelfError::MoveFailed { to, .. } => format!(
                "Check write permission and free space for '{}'; files moved before the failure stay moved",
                to.display()
            ),
            ShelfError::SerializationError(_) => "Re-run with --verbose and report the issue".to_string(),
            ShelfError::ConfigValidationError { field, .. }
            | ShelfError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' and try again", field)
            }
            ShelfError::MissingConfigError { field } => format!("Provide a value for '{}'", field),
            ShelfError::PlanFailed { .. } => {
                "Inspect the log output above for the failing jobs".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::FileSystem => format!("File operation failed: {}", self),
            ErrorCategory::Internal => format!("Internal error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShelfError>;
