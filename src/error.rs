//! Error types for the personote library
//!
//! Errors are split into two groups: failures local to one item of a batch
//! (a single document or a single contact), which callers record and skip,
//! and failures that make the whole operation meaningless, which abort before
//! any work starts.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum PersonoteError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing or serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Directory traversal errors
    #[error("Directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Regular expression compilation errors
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Document, template or contacts file is missing
    #[error("Not found: {path}")]
    NotFound { path: String },

    /// A document already exists at the target path
    #[error("Already exists: {path}")]
    AlreadyExists { path: String },

    /// The metadata block could not be decoded as a mapping
    #[error("Malformed front matter in {path}: {reason}")]
    MalformedFrontmatter { path: String, reason: String },

    /// A required setting has no value
    #[error("{setting} is not set")]
    NotConfigured { setting: String },

    /// A batch edit was requested without any selected document
    #[error("No documents selected")]
    EmptySelection,

    /// The edit operation itself is unusable
    #[error("Invalid operation: {reason}")]
    InvalidOperation { reason: String },

    /// A document path escapes the vault root
    #[error("Path is outside the vault: {path}")]
    PathOutsideVault { path: PathBuf },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PersonoteError>;

impl PersonoteError {
    /// Create a new not found error
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a new already exists error
    pub fn already_exists(path: impl Into<String>) -> Self {
        Self::AlreadyExists { path: path.into() }
    }

    /// Create a new malformed front matter error
    pub fn malformed_frontmatter(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedFrontmatter {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new not configured error
    pub fn not_configured(setting: impl Into<String>) -> Self {
        Self::NotConfigured {
            setting: setting.into(),
        }
    }

    /// Create a new invalid operation error
    pub fn invalid_operation(reason: impl Into<String>) -> Self {
        Self::InvalidOperation {
            reason: reason.into(),
        }
    }

    /// Create a new path outside vault error
    pub fn path_outside_vault(path: impl Into<PathBuf>) -> Self {
        Self::PathOutsideVault { path: path.into() }
    }

    /// Whether this error stays contained to a single batch item.
    ///
    /// Item-local errors are recorded and the batch moves on; everything else
    /// aborts the whole operation.
    pub fn is_item_local(&self) -> bool {
        match self {
            Self::Io(_)
            | Self::NotFound { .. }
            | Self::AlreadyExists { .. }
            | Self::MalformedFrontmatter { .. }
            | Self::PathOutsideVault { .. }
            | Self::Yaml(_)
            | Self::Json(_) => true,
            Self::NotConfigured { .. }
            | Self::EmptySelection
            | Self::InvalidOperation { .. }
            | Self::Walk(_)
            | Self::Regex(_) => false,
        }
    }
}
