//! Error handling for Markpress conversions
//!
//! This module provides a unified error type and result type for all
//! conversion operations. Degradable failures (asset misses, theme load
//! failures) never surface here; they fall back inside the pipeline.

use std::fmt;

/// Conversion error type
#[derive(Debug, Clone)]
pub enum ConvertError {
    /// The renderer collaborator failed; the cause is opaque to the core
    RenderError { message: String },
    /// Invalid input
    InvalidInput { message: String },
    /// IO error (for file operations)
    IoError { message: String },
    /// Internal error
    InternalError { message: String },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::RenderError { message } => {
                write!(f, "Render error: {}", message)
            }
            ConvertError::InvalidInput { message } => {
                write!(f, "Invalid input: {}", message)
            }
            ConvertError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
            ConvertError::InternalError { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConvertError {}

impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        ConvertError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Conversion warnings (non-fatal issues)
#[derive(Debug, Clone)]
pub struct ConvertWarning {
    pub message: String,
    pub context: Option<String>,
}

impl fmt::Display for ConvertWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Warning: {}", self.message)?;
        if let Some(ref ctx) = self.context {
            write!(f, " ({})", ctx)?;
        }
        Ok(())
    }
}

impl ConvertWarning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

// Convenience constructors for errors
impl ConvertError {
    pub fn render(message: impl Into<String>) -> Self {
        ConvertError::RenderError {
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ConvertError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ConvertError::InternalError {
            message: message.into(),
        }
    }
}
