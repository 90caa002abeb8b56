//! Shared CLI error and exit code types.

use std::fmt;

use crate::error::SkinError;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Invalid input: bad skin, bad config, unsupported layout
    ValidationError = 1,
    /// Filesystem or external tool failure
    IoError = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

/// Failure category of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorKind {
    /// Bad input, exit code 1
    Validation,
    /// Filesystem or tool failure, exit code 2
    Io,
}

/// Error reported by a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Failure category, decides the exit code
    pub kind: CliErrorKind,
    /// Message printed to stderr
    pub message: String,
}

/// Result type of CLI commands.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Validation,
            message: message.into(),
        }
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Io,
            message: message.into(),
        }
    }

    /// Classifies a pipeline error: conversion errors are validation
    /// failures, everything else (I/O, asset tools) is an I/O failure.
    pub fn from_anyhow(context: &str, err: &anyhow::Error) -> Self {
        let is_skin_error = err.chain().any(|cause| {
            cause
                .downcast_ref::<SkinError>()
                .is_some_and(|e| !matches!(e, SkinError::Io(_) | SkinError::Asset(_)))
        });
        let message = format!("{context}: {err:#}");
        if is_skin_error {
            Self::validation(message)
        } else {
            Self::io(message)
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self.kind {
            CliErrorKind::Validation => ExitCode::ValidationError,
            CliErrorKind::Io => ExitCode::IoError,
        }
    }
}

impl From<SkinError> for CliError {
    fn from(err: SkinError) -> Self {
        match err {
            SkinError::Io(_) | SkinError::Asset(_) => Self::io(err.to_string()),
            _ => Self::validation(err.to_string()),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_skin_errors_are_validation_failures() {
        let err: CliError = SkinError::unsupported_layout("two screens").into();
        assert_eq!(err.exit_code(), ExitCode::ValidationError);
        assert_eq!(err.message, "unsupported layout: two screens");

        let err: CliError = SkinError::asset("missing border.png").into();
        assert_eq!(err.exit_code(), ExitCode::IoError);
    }

    #[test]
    fn test_from_anyhow_looks_through_context() {
        let wrapped = Err::<(), _>(SkinError::document("no info.json"))
            .context("Failed to load skin")
            .unwrap_err();
        let err = CliError::from_anyhow("Conversion failed", &wrapped);
        assert_eq!(err.kind, CliErrorKind::Validation);
        assert!(err.message.starts_with("Conversion failed: Failed to load skin"));

        let io = anyhow::Error::new(std::io::Error::other("disk full"));
        assert_eq!(
            CliError::from_anyhow("Write failed", &io).exit_code(),
            ExitCode::IoError
        );
    }
}
