//! Error types for travelform.
//!
//! This module defines all error types used throughout the travelform crate,
//! along with the mapping from each error to the short message shown to the
//! person filling in the form.

use std::path::PathBuf;
use thiserror::Error;

/// Message shown when a required field is empty.
pub const VALIDATION_MESSAGE: &str = "Harap isi semua field yang diperlukan";

/// Message shown when no more specific text is available.
pub const GENERIC_FAILURE_MESSAGE: &str = "Terjadi kesalahan saat menyimpan data";

/// The main error type for travelform operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Form Errors ===
    /// One or more required draft fields are empty.
    #[error("missing required fields: {}", missing.join(", "))]
    Validation {
        /// Wire names of the empty fields, in form order.
        missing: Vec<&'static str>,
    },

    /// The selected photo could not be read.
    #[error("failed to read photo {path}: {source}")]
    PhotoRead {
        /// Path of the selected file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The selected file is not an image.
    #[error("unsupported photo file {path}: expected an image")]
    PhotoUnsupported {
        /// Path of the selected file.
        path: PathBuf,
    },

    // === Submission Errors ===
    /// Another submission is still waiting on the endpoint.
    #[error("a submission is already in progress")]
    SubmissionInProgress,

    /// The request never produced a response.
    #[error("request to endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Gagal menyimpan: {body}")]
    EndpointRejected {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// The endpoint answered with a body that is not the expected JSON.
    #[error("failed to parse endpoint response: {message}")]
    ResponseParse {
        /// Description of what went wrong.
        message: String,
    },

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for travelform operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a response parse error.
    #[must_use]
    pub fn response_parse(message: impl Into<String>) -> Self {
        Self::ResponseParse {
            message: message.into(),
        }
    }

    /// Check if this error is a local validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// The single line of text shown to the user for this error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { .. } => VALIDATION_MESSAGE.to_string(),
            Self::ResponseParse { .. } => GENERIC_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_lists_fields() {
        let err = Error::Validation {
            missing: vec!["nama", "nomor_passport"],
        };
        assert_eq!(
            err.to_string(),
            "missing required fields: nama, nomor_passport"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_validation_user_message() {
        let err = Error::Validation {
            missing: vec!["jenis_kelamin"],
        };
        assert_eq!(err.user_message(), VALIDATION_MESSAGE);
    }

    #[test]
    fn test_rejected_user_message_carries_body() {
        let err = Error::EndpointRejected {
            status: 500,
            body: "Sheet not found".to_string(),
        };
        assert_eq!(err.user_message(), "Gagal menyimpan: Sheet not found");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_parse_error_uses_generic_message() {
        let err = Error::response_parse("expected value at line 1 column 1");
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
        assert!(err.to_string().contains("expected value"));
    }

    #[test]
    fn test_submission_in_progress_display() {
        let err = Error::SubmissionInProgress;
        assert_eq!(err.to_string(), "a submission is already in progress");
    }

    #[test]
    fn test_photo_read_error_display() {
        let err = Error::PhotoRead {
            path: PathBuf::from("/tmp/missing.png"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.png"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_photo_unsupported_display() {
        let err = Error::PhotoUnsupported {
            path: PathBuf::from("notes.txt"),
        };
        assert!(err.to_string().contains("notes.txt"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_database_migration_error_display() {
        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "ttl_secs must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("ttl_secs"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
