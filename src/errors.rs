// errors.rs
use std::fmt;

use thiserror::Error;

use crate::domain::{FieldKindMismatch, UnknownField, ValidationErrors};

/// Errors from talking to the survey backend.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("survey {0} not found")]
    NotFound(i64),

    #[error("backend responded {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Decode(String),

    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// HTTP status carried by the error, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::NotFound(_) => Some(404),
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            ClientError::Decode(_) | ClientError::InvalidUrl(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Misuse of the survey form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("reset is only available for a new survey")]
    ResetUnavailable,

    #[error(transparent)]
    Field(#[from] FieldKindMismatch),
}

/// The user action a failure notice refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    LoadSurvey,
    CreateSurvey,
    UpdateSurvey,
    LoadSurveys,
    DeleteSurvey,
    DeleteAllSurveys,
}

impl Action {
    fn message(self) -> &'static str {
        match self {
            Action::LoadSurvey => "Failed to load survey data",
            Action::CreateSurvey => "Failed to submit survey",
            Action::UpdateSurvey => "Failed to update survey",
            Action::LoadSurveys => {
                "Failed to load surveys. Please make sure the backend is running."
            }
            Action::DeleteSurvey => "Failed to delete survey",
            Action::DeleteAllSurveys => "Failed to delete all surveys",
        }
    }
}

/// Human-readable failure shown to the user; the transport detail is kept
/// for logs and verbose output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub action: Action,
    pub detail: String,
}

impl Notice {
    pub fn new(action: Action, err: &ClientError) -> Self {
        Self {
            action,
            detail: err.to_string(),
        }
    }

    pub fn message(&self) -> &'static str {
        self.action.message()
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Everything the command-line driver can fail with.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("survey is not valid:\n{0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    UnknownField(#[from] UnknownField),

    #[error("{0}")]
    Notice(Notice),

    #[error("the survey screen was closed before the request finished")]
    Stale,

    #[error("Bad usage: {0}")]
    Usage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
