//! Error taxonomy for a single submission.
//!
//! Validation errors are raised before any I/O happens; prediction errors can
//! only come out of the single predictor call.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Wire name of a submission field, used to point errors at the offending input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Field {
    #[serde(rename = "batting_team")]
    BattingTeam,
    #[serde(rename = "bowling_team")]
    BowlingTeam,
    #[serde(rename = "city")]
    City,
    #[serde(rename = "target")]
    Target,
    #[serde(rename = "score")]
    Score,
    #[serde(rename = "overCompleted")]
    OverCompleted,
    #[serde(rename = "wickets")]
    Wickets,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::BattingTeam => "batting_team",
            Field::BowlingTeam => "bowling_team",
            Field::City => "city",
            Field::Target => "target",
            Field::Score => "score",
            Field::OverCompleted => "overCompleted",
            Field::Wickets => "wickets",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Batting and bowling teams cannot be the same")]
    SameTeam,

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: Field, reason: String },

    /// Body could not be read as a submission at all.
    #[error("Malformed submission: {0}")]
    Malformed(String),
}

impl ValidationError {
    pub fn invalid(field: Field, reason: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// Predictor unreachable, timed out, or answered with a non-2xx status.
    #[error("Predictor transport error: {0}")]
    Transport(String),

    /// Predictor answered 2xx but without a usable `Win_rate`.
    #[error("Invalid predictor response: {0}")]
    InvalidResponse(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

impl SubmissionError {
    /// Stable machine-readable kind for the rendered error.
    pub fn kind(&self) -> &'static str {
        match self {
            SubmissionError::Validation(ValidationError::SameTeam) => "same_team",
            SubmissionError::Validation(ValidationError::InvalidField { .. }) => "invalid_field",
            SubmissionError::Validation(ValidationError::Malformed(_)) => "malformed",
            SubmissionError::Prediction(PredictionError::Transport(_)) => "transport",
            SubmissionError::Prediction(PredictionError::InvalidResponse(_)) => "invalid_response",
        }
    }

    pub fn field(&self) -> Option<Field> {
        match self {
            SubmissionError::Validation(ValidationError::InvalidField { field, .. }) => Some(*field),
            _ => None,
        }
    }

    /// Only a failed exchange with the predictor is worth retrying as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SubmissionError::Prediction(PredictionError::Transport(_))
        )
    }

    /// Message shown to the user; transport details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Validation(e) => e.to_string(),
            SubmissionError::Prediction(PredictionError::Transport(_)) => {
                "Error getting prediction. Please try again.".to_string()
            }
            SubmissionError::Prediction(PredictionError::InvalidResponse(_)) => {
                "Invalid response from server.".to_string()
            }
        }
    }
}
