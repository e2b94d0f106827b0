use thiserror::Error;

/// Errors raised by the matching core
///
/// Only profile construction and schema lookups can fail. Scoring and ranking
/// operate on validated vectors and are total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Incomplete assessment: missing answer for question {question} ({field})")]
    IncompleteAssessment { question: u8, field: &'static str },

    #[error("Value out of range for {field}: {value}")]
    OutOfRange { field: String, value: String },

    #[error("Unknown trait: {0}")]
    Schema(String),

    #[error("Adopter not found: {0}")]
    AdopterNotFound(i64),
}

impl MatchError {
    pub(crate) fn out_of_range(field: impl Into<String>, value: impl ToString) -> Self {
        MatchError::OutOfRange {
            field: field.into(),
            value: value.to_string(),
        }
    }
}
