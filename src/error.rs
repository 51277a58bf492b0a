use std::io;

use thiserror::Error;

use crate::domain::lifecycle::{LifecycleEvent, LifecycleState};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("issue tracker error: {0}")]
    IssueTracker(String),
    #[error("chat platform error: {0}")]
    Chat(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("this panel has expired")]
    Expired,
    #[error("cannot apply {event:?} while ticket is {from:?}")]
    InvalidTransition {
        from: LifecycleState,
        event: LifecycleEvent,
    },
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    /// Text shown privately to the member whose action failed.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(message) | AppError::Unauthorized(message) => message.clone(),
            AppError::Expired => "⌛ This panel has expired.".to_string(),
            AppError::IssueTracker(detail) => format!("GitHub request failed: {detail}"),
            AppError::Chat(detail) => format!("Discord request failed: {detail}"),
            _ => "❌ Something went wrong while handling this action.".to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_validation_text_verbatim() {
        let err = AppError::Validation("Title must not be empty".to_string());
        assert_eq!(err.user_message(), "Title must not be empty");
    }

    #[test]
    fn hides_internal_details() {
        let err = AppError::Persistence("disk full".to_string());
        assert!(!err.user_message().contains("disk full"));
    }
}
