use thiserror::Error;

use crate::infra::api::ApiError;

/// Failure of a user-initiated action.
///
/// Never fatal: callers surface the message and leave their state as it was
/// before the action. Retries are explicit, never automatic.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("validation failed: {0}")]
    Validation(String),
}

impl ActionError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// The human-readable reason shown to the initiating view.
    pub fn user_message(&self) -> String {
        match self {
            ActionError::Api(err) => err
                .server_message()
                .map_or_else(|| err.to_string(), str::to_owned),
            ActionError::Validation(message) => message.clone(),
        }
    }
}
