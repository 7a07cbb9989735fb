use thiserror::Error;

use crate::config::API_KEY_ENV_VAR;

/// Chat session errors
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Could not find an environment variable named {}. Make sure to set this environment variable with your OpenAI API key.", API_KEY_ENV_VAR)]
    MissingApiKey,
    #[error("The environment variable {} was found but it does not have a value. Please set this to your OpenAI API key.", API_KEY_ENV_VAR)]
    EmptyApiKey,
    #[error("Temperature must be between 0 and 2, got {0}.")]
    InvalidTemperature(f32),
    #[error("Request to the chat completions endpoint failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Chat completions endpoint returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Chat completions response contained no message.")]
    EmptyResponse,
    #[error("Input closed before 'quit' was entered.")]
    InputClosed,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ChatError {
    /// Configuration errors are detected before any chat activity starts.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            ChatError::MissingApiKey | ChatError::EmptyApiKey | ChatError::InvalidTemperature(_)
        )
    }
}
