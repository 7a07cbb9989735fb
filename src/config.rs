//! Session configuration, built once at startup.

use std::{env, path::PathBuf};

use crate::cli::{Args, Mode, Model, DEFAULT_LLM, DEFAULT_PERSONA, DEFAULT_TEMPERATURE};
use crate::errors::ChatError;

/// Environment variable holding the OpenAI API key.
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// Everything a chat session needs to know, resolved from CLI args and environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: Model,
    pub mode: Mode,
    pub persona: String,
    pub temperature: f32,
    pub output_dir: PathBuf,
}

impl Config {
    /// Resolve the config from parsed args and the process environment.
    pub fn from_env_and_args(args: Args) -> Result<Self, ChatError> {
        Self::from_parts(args, env::var(API_KEY_ENV_VAR).ok())
    }

    /// Resolve the config from parsed args and an already looked up API key.
    pub fn from_parts(args: Args, api_key: Option<String>) -> Result<Self, ChatError> {
        let api_key = match api_key {
            None => return Err(ChatError::MissingApiKey),
            Some(key) if key.is_empty() => return Err(ChatError::EmptyApiKey),
            Some(key) => key,
        };
        if !(0.0..=2.0).contains(&args.temperature) {
            return Err(ChatError::InvalidTemperature(args.temperature));
        }
        Ok(Config {
            api_key,
            model: args.model.unwrap_or(DEFAULT_LLM),
            mode: args.mode,
            persona: args.persona(),
            temperature: args.temperature,
            output_dir: args.output_dir,
        })
    }

    /// A config with defaults for everything but the key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Config {
            api_key: api_key.into(),
            model: DEFAULT_LLM,
            mode: Mode::default(),
            persona: DEFAULT_PERSONA.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            output_dir: PathBuf::from("."),
        }
    }
}
