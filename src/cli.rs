use std::{
    fmt::{self, Display},
    path::PathBuf,
    str::FromStr,
};

use clap::{command, Parser, ValueEnum};

/// The default model to use for chats.
pub const DEFAULT_LLM: Model = Model::Gpt35Turbo;
/// The default sampling temperature. Zero keeps replies focused and deterministic.
pub const DEFAULT_TEMPERATURE: f32 = 0.0;
/// The persona used when none is provided by the user.
pub const DEFAULT_PERSONA: &str =
    "You are an assistant that is an expert with various accounting software packages.
You are helpful, creative, clever, and very friendly.";

/// Various models supported for chat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Model {
    Gpt35Turbo,
    Gpt4o,
    Gpt4oMini,
}

impl Model {
    pub fn all_models() -> Vec<String> {
        [Model::Gpt35Turbo, Model::Gpt4o, Model::Gpt4oMini]
            .iter()
            .map(|m| m.to_string())
            .collect()
    }
}

impl FromStr for Model {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gpt-3.5-turbo" => Ok(Model::Gpt35Turbo),
            "gpt35-turbo" => Ok(Model::Gpt35Turbo),
            "gpt-4o" => Ok(Model::Gpt4o),
            "gpt4o" => Ok(Model::Gpt4o),
            "gpt-4o-mini" => Ok(Model::Gpt4oMini),
            "gpt4o-mini" => Ok(Model::Gpt4oMini),
            _ => Err(format!(
                "Invalid model: {}. Choose from: {}.",
                s,
                Model::all_models().join(", ")
            )),
        }
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Gpt35Turbo => write!(f, "gpt-3.5-turbo"),
            Model::Gpt4o => write!(f, "gpt-4o"),
            Model::Gpt4oMini => write!(f, "gpt-4o-mini"),
        }
    }
}

/// How much of the conversation the model gets to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// Every request carries the full conversation so far.
    #[default]
    Memory,
    /// Each question stands alone, primed with a fixed greeting exchange.
    OneShot,
}

/// CLI for `persona-chat`
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Model to chat with.
    #[arg(short, long)]
    pub model: Option<Model>,
    /// Whether the model sees earlier turns of the conversation.
    #[arg(long, value_enum, default_value_t = Mode::Memory)]
    pub mode: Mode,
    /// Persona text given to the model as its system instructions.
    #[arg(short, long)]
    pub persona: Option<String>,
    /// Sampling temperature between 0 and 2.
    #[arg(short, long, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,
    /// Directory the chat history file is written to.
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}

impl Args {
    /// The persona text for this run, falling back to [`DEFAULT_PERSONA`].
    pub fn persona(&self) -> String {
        self.persona
            .clone()
            .unwrap_or_else(|| DEFAULT_PERSONA.to_string())
    }
}
