//! A single recorded utterance in a chat session.

use std::fmt::{self, Display};

/// Who produced a [`Turn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Human,
    Ai,
}

impl Speaker {
    /// The `role` used for this speaker by the chat completions endpoint.
    pub fn role(self) -> &'static str {
        match self {
            Speaker::Human => "user",
            Speaker::Ai => "assistant",
        }
    }
}

impl Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::Human => write!(f, "Human"),
            Speaker::Ai => write!(f, "AI Bot"),
        }
    }
}

/// One utterance tagged with its speaker. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    speaker: Speaker,
    text: String,
}

impl Turn {
    pub fn human(text: impl Into<String>) -> Self {
        Turn {
            speaker: Speaker::Human,
            text: text.into(),
        }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Turn {
            speaker: Speaker::Ai,
            text: text.into(),
        }
    }

    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
