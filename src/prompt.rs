//! Builds the role-tagged message list sent with every request.

use crate::openai::ChatMessage;
use crate::turn::Turn;

/// A fixed human/AI exchange placed ahead of the conversation to prime the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleExchange {
    pub human: &'static str,
    pub ai: &'static str,
}

/// The greeting used to prime one-shot questions.
pub const GREETING_EXAMPLE: ExampleExchange = ExampleExchange {
    human: "Hello",
    ai: "Howdy, how can I help you today?",
};

/// Merge persona, optional example, history and the new input into one request.
///
/// The result always starts with a single `system` message carrying `persona`
/// unchanged and always ends with `input` as a `user` message. It depends on
/// nothing but its arguments.
pub fn build(
    persona: &str,
    example: Option<&ExampleExchange>,
    history: &[Turn],
    input: &str,
) -> Vec<ChatMessage> {
    let example_len = if example.is_some() { 2 } else { 0 };
    let mut messages = Vec::with_capacity(2 + example_len + history.len());

    messages.push(ChatMessage::new("system", persona));
    if let Some(example) = example {
        messages.push(ChatMessage::new("user", example.human));
        messages.push(ChatMessage::new("assistant", example.ai));
    }
    messages.extend(
        history
            .iter()
            .map(|turn| ChatMessage::new(turn.speaker().role(), turn.text())),
    );
    messages.push(ChatMessage::new("user", input));
    messages
}
