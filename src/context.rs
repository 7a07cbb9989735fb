//! In-memory conversation history fed back into each request.

use crate::turn::Turn;

/// Ordered history of the live session, oldest first.
///
/// The buffer is unbounded: every turn of the session is kept and resent
/// with each request.
#[derive(Debug, Default, Clone)]
pub struct ContextBuffer {
    turns: Vec<Turn>,
}

impl ContextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// The turns to include in the next outbound request.
    pub fn snapshot(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
