//! On-disk record of a whole chat session.
//!
//! The transcript is written once, when the session ends, to a file named after
//! the local time the session ended:
//!
//! ```text
//! chat-history-2026-10-16-14:03:59.txt
//! ```
//!
//! so a directory of transcripts sorts chronologically. The file starts with the
//! persona the bot was given, followed by one block per turn:
//!
//! ```text
//! Chatbot Prompt:
//! You are terse.
//!
//! Human
//! Hi
//!
//! AI Bot
//! Hello.
//!
//! ```

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::debug;

use crate::turn::Turn;

/// Append-only record of every turn in the session, including the final `quit`.
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    persona: String,
    turns: Vec<Turn>,
}

impl TranscriptStore {
    pub fn new(persona: impl Into<String>) -> Self {
        TranscriptStore {
            persona: persona.into(),
            turns: Vec::new(),
        }
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Write the transcript into `dir`, named after `now`. Fails rather than
    /// overwriting if a file of that name already exists.
    pub fn write(&self, dir: &Path, now: DateTime<Local>) -> io::Result<PathBuf> {
        let path = dir.join(file_name(now));
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;
        let mut out = BufWriter::new(file);
        self.render(&mut out)?;
        out.flush()?;
        debug!("wrote {} turns to {}", self.turns.len(), path.display());
        Ok(path)
    }

    /// Render the transcript body without touching the filesystem.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Chatbot Prompt:")?;
        writeln!(out, "{}", self.persona)?;
        writeln!(out)?;
        for turn in &self.turns {
            writeln!(out, "{}", turn.speaker())?;
            writeln!(out, "{}", turn.text())?;
            writeln!(out)?;
        }
        Ok(())
    }
}

/// `chat-history-YYYY-MM-DD-HH:MM:SS.txt`
pub fn file_name(now: DateTime<Local>) -> String {
    format!("chat-history-{}.txt", now.format("%Y-%m-%d-%H:%M:%S"))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 7, h, m, s).unwrap()
    }

    #[test]
    fn file_name_has_second_granularity() {
        assert_eq!(file_name(at(9, 5, 3)), "chat-history-2024-03-07-09:05:03.txt");
    }

    #[test]
    fn render_writes_header_then_blocks() {
        let mut store = TranscriptStore::new("You are terse.");
        store.append(Turn::human("Hi"));
        store.append(Turn::ai("Hello."));
        store.append(Turn::human("quit"));

        let mut buf = Vec::new();
        store.render(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Chatbot Prompt:\nYou are terse.\n\nHuman\nHi\n\nAI Bot\nHello.\n\nHuman\nquit\n\n"
        );
    }

    #[test]
    fn write_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new("p");
        let path = store.write(dir.path(), at(12, 0, 0)).unwrap();
        assert!(path.ends_with("chat-history-2024-03-07-12:00:00.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Chatbot Prompt:\np\n\n");

        let err = store.write(dir.path(), at(12, 0, 0)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }
}
