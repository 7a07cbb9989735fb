//! The read / ask / record loop of a chat session.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use chrono::Local;
use colored::Colorize;
use log::{debug, warn};

use crate::cli::Mode;
use crate::config::Config;
use crate::context::ContextBuffer;
use crate::errors::ChatError;
use crate::openai::ChatApi;
use crate::prompt::{self, GREETING_EXAMPLE};
use crate::transcript::TranscriptStore;
use crate::turn::Turn;

/// Input that ends the session. Matched exactly, case-sensitive.
pub const QUIT_COMMAND: &str = "quit";
/// Shown before every line of user input.
pub const HUMAN_PROMPT: &str = "Human (type 'quit' to end):";

/// What the loop should do after handling one line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
}

/// One chat session: persona, live context and transcript, bound to a remote model.
pub struct ChatSession<A: ChatApi> {
    api: A,
    persona: String,
    mode: Mode,
    output_dir: PathBuf,
    context: ContextBuffer,
    transcript: TranscriptStore,
}

impl<A: ChatApi> ChatSession<A> {
    pub fn new(api: A, config: &Config) -> Self {
        ChatSession {
            api,
            persona: config.persona.clone(),
            mode: config.mode,
            output_dir: config.output_dir.clone(),
            context: ContextBuffer::new(),
            transcript: TranscriptStore::new(config.persona.clone()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn context(&self) -> &ContextBuffer {
        &self.context
    }

    pub fn transcript(&self) -> &TranscriptStore {
        &self.transcript
    }

    /// Chat until the user types `quit`, then write the transcript and return its path.
    ///
    /// If the loop fails (remote error, closed input) the transcript is still
    /// written if possible, and the original error is returned.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> Result<PathBuf, ChatError> {
        match self.converse(input, out) {
            Ok(()) => self.save(),
            Err(e) => {
                match self.save() {
                    Ok(path) => warn!("session ended early, chat history saved to {}", path.display()),
                    Err(save_err) => warn!("session ended early, chat history not saved: {}", save_err),
                }
                Err(e)
            }
        }
    }

    fn converse<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<(), ChatError> {
        loop {
            let line = read_human_input(input, out)?;
            if self.handle_input(&line, out)? == Step::Quit {
                return Ok(());
            }
        }
    }

    /// Record one line of user input and, unless it is `quit`, ask the model and record the reply.
    pub fn handle_input<W: Write>(&mut self, text: &str, out: &mut W) -> Result<Step, ChatError> {
        if text == QUIT_COMMAND {
            self.transcript.append(Turn::human(text));
            writeln!(out, "{}", "bye bye".green())?;
            return Ok(Step::Quit);
        }

        let messages = match self.mode {
            Mode::Memory => prompt::build(&self.persona, None, self.context.snapshot(), text),
            Mode::OneShot => prompt::build(&self.persona, Some(&GREETING_EXAMPLE), &[], text),
        };
        self.context.append(Turn::human(text));
        self.transcript.append(Turn::human(text));

        debug!("dispatching turn {} ({} messages)", self.context.len(), messages.len());
        let response = self.api.complete(&messages)?;

        self.context.append(Turn::ai(response.as_str()));
        self.transcript.append(Turn::ai(response.as_str()));

        writeln!(out, "{}", "AI Bot:".red())?;
        writeln!(out, "{}", response.red())?;
        Ok(Step::Continue)
    }

    fn save(&self) -> Result<PathBuf, ChatError> {
        Ok(self.transcript.write(&self.output_dir, Local::now())?)
    }
}

/// Prompt for and read one line, without its line terminator.
fn read_human_input<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String, ChatError> {
    write!(out, "{}", HUMAN_PROMPT.green())?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(ChatError::InputClosed);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}
