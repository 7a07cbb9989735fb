//! # persona-chat
//! Chat with an OpenAI model that has been given a persona, and keep a record of what was said.
//!
//! Every request carries the persona as its system message. In the default `memory` mode the
//! whole conversation so far is resent with each question so the model can refer back to it;
//! in `one-shot` mode each question stands alone. When the user types `quit` the session is
//! written to `chat-history-YYYY-MM-DD-HH:MM:SS.txt` for later review of how the persona
//! shaped the replies.
//!
//! ## Usage
//! These are the library crate docs. For the binary see
//! ```shell
//! $ persona-chat --help
//! ```
//!
//! ## Environment Variables:
//! - `OPENAI_API_KEY`: Required. The OpenAI API key used for every request.
//! - `RUST_LOG`: Optional. Log filter for diagnostics written to stderr (default: `warn`).
//!
//! ## Notes:
//! - Context is unbounded. A long session resends every earlier turn with each request.
//! - The transcript is only written when the session ends through `quit` or a reported
//!   error. Killing the process (e.g. Ctrl-C) loses it.
//!
pub mod cli;
pub mod config;
pub mod context;
pub mod errors;
pub mod openai;
pub mod prompt;
pub mod session;
pub mod transcript;
pub mod turn;
