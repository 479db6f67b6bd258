//! voxplay console - text front end for the voice player
//!
//! Reads utterances from a terminal instead of a speech recognizer and
//! prints the replies the assistant would speak.

pub mod config;
pub mod engine;
pub mod error;
pub mod session;
