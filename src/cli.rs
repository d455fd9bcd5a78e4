//! Command-line interface components.

pub mod args;
pub mod commands;
pub mod terminal;

pub use self::args::Args;
pub use self::commands::{Command, run, run_until};
pub use self::terminal::TerminalSink;
