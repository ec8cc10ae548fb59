//! calbot CLI library.
//!
//! Exposes the argument surface, configuration, event drafting and commands
//! so they can be exercised without spawning the binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod event;

pub use cli::{AddArgs, Cli, Commands, ParseArgs};
pub use config::Config;
pub use event::{CalendarSink, EventDraft, JsonSink};
