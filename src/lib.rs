//! histalias - shell aliases from command history.
//!
//! Reads a zsh history file, splits each command line into a command stem
//! and its options, counts how often each stem occurs, and appends short
//! aliases for the frequent ones to an alias file sourced from `.zshrc`.

pub mod activity;
pub mod aliases;
pub mod cli;
pub mod config;
pub mod generate;
pub mod history;
pub mod output;
pub mod shell;

use regex::Regex;

pub use activity::{ActivityLog, FileLog, MemoryLog, NullLog};
pub use config::{Config, Settings};
pub use generate::Report;
pub use shell::{ParseOptions, ParsedCommand, parse_command_line};

/// Compile a built-in pattern. Each static pattern is forced by a unit test.
pub(crate) fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(err) => panic!("invalid regex pattern `{pattern}`: {err}"),
    }
}
