//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Overrides;
use crate::shell::{OptionScan, UnclosedQuote};

#[derive(Parser, Debug)]
#[command(version, about = "Generate shell aliases for frequently used history commands")]
pub struct Cli {
    /// Action to perform. Defaults to `generate`.
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Count history commands and append aliases for the frequent ones.
    Generate,

    /// Parse one command line and print its stem and options.
    Parse {
        /// The command line; several words are joined with spaces.
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },

    /// Print how every history command parses.
    Inspect,
}

#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Path to the zsh history file.
    #[arg(long, global = true, value_name = "PATH")]
    pub history: Option<PathBuf>,

    /// Path to the alias file.
    #[arg(long, global = true, value_name = "PATH")]
    pub aliases: Option<PathBuf>,

    /// Path to the shell rc file that should source the alias file.
    #[arg(long, global = true, value_name = "PATH")]
    pub zshrc: Option<PathBuf>,

    /// Percentage of all commands a command must exceed to get an alias.
    #[arg(long, global = true, value_name = "PERCENT")]
    pub threshold: Option<f64>,

    /// Alias whole command lines instead of command stems.
    #[arg(long, global = true, default_value_t = false)]
    pub full_command: bool,

    /// Keep value-less flags out of the command stem.
    #[arg(long, global = true, default_value_t = false)]
    pub exclude_flags: bool,

    /// Where option scanning resumes after the command stem.
    #[arg(long, global = true, value_enum)]
    pub option_scan: Option<OptionScan>,

    /// Handling of double quotes that are never closed.
    #[arg(long, global = true, value_enum)]
    pub unclosed_quote: Option<UnclosedQuote>,

    /// Append activity to this JSON-lines log file.
    #[arg(long, global = true, value_name = "PATH")]
    pub log: Option<PathBuf>,

    /// Print machine-readable JSON.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
}

impl GlobalArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            history: self.history.clone(),
            aliases: self.aliases.clone(),
            zshrc: self.zshrc.clone(),
            threshold: self.threshold,
            full_command: self.full_command,
            exclude_flags: self.exclude_flags,
            option_scan: self.option_scan,
            unclosed_quote: self.unclosed_quote,
            log: self.log.clone(),
        }
    }
}
