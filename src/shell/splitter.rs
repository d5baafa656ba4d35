//! Split a tokenized command line into a command stem and its options.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::tokenizer::{UnclosedQuote, tokenize_with};

/// Where option scanning resumes once the command stem has been read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OptionScan {
    /// Always resume at the second token, whatever the stem length.
    ///
    /// When the line starts with an option, that first option is skipped.
    #[default]
    FromSecondToken,
    /// Resume at the first token after the stem.
    AfterStem,
}

impl OptionScan {
    fn start_index(self, stem_len: usize) -> usize {
        match self {
            OptionScan::FromSecondToken => 1,
            OptionScan::AfterStem => stem_len,
        }
    }
}

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Fold value-less flags into the command instead of the option map.
    pub include_flags: bool,
    /// Skip splitting and return every token as the command.
    pub full_command: bool,
    /// Where option scanning resumes after the stem.
    pub option_scan: OptionScan,
    /// Handling of quotes that never close.
    pub unclosed_quote: UnclosedQuote,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            include_flags: true,
            full_command: false,
            option_scan: OptionScan::default(),
            unclosed_quote: UnclosedQuote::default(),
        }
    }
}

/// A command line split into its stem and options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedCommand {
    /// The command stem, plus any flags folded into it.
    pub command: String,
    /// Options keyed by their dashed name, in order of first appearance.
    /// `None` marks a flag without a value.
    pub options: IndexMap<String, Option<String>>,
}

/// Parse a raw command line.
pub fn parse_command_line(line: &str, options: &ParseOptions) -> ParsedCommand {
    let tokens = tokenize_with(line, options.unclosed_quote);
    split(&tokens, options)
}

/// Split tokens into a command stem and options.
///
/// Never fails: anything that does not look like an option is either part
/// of the stem or ignored.
pub fn split(tokens: &[&str], options: &ParseOptions) -> ParsedCommand {
    if options.full_command {
        return ParsedCommand {
            command: tokens.join(" "),
            options: IndexMap::new(),
        };
    }

    let stem_len = tokens.iter().take_while(|t| !is_option(t)).count();
    let mut command = tokens[..stem_len].join(" ");
    let mut parsed = IndexMap::new();

    let mut i = options.option_scan.start_index(stem_len);
    while i < tokens.len() {
        let token = tokens[i];
        i += 1;
        if !is_option(token) {
            continue;
        }

        // Long options may carry their value inline: --key=value, --key:value
        if token.starts_with("--") {
            if let Some((key, value)) = token.split_once('=').or_else(|| token.split_once(':')) {
                parsed.insert(key.to_string(), Some(value.to_string()));
                continue;
            }
        }

        match tokens.get(i) {
            Some(next) if !is_option(next) => {
                parsed.insert(token.to_string(), Some(next.to_string()));
                i += 1;
            }
            _ if options.include_flags => {
                command.push(' ');
                command.push_str(token);
            }
            _ => {
                parsed.insert(token.to_string(), None);
            }
        }
    }

    ParsedCommand {
        command,
        options: parsed,
    }
}

fn is_option(token: &str) -> bool {
    token.starts_with('-')
}
