//! Command-line parsing.

mod splitter;
mod tokenizer;

pub use splitter::{OptionScan, ParseOptions, ParsedCommand, parse_command_line, split};
pub use tokenizer::{UnclosedQuote, tokenize, tokenize_with};

pub(crate) use tokenizer::is_space;
