//! Rendering of parse results.

use serde::Serialize;
use std::fmt::Write;

use crate::shell::ParsedCommand;

const SEPARATOR_WIDTH: usize = 50;

#[derive(Serialize)]
struct Inspection<'a> {
    original: &'a str,
    #[serde(flatten)]
    parsed: &'a ParsedCommand,
}

/// Render a parse result as `Command:` and `Options:` lines.
pub fn format_parsed(parsed: &ParsedCommand) -> String {
    let mut out = format!("Command: {}\n", parsed.command);
    write_options(&mut out, parsed);
    out
}

/// Render a history entry next to its parse, followed by a separator.
pub fn format_inspection(original: &str, parsed: &ParsedCommand) -> String {
    let mut out = format!(
        "Original command: {}\nParsed command: {}\n",
        original, parsed.command
    );
    write_options(&mut out, parsed);
    let _ = write!(out, "\n{}\n", "-".repeat(SEPARATOR_WIDTH));
    out
}

/// Serialize a parse result as pretty JSON.
pub fn format_parsed_json(parsed: &ParsedCommand) -> serde_json::Result<String> {
    serde_json::to_string_pretty(parsed)
}

/// One JSON line for a history entry and its parse.
pub fn format_inspection_json(original: &str, parsed: &ParsedCommand) -> serde_json::Result<String> {
    serde_json::to_string(&Inspection { original, parsed })
}

fn write_options(out: &mut String, parsed: &ParsedCommand) {
    out.push_str("Options:\n");
    for (option, value) in &parsed.options {
        // An empty value reads as a bare flag.
        match value.as_deref() {
            Some(v) if !v.is_empty() => {
                let _ = writeln!(out, "  {}: {}", option, v);
            }
            _ => {
                let _ = writeln!(out, "  {}: (flag, no value)", option);
            }
        }
    }
}
