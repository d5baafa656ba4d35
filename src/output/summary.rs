//! Rendering of a generation report.

use std::fmt::Write;

use crate::generate::Report;

/// Summarize a run for the terminal.
pub fn format_report(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Read {} commands; aliasing those seen more than {:.2} times.",
        report.total_commands, report.threshold
    );

    if report.frequent.is_empty() {
        out.push_str("No frequent commands.\n");
    } else {
        out.push_str("Frequent commands:\n");
        for f in &report.frequent {
            let _ = writeln!(out, "  {:>6}  {}", f.count, f.command);
        }
    }

    if !report.added.is_empty() {
        out.push_str("Added aliases:\n");
        for alias in &report.added {
            let _ = writeln!(out, "  {}", alias);
        }
    }

    if !report.already_aliased.is_empty() {
        out.push_str("Already aliased:\n");
        for command in &report.already_aliased {
            let _ = writeln!(out, "  {}", command);
        }
    }

    if report.rc_updated {
        out.push_str("Shell rc file now sources the alias file.\n");
    }
    out
}

/// Serialize a report as pretty JSON.
pub fn format_report_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
