//! End-to-end alias generation from a history file.
//!
//! I/O failures are logged and recorded in the [`Report`]; they never
//! abort the caller.

use serde::Serialize;
use std::io;
use std::path::Path;

use crate::activity::ActivityLog;
use crate::aliases::{
    Alias, CommandCounts, ExistingAliases, append_aliases, ensure_sourced, plan_aliases, read_existing,
    source_line,
};
use crate::config::Settings;
use crate::history;
use crate::shell::{ParseOptions, ParsedCommand, parse_command_line};

/// A command above the frequency threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequentCommand {
    pub command: String,
    pub count: usize,
}

/// Summary of a generation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// Logical commands read from history.
    pub total_commands: usize,
    /// Count a command had to exceed.
    pub threshold: f64,
    pub frequent: Vec<FrequentCommand>,
    /// Aliases appended to the alias file.
    pub added: Vec<Alias>,
    /// Frequent commands that were already aliased.
    pub already_aliased: Vec<String>,
    /// Whether the rc file gained the source line.
    pub rc_updated: bool,
    /// Failures encountered along the way.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl Report {
    fn fail(&mut self, log: &mut dyn ActivityLog, message: String) {
        log.warn(&message);
        self.errors.push(message);
    }
}

/// Read every logical command from `path`.
///
/// An unreadable file yields no commands; a read error part-way keeps the
/// commands read so far. Both are logged.
pub fn read_commands(path: &Path, log: &mut dyn ActivityLog) -> Vec<String> {
    log.info(&format!("Extracting commands from {}", path.display()));
    let mut reader = match history::open(path) {
        Ok(reader) => reader,
        Err(e) => {
            log.warn(&format!("Error reading history file: {e}"));
            return Vec::new();
        }
    };
    let commands: Vec<String> = reader.by_ref().collect();
    if let Some(e) = reader.take_error() {
        log.warn(&format!("Error reading history file: {e}"));
    }
    commands
}

/// Parse every logical command in a history file.
pub fn parse_history(
    path: &Path,
    options: ParseOptions,
) -> io::Result<impl Iterator<Item = (String, ParsedCommand)>> {
    let reader = history::open(path)?;
    Ok(reader.map(move |line| {
        let parsed = parse_command_line(&line, &options);
        (line, parsed)
    }))
}

/// Count commands, alias the frequent ones, and source the alias file
/// from the rc file.
pub fn run(settings: &Settings, log: &mut dyn ActivityLog) -> Report {
    log.info("=== Starting alias generation ===");
    log.info(&format!(
        "Parameters: history={}, aliases={}, zshrc={}",
        settings.history.display(),
        settings.aliases.display(),
        settings.zshrc.display()
    ));
    log.info(&format!(
        "threshold_percent={}, full_command={}, include_flags={}",
        settings.threshold, settings.parse.full_command, settings.parse.include_flags
    ));

    let commands = read_commands(&settings.history, log);
    let counts: CommandCounts = commands
        .iter()
        .map(|line| parse_command_line(line, &settings.parse).command)
        .collect();

    let mut report = Report {
        total_commands: counts.total(),
        threshold: counts.threshold(settings.threshold),
        ..Default::default()
    };
    report.frequent = counts
        .frequent(settings.threshold)
        .into_iter()
        .map(|(command, count)| FrequentCommand { command, count })
        .collect();
    log.info(&format!("Frequent commands: {:?}", report.frequent));

    let existing = match read_existing(&settings.aliases) {
        Ok(Some(existing)) => existing,
        Ok(None) => {
            log.info(&format!(
                "Aliases file not found. Creating a new one: {}",
                settings.aliases.display()
            ));
            ExistingAliases::default()
        }
        Err(e) => {
            report.fail(log, e.to_string());
            return report;
        }
    };

    let plan = plan_aliases(
        report.frequent.iter().map(|f| f.command.as_str()),
        &existing,
        log,
    );
    for alias in &plan.added {
        log.info(&format!("New command: {}", alias.command));
    }
    report.already_aliased = plan.already_aliased;

    if let Err(e) = append_aliases(&settings.aliases, &plan.added) {
        report.fail(log, e.to_string());
        return report;
    }
    report.added = plan.added;

    let line = source_line(&settings.aliases, settings.home.as_deref());
    match ensure_sourced(&settings.zshrc, &line) {
        Ok(updated) => report.rc_updated = updated,
        Err(e) => {
            report.fail(log, e.to_string());
            return report;
        }
    }

    log.info("New aliases added; rc file sources the alias file.");
    log.info("=== Alias generation completed ===");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{Level, MemoryLog};
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const HISTORY: &str = "\
: 1700000000:0;git status
: 1700000001:0;git status
: 1700000002:0;ls -la
: 1700000003:0;ls -la
: 1700000004:0;git commit -m \"fix\"
: 1700000005:0;docker build \\
  -t app .
: 1700000006:0;docker build -t web .
: 1700000007:0;vim notes.md
";

    fn settings(dir: &TempDir, threshold: f64) -> Settings {
        let home = dir.path().to_path_buf();
        Settings {
            history: home.join(".zsh_history"),
            aliases: home.join(".zsh_aliases"),
            zshrc: home.join(".zshrc"),
            threshold,
            parse: ParseOptions::default(),
            log: None,
            home: Some(home),
        }
    }

    fn setup(threshold: f64) -> (TempDir, Settings) {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir, threshold);
        fs::write(&settings.history, HISTORY).unwrap();
        fs::write(&settings.zshrc, "export EDITOR=vim\n").unwrap();
        (dir, settings)
    }

    #[test]
    fn test_run_generates_aliases() {
        let (_dir, settings) = setup(15.0);
        let mut log = MemoryLog::new();

        let report = run(&settings, &mut log);

        assert_eq!(report.total_commands, 8);
        assert!((report.threshold - 1.2).abs() < 1e-9);
        let frequent: Vec<(&str, usize)> = report
            .frequent
            .iter()
            .map(|f| (f.command.as_str(), f.count))
            .collect();
        assert_eq!(frequent, vec![("git status", 2), ("ls -la", 2), ("docker build", 2)]);
        assert_eq!(
            report.added,
            vec![
                Alias::new("gist", "git status"),
                Alias::new("lsla", "ls -la"),
                Alias::new("dobu", "docker build"),
            ]
        );
        assert!(report.rc_updated);
        assert!(report.errors.is_empty());

        let aliases = fs::read_to_string(&settings.aliases).unwrap();
        assert_eq!(
            aliases,
            "\nalias gist='git status'\nalias lsla='ls -la'\nalias dobu='docker build'"
        );
        let rc = fs::read_to_string(&settings.zshrc).unwrap();
        assert!(rc.ends_with("\n# Source aliases\nsource ~/.zsh_aliases\n"));
        assert!(log.contains("Aliases file not found"));
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let (_dir, settings) = setup(15.0);
        run(&settings, &mut MemoryLog::new());
        let aliases_before = fs::read_to_string(&settings.aliases).unwrap();
        let rc_before = fs::read_to_string(&settings.zshrc).unwrap();

        let report = run(&settings, &mut MemoryLog::new());

        assert!(report.added.is_empty());
        assert_eq!(report.already_aliased.len(), 3);
        assert!(!report.rc_updated);
        assert_eq!(fs::read_to_string(&settings.aliases).unwrap(), aliases_before);
        assert_eq!(fs::read_to_string(&settings.zshrc).unwrap(), rc_before);
    }

    #[test]
    fn test_existing_names_are_avoided() {
        let (_dir, settings) = setup(15.0);
        fs::write(&settings.aliases, "alias gist='git stash'").unwrap();

        let report = run(&settings, &mut MemoryLog::new());

        assert_eq!(report.added[0], Alias::new("gist1", "git status"));
    }

    #[test]
    fn test_full_command_mode() {
        let (_dir, mut settings) = setup(15.0);
        settings.parse.full_command = true;

        let report = run(&settings, &mut MemoryLog::new());

        let commands: Vec<&str> = report.frequent.iter().map(|f| f.command.as_str()).collect();
        assert_eq!(commands, vec!["git status", "ls -la"]);
    }

    #[test]
    fn test_missing_history_is_empty_run() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir, 1.0);
        fs::write(&settings.zshrc, "").unwrap();
        let mut log = MemoryLog::new();

        let report = run(&settings, &mut log);

        assert_eq!(report.total_commands, 0);
        assert!(report.added.is_empty());
        assert!(log.at_level(Level::Warn).any(|e| e.message.contains("Error reading history file")));
        // The alias file is still created and sourced.
        assert!(settings.aliases.exists());
        assert!(report.rc_updated);
    }

    #[test]
    fn test_missing_rc_is_reported() {
        let (_dir, settings) = setup(15.0);
        fs::remove_file(&settings.zshrc).unwrap();
        let mut log = MemoryLog::new();

        let report = run(&settings, &mut log);

        assert_eq!(report.added.len(), 3);
        assert!(!report.rc_updated);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains(".zshrc"));
        assert!(!settings.zshrc.exists());
    }

    #[test]
    fn test_unwritable_aliases_stops_before_rc() {
        let (dir, mut settings) = setup(15.0);
        settings.aliases = dir.path().join("missing-dir").join(".zsh_aliases");

        let report = run(&settings, &mut MemoryLog::new());

        assert!(report.added.is_empty());
        assert!(!report.rc_updated);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(fs::read_to_string(&settings.zshrc).unwrap(), "export EDITOR=vim\n");
    }

    #[test]
    fn test_parse_history() {
        let (_dir, settings) = setup(1.0);
        let parsed: Vec<(String, ParsedCommand)> =
            parse_history(&settings.history, ParseOptions::default())
                .unwrap()
                .collect();

        assert_eq!(parsed.len(), 8);
        assert_eq!(parsed[5].0, "docker build  -t app .");
        assert_eq!(parsed[5].1.command, "docker build");
        assert_eq!(parsed[5].1.options.get("-t"), Some(&Some("app".to_string())));
    }

    #[test]
    fn test_read_commands_missing() {
        let mut log = MemoryLog::new();
        assert!(read_commands(&PathBuf::from("/nonexistent/history"), &mut log).is_empty());
        assert_eq!(log.at_level(Level::Warn).count(), 1);
    }
}
