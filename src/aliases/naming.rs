//! Alias name derivation and collision handling.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use super::alias::{Alias, ExistingAliases};
use crate::activity::ActivityLog;
use crate::compile_regex;
use crate::shell::is_space;

static NON_WORD_RE: Lazy<Regex> = Lazy::new(|| compile_regex(r"\W+"));

/// Abbreviate a command: the first two word characters of each word.
///
/// `git status -s` becomes `gists`.
pub fn abbreviate(command: &str) -> String {
    command
        .split(is_space)
        .filter(|word| !word.is_empty())
        .flat_map(|word| {
            NON_WORD_RE
                .replace_all(word, "")
                .chars()
                .take(2)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Derive an alias name not present in `taken`, appending 1, 2, ... to the
/// abbreviation as needed.
pub fn unique_alias_name(command: &str, taken: &HashSet<String>) -> String {
    let base = abbreviate(command);
    let mut name = base.clone();
    let mut suffix = 1;
    while taken.contains(&name) {
        name = format!("{base}{suffix}");
        suffix += 1;
    }
    name
}

/// Outcome of assigning names to frequent commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasPlan {
    /// New aliases, in input order.
    pub added: Vec<Alias>,
    /// Commands that already have an alias.
    pub already_aliased: Vec<String>,
}

/// Assign unique names to commands that are not aliased yet.
///
/// Commands whose abbreviation is empty are skipped.
pub fn plan_aliases<'a, I>(commands: I, existing: &ExistingAliases, log: &mut dyn ActivityLog) -> AliasPlan
where
    I: IntoIterator<Item = &'a str>,
{
    let mut taken = existing.names.clone();
    let mut plan = AliasPlan::default();

    for command in commands {
        if existing.has_command(command) {
            log.info(&format!("Command already exists: {command}"));
            plan.already_aliased.push(command.to_string());
            continue;
        }

        log.debug(&format!("Generating alias name for command: {command}"));
        let name = unique_alias_name(command, &taken);
        if name.is_empty() {
            log.debug(&format!("No alias name derivable for: {command:?}"));
            continue;
        }

        log.info(&format!("Alias name: {name}"));
        taken.insert(name.clone());
        plan.added.push(Alias::new(name, command));
    }

    plan
}
