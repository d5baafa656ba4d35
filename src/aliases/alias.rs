//! Alias definitions as they appear in a zsh alias file.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// A shorthand name bound to a full command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alias {
    pub name: String,
    pub command: String,
}

impl Alias {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
        }
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alias {}='{}'", self.name, self.command)
    }
}

/// Names and commands already defined in an alias file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingAliases {
    /// Aliased command text, with surrounding single quotes removed.
    pub commands: HashSet<String>,
    /// Alias names.
    pub names: HashSet<String>,
}

impl ExistingAliases {
    /// Parse `alias NAME='VALUE'` lines. Lines without `=` are ignored.
    pub fn parse(content: &str) -> Self {
        let mut existing = Self::default();
        for line in content.lines() {
            let Some((head, value)) = line.split_once('=') else {
                continue;
            };
            existing
                .commands
                .insert(value.trim_end().trim_matches('\'').to_string());
            if let Some(name) = head.split(' ').nth(1) {
                existing.names.insert(name.to_string());
            }
        }
        existing
    }

    pub fn has_command(&self, command: &str) -> bool {
        self.commands.contains(command)
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let alias = Alias::new("gist", "git status");
        assert_eq!(alias.to_string(), "alias gist='git status'");
    }

    #[test]
    fn test_parse_alias_file() {
        let content = "\nalias gist='git status'\nalias ll='ls -la'  \n# comment\n";
        let existing = ExistingAliases::parse(content);

        assert!(existing.has_command("git status"));
        assert!(existing.has_command("ls -la"));
        assert!(existing.has_name("gist"));
        assert!(existing.has_name("ll"));
        assert_eq!(existing.names.len(), 2);
    }

    #[test]
    fn test_parse_value_with_equals() {
        let existing = ExistingAliases::parse("alias dr='docker run -e A=B'");
        assert!(existing.has_command("docker run -e A=B"));
        assert!(existing.has_name("dr"));
    }

    #[test]
    fn test_parse_line_without_name() {
        let existing = ExistingAliases::parse("FOO=bar");
        assert!(existing.has_command("bar"));
        assert!(existing.names.is_empty());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(ExistingAliases::parse(""), ExistingAliases::default());
    }
}
