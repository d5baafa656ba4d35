//! Command frequency counting.

use indexmap::IndexMap;

/// Occurrence counts of normalized commands, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct CommandCounts {
    counts: IndexMap<String, usize>,
    total: usize,
}

impl CommandCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, command: impl Into<String>) {
        *self.counts.entry(command.into()).or_insert(0) += 1;
        self.total += 1;
    }

    /// Number of commands added, duplicates included.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, command: &str) -> usize {
        self.counts.get(command).copied().unwrap_or(0)
    }

    /// The minimum count to exceed for `percent` of the total.
    pub fn threshold(&self, percent: f64) -> f64 {
        self.total as f64 * (percent / 100.0)
    }

    /// Commands whose count is strictly above the threshold.
    pub fn frequent(&self, percent: f64) -> Vec<(String, usize)> {
        let threshold = self.threshold(percent);
        self.counts
            .iter()
            .filter(|(_, count)| **count as f64 > threshold)
            .map(|(cmd, count)| (cmd.clone(), *count))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for CommandCounts {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut counts = Self::new();
        for command in iter {
            counts.add(command);
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_counts_and_total() {
        let counts: CommandCounts = ["ls", "git status", "ls"].into_iter().collect();
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.count("ls"), 2);
        assert_eq!(counts.count("pwd"), 0);
    }

    #[test]
    fn test_threshold() {
        let counts: CommandCounts = ["a"; 200].into_iter().collect();
        assert_eq!(counts.threshold(1.0), 2.0);
        assert_eq!(counts.threshold(0.0), 0.0);
    }

    #[test]
    fn test_frequent_is_strictly_above() {
        // 10 commands, 20% threshold = 2.0
        let mut counts = CommandCounts::new();
        for cmd in ["ls", "ls", "ls", "cd", "cd", "pwd", "make", "make", "make", "top"] {
            counts.add(cmd);
        }
        assert_eq!(
            counts.frequent(20.0),
            vec![("ls".to_string(), 3), ("make".to_string(), 3)]
        );
    }

    #[test]
    fn test_frequent_keeps_first_seen_order() {
        let counts: CommandCounts = ["b", "a", "b", "a"].into_iter().collect();
        let names: Vec<String> = counts.frequent(0.0).into_iter().map(|(c, _)| c).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_empty() {
        let counts = CommandCounts::new();
        assert!(counts.frequent(1.0).is_empty());
        assert_eq!(counts.total(), 0);
    }
}
