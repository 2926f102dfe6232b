use std::collections::HashMap;

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper, Result};

/// All keys when `text` is empty, otherwise the keys starting with `text`.
/// Matching is case-sensitive.
pub fn complete(text: &str, keys: &[String]) -> Vec<String> {
    if text.is_empty() {
        return keys.to_vec();
    }
    keys.iter()
        .filter(|key| key.starts_with(text))
        .cloned()
        .collect()
}

/// Snapshot of everything the shell can complete: command names, and the
/// argument keys for each command that takes one.
#[derive(Debug, Clone, Default)]
pub struct CompletionTable {
    commands: Vec<String>,
    arguments: HashMap<String, Vec<String>>,
}

impl CompletionTable {
    pub fn new(commands: Vec<String>) -> Self {
        Self {
            commands,
            arguments: HashMap::new(),
        }
    }

    pub fn insert_arguments(&mut self, command: impl Into<String>, keys: Vec<String>) {
        self.arguments.insert(command.into(), keys);
    }

    /// Candidates for the word being typed at the end of `line`, with the
    /// byte offset where that word starts.
    pub fn candidates(&self, line: &str) -> (usize, Vec<String>) {
        let trimmed = line.trim_start();
        let lead = line.len() - trimmed.len();

        let Some(split) = trimmed.find(char::is_whitespace) else {
            return (lead, complete(trimmed, &self.commands));
        };

        let command = &trimmed[..split];
        let text = trimmed[split..].trim_start();
        let start = line.len() - text.len();
        match self.arguments.get(command) {
            Some(keys) => (start, complete(text, keys)),
            None => (start, Vec::new()),
        }
    }
}

pub struct ShellHelper {
    table: CompletionTable,
}

impl ShellHelper {
    pub fn new(table: CompletionTable) -> Self {
        Self { table }
    }
}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Result<(usize, Vec<Pair>)> {
        let (start, candidates) = self.table.candidates(&line[..pos]);
        Ok((
            start,
            candidates
                .into_iter()
                .map(|s| Pair {
                    display: s.clone(),
                    replacement: s,
                })
                .collect(),
        ))
    }
}

impl Helper for ShellHelper {}
impl Hinter for ShellHelper {
    type Hint = String;
}
impl Highlighter for ShellHelper {}
impl Validator for ShellHelper {}

#[cfg(test)]
mod tests {
    use super::{CompletionTable, complete};

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_text_returns_every_key() {
        let all = keys(&["sneak", "science", "steal"]);
        assert_eq!(complete("", &all), all);
    }

    #[test]
    fn prefix_is_exact_and_case_sensitive() {
        let all = keys(&["sneak", "science", "steal", "Speech"]);
        assert_eq!(complete("s", &all), keys(&["sneak", "science", "steal"]));
        assert_eq!(complete("sc", &all), keys(&["science"]));
        assert!(complete("SC", &all).is_empty());
        assert!(complete("x", &all).is_empty());
    }

    #[test]
    fn first_word_completes_commands() {
        let table = CompletionTable::new(keys(&["set_perk", "set_skill", "skills"]));

        assert_eq!(table.candidates("set_s"), (0, keys(&["set_skill"])));
        assert_eq!(table.candidates("  sk"), (2, keys(&["skills"])));
    }

    #[test]
    fn argument_completes_against_command_keys() {
        let mut table = CompletionTable::new(keys(&["set_stat", "stats"]));
        table.insert_arguments("set_stat", keys(&["str", "per", "end"]));

        assert_eq!(table.candidates("set_stat s"), (9, keys(&["str"])));
        assert_eq!(table.candidates("set_stat "), (9, keys(&["str", "per", "end"])));
        assert_eq!(table.candidates("stats x"), (6, Vec::new()));
    }
}
