use std::collections::{BTreeMap, VecDeque};
use std::io;

use f2edit_core::{AttributeKind, CoreError, SaveInfo, SaveModel};

use crate::input::LineSource;

/// Canned answers; records every prompt it is shown.
pub struct ScriptedInput {
    lines: VecDeque<String>,
    pub prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            prompts: Vec::new(),
        }
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}

/// In-memory save with the same validation rules as a real one.
pub struct MemorySave {
    tables: BTreeMap<&'static str, Vec<(String, i32)>>,
    pub writes: usize,
}

impl MemorySave {
    pub fn sample() -> Self {
        let table = |rows: &[(&str, i32)]| -> Vec<(String, i32)> {
            rows.iter().map(|(k, v)| (k.to_string(), *v)).collect()
        };
        let mut tables = BTreeMap::new();
        tables.insert(
            "skill",
            table(&[("small_guns", 10), ("science", 12), ("sneak", 5)]),
        );
        tables.insert("perk", table(&[("toughness", 1), ("awareness", 0)]));
        tables.insert("stat", table(&[("str", 6), ("agi", 6), ("luc", 4)]));
        Self { tables, writes: 0 }
    }

    fn table(&self, kind: AttributeKind) -> &[(String, i32)] {
        self.tables.get(kind.as_str()).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl SaveModel for MemorySave {
    fn info(&self) -> SaveInfo {
        SaveInfo {
            save_name: "TEST".to_string(),
            character_name: "Narg".to_string(),
        }
    }

    fn names(&self, kind: AttributeKind) -> Vec<String> {
        self.table(kind).iter().map(|(k, _)| k.clone()).collect()
    }

    fn get(&self, kind: AttributeKind, name: &str) -> Result<i32, CoreError> {
        self.table(kind)
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| *v)
            .ok_or_else(|| kind.not_found(name))
    }

    fn set(&mut self, kind: AttributeKind, name: &str, value: i32) -> Result<(), CoreError> {
        let Some(row) = self
            .tables
            .get_mut(kind.as_str())
            .and_then(|rows| rows.iter_mut().find(|(k, _)| k == name))
        else {
            return Err(kind.not_found(name));
        };
        kind.check_value(name, value)?;
        row.1 = value;
        self.writes += 1;
        Ok(())
    }
}
