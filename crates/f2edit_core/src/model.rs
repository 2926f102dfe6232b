use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{CoreError, CoreErrorCode};

/// The three editable attribute tables of a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Skill,
    Perk,
    Stat,
}

impl AttributeKind {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Skill => "skill",
            Self::Perk => "perk",
            Self::Stat => "stat",
        }
    }

    pub fn heading(&self) -> &'static str {
        match *self {
            Self::Skill => "Skill",
            Self::Perk => "Perk",
            Self::Stat => "Stat",
        }
    }

    /// Values a setter accepts for this kind. Perk ranks stack up to 20;
    /// SPECIAL stats are bounded to 1..=10 like character creation.
    pub fn valid_range(&self) -> RangeInclusive<i32> {
        match *self {
            Self::Skill => 0..=300,
            Self::Perk => 0..=20,
            Self::Stat => 1..=10,
        }
    }

    pub fn not_found(&self, name: &str) -> CoreError {
        CoreError::new(
            CoreErrorCode::NotFound,
            format!("No {} named \"{name}\"", self.as_str()),
        )
    }

    pub fn check_value(&self, name: &str, value: i32) -> Result<(), CoreError> {
        let range = self.valid_range();
        if range.contains(&value) {
            return Ok(());
        }
        Err(CoreError::new(
            CoreErrorCode::OutOfRange,
            format!(
                "invalid {} value {value} for \"{name}\", expected {}..{}",
                self.as_str(),
                range.start(),
                range.end()
            ),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveInfo {
    pub save_name: String,
    pub character_name: String,
}

impl fmt::Display for SaveInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Save Name: '{}'\tCharacter: '{}'",
            self.save_name, self.character_name
        )
    }
}

/// Key/value view of one save slot.
///
/// Setters write through: when `set` returns `Ok` the change is already
/// persisted. A setter that fails leaves the model unchanged.
pub trait SaveModel {
    fn info(&self) -> SaveInfo;

    /// Keys of one attribute table, in storage order.
    fn names(&self, kind: AttributeKind) -> Vec<String>;

    fn get(&self, kind: AttributeKind, name: &str) -> Result<i32, CoreError>;

    fn set(&mut self, kind: AttributeKind, name: &str, value: i32) -> Result<(), CoreError>;

    /// Name/value pairs sorted by name.
    fn entries(&self, kind: AttributeKind) -> Result<Vec<(String, i32)>, CoreError> {
        let mut names = self.names(kind);
        names.sort();
        names
            .into_iter()
            .map(|name| {
                let value = self.get(kind, &name)?;
                Ok((name, value))
            })
            .collect()
    }

    fn skill_names(&self) -> Vec<String> {
        self.names(AttributeKind::Skill)
    }

    fn perk_names(&self) -> Vec<String> {
        self.names(AttributeKind::Perk)
    }

    fn stat_names(&self) -> Vec<String> {
        self.names(AttributeKind::Stat)
    }

    fn get_skill(&self, name: &str) -> Result<i32, CoreError> {
        self.get(AttributeKind::Skill, name)
    }

    fn set_skill(&mut self, name: &str, value: i32) -> Result<(), CoreError> {
        self.set(AttributeKind::Skill, name, value)
    }

    fn get_perk(&self, name: &str) -> Result<i32, CoreError> {
        self.get(AttributeKind::Perk, name)
    }

    fn set_perk(&mut self, name: &str, value: i32) -> Result<(), CoreError> {
        self.set(AttributeKind::Perk, name, value)
    }

    fn get_stat(&self, name: &str) -> Result<i32, CoreError> {
        self.get(AttributeKind::Stat, name)
    }

    fn set_stat(&mut self, name: &str, value: i32) -> Result<(), CoreError> {
        self.set(AttributeKind::Stat, name, value)
    }
}
