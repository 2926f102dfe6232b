use std::fs;
use std::io::Write;
use std::num::{IntErrorKind, ParseIntError};
use std::path::{Path, PathBuf};

use f2edit_core::fallout2::SaveFile;
use log::{debug, info};

use crate::error::LaunchError;
use crate::input::LineSource;
use crate::shell::Session;

/// Entries of the saves directory, sorted by name.
pub fn list_slots(dir: &Path) -> Result<Vec<String>, LaunchError> {
    let list_err = |e| LaunchError::list_dir(dir.display().to_string(), e);

    let mut slots = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        slots.push(entry.file_name().to_string_lossy().into_owned());
    }
    slots.sort();
    debug!("{} slots in {}", slots.len(), dir.display());
    Ok(slots)
}

/// Validate a typed slot index against `count` listed slots.
pub fn parse_selection(text: &str, count: usize) -> Result<usize, LaunchError> {
    let index: i64 = text.trim().parse().map_err(|e: ParseIntError| match e.kind() {
        // Too large to represent is still an integer, just not a slot.
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => LaunchError::InvalidSlot,
        _ => LaunchError::IntegerRequired,
    })?;
    usize::try_from(index)
        .ok()
        .filter(|i| *i < count)
        .ok_or(LaunchError::InvalidSlot)
}

/// List the slots of `dir`, ask for one and return its path.
pub fn choose_slot(
    dir: &Path,
    input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> Result<PathBuf, LaunchError> {
    let slots = list_slots(dir)?;

    writeln!(out, "Choose save to edit:")?;
    for (i, slot) in slots.iter().enumerate() {
        writeln!(out, "[{i}]\t{slot}")?;
    }
    out.flush()?;

    let prompt = format!("<0 - {}> Edit: ", slots.len() as i64 - 1);
    let answer = input
        .read_line(&prompt)?
        .ok_or(LaunchError::IntegerRequired)?;
    let index = parse_selection(&answer, slots.len())?;
    Ok(dir.join(&slots[index]))
}

/// Pick a slot and open its save for editing.
pub fn launch(
    dir: &Path,
    input: &mut dyn LineSource,
    out: &mut dyn Write,
) -> Result<Session, LaunchError> {
    let slot = choose_slot(dir, input, out)?;
    info!("opening slot {}", slot.display());

    let save =
        SaveFile::open(&slot).map_err(|e| LaunchError::open_save(slot.display().to_string(), e))?;
    Ok(Session::new(Box::new(save)))
}
