pub mod header;
pub mod object;
pub mod sections;
pub mod types;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixture;

use std::fs::{self, OpenOptions};
use std::io::{self, Cursor, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{CoreError, CoreErrorCode};
use crate::model::{AttributeKind, SaveInfo, SaveModel};
use crate::reader::BigEndianReader;
use header::SaveHeader;
use sections::{
    detect_global_var_count, locate_critter_proto, parse_map_file_list, parse_player_object,
};
use types::{
    BASE_STATS_OFFSET, PERK_KEYS, PERKS_OFFSET, PERK_COUNT, SAVE_FILE_NAME, SKILL_KEYS,
    SKILLS_OFFSET, STAT_KEYS,
};

const I32_WIDTH: usize = 4;

/// Where the editable tables live inside a SAVE.DAT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerLayout {
    /// Absolute offset of the critter proto block (handler 6).
    pub critter_proto: usize,
    pub global_var_count: usize,
    pub detection_score: i32,
}

impl PlayerLayout {
    fn offset(&self, kind: AttributeKind, index: usize) -> usize {
        let table = match kind {
            AttributeKind::Stat => BASE_STATS_OFFSET,
            AttributeKind::Skill => SKILLS_OFFSET,
            AttributeKind::Perk => PERKS_OFFSET,
        };
        self.critter_proto + table + index * I32_WIDTH
    }
}

/// A Fallout 2 save slot opened for in-place editing.
///
/// The whole file is held in memory; setters patch the big-endian integer
/// on disk first and only then update the buffer.
#[derive(Debug)]
pub struct SaveFile {
    path: PathBuf,
    bytes: Vec<u8>,
    header: SaveHeader,
    layout: PlayerLayout,
}

impl SaveFile {
    /// Open `<slot_dir>/SAVE.DAT`.
    pub fn open(slot_dir: impl AsRef<Path>) -> Result<Self, CoreError> {
        Self::open_file(slot_dir.as_ref().join(SAVE_FILE_NAME))
    }

    pub fn open_file(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        let bytes = fs::read(&path)
            .map_err(|e| CoreError::io(format_args!("failed to read {}", path.display()), e))?;

        let (header, layout) = locate_player_tables(&bytes).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Parse,
                format!("failed to parse {} as Fallout 2: {e}", path.display()),
            )
        })?;

        info!(
            "opened {} ({} bytes, critter proto at {})",
            path.display(),
            bytes.len(),
            layout.critter_proto
        );

        Ok(Self {
            path,
            bytes,
            header,
            layout,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn layout(&self) -> &PlayerLayout {
        &self.layout
    }

    fn read_i32_at(&self, offset: usize) -> i32 {
        let mut buf = [0u8; I32_WIDTH];
        buf.copy_from_slice(&self.bytes[offset..offset + I32_WIDTH]);
        i32::from_be_bytes(buf)
    }

    fn write_through(&mut self, offset: usize, value: i32) -> Result<(), CoreError> {
        let previous = self.read_i32_at(offset);
        patch_i32(&self.path, offset, value)
            .map_err(|e| CoreError::io(format_args!("failed to write {}", self.path.display()), e))?;
        self.bytes[offset..offset + I32_WIDTH].copy_from_slice(&value.to_be_bytes());

        debug!(
            "wrote {value} at offset {offset} of {} (was {previous})",
            self.path.display()
        );
        Ok(())
    }
}

/// Overwrite one big-endian integer in place; the rest of the file is not
/// rewritten.
fn patch_i32(path: &Path, offset: usize, value: i32) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).open(path)?;
    file.seek(SeekFrom::Start(offset as u64))?;
    file.write_all(&value.to_be_bytes())?;
    file.flush()
}

fn keys(kind: AttributeKind) -> &'static [&'static str] {
    match kind {
        AttributeKind::Skill => &SKILL_KEYS,
        AttributeKind::Perk => &PERK_KEYS,
        AttributeKind::Stat => &STAT_KEYS,
    }
}

fn key_index(kind: AttributeKind, name: &str) -> Result<usize, CoreError> {
    keys(kind)
        .iter()
        .position(|key| *key == name)
        .ok_or_else(|| kind.not_found(name))
}

impl SaveModel for SaveFile {
    fn info(&self) -> SaveInfo {
        SaveInfo {
            save_name: self.header.description.clone(),
            character_name: self.header.character_name.clone(),
        }
    }

    fn names(&self, kind: AttributeKind) -> Vec<String> {
        keys(kind).iter().map(|key| (*key).to_string()).collect()
    }

    fn get(&self, kind: AttributeKind, name: &str) -> Result<i32, CoreError> {
        let index = key_index(kind, name)?;
        Ok(self.read_i32_at(self.layout.offset(kind, index)))
    }

    fn set(&mut self, kind: AttributeKind, name: &str, value: i32) -> Result<(), CoreError> {
        let index = key_index(kind, name)?;
        kind.check_value(name, value)?;
        let offset = self.layout.offset(kind, index);
        self.write_through(offset, value)
    }
}

/// Walk the sections ahead of the player critter block and return the
/// header together with the offsets of the editable tables.
pub fn locate_player_tables(bytes: &[u8]) -> io::Result<(SaveHeader, PlayerLayout)> {
    let mut r = BigEndianReader::new(Cursor::new(bytes));

    // Header (30,051 bytes)
    let header = SaveHeader::parse(&mut r)?;

    // Handler 1: Player combat ID (4 bytes)
    let _player_combat_id = r.read_i32()?;

    // Handler 2: Game global variables (variable)
    let global_var_count = detect_global_var_count(&mut r)?;

    // Handler 3: Map file list + automap size
    let _maps = parse_map_file_list(&mut r)?;

    // Handler 4: Game global variables duplicate
    r.skip((global_var_count * I32_WIDTH) as u64)?;

    // Handler 5: Player object (variable length, recursive)
    let player = parse_player_object(&mut r)?;
    debug!(
        "player object pid=0x{:08x} with {} inventory entries, hp={:?}, center tile {}",
        player.object.pid,
        player.object.inventory.len(),
        player.object.hp,
        player.center_tile
    );

    // Handler 6: Critter proto data (372 bytes)
    let (critter_proto, detection_score) = locate_critter_proto(&mut r)?;

    let layout = PlayerLayout {
        critter_proto: critter_proto as usize,
        global_var_count,
        detection_score,
    };

    let perks_end = layout.offset(AttributeKind::Perk, PERK_COUNT);
    if perks_end > bytes.len() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "perk table ends at {perks_end}, past end of file ({} bytes)",
                bytes.len()
            ),
        ));
    }

    Ok((header, layout))
}
