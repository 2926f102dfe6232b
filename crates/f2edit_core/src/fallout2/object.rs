use std::io::{self, Read, Seek};

use crate::reader::BigEndianReader;

// Object type extracted from PID: (pid >> 24) & 0x0F
pub const OBJ_TYPE_ITEM: i32 = 0;
pub const OBJ_TYPE_CRITTER: i32 = 1;
pub const OBJ_TYPE_MISC: i32 = 5;

const BASE_FIELD_COUNT: usize = 18;
const PID_FIELD: usize = 11;
const CRITTER_DATA_FIELD_COUNT: usize = 11;
const CRITTER_HP_FIELD: usize = 8;
const EXIT_GRID_PIDS: std::ops::RangeInclusive<i32> = 0x500_0010..=0x500_0017;

pub fn obj_type_from_pid(pid: i32) -> i32 {
    (pid >> 24) & 0x0F
}

/// The parts of a saved object the editor needs: enough to step over it
/// (and its nested inventory) and to sanity-check the player record.
#[derive(Debug)]
pub struct GameObject {
    pub pid: i32,
    pub inventory_length: i32,
    pub hp: Option<i32>,
    pub inventory: Vec<InventoryItem>,
}

#[derive(Debug)]
pub struct InventoryItem {
    pub quantity: i32,
    pub object: GameObject,
}

impl GameObject {
    pub fn parse<R: Read + Seek>(r: &mut BigEndianReader<R>) -> io::Result<Self> {
        let base = r.read_i32_array::<BASE_FIELD_COUNT>()?;
        let pid = base[PID_FIELD];

        // Inventory header: length, capacity, placeholder pointer.
        let inventory_length = r.read_i32()?;
        let _inventory_capacity = r.read_i32()?;
        let _placeholder = r.read_i32()?;

        if !(-1..=1000).contains(&inventory_length) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "invalid inventory length {} for object pid=0x{:08x} at pos={}",
                    inventory_length,
                    pid,
                    r.position().unwrap_or(0)
                ),
            ));
        }

        let hp = match obj_type_from_pid(pid) {
            OBJ_TYPE_CRITTER => {
                let data = r.read_i32_array::<CRITTER_DATA_FIELD_COUNT>()?;
                Some(data[CRITTER_HP_FIELD])
            }
            OBJ_TYPE_ITEM => {
                skip_item_data(r)?;
                None
            }
            OBJ_TYPE_MISC => {
                // Only exit grids carry map, tile, elevation and rotation.
                if EXIT_GRID_PIDS.contains(&pid) {
                    r.skip(16)?;
                }
                None
            }
            _ => {
                // Scenery, walls, etc. write a single flags field.
                r.skip(4)?;
                None
            }
        };

        // Fallout saves can contain inventory_length == -1; treat as empty.
        let count = inventory_length.max(0);
        let mut inventory = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let quantity = r.read_i32()?;
            let object = GameObject::parse(r)?;
            inventory.push(InventoryItem { quantity, object });
        }

        Ok(Self {
            pid,
            inventory_length,
            hp,
            inventory,
        })
    }
}

/// Step over item proto update data.
///
/// Without .PRO files the item subtype is unknown, and subtypes carry 0
/// (armor, container, drug), 4 (ammo, misc, key) or 8 (weapon) bytes after
/// the flags field. Each size is probed and the one whose following bytes
/// look most like the next record wins.
fn skip_item_data<R: Read + Seek>(r: &mut BigEndianReader<R>) -> io::Result<()> {
    let _flags = r.read_i32()?;
    let after_flags = r.position()?;

    let mut best_extra = 0u64;
    let mut best_score = -1i32;
    for extra in [0u64, 4, 8] {
        r.seek_to(after_flags + extra)?;
        let score = score_next_record(r)?;
        if score > best_score {
            best_score = score;
            best_extra = extra;
        }
    }

    r.seek_to(after_flags + best_extra)
}

/// 3 = quantity, PID type and inventory length plausible; 2 = quantity and
/// PID type; 1 = quantity only (or end of data); 0 = nothing plausible.
fn score_next_record<R: Read + Seek>(r: &mut BigEndianReader<R>) -> io::Result<i32> {
    let peek_pos = r.position()?;

    let next_qty = match r.read_i32() {
        Ok(v) => v,
        Err(_) => {
            r.seek_to(peek_pos)?;
            return Ok(1);
        }
    };

    if next_qty <= 0 || next_qty > 10_000 {
        r.seek_to(peek_pos)?;
        return Ok(0);
    }

    let mut score = 1;

    let pid_pos = peek_pos + 4 + (PID_FIELD as u64) * 4;
    if r.seek_to(pid_pos).is_ok()
        && let Ok(next_pid) = r.read_i32()
        && (0..=5).contains(&obj_type_from_pid(next_pid))
    {
        score = 2;

        let inv_len_pos = peek_pos + 4 + (BASE_FIELD_COUNT as u64) * 4;
        if r.seek_to(inv_len_pos).is_ok()
            && let Ok(inv_len) = r.read_i32()
            && (0..1000).contains(&inv_len)
        {
            score = 3;
        }
    }

    r.seek_to(peek_pos)?;
    Ok(score)
}
