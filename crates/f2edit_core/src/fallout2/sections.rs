use std::io::{self, Read, Seek};

use log::trace;

use crate::reader::BigEndianReader;

use super::object::GameObject;
use super::types::{
    CRITTER_PROTO_SIZE, KILL_TYPE_COUNT, SAVEABLE_STAT_COUNT, SKILL_COUNT, SPECIAL_STAT_COUNT,
    TAGGED_SKILL_COUNT,
};

const MAX_GLOBAL_VAR_COUNT: usize = 5000;
const MAX_MAP_FILE_COUNT: i32 = 512;
const MAP_FILENAME_MAX: usize = 16;
const CRITTER_SEARCH_BEFORE: i64 = 256;
const CRITTER_SEARCH_AFTER: i64 = 1024;
const MIN_CRITTER_SCORE: i32 = 12;

// --- Handler 2: Game Global Variables ---

/// Auto-detect handler 2 length by validating the handler 3 map payload and
/// the handler 4 duplicate globals block that follow it.
///
/// Leaves the reader positioned at the start of handler 3.
pub fn detect_global_var_count<R: Read + Seek>(r: &mut BigEndianReader<R>) -> io::Result<usize> {
    let handler2_start = r.position()?;

    for n in 1..MAX_GLOBAL_VAR_COUNT {
        r.seek_to(handler2_start)?;

        let globals = match r.read_i32_vec(n) {
            Ok(v) => v,
            Err(_) => break,
        };

        let map_section = match parse_map_file_list(r) {
            Ok(v) => v,
            Err(_) => continue,
        };

        if !map_section
            .map_files
            .iter()
            .all(|name| name.to_ascii_uppercase().ends_with(".SAV"))
        {
            continue;
        }
        if !(0..=200_000_000).contains(&map_section.automap_size) {
            continue;
        }

        // Handler 4 duplicates handler 2 exactly.
        match r.read_i32_vec(n) {
            Ok(duplicate) if duplicate == globals => {}
            _ => continue,
        }

        r.seek_to(handler2_start + (n as u64) * 4)?;
        return Ok(n);
    }

    Err(io::Error::new(
        io::ErrorKind::InvalidData,
        "could not detect Fallout 2 global variable count",
    ))
}

// --- Handler 3: Map Data ---

pub struct MapFileList {
    pub map_files: Vec<String>,
    pub automap_size: i32,
}

pub fn parse_map_file_list<R: Read + Seek>(r: &mut BigEndianReader<R>) -> io::Result<MapFileList> {
    let map_file_count = r.read_i32()?;
    if map_file_count <= 0 || map_file_count > MAX_MAP_FILE_COUNT {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "invalid map file count",
        ));
    }

    let mut map_files = Vec::with_capacity(map_file_count as usize);
    for _ in 0..map_file_count {
        let filename = r.read_null_terminated_string(MAP_FILENAME_MAX)?;
        if filename.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "empty map filename",
            ));
        }
        map_files.push(filename);
    }

    let automap_size = r.read_i32()?;

    Ok(MapFileList {
        map_files,
        automap_size,
    })
}

// --- Handler 5: Player Object ---

pub struct PlayerObject {
    pub object: GameObject,
    pub center_tile: i32,
}

pub fn parse_player_object<R: Read + Seek>(r: &mut BigEndianReader<R>) -> io::Result<PlayerObject> {
    let object = GameObject::parse(r)?;
    let center_tile = r.read_i32()?;
    Ok(PlayerObject {
        object,
        center_tile,
    })
}

// --- Handler 6: Critter Proto Data ---

#[derive(Debug, Clone)]
pub struct CritterProto {
    pub base_stats: [i32; SAVEABLE_STAT_COUNT],
    pub skills: [i32; SKILL_COUNT],
    pub body_type: i32,
    pub experience: i32,
}

pub fn parse_critter_proto<R: Read + Seek>(r: &mut BigEndianReader<R>) -> io::Result<CritterProto> {
    let _sneak_working = r.read_i32()?;
    let _flags = r.read_i32()?;
    let base_stats = r.read_i32_array::<SAVEABLE_STAT_COUNT>()?;
    let _bonus_stats = r.read_i32_array::<SAVEABLE_STAT_COUNT>()?;
    let skills = r.read_i32_array::<SKILL_COUNT>()?;
    let body_type = r.read_i32()?;
    let experience = r.read_i32()?;
    let _kill_type = r.read_i32()?;

    Ok(CritterProto {
        base_stats,
        skills,
        body_type,
        experience,
    })
}

/// Find the file offset of handler 6 by scoring candidates around the
/// current position.
///
/// Fallout 2 object inventories can be hard to parse without full proto
/// metadata, so we anchor on the highly-structured critter proto block
/// rather than trusting the end of handler 5. Returns the offset and the
/// winning score; the reader is left at the start of the block.
pub fn locate_critter_proto<R: Read + Seek>(r: &mut BigEndianReader<R>) -> io::Result<(u64, i32)> {
    let guessed_pos = r.position()?;
    let file_len = r.len()?;

    let mut best_pos = None;
    let mut best_score = i32::MIN;

    for delta in (-CRITTER_SEARCH_BEFORE..=CRITTER_SEARCH_AFTER).step_by(4) {
        let Some(pos) = guessed_pos.checked_add_signed(delta) else {
            continue;
        };
        if pos + CRITTER_PROTO_SIZE as u64 > file_len {
            continue;
        }

        r.seek_to(pos)?;
        let Ok(candidate) = parse_critter_proto(r) else {
            continue;
        };
        let Ok(kills) = r.read_i32_array::<KILL_TYPE_COUNT>() else {
            continue;
        };
        let Ok(tagged) = r.read_i32_array::<TAGGED_SKILL_COUNT>() else {
            continue;
        };

        let score = score_critter_proto_candidate(&candidate, &kills, &tagged);
        if score > best_score {
            best_score = score;
            best_pos = Some(pos);
        }
    }

    let pos = match best_pos {
        Some(v) if best_score >= MIN_CRITTER_SCORE => v,
        _ => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "could not align Fallout 2 critter proto section",
            ));
        }
    };

    trace!("critter proto at {pos} (guessed {guessed_pos}, score {best_score})");
    r.seek_to(pos)?;
    Ok((pos, best_score))
}

fn score_critter_proto_candidate(
    candidate: &CritterProto,
    kills: &[i32; KILL_TYPE_COUNT],
    tagged: &[i32; TAGGED_SKILL_COUNT],
) -> i32 {
    let mut score = 0;

    if candidate
        .base_stats
        .iter()
        .take(SPECIAL_STAT_COUNT)
        .all(|v| (1..=10).contains(v))
    {
        score += 12;
    }

    if candidate.skills.iter().all(|v| (0..=400).contains(v)) {
        score += 6;
    }

    if (0..=100_000_000).contains(&candidate.experience) {
        score += 2;
    }
    if (0..=64).contains(&candidate.body_type) {
        score += 1;
    }

    if kills.iter().all(|v| (0..=1_000_000).contains(v)) {
        score += 3;
    }

    if tagged
        .iter()
        .all(|&skill| skill == -1 || (0..SKILL_COUNT as i32).contains(&skill))
    {
        score += 4;
    }

    let mut chosen: Vec<i32> = tagged.iter().copied().filter(|v| *v >= 0).collect();
    if !chosen.is_empty() {
        score += 2;
    }
    let chosen_len = chosen.len();
    chosen.sort_unstable();
    chosen.dedup();
    if chosen.len() == chosen_len {
        score += 2;
    }

    score
}
