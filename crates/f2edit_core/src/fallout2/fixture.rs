//! Synthetic SAVE.DAT images for tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::types::{
    HEADER_PADDING, HEADER_SIZE, KILL_TYPE_COUNT, PERK_COUNT, PREVIEW_SIZE, SAVE_FILE_NAME,
    SIGNATURE, SIGNATURE_SIZE, SKILL_COUNT, SPECIAL_STAT_COUNT, TAGGED_SKILL_COUNT,
};

const PLAYER_PID: i32 = 0x0100_0000;

// Max HP, AP, AC, unarmed/melee damage, carry weight, sequence, healing
// rate, crit chance, better crits, DT x7, DR x7, rad/poison resistance,
// age, gender.
const DERIVED_STATS: [i32; 28] = [
    30, 8, 5, 1, 1, 150, 10, 1, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 10, 25, 0,
];

#[derive(Debug, Clone)]
pub struct SaveDatBuilder {
    pub character_name: String,
    pub description: String,
    pub global_vars: Vec<i32>,
    pub map_files: Vec<String>,
    pub special: [i32; SPECIAL_STAT_COUNT],
    pub skills: [i32; SKILL_COUNT],
    pub perks: [i32; PERK_COUNT],
    pub tagged_skills: [i32; TAGGED_SKILL_COUNT],
}

impl Default for SaveDatBuilder {
    fn default() -> Self {
        let mut perks = [0; PERK_COUNT];
        perks[12] = 1; // toughness
        Self {
            character_name: "Narg".to_string(),
            description: "TEST".to_string(),
            global_vars: vec![0; 12],
            map_files: vec!["ARTEMPLE.SAV".to_string(), "ARVILLAG.SAV".to_string()],
            special: [6, 7, 5, 4, 8, 6, 4],
            skills: [
                10, 0, 0, 20, 15, 5, 8, 2, 5, 3, 0, 4, 12, 6, 10, 8, 2, 7,
            ],
            perks,
            tagged_skills: [0, 3, 14, -1],
        }
    }
}

impl SaveDatBuilder {
    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.push_header(&mut out);

        // Handler 1: player combat id.
        push_i32s(&mut out, &[0x0002_1d4f]);

        // Handlers 2-4: globals, map list, duplicate globals.
        push_i32s(&mut out, &self.global_vars);
        push_i32s(&mut out, &[self.map_files.len() as i32]);
        for name in &self.map_files {
            out.extend_from_slice(name.as_bytes());
            out.push(0);
        }
        push_i32s(&mut out, &[4096]);
        push_i32s(&mut out, &self.global_vars);

        // Handler 5: player object with an empty inventory, then center tile.
        push_i32s(
            &mut out,
            &[
                0x4000_0000, 20100, 0, 0, 0, 0, 0, 2, 0x0100_003e, 0x2000_0000, 0, PLAYER_PID, 0,
                4, 0x0001_0000, 0, -1, -1,
            ],
        );
        push_i32s(&mut out, &[0, 0, 0]);
        push_i32s(&mut out, &[0, 0, 0, 8, 0, -1, 0, -1, 30, 0, 0]);
        push_i32s(&mut out, &[20100]);

        // Handler 6: critter proto.
        debug_assert_eq!(out.len(), self.critter_proto_offset());
        push_i32s(&mut out, &[0, 0]);
        push_i32s(&mut out, &self.special);
        push_i32s(&mut out, &DERIVED_STATS);
        push_i32s(&mut out, &[0; SPECIAL_STAT_COUNT + DERIVED_STATS.len()]);
        push_i32s(&mut out, &self.skills);
        push_i32s(&mut out, &[0, 350, -1]);

        // Handlers 7, 8 and the player's perk ranks.
        push_i32s(&mut out, &[0; KILL_TYPE_COUNT]);
        push_i32s(&mut out, &self.tagged_skills);
        push_i32s(&mut out, &self.perks);

        // Combat state, PC stats, traits, automap flags and preferences.
        push_i32s(&mut out, &[0x02, 0, 1, 350, 0, 0, -1, -1, 0, 1, 1, 2, 1, 0]);

        out
    }

    /// Offset of handler 6 in the image produced by `build`.
    pub fn critter_proto_offset(&self) -> usize {
        let map_list: usize = 4 + self
            .map_files
            .iter()
            .map(|name| name.len() + 1)
            .sum::<usize>()
            + 4;
        let player_object = (18 + 3 + 11) * 4 + 4;
        HEADER_SIZE + 4 + self.global_vars.len() * 4 * 2 + map_list + player_object
    }

    /// Write the image as `<dir>/<slot>/SAVE.DAT` and return the slot path.
    pub fn write_slot(&self, dir: &Path, slot: &str) -> io::Result<PathBuf> {
        let slot_dir = dir.join(slot);
        fs::create_dir_all(&slot_dir)?;
        fs::write(slot_dir.join(SAVE_FILE_NAME), self.build())?;
        Ok(slot_dir)
    }

    fn push_header(&self, out: &mut Vec<u8>) {
        let start = out.len();
        push_padded(out, SIGNATURE, SIGNATURE_SIZE);
        out.extend_from_slice(&1i16.to_be_bytes());
        out.extend_from_slice(&1i16.to_be_bytes());
        out.push(b'R');
        push_padded(out, self.character_name.as_bytes(), 32);
        push_padded(out, self.description.as_bytes(), 30);
        out.resize(start + HEADER_SIZE - PREVIEW_SIZE - HEADER_PADDING, 0);
        out.resize(start + HEADER_SIZE, 0);
    }
}

fn push_i32s(out: &mut Vec<u8>, values: &[i32]) {
    for v in values {
        out.extend_from_slice(&v.to_be_bytes());
    }
}

fn push_padded(out: &mut Vec<u8>, bytes: &[u8], width: usize) {
    let len = bytes.len().min(width);
    out.extend_from_slice(&bytes[..len]);
    out.resize(out.len() + width - len, 0);
}
