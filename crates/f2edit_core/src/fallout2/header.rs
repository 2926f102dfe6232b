use std::io::{self, Read, Seek};

use crate::reader::BigEndianReader;

use super::types::{HEADER_PADDING, PREVIEW_SIZE, SIGNATURE, SIGNATURE_SIZE};

// File date/time, game date/time, elevation, map id and map filename.
const DATE_AND_MAP_FIELDS_SIZE: usize = 40;

#[derive(Debug, Clone)]
pub struct SaveHeader {
    pub character_name: String,
    pub description: String,
}

impl SaveHeader {
    pub fn parse<R: Read + Seek>(r: &mut BigEndianReader<R>) -> io::Result<Self> {
        let sig_bytes = r.read_bytes(SIGNATURE_SIZE)?;
        if &sig_bytes[..SIGNATURE.len()] != SIGNATURE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "invalid save file signature",
            ));
        }

        let version_minor = r.read_i16()?;
        let version_major = r.read_i16()?;
        let version_release = r.read_u8()?;
        if version_minor != 1 || version_major != 1 || version_release != b'R' {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "unsupported version: {}.{}{}",
                    version_major, version_minor, version_release as char
                ),
            ));
        }

        let character_name = r.read_fixed_string(32)?;
        let description = r.read_fixed_string(30)?;

        r.skip((DATE_AND_MAP_FIELDS_SIZE + PREVIEW_SIZE + HEADER_PADDING) as u64)?;

        Ok(Self {
            character_name,
            description,
        })
    }
}
