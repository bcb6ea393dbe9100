//! Decodes a single fixed-up file record segment into the handful of facts
//! the index needs: in-use/directory flags, the best `$FILE_NAME`, its
//! parent, and whether this record is an extension of some base record.

use byteorder::{ByteOrder, LittleEndian};
use ntfsidx_core::NtfsError;

use crate::attributes::AttributeWalker;
use crate::structures::attribute_type;
use crate::structures::file_name;
use crate::structures::record_header::*;

/// What a decoded file record contributed to the index.
#[derive(Debug, Clone)]
pub struct DecodedRecord {
    pub entry: u64,
    pub in_use: bool,
    pub is_directory: bool,
    /// `Some(base)` if this record only extends `base`'s attribute list
    /// (e.g. a record with many hard-linked names); its own name/parent,
    /// if any, belong to `base` once [`crate::linker`] runs.
    pub base_entry: Option<u64>,
    pub name: Option<String>,
    pub parent_entry: Option<u64>,
}

pub fn decode(record: &[u8], entry: u64) -> Result<DecodedRecord, NtfsError> {
    if record.len() < SIGNATURE_OFFSET + 4 || &record[SIGNATURE_OFFSET..SIGNATURE_OFFSET + 4] != SIGNATURE {
        return Err(NtfsError::CorruptRecord(format!("record {} missing FILE signature", entry)));
    }

    let flags = LittleEndian::read_u16(&record[FLAGS_OFFSET..]);
    let in_use = flags & FLAG_IN_USE != 0;
    let is_directory = flags & FLAG_IS_DIRECTORY != 0;

    let base_ref = LittleEndian::read_u64(&record[BASE_FILE_RECORD_OFFSET..]);
    let base_entry_raw = base_ref & FILE_REFERENCE_ENTRY_MASK;
    let base_entry = if base_entry_raw != 0 { Some(base_entry_raw) } else { None };

    let first_attribute_offset = LittleEndian::read_u16(&record[FIRST_ATTRIBUTE_OFFSET_OFFSET..]) as usize;

    let mut best_name: Option<(String, u64)> = None;

    for attr in AttributeWalker::new(record, first_attribute_offset) {
        let attr = attr?;
        if attr.attribute_type != attribute_type::FILE_NAME {
            continue;
        }
        if attr.value.len() < file_name::NAME_OFFSET {
            continue;
        }

        let name_type = attr.value[file_name::NAME_TYPE_OFFSET];
        if !file_name::is_win32_or_posix(name_type) {
            // DOS-only 8.3 alias; never a selection candidate, even if it
            // is the only $FILE_NAME attribute present.
            continue;
        }
        if best_name.is_some() {
            // First qualifying name wins.
            continue;
        }

        let name_length = attr.value[file_name::NAME_LENGTH_OFFSET] as usize;
        let name_bytes_len = name_length * 2;
        let name_start = file_name::NAME_OFFSET;
        if name_start + name_bytes_len > attr.value.len() {
            continue;
        }

        let parent_ref = LittleEndian::read_u64(&attr.value[file_name::PARENT_REFERENCE_OFFSET..]);
        let parent_entry = parent_ref & FILE_REFERENCE_ENTRY_MASK;

        let units: Vec<u16> = attr.value[name_start..name_start + name_bytes_len]
            .chunks_exact(2)
            .map(|c| LittleEndian::read_u16(c))
            .collect();
        let name = String::from_utf16_lossy(&units);

        best_name = Some((name, parent_entry));
    }

    let (name, parent_entry) = match best_name {
        Some((name, parent)) => (Some(name), Some(parent)),
        None => (None, None),
    };

    Ok(DecodedRecord { entry, in_use, is_directory, base_entry, name, parent_entry })
}
