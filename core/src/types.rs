/// A bitmask over drive letters 'A'..'Z' (bit 0 = 'A'), as accepted by
/// `open`/`reload`/the query entry points. Bits above 25 are accepted but
/// never correspond to a drive letter and are silently ignored.
pub type DriveBitmask = u32;

/// All 26 drive letters.
pub const ALL_DRIVES: DriveBitmask = 0x03FF_FFFF;

/// Returns the bit for a given drive letter ('A'..='Z', case-insensitive).
pub fn drive_bit(letter: char) -> Option<DriveBitmask> {
    let upper = letter.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        Some(1 << (upper as u32 - 'A' as u32))
    } else {
        None
    }
}

/// Returns the drive letter for bit index `i` (0-based, 'A' + i).
pub fn letter_for_index(i: u32) -> char {
    (b'A' + i as u8) as char
}

/// Filesystem kind tagged on an opened volume. Only `Ntfs` is ever decoded;
/// the others are retained as vestigial classification values inherited
/// from the multi-filesystem tool this crate's decoder was adapted from —
/// they are never produced by `BootSectorDecoder` today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilesystemType {
    Ntfs,
    Fat32,
    Fat,
    Ext2,
    Unknown,
}

/// A 0-based slot index into an opened [`crate::VolumeSet`] (0..32), never a
/// raw device handle. Consumers hold this, not the handle itself.
pub type VolumeId = usize;

pub const MAX_VOLUMES: usize = 32;
