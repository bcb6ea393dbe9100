//! Update Sequence Array (USA) fixup: NTFS stamps the last two bytes of
//! every on-disk sector with a generation counter, then relocates the
//! original sector-end bytes into a small array in the record header. A
//! record is unreadable until this substitution is undone.

use byteorder::{ByteOrder, LittleEndian};
use ntfsidx_core::NtfsError;

use crate::structures::boot_sector::SECTOR_SIZE;
use crate::structures::record_header::{SIGNATURE, SIGNATURE_OFFSET, USA_COUNT_OFFSET, USA_OFFSET_OFFSET};

/// Applies the fixup in place and verifies each stamped sector.
///
/// `usa_count` bounds the number of 512-byte sectors a record can claim to
/// span; a record whose header claims more sectors than its own size could
/// possibly hold is corrupt, not merely large — this guard must scale with
/// `record.len()`, not assume a fixed record size.
pub fn apply(record: &mut [u8]) -> Result<(), NtfsError> {
    if record.len() < SIGNATURE_OFFSET + 4 || &record[SIGNATURE_OFFSET..SIGNATURE_OFFSET + 4] != SIGNATURE {
        return Err(NtfsError::CorruptRecord("missing FILE signature".to_string()));
    }

    let usa_offset = LittleEndian::read_u16(&record[USA_OFFSET_OFFSET..]) as usize;
    let usa_count = LittleEndian::read_u16(&record[USA_COUNT_OFFSET..]) as usize;

    let max_sectors = record.len() / SECTOR_SIZE + 1;
    if usa_count == 0 || usa_count > max_sectors {
        return Err(NtfsError::CorruptRecord(format!(
            "usa_count {} exceeds {} sectors for a {}-byte record",
            usa_count,
            max_sectors,
            record.len()
        )));
    }

    if usa_offset + usa_count * 2 > record.len() {
        return Err(NtfsError::CorruptRecord("update sequence array runs past record end".to_string()));
    }

    let usa: Vec<u16> = (0..usa_count)
        .map(|i| LittleEndian::read_u16(&record[usa_offset + i * 2..]))
        .collect();

    let stamp = usa[0];
    let sectors = usa_count - 1;

    for i in 0..sectors {
        let pos = (i + 1) * SECTOR_SIZE - 2;
        if pos + 2 > record.len() {
            break;
        }

        let current = LittleEndian::read_u16(&record[pos..]);
        if current != stamp {
            return Err(NtfsError::CorruptRecord(format!(
                "sector {} fixup stamp mismatch: expected {:#06x}, found {:#06x}",
                i, stamp, current
            )));
        }

        LittleEndian::write_u16(&mut record[pos..pos + 2], usa[i + 1]);
    }

    Ok(())
}
