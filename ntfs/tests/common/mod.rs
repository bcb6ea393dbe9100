//! Shared fixture-building helpers for the byte-exact synthetic volume
//! scenarios in `tests/scenarios.rs`.

use byteorder::{ByteOrder, LittleEndian};
use ntfsidx_ntfs::device::DeviceRead;
use ntfsidx_core::NtfsError;

pub const SECTOR_SIZE: usize = 512;
pub const RECORD_SIZE: usize = 1024;
pub const BYTES_PER_CLUSTER: usize = 512;

/// An in-memory block device backing a fabricated volume image.
pub struct MemoryDevice {
    pub data: Vec<u8>,
}

impl DeviceRead for MemoryDevice {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize, NtfsError> {
        let offset = offset as usize;
        if offset >= self.data.len() {
            return Ok(0);
        }
        let available = &self.data[offset..];
        let n = buf.len().min(available.len());
        buf[..n].copy_from_slice(&available[..n]);
        Ok(n)
    }
}

pub fn boot_sector(mft_start_lcn: u64) -> Vec<u8> {
    let mut sector = vec![0u8; SECTOR_SIZE];
    sector[0x03..0x07].copy_from_slice(b"NTFS");
    LittleEndian::write_u16(&mut sector[0x0B..], SECTOR_SIZE as u16);
    sector[0x0D] = (BYTES_PER_CLUSTER / SECTOR_SIZE) as u8;
    sector[0x40] = (-10i8) as u8; // 2^10 = 1024-byte records
    LittleEndian::write_u64(&mut sector[0x30..], mft_start_lcn);
    LittleEndian::write_u16(&mut sector[0x1FE..], 0xAA55);
    sector
}

/// A resident `$FILE_NAME` attribute with the given namespace and parent.
pub fn file_name_attr(name: &str, name_type: u8, parent_entry: u64) -> Vec<u8> {
    const NAME_OFFSET: usize = 0x42;
    let name_utf16: Vec<u8> = name.encode_utf16().flat_map(|u| u.to_le_bytes()).collect();

    let mut value = vec![0u8; NAME_OFFSET];
    LittleEndian::write_u64(&mut value[0x00..], parent_entry);
    value[0x40] = name.encode_utf16().count() as u8;
    value[0x41] = name_type;
    value.extend_from_slice(&name_utf16);

    attribute(0x30, &value)
}

/// A non-resident `$DATA` attribute wrapping a run-list byte stream.
pub fn data_attr_nonresident(run_bytes: &[u8], data_size: u64) -> Vec<u8> {
    let header_len = 0x40usize;
    let mut header = vec![0u8; header_len];
    LittleEndian::write_u64(&mut header[0x30..], data_size); // DATA_SIZE_OFFSET
    LittleEndian::write_u16(&mut header[0x20..], header_len as u16); // RUN_ARRAY_OFFSET_OFFSET

    attribute_raw(0x80, true, &header[0x10..], run_bytes)
}

fn attribute(attribute_type: u32, value: &[u8]) -> Vec<u8> {
    let header_len = 24usize;
    let total = header_len + value.len();
    let mut buf = vec![0u8; total];
    LittleEndian::write_u32(&mut buf[0x00..], attribute_type);
    LittleEndian::write_u32(&mut buf[0x04..], total as u32);
    buf[0x08] = 0; // resident
    LittleEndian::write_u32(&mut buf[0x10..], value.len() as u32); // resident value length
    LittleEndian::write_u16(&mut buf[0x14..], header_len as u16); // resident value offset
    buf[header_len..].copy_from_slice(value);
    buf
}

fn attribute_raw(attribute_type: u32, non_resident: bool, after_common_header: &[u8], run_bytes: &[u8]) -> Vec<u8> {
    let common_len = 16usize;
    let type_specific_len = after_common_header.len();
    let header_len = common_len + type_specific_len;
    let total = header_len + run_bytes.len();

    let mut buf = vec![0u8; total];
    LittleEndian::write_u32(&mut buf[0x00..], attribute_type);
    LittleEndian::write_u32(&mut buf[0x04..], total as u32);
    buf[0x08] = non_resident as u8;
    buf[common_len..common_len + type_specific_len].copy_from_slice(after_common_header);
    buf[header_len..].copy_from_slice(run_bytes);
    buf
}

/// Assembles a record's attribute stream (already-built attribute byte
/// blobs, concatenated) behind the common `FILE` header, then applies the
/// on-disk fixup stamp (the inverse of [`ntfsidx_ntfs::fixup::apply`]) so
/// the byte-exact image looks like something NTFS itself wrote.
pub fn build_record(entry_flags: u16, base_ref: u64, attrs: &[Vec<u8>]) -> Vec<u8> {
    let first_attribute_offset = 0x38usize;
    let mut attr_bytes = Vec::new();
    for a in attrs {
        attr_bytes.extend_from_slice(a);
    }
    attr_bytes.extend_from_slice(&0xFFFF_FFFFu32.to_le_bytes());

    let mut record = vec![0u8; RECORD_SIZE];
    record[0x00..0x04].copy_from_slice(b"FILE");
    LittleEndian::write_u16(&mut record[0x16..], entry_flags); // FLAGS_OFFSET
    LittleEndian::write_u16(&mut record[0x14..], first_attribute_offset as u16); // FIRST_ATTRIBUTE_OFFSET_OFFSET
    LittleEndian::write_u64(&mut record[0x20..], base_ref); // BASE_FILE_RECORD_OFFSET
    assert!(first_attribute_offset + attr_bytes.len() <= RECORD_SIZE);
    record[first_attribute_offset..first_attribute_offset + attr_bytes.len()].copy_from_slice(&attr_bytes);

    stamp(&mut record);
    record
}

/// Writes the Update Sequence Array the way NTFS itself would: saves each
/// sector's last two bytes, stamps them, and records the originals.
fn stamp(record: &mut [u8]) {
    let usa_offset = 0x30usize;
    let sectors = RECORD_SIZE / SECTOR_SIZE;
    let usa_count = sectors + 1;
    let stamp_value: u16 = 0x0001;

    LittleEndian::write_u16(&mut record[0x04..], usa_offset as u16); // USA_OFFSET_OFFSET
    LittleEndian::write_u16(&mut record[0x06..], usa_count as u16); // USA_COUNT_OFFSET
    LittleEndian::write_u16(&mut record[usa_offset..], stamp_value);

    for i in 0..sectors {
        let pos = (i + 1) * SECTOR_SIZE - 2;
        let original = LittleEndian::read_u16(&record[pos..]);
        LittleEndian::write_u16(&mut record[usa_offset + (i + 1) * 2..], original);
        LittleEndian::write_u16(&mut record[pos..pos + 2], stamp_value);
    }
}

/// Lays out a contiguous (non-sparse) `$MFT` run covering `entry_count`
/// records, builds record 0 to describe it, and assembles the full disk
/// image: boot sector, then the MFT data run back to back starting at
/// `mft_start_lcn`.
pub fn build_volume(mft_start_lcn: u64, entries: Vec<(u64, Vec<u8>)>, entry_count: u64) -> MemoryDevice {
    let clusters_per_record = (RECORD_SIZE / BYTES_PER_CLUSTER) as u64;
    let total_clusters = entry_count * clusters_per_record;

    let mut run_bytes = Vec::new();
    run_bytes.push(0x31u8); // length field 1 byte, offset field 3 bytes
    run_bytes.push(total_clusters as u8);
    run_bytes.extend_from_slice(&(mft_start_lcn as u32).to_le_bytes()[..3]);
    run_bytes.push(0); // terminator

    let data_size = entry_count * RECORD_SIZE as u64;
    let record0 = build_record(0x0001, 0, &[data_attr_nonresident(&run_bytes, data_size)]);

    let mut by_entry = vec![vec![0u8; RECORD_SIZE]; entry_count as usize];
    by_entry[0] = record0;
    for (entry, bytes) in entries {
        by_entry[entry as usize] = bytes;
    }

    let mft_region_start = mft_start_lcn as usize * BYTES_PER_CLUSTER;
    let mft_region_len = total_clusters as usize * BYTES_PER_CLUSTER;

    let mut disk = vec![0u8; mft_region_start + mft_region_len];
    disk[..SECTOR_SIZE].copy_from_slice(&boot_sector(mft_start_lcn));

    for (i, record) in by_entry.into_iter().enumerate() {
        let start = mft_region_start + i * RECORD_SIZE;
        disk[start..start + RECORD_SIZE].copy_from_slice(&record);
    }

    MemoryDevice { data: disk }
}
