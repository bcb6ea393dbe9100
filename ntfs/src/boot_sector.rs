//! Decodes the 512-byte NTFS boot sector into the handful of geometry
//! facts the rest of the crate needs: sector size, cluster size, the byte
//! size of a file record segment, and where the `$MFT` starts.

use byteorder::{ByteOrder, LittleEndian};
use ntfsidx_core::NtfsError;

use crate::structures::boot_sector::*;

/// Volume geometry derived from the boot sector. Everything downstream
/// (run-list decoding, MFT streaming) is expressed in terms of this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootSector {
    pub bytes_per_sector: u32,
    pub sectors_per_cluster: u32,
    pub bytes_per_cluster: u32,
    pub bytes_per_file_record_segment: u32,
    pub mft_start_lcn: u64,
}

impl BootSector {
    /// Byte offset of the start of `$MFT`'s first cluster.
    pub fn mft_start_byte(&self) -> u64 {
        self.mft_start_lcn * self.bytes_per_cluster as u64
    }
}

/// Parses and validates a 512-byte boot sector buffer.
///
/// Validates the `NTFS` OEM id and the `0x55AA` boot signature; anything
/// else means this isn't an NTFS volume (`NtfsError::NotNtfs`).
pub fn decode(sector: &[u8], volume_label: &str) -> Result<BootSector, NtfsError> {
    if sector.len() < SECTOR_SIZE {
        return Err(NtfsError::TruncatedRead {
            offset: 0,
            got: sector.len() as u64,
            want: SECTOR_SIZE as u64,
        });
    }

    let oem = &sector[OEM_ID_OFFSET..OEM_ID_OFFSET + OEM_ID_LEN];
    if &oem[..4] != OEM_ID_NTFS {
        return Err(NtfsError::NotNtfs(volume_label.to_string()));
    }

    let signature = LittleEndian::read_u16(&sector[BOOT_SIGNATURE_OFFSET..]);
    if signature != BOOT_SIGNATURE {
        return Err(NtfsError::NotNtfs(volume_label.to_string()));
    }

    let bytes_per_sector = LittleEndian::read_u16(&sector[BYTES_PER_SECTOR_OFFSET..]) as u32;
    let sectors_per_cluster = sector[SECTORS_PER_CLUSTER_OFFSET] as u32;
    let bytes_per_cluster = bytes_per_sector * sectors_per_cluster;

    let clusters_per_file_record_segment = sector[CLUSTERS_PER_FILE_RECORD_SEGMENT_OFFSET] as i8;
    let bytes_per_file_record_segment = record_segment_size(
        clusters_per_file_record_segment,
        bytes_per_cluster,
    );

    let mft_start_lcn = LittleEndian::read_u64(&sector[MFT_START_LCN_OFFSET..]);

    Ok(BootSector {
        bytes_per_sector,
        sectors_per_cluster,
        bytes_per_cluster,
        bytes_per_file_record_segment,
        mft_start_lcn,
    })
}

/// NTFS overloads the sign of this byte: a positive value is a cluster
/// count; a negative value `-n` means the record size is `2^n` bytes,
/// independent of cluster size (used when clusters are larger than a
/// record, e.g. 4 KiB clusters with 1 KiB records).
fn record_segment_size(raw: i8, bytes_per_cluster: u32) -> u32 {
    if raw < 0 {
        1u32 << (-(raw as i32))
    } else {
        raw as u32 * bytes_per_cluster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(clusters_per_record: i8, bytes_per_sector: u16, sectors_per_cluster: u8) -> Vec<u8> {
        let mut sector = vec![0u8; SECTOR_SIZE];
        sector[OEM_ID_OFFSET..OEM_ID_OFFSET + 4].copy_from_slice(b"NTFS");
        LittleEndian::write_u16(&mut sector[BYTES_PER_SECTOR_OFFSET..], bytes_per_sector);
        sector[SECTORS_PER_CLUSTER_OFFSET] = sectors_per_cluster;
        sector[CLUSTERS_PER_FILE_RECORD_SEGMENT_OFFSET] = clusters_per_record as u8;
        LittleEndian::write_u64(&mut sector[MFT_START_LCN_OFFSET..], 786_432);
        LittleEndian::write_u16(&mut sector[BOOT_SIGNATURE_OFFSET..], BOOT_SIGNATURE);
        sector
    }

    #[test]
    fn decodes_negative_record_size_convention() {
        let sector = fixture(-10, 512, 8);
        let decoded = decode(&sector, "C:").unwrap();
        assert_eq!(decoded.bytes_per_cluster, 4096);
        assert_eq!(decoded.bytes_per_file_record_segment, 1024);
        assert_eq!(decoded.mft_start_lcn, 786_432);
        assert_eq!(decoded.mft_start_byte(), 786_432 * 4096);
    }

    #[test]
    fn decodes_positive_record_size_convention() {
        let sector = fixture(1, 512, 1);
        let decoded = decode(&sector, "C:").unwrap();
        assert_eq!(decoded.bytes_per_cluster, 512);
        assert_eq!(decoded.bytes_per_file_record_segment, 512);
    }

    #[test]
    fn rejects_missing_oem_id() {
        let mut sector = fixture(-10, 512, 8);
        sector[OEM_ID_OFFSET..OEM_ID_OFFSET + 4].copy_from_slice(b"FAT ");
        assert!(matches!(
            decode(&sector, "D:"),
            Err(NtfsError::NotNtfs(label)) if label == "D:"
        ));
    }

    #[test]
    fn rejects_bad_boot_signature() {
        let mut sector = fixture(-10, 512, 8);
        LittleEndian::write_u16(&mut sector[BOOT_SIGNATURE_OFFSET..], 0);
        assert!(matches!(decode(&sector, "D:"), Err(NtfsError::NotNtfs(_))));
    }

    #[test]
    fn rejects_truncated_sector() {
        let sector = vec![0u8; 100];
        assert!(matches!(
            decode(&sector, "C:"),
            Err(NtfsError::TruncatedRead { .. })
        ));
    }
}
