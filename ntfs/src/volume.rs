//! Opens one drive letter end to end: raw device handle, boot sector,
//! full MFT index. This is the unit [`VolumeSet`] manages one-per-drive.

use ntfsidx_core::NtfsError;

use crate::boot_sector::{self, BootSector};
use crate::device::{read_exact, DeviceRead};
use crate::index::MftIndex;
use crate::progress::Progress;
use crate::structures::boot_sector::SECTOR_SIZE;

pub struct Volume {
    pub drive_letter: char,
    pub boot_sector: BootSector,
    pub index: MftIndex,
}

impl Volume {
    pub fn open(device: &dyn DeviceRead, drive_letter: char) -> Result<Self, NtfsError> {
        Self::open_with_progress(device, drive_letter, None)
    }

    pub fn open_with_progress(
        device: &dyn DeviceRead,
        drive_letter: char,
        progress: Option<&Progress>,
    ) -> Result<Self, NtfsError> {
        let mut sector = vec![0u8; SECTOR_SIZE];
        read_exact(device, 0, &mut sector)?;

        let label = format!("{}:", drive_letter);
        let boot_sector = boot_sector::decode(&sector, &label)?;

        log::info!("opened NTFS volume {} ({} bytes/cluster)", label, boot_sector.bytes_per_cluster);

        let index = MftIndex::build(device, &boot_sector, drive_letter, progress)?;

        Ok(Self { drive_letter, boot_sector, index })
    }
}
