use ntfsidx_core::{DriveBitmask, NtfsError};

/// No raw `\\.\X:`-style volume handle exists outside Windows. The decoder
/// itself is fully portable and unit-testable here; only device access is
/// unavailable.
pub struct RawDevice;

impl RawDevice {
    pub fn open(drive_letter: char) -> Result<Self, NtfsError> {
        Err(NtfsError::DeviceOpen {
            path: format!("{}:", drive_letter),
            source: std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "raw NTFS volume access is only available on Windows",
            ),
        })
    }

    pub fn read_at(&self, _offset: u64, _buf: &mut [u8]) -> Result<usize, NtfsError> {
        unreachable!("RawDevice::open always fails on this platform")
    }

    pub fn path(&self) -> &str {
        ""
    }
}

pub fn fixed_drive_letters() -> DriveBitmask {
    0
}
