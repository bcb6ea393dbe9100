use log::{debug, warn};
use ntfsidx_core::{DriveBitmask, NtfsError};
use windows::core::PCWSTR;
use windows::Win32::Foundation::{CloseHandle, HANDLE, INVALID_HANDLE_VALUE};
use windows::Win32::Storage::FileSystem::{
    CreateFileW, GetDriveTypeW, GetLogicalDrives, ReadFile, SetFilePointerEx, DRIVE_FIXED,
    FILE_BEGIN, FILE_FLAG_BACKUP_SEMANTICS, FILE_SHARE_READ, FILE_SHARE_WRITE, GENERIC_READ,
    OPEN_EXISTING,
};

/// A positioned-read handle onto a raw NTFS volume, opened as `\\.\X:`.
///
/// Shares read/write access with the mounted filesystem driver (other
/// processes keep using the volume normally) and is consumed by exactly one
/// decoding pipeline at a time — it carries no internal synchronization.
pub struct RawDevice {
    handle: HANDLE,
    path: String,
}

impl RawDevice {
    /// Opens a volume by drive letter, e.g. `open('C')` opens `\\.\C:`.
    pub fn open(drive_letter: char) -> Result<Self, NtfsError> {
        let path = format!("\\\\.\\{}:", drive_letter.to_ascii_uppercase());
        let wide: Vec<u16> = path.encode_utf16().chain(std::iter::once(0)).collect();

        debug!("opening raw volume handle for {}", path);

        let handle = unsafe {
            CreateFileW(
                PCWSTR(wide.as_ptr()),
                GENERIC_READ.0,
                FILE_SHARE_READ | FILE_SHARE_WRITE,
                None,
                OPEN_EXISTING,
                FILE_FLAG_BACKUP_SEMANTICS,
                None,
            )
        }
        .map_err(|e| NtfsError::DeviceOpen {
            path: path.clone(),
            source: std::io::Error::from_raw_os_error(e.code().0),
        })?;

        if handle == INVALID_HANDLE_VALUE {
            return Err(NtfsError::DeviceOpen {
                path,
                source: std::io::Error::last_os_error(),
            });
        }

        Ok(Self { handle, path })
    }

    /// Reads `buf.len()` bytes starting at byte offset `offset`, returning
    /// the number of bytes actually read (short on a final truncated read).
    pub fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize, NtfsError> {
        unsafe {
            SetFilePointerEx(self.handle, offset as i64, None, FILE_BEGIN).map_err(|e| {
                NtfsError::Io(std::io::Error::from_raw_os_error(e.code().0))
            })?;
        }

        let mut bytes_read: u32 = 0;
        unsafe { ReadFile(self.handle, Some(buf), Some(&mut bytes_read), None) }.map_err(|e| {
            NtfsError::Io(std::io::Error::from_raw_os_error(e.code().0))
        })?;

        Ok(bytes_read as usize)
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Drop for RawDevice {
    fn drop(&mut self) {
        if self.handle != INVALID_HANDLE_VALUE {
            unsafe {
                let _ = CloseHandle(self.handle);
            }
        }
    }
}

// Raw Win32 handles are not `Send`/`Sync` by default; a single volume handle
// is only ever touched by the one decoding pipeline that owns it (see §5 of
// the concurrency model), so this is safe.
unsafe impl Send for RawDevice {}

/// Bitmask (bit i ↔ drive letter 'A'+i) of drive letters that both exist and
/// are reported `DRIVE_FIXED` by the host OS.
pub fn fixed_drive_letters() -> DriveBitmask {
    let present = unsafe { GetLogicalDrives() };
    let mut fixed = 0u32;

    for i in 0..26u32 {
        if present & (1 << i) == 0 {
            continue;
        }

        let letter = (b'A' + i as u8) as char;
        let root = format!("{}:\\", letter);
        let wide: Vec<u16> = root.encode_utf16().chain(std::iter::once(0)).collect();

        let drive_type = unsafe { GetDriveTypeW(PCWSTR(wide.as_ptr())) };
        if drive_type == DRIVE_FIXED {
            fixed |= 1 << i;
        } else {
            warn!("drive {} is not DRIVE_FIXED ({:?}), skipping", letter, drive_type);
        }
    }

    fixed
}
