//! The decoder's only contact with the outside world: a positioned byte
//! source. Kept as a trait so the rest of this crate is testable without a
//! real raw volume handle.

use ntfsidx_core::NtfsError;

pub trait DeviceRead {
    /// Reads `buf.len()` bytes starting at byte offset `offset`, returning
    /// the number of bytes actually read.
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize, NtfsError>;
}

impl DeviceRead for ntfsidx_platform::RawDevice {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize, NtfsError> {
        ntfsidx_platform::RawDevice::read_at(self, offset, buf)
    }
}

/// Reads a full buffer, returning `NtfsError::TruncatedRead` on a short read.
pub fn read_exact(device: &dyn DeviceRead, offset: u64, buf: &mut [u8]) -> Result<(), NtfsError> {
    let got = device.read_at(offset, buf)?;
    if got != buf.len() {
        return Err(NtfsError::TruncatedRead { offset, got: got as u64, want: buf.len() as u64 });
    }
    Ok(())
}

#[cfg(test)]
pub(crate) struct MemoryDevice {
    pub data: Vec<u8>,
}

#[cfg(test)]
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
