//! Per-OS raw block device access.
//!
//! The NTFS decoder in `ntfsidx-ntfs` is platform-independent; this crate is
//! the only place that touches an OS handle. On non-Windows targets, opening
//! a device always fails — there is no `\\.\X:`-style raw volume handle to
//! open — but `fixed_drive_letters` still returns an empty mask rather than
//! erroring, so callers can build and test the decoder anywhere.

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::{fixed_drive_letters, RawDevice};

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub use linux::{fixed_drive_letters, RawDevice};

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
pub use macos::{fixed_drive_letters, RawDevice};

#[cfg(not(any(windows, target_os = "linux", target_os = "macos")))]
mod generic;
#[cfg(not(any(windows, target_os = "linux", target_os = "macos")))]
pub use generic::{fixed_drive_letters, RawDevice};
