pub mod error;
pub mod types;

pub use error::NtfsError;
pub use types::{drive_bit, letter_for_index, DriveBitmask, FilesystemType, VolumeId, ALL_DRIVES, MAX_VOLUMES};
