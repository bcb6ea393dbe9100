mod device;

pub use device::{fixed_drive_letters, RawDevice};
