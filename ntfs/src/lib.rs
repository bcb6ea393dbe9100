//! Raw, read-only NTFS volume decoding: boot sector, run-lists, the
//! Update Sequence Array fixup, the MFT attribute stream, and the file
//! name/path reconstruction built on top of them. No write path, no
//! mounted-filesystem API — this reads a raw block device directly.

pub mod attributes;
pub mod blacklist;
pub mod boot_sector;
pub mod device;
pub mod fixup;
pub mod index;
pub mod linker;
pub mod mft;
pub mod path;
pub mod pattern;
pub mod progress;
pub mod record;
pub mod runs;
pub mod set;
pub mod structures;
pub mod volume;

pub use blacklist::Blacklist;
pub use boot_sector::BootSector;
pub use index::{EnumerateKind, IndexedEntry, MftIndex};
pub use pattern::{PatternOptions, SearchPattern};
pub use progress::Progress;
pub use set::VolumeSet;
pub use volume::Volume;
