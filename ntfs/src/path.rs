//! Reconstructs an absolute *directory* path for an MFT entry by walking
//! its `parent_entry` chain up to the volume root. The entry's own name is
//! never part of the returned path — per the design, that is the caller's
//! "file name", handed back separately so `path + file_name` yields the
//! full path.

use std::collections::BTreeMap;

use crate::record::DecodedRecord;
use crate::structures::{MAX_PATH_DEPTH, MFT_ENTRY, ROOT_ENTRY};

/// Builds `drive_letter:\a\b\` (always ending in a trailing separator) for
/// the directory containing `entry`, walking parents until it hits the
/// volume root (entry 5), `$MFT` itself (entry 0, a paranoia backstop), or
/// [`MAX_PATH_DEPTH`] levels — whichever comes first. A truncated walk
/// (cycle) still returns the partial path built so far rather than failing
/// outright.
pub fn build(records: &BTreeMap<u64, DecodedRecord>, entry: u64, drive_letter: char) -> Option<String> {
    let mut components = Vec::new();
    let mut current = records.get(&entry)?.parent_entry;

    for _ in 0..MAX_PATH_DEPTH {
        let parent = match current {
            Some(parent) if parent != ROOT_ENTRY && parent != MFT_ENTRY => parent,
            _ => break,
        };

        // An orphan chain (a parent reference with no matching record, or
        // one with no name of its own) stops the walk here rather than
        // failing the whole path: the caller still gets a path, just one
        // rooted at the drive letter instead of the true ancestor chain.
        let Some(record) = records.get(&parent) else { break };
        let Some(name) = record.name.as_ref() else { break };
        components.push(name.clone());
        current = record.parent_entry;

        if current == Some(parent) {
            // Self-referencing parent (the root's own record); nothing more to climb.
            break;
        }
    }

    components.reverse();
    let mut path = format!("{}:\\", drive_letter.to_ascii_uppercase());
    for component in &components {
        path.push_str(component);
        path.push('\\');
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(entry: u64, name: &str, parent: u64) -> DecodedRecord {
        DecodedRecord {
            entry,
            in_use: true,
            is_directory: false,
            base_entry: None,
            name: Some(name.to_string()),
            parent_entry: Some(parent),
        }
    }

    #[test]
    fn builds_nested_path_stopping_at_root_and_excludes_leaf_name() {
        let mut records = BTreeMap::new();
        records.insert(5, record(5, "<root>", 5));
        records.insert(100, record(100, "docs", 5));
        records.insert(200, record(200, "notes.txt", 100));

        let path = build(&records, 200, 'C').unwrap();
        assert_eq!(path, "C:\\docs\\");
    }

    #[test]
    fn single_level_entry_under_root() {
        let mut records = BTreeMap::new();
        records.insert(5, record(5, "<root>", 5));
        records.insert(200, record(200, "readme.txt", 5));

        let path = build(&records, 200, 'C').unwrap();
        assert_eq!(path, "C:\\");
    }

    #[test]
    fn missing_record_returns_none() {
        let records = BTreeMap::new();
        assert_eq!(build(&records, 42, 'C'), None);
    }

    #[test]
    fn cyclic_parent_chain_terminates_at_depth_bound() {
        let mut records = BTreeMap::new();
        records.insert(10, record(10, "a", 11));
        records.insert(11, record(11, "b", 10));

        let path = build(&records, 10, 'C');
        assert!(path.is_some());
    }

    #[test]
    fn orphaned_ancestor_still_yields_a_drive_rooted_path() {
        let mut records = BTreeMap::new();
        // parent 999 is never decoded (corrupt/missing record).
        records.insert(200, record(200, "notes.txt", 999));

        let path = build(&records, 200, 'C').unwrap();
        assert_eq!(path, "C:\\");
    }
}
