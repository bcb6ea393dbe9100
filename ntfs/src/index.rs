//! Ties the decoder pipeline together into a queryable in-memory index of
//! one volume's files and directories, and implements the three query
//! shapes: by extension, by glob pattern, and enumerate-all.

use std::collections::BTreeMap;

use ntfsidx_core::NtfsError;

use crate::blacklist::Blacklist;
use crate::boot_sector::BootSector;
use crate::device::DeviceRead;
use crate::fixup;
use crate::linker;
use crate::mft;
use crate::path;
use crate::pattern::SearchPattern;
use crate::progress::Progress;
use crate::record::{self, DecodedRecord};
use crate::structures::MFT_ENTRY;

/// What [`MftIndex::enumerate`] should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumerateKind {
    Files,
    Directories,
    Both,
}

/// One queryable filesystem entry. `path` is the containing directory
/// (trailing `\`, e.g. `C:\docs\`); `file_name` is the leaf's own name.
/// `path.clone() + &file_name` yields the full path, mirroring the sink
/// contract `(path, file_name) -> ()` this index is queried through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedEntry {
    pub entry: u64,
    pub path: String,
    pub file_name: String,
    pub is_directory: bool,
}

impl IndexedEntry {
    /// Convenience: `path` and `file_name` concatenated.
    pub fn full_path(&self) -> String {
        format!("{}{}", self.path, self.file_name)
    }
}

/// A fully decoded volume: every named MFT record (in-use or deleted) with
/// extension records folded into their base.
pub struct MftIndex {
    records: BTreeMap<u64, DecodedRecord>,
    drive_letter: char,
}

impl MftIndex {
    /// Streams the `$MFT`, fixes up and decodes every record, links
    /// extension records to their base, and indexes the result. A record
    /// that fails fixup or decoding is logged and skipped rather than
    /// aborting the whole pass. Records with `flags & in-use == 0`
    /// (deleted but not yet reused) are retained, not discarded, so that
    /// queries with `include_deleted` can still surface them.
    pub fn build(
        device: &dyn DeviceRead,
        boot: &BootSector,
        drive_letter: char,
        progress: Option<&Progress>,
    ) -> Result<Self, NtfsError> {
        let mft_data = mft::load(device, boot, progress)?;
        let record_size = boot.bytes_per_file_record_segment as usize;
        let total_records = mft_data.len() / record_size;

        let mut records = BTreeMap::new();
        for (i, chunk) in mft_data.chunks(record_size).enumerate() {
            if chunk.len() < record_size {
                break;
            }

            if i > 0 && i % 1000 == 0 {
                log::trace!("decoded {}/{} MFT records on drive {}:", i, total_records, drive_letter);
                if let Some(cb) = progress {
                    cb(i as u64, total_records as u64, "decoding MFT records");
                }
            }

            let mut buf = chunk.to_vec();
            if let Err(e) = fixup::apply(&mut buf) {
                log::debug!("skipping MFT record {}: fixup failed: {}", i, e);
                continue;
            }

            match record::decode(&buf, i as u64) {
                Ok(r) => {
                    records.insert(i as u64, r);
                }
                Err(e) => {
                    log::debug!("skipping MFT record {}: decode failed: {}", i, e);
                }
            }
        }

        let loaded = records.len();
        linker::link(&mut records);
        log::info!("indexed {} MFT records on drive {}:", loaded, drive_letter);

        Ok(Self { records, drive_letter })
    }

    fn is_queryable(&self, entry: &DecodedRecord, include_deleted: bool) -> bool {
        entry.entry != MFT_ENTRY
            && entry.base_entry.is_none()
            && (include_deleted || entry.in_use)
            && !matches!(entry.name.as_deref(), None | Some(".") | Some(".."))
    }

    fn resolved_entries(&self, include_deleted: bool, blacklist: &Blacklist) -> Vec<IndexedEntry> {
        let mut out = Vec::new();
        for record in self.records.values() {
            if !self.is_queryable(record, include_deleted) {
                continue;
            }
            let Some(dir_path) = path::build(&self.records, record.entry, self.drive_letter) else {
                continue;
            };
            let file_name = record.name.clone().unwrap_or_default();
            let full_path = format!("{}{}", dir_path, file_name);
            if blacklist.is_blocked(&full_path) {
                continue;
            }
            out.push(IndexedEntry {
                entry: record.entry,
                path: dir_path,
                file_name,
                is_directory: record.is_directory,
            });
        }
        out
    }

    /// Files whose extension (the substring after the last `.`, lowercased)
    /// is in `extensions`.
    pub fn query_extensions(
        &self,
        extensions: &[String],
        include_deleted: bool,
        blacklist: &Blacklist,
    ) -> Vec<IndexedEntry> {
        let wanted: Vec<String> = extensions.iter().map(|e| e.to_lowercase()).collect();

        // `resolved_entries` walks `self.records` (a `BTreeMap`) in MFT
        // entry order already; filtering alone preserves that order, per
        // the spec's "query emission order is MFT entry order".
        let hits: Vec<IndexedEntry> = self
            .resolved_entries(include_deleted, blacklist)
            .into_iter()
            .filter(|e| !e.is_directory)
            .filter(|e| match extension_of(&e.file_name) {
                Some(ext) => wanted.iter().any(|w| w == &ext),
                None => false,
            })
            .collect();

        log::debug!("extension query matched {} files", hits.len());
        hits
    }

    /// Files (and, per the glob, directories too) whose name matches `pattern`.
    pub fn query_pattern(
        &self,
        pattern: &SearchPattern,
        include_deleted: bool,
        blacklist: &Blacklist,
    ) -> Vec<IndexedEntry> {
        let hits: Vec<IndexedEntry> = self
            .resolved_entries(include_deleted, blacklist)
            .into_iter()
            .filter(|e| pattern.matches(&e.file_name))
            .collect();

        log::debug!("pattern query matched {} entries", hits.len());
        hits
    }

    /// All entries of the requested kind, minus blacklisted paths.
    pub fn enumerate(&self, kind: EnumerateKind, include_deleted: bool, blacklist: &Blacklist) -> Vec<IndexedEntry> {
        self.resolved_entries(include_deleted, blacklist)
            .into_iter()
            .filter(|e| match kind {
                EnumerateKind::Files => !e.is_directory,
                EnumerateKind::Directories => e.is_directory,
                EnumerateKind::Both => true,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.values().filter(|r| self.is_queryable(r, false)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    let dot = file_name.rfind('.')?;
    if dot == 0 || dot == file_name.len() - 1 {
        return None;
    }
    Some(file_name[dot + 1..].to_lowercase())
}
