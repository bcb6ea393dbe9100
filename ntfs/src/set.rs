//! Top-level entry point: opens a selection of drive letters as NTFS
//! volumes and dispatches queries across all of them at once.

use ntfsidx_core::{letter_for_index, DriveBitmask, NtfsError, MAX_VOLUMES};
use ntfsidx_platform::{fixed_drive_letters, RawDevice};

use crate::blacklist::Blacklist;
use crate::index::{EnumerateKind, IndexedEntry};
use crate::pattern::{PatternOptions, SearchPattern};
use crate::progress::Progress;
use crate::volume::Volume;

/// Called once per drive as [`VolumeSet::open`] works through the
/// requested bitmask, so a caller can report progress (`onuse-moses`'s
/// formatter/daemon layers use the same per-item callback shape).
pub type ProgressCallback<'a> = dyn Fn(char, Result<(), &NtfsError>) + 'a;

/// A set of opened NTFS volumes, queried together.
pub struct VolumeSet {
    volumes: Vec<Volume>,
    blacklist: Blacklist,
}

impl VolumeSet {
    /// Opens every drive letter set in `drives` that the host OS also
    /// reports as a fixed drive (see [`ntfsidx_core::drive_bit`] and
    /// [`ntfsidx_platform::fixed_drive_letters`]); bits for drives that
    /// aren't fixed (removable, network, optical, or simply absent) are
    /// skipped silently, per spec. A fixed drive that still fails to open
    /// (not NTFS, raw access denied) is logged and skipped; the rest of
    /// the set still opens. Slots beyond [`MAX_VOLUMES`] are ignored.
    pub fn open(drives: DriveBitmask, progress: Option<&ProgressCallback>) -> Self {
        Self::open_with_mft_progress(drives, progress, None)
    }

    /// Same as [`Self::open`], additionally forwarding `mft_progress` down
    /// into each volume's MFT streaming/decoding pass (see
    /// [`crate::progress::Progress`]). The two callbacks report disjoint
    /// things — `progress` fires once per drive on open/failure,
    /// `mft_progress` fires repeatedly within a single drive's open — so
    /// both are accepted rather than folding one into the other.
    pub fn open_with_mft_progress(
        drives: DriveBitmask,
        progress: Option<&ProgressCallback>,
        mft_progress: Option<&Progress>,
    ) -> Self {
        let mut volumes = Vec::new();
        let fixed = drives & fixed_drive_letters();

        for i in 0..MAX_VOLUMES.min(26) as u32 {
            if fixed & (1 << i) == 0 {
                // Either not requested, or not reported as a fixed drive by
                // the host OS — skipped silently in either case.
                continue;
            }
            let letter = letter_for_index(i);

            let result =
                RawDevice::open(letter).and_then(|device| Volume::open_with_progress(&device, letter, mft_progress));
            match result {
                Ok(volume) => {
                    if let Some(cb) = progress {
                        cb(letter, Ok(()));
                    }
                    volumes.push(volume);
                }
                Err(e) => {
                    log::warn!("failed to open drive {}: {}", letter, e);
                    if let Some(cb) = progress {
                        cb(letter, Err(&e));
                    }
                }
            }
        }

        Self { volumes, blacklist: Blacklist::new() }
    }

    /// Drops every open volume (releasing raw device handles) and reopens
    /// the requested set from scratch, to pick up on-disk changes.
    pub fn reload(&mut self, drives: DriveBitmask, progress: Option<&ProgressCallback>) {
        let blacklist = self.blacklist.clone();
        *self = Self::open(drives, progress);
        self.blacklist = blacklist;
    }

    /// Drops every open volume, releasing raw device handles.
    pub fn close(&mut self) {
        self.volumes.clear();
    }

    pub fn set_blacklist(&mut self, prefixes: Vec<String>) {
        self.blacklist.set(prefixes);
    }

    pub fn clear_blacklist(&mut self) {
        self.blacklist.clear();
    }

    pub fn opened_drives(&self) -> Vec<char> {
        self.volumes.iter().map(|v| v.drive_letter).collect()
    }

    /// Extension-set query across every opened volume. Returns every hit;
    /// `.len()` is the hit count the spec's `query_extensions` returns.
    pub fn query_extensions(&self, extensions: &[String], include_deleted: bool) -> Vec<IndexedEntry> {
        // Each volume's `MftIndex` already yields hits in MFT entry order;
        // concatenating volumes in `opened_drives` order preserves that
        // per-volume order rather than scrambling it with a path sort.
        self.volumes
            .iter()
            .flat_map(|v| v.index.query_extensions(extensions, include_deleted, &self.blacklist))
            .collect()
    }

    /// Pattern query across every opened volume. An uncompilable pattern
    /// (empty, or length <= 1) yields zero hits rather than an error.
    pub fn query_pattern(&self, pattern: &str, include_deleted: bool, options: PatternOptions) -> Vec<IndexedEntry> {
        let Some(compiled) = SearchPattern::compile(pattern, options) else {
            log::debug!("pattern {:?} rejected at compile time (empty or length <= 1)", pattern);
            return Vec::new();
        };
        self.volumes
            .iter()
            .flat_map(|v| v.index.query_pattern(&compiled, include_deleted, &self.blacklist))
            .collect()
    }

    pub fn enumerate(&self, kind: EnumerateKind, include_deleted: bool) -> Vec<IndexedEntry> {
        self.volumes
            .iter()
            .flat_map(|v| v.index.enumerate(kind, include_deleted, &self.blacklist))
            .collect()
    }

    /// Convenience over [`Self::enumerate`] matching the spec's
    /// `enumerate_files` entry point.
    pub fn enumerate_files(&self, include_deleted: bool) -> Vec<IndexedEntry> {
        self.enumerate(EnumerateKind::Files, include_deleted)
    }

    /// Convenience over [`Self::enumerate`] matching the spec's
    /// `enumerate_directories` entry point.
    pub fn enumerate_directories(&self, include_deleted: bool) -> Vec<IndexedEntry> {
        self.enumerate(EnumerateKind::Directories, include_deleted)
    }

    /// Runs `query_extensions` and delivers every hit through `sink(path,
    /// file_name)`, returning the hit count — the literal shape of the
    /// spec's `query_extensions(drives, {ext…}, include_deleted, sink) ->
    /// hit count` entry point.
    pub fn query_extensions_sink(
        &self,
        extensions: &[String],
        include_deleted: bool,
        mut sink: impl FnMut(&str, &str),
    ) -> usize {
        let hits = self.query_extensions(extensions, include_deleted);
        for hit in &hits {
            sink(&hit.path, &hit.file_name);
        }
        hits.len()
    }

    /// Sink-delivering counterpart to [`Self::query_pattern`].
    pub fn query_pattern_sink(
        &self,
        pattern: &str,
        include_deleted: bool,
        options: PatternOptions,
        mut sink: impl FnMut(&str, &str),
    ) -> usize {
        let hits = self.query_pattern(pattern, include_deleted, options);
        for hit in &hits {
            sink(&hit.path, &hit.file_name);
        }
        hits.len()
    }

    /// Sink-delivering counterpart to [`Self::enumerate`].
    pub fn enumerate_sink(
        &self,
        kind: EnumerateKind,
        include_deleted: bool,
        mut sink: impl FnMut(&str, &str),
    ) -> usize {
        let hits = self.enumerate(kind, include_deleted);
        for hit in &hits {
            sink(&hit.path, &hit.file_name);
        }
        hits.len()
    }
}
