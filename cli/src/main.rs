use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use ntfsidx_core::drive_bit;
use ntfsidx_ntfs::{EnumerateKind, PatternOptions, VolumeSet};
use ntfsidx_platform::fixed_drive_letters;

#[derive(Parser)]
#[command(name = "ntfsidx", about = "Raw NTFS MFT enumerator", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List files/directories on one or more fixed NTFS drives.
    List {
        /// Drive letters to scan, e.g. "C" or "CDE". Defaults to every
        /// fixed drive the OS reports.
        #[arg(long)]
        drives: Option<String>,

        /// Comma-separated extensions to match, e.g. "txt,jpg".
        #[arg(long, value_delimiter = ',')]
        ext: Vec<String>,

        /// A single-`*` glob matched against each entry's file name.
        #[arg(long)]
        pattern: Option<String>,

        /// List everything (files and directories) instead of requiring
        /// `--ext`/`--pattern`.
        #[arg(long)]
        all: bool,

        /// Case-sensitive pattern matching (default is case-insensitive).
        #[arg(long)]
        case_sensitive: bool,

        /// Absolute path prefixes to suppress from the results.
        #[arg(long = "blacklist", value_delimiter = ',')]
        blacklist: Vec<String>,

        /// Include records flagged deleted (not in-use) but not yet reused.
        #[arg(long)]
        deleted: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::List { drives, ext, pattern, all, case_sensitive, blacklist, deleted } => {
            run_list(drives, ext, pattern, all, case_sensitive, blacklist, deleted)
        }
    }
}

fn run_list(
    drives: Option<String>,
    ext: Vec<String>,
    pattern: Option<String>,
    all: bool,
    case_sensitive: bool,
    blacklist: Vec<String>,
    deleted: bool,
) -> Result<()> {
    if ext.is_empty() && pattern.is_none() && !all {
        bail!("specify --ext, --pattern, or --all");
    }

    let mask = match drives {
        Some(letters) => letters
            .chars()
            .filter_map(|c| drive_bit(c.to_ascii_uppercase()))
            .fold(0u32, |acc, bit| acc | bit),
        None => fixed_drive_letters(),
    };

    if mask == 0 {
        bail!("no drives selected (none requested, or none detected as fixed NTFS volumes)");
    }

    let mut volumes = VolumeSet::open(mask, None);
    if !blacklist.is_empty() {
        volumes.set_blacklist(blacklist);
    }

    let mut hits = Vec::new();
    if !ext.is_empty() {
        hits.extend(volumes.query_extensions(&ext, deleted));
    }
    if let Some(pattern) = &pattern {
        let options = PatternOptions { case_sensitive };
        hits.extend(volumes.query_pattern(pattern, deleted, options));
    }
    if all && ext.is_empty() && pattern.is_none() {
        hits.extend(volumes.enumerate(EnumerateKind::Both, deleted));
    }

    hits.sort_by(|a, b| a.full_path().cmp(&b.full_path()));
    hits.dedup_by(|a, b| a.full_path() == b.full_path());

    for entry in &hits {
        println!("{}", entry.full_path());
    }

    log::info!("{} matches across drives {:?}", hits.len(), volumes.opened_drives());
    Ok(())
}
