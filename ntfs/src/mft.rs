//! Loads the full `$MFT` data stream: reads record 0 (which describes
//! itself), resolves its `$DATA` attribute's run list, and streams every
//! mapped (and sparse) cluster range into one contiguous buffer.

use ntfsidx_core::NtfsError;

use crate::attributes::AttributeWalker;
use crate::boot_sector::BootSector;
use crate::device::{read_exact, DeviceRead};
use crate::fixup;
use crate::progress::Progress;
use crate::runs::{self, DataRun};
use crate::structures::attribute_type;
use crate::structures::record_header::FIRST_ATTRIBUTE_OFFSET_OFFSET;
use crate::structures::CLUSTERS_PER_READ;
use byteorder::{ByteOrder, LittleEndian};

/// Reads and fixes up MFT record 0, then streams the full `$MFT` data
/// stream it describes. The returned buffer's length is a multiple of
/// `boot.bytes_per_file_record_segment`; record `n` is the slice
/// `[n * record_size, (n + 1) * record_size)`. `progress`, if given, is
/// called after every `CLUSTERS_PER_READ`-sized batch with
/// `(clusters_done, clusters_total, "streaming $MFT")`.
pub fn load(device: &dyn DeviceRead, boot: &BootSector, progress: Option<&Progress>) -> Result<Vec<u8>, NtfsError> {
    let record_size = boot.bytes_per_file_record_segment as usize;
    let mut record0 = vec![0u8; record_size];
    read_exact(device, boot.mft_start_byte(), &mut record0)?;
    fixup::apply(&mut record0)?;

    let first_attribute_offset = LittleEndian::read_u16(&record0[FIRST_ATTRIBUTE_OFFSET_OFFSET..]) as usize;

    if AttributeWalker::find(&record0, first_attribute_offset, attribute_type::ATTRIBUTE_LIST)?.is_some() {
        return Err(NtfsError::AttributeListUnsupported);
    }

    let data_attr = AttributeWalker::find(&record0, first_attribute_offset, attribute_type::DATA)?
        .ok_or_else(|| NtfsError::CorruptRecord("MFT record 0 has no $DATA attribute".to_string()))?;

    if !data_attr.non_resident {
        return Err(NtfsError::CorruptRecord("MFT $DATA attribute is unexpectedly resident".to_string()));
    }

    let runs = runs::decode_data_runs(data_attr.value)?;
    let data_size = data_attr.data_size;

    stream_runs(device, boot, &runs, data_size, progress)
}

fn stream_runs(
    device: &dyn DeviceRead,
    boot: &BootSector,
    runs: &[DataRun],
    data_size: u64,
    progress: Option<&Progress>,
) -> Result<Vec<u8>, NtfsError> {
    let bytes_per_cluster = boot.bytes_per_cluster as u64;
    let mut out = Vec::with_capacity(data_size as usize);

    let total_clusters: u64 = runs.iter().map(|r| r.length).sum();
    let mut clusters_done = 0u64;

    for run in runs {
        let mut remaining = run.length;
        let mut cluster_in_run = 0u64;

        while remaining > 0 {
            let chunk = remaining.min(CLUSTERS_PER_READ);

            match run.lcn {
                None => {
                    out.resize(out.len() + (chunk * bytes_per_cluster) as usize, 0);
                    log::trace!("zero-filled {} sparse clusters while streaming $MFT", chunk);
                }
                Some(lcn) => {
                    let offset = (lcn + cluster_in_run) * bytes_per_cluster;
                    let mut buf = vec![0u8; (chunk * bytes_per_cluster) as usize];
                    read_exact(device, offset, &mut buf)?;
                    out.extend_from_slice(&buf);
                }
            }

            remaining -= chunk;
            cluster_in_run += chunk;
            clusters_done += chunk;

            if let Some(cb) = progress {
                cb(clusters_done, total_clusters, "streaming $MFT");
            }
        }
    }

    if (out.len() as u64) > data_size {
        out.truncate(data_size as usize);
    }

    Ok(out)
}
