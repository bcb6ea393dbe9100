use thiserror::Error;

/// Errors surfaced by the raw-device / NTFS decoding pipeline.
///
/// Disposition (which errors are fatal to a volume vs. tolerated per-record)
/// is decided by the caller that catches each variant, not by the variant
/// itself — see the component docs for which layer raises what.
#[derive(Debug, Error)]
pub enum NtfsError {
    #[error("failed to open device {path}: {source}")]
    DeviceOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("volume {0} is not NTFS")]
    NotNtfs(String),

    #[error("corrupt record: {0}")]
    CorruptRecord(String),

    #[error("vcn {vcn} out of range for attribute (low={low}, high={high})")]
    VcnOutOfRange { vcn: u64, low: u64, high: u64 },

    #[error("MFT record 0 uses $ATTRIBUTE_LIST; multi-record MFT self-description is unsupported")]
    AttributeListUnsupported,

    #[error("short read at offset {offset}: got {got} of {want} bytes")]
    TruncatedRead { offset: u64, got: u64, want: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
