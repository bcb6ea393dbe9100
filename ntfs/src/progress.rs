//! The only callback surface this crate exposes: sparse, purely
//! informational progress for long operations (opening volumes, streaming
//! and decoding the MFT). `(done, total, label)`, called at modest
//! granularity — callers that don't care pass `None`.

pub type Progress<'a> = dyn Fn(u64, u64, &str) + 'a;
