//! Raw PCM sample stream (.wav)
//!
//! The header is never parsed: a fixed number of leading bytes is skipped
//! and everything after it is read as little-endian i16 mono samples.
//! The stream is presumed to be 32000 Hz with no extra chunks.

use crate::error::{AssetError, Result};

/// Bytes skipped before the first sample
pub const HEADER_BYTES: usize = 44;

/// Sample rate the segmentation constants are tuned for
pub const SAMPLE_RATE: u32 = 32000;

/// Read the samples following a `header_bytes` header
///
/// # Errors
/// `TruncatedInput` if the file is shorter than the header or ends in the
/// middle of a sample.
pub fn read_pcm(data: &[u8], header_bytes: usize) -> Result<Vec<i16>> {
    let body = data.get(header_bytes..).ok_or(AssetError::TruncatedInput {
        what: "sample header",
        needed: header_bytes,
        available: data.len(),
    })?;

    if !body.len().is_multiple_of(2) {
        return Err(AssetError::TruncatedInput {
            what: "sample data",
            needed: data.len() + 1,
            available: data.len(),
        });
    }

    Ok(body
        .chunks_exact(2)
        .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
        .collect())
}
