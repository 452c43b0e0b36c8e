//! Opaque blob loading.

use anyhow::Result;
use pants_common::BinaryBlob;
use std::path::Path;

use super::utils::{MAX_ASSET_BYTES, read_file_with_limit};

/// Load a blob verbatim
pub fn load_blob(name: &str, path: &Path) -> Result<BinaryBlob> {
    let bytes = read_file_with_limit(path, MAX_ASSET_BYTES)?;
    Ok(BinaryBlob::new(name, bytes))
}
