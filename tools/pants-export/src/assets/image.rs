//! Raster image loading.

use anyhow::{Context, Result};
use pants_common::{RasterImage, decode_raster, identifier_from_path};
use std::path::Path;

use super::utils::{MAX_ASSET_BYTES, read_file_with_limit};

/// Load and decode one image; its identifier comes from the file name
pub fn load_image(path: &Path) -> Result<RasterImage> {
    let data = read_file_with_limit(path, MAX_ASSET_BYTES)?;
    decode_raster(identifier_from_path(path), &data)
        .with_context(|| format!("Failed to decode image: {}", path.display()))
}
