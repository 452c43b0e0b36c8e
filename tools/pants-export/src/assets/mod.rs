//! Asset ingestion and packing helpers.
//!
//! Loading is sequential and stops at the first failure: every table index
//! in the generated module depends on every earlier asset being present, so
//! a skipped file would shift all later ordinals.

use anyhow::Result;
use pants_common::{AudioSample, BinaryBlob, DataPack, RasterImage, SAMPLES_PER_BANK};
use std::collections::HashMap;
use std::path::Path;

use crate::discovery::DiscoveredAssets;
use crate::manifest::PantsManifest;

pub mod audio;
pub mod data;
pub mod image;
pub mod utils;

pub use audio::load_samples;
pub use data::load_blob;
pub use image::load_image;
pub use utils::file_name;

/// Decoded assets, each collection in discovery order
#[derive(Debug, Default)]
pub struct LoadedAssets {
    pub images: Vec<RasterImage>,
    pub samples: Vec<AudioSample>,
    pub blobs: Vec<BinaryBlob>,
}

impl LoadedAssets {
    /// Pack into backing arrays and descriptor tables
    pub fn pack(self) -> DataPack {
        DataPack::build(&self.images, &self.samples, self.blobs)
    }
}

/// Load every discovered asset
pub fn load_assets(found: &DiscoveredAssets, manifest: &PantsManifest) -> Result<LoadedAssets> {
    let images = load_images(&found.images)?;

    let mut samples = Vec::new();
    for path in &found.audio {
        let segments = load_samples(path, &manifest.samples)?;
        for (i, sample) in segments.iter().enumerate() {
            let index = samples.len() + i;
            tracing::info!(
                "  sample[{:2},{:2}] > {:5} samples [{:5}:{:5}]",
                index / SAMPLES_PER_BANK,
                index % SAMPLES_PER_BANK,
                sample.len(),
                sample.start,
                sample.end
            );
        }
        samples.extend(segments);
    }

    let mut blobs = Vec::with_capacity(manifest.blobs.len());
    for (entry, paths) in manifest.blobs.iter().zip(&found.blobs) {
        let blob = match paths.as_slice() {
            [] => {
                tracing::warn!(
                    "No .{} file found; {}_block will be empty",
                    entry.extension,
                    entry.name
                );
                BinaryBlob::new(&entry.name, Vec::new())
            }
            [path] => {
                let blob = load_blob(&entry.name, path)?;
                tracing::info!("Blob: {} ({} bytes)", file_name(path), blob.size());
                blob
            }
            _ => {
                let list: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
                anyhow::bail!(
                    "Found {} .{} files, expected at most one:\n  {}",
                    paths.len(),
                    entry.extension,
                    list.join("\n  ")
                );
            }
        };
        blobs.push(blob);
    }

    Ok(LoadedAssets {
        images,
        samples,
        blobs,
    })
}

/// Decode images, rejecting two files that map to one identifier
fn load_images(paths: &[impl AsRef<Path>]) -> Result<Vec<RasterImage>> {
    let mut images = Vec::with_capacity(paths.len());
    let mut seen: HashMap<String, &Path> = HashMap::new();

    for path in paths {
        let path = path.as_ref();
        let image = load_image(path)?;

        if let Some(first) = seen.insert(image.name.clone(), path) {
            anyhow::bail!(
                "Image identifier collision: '{}' from {} and {}",
                image.name,
                first.display(),
                path.display()
            );
        }

        tracing::info!(
            "Image: {} > {} ({}x{}, {} keyed)",
            file_name(path),
            image.name,
            image.width,
            image.height,
            image.keyed_pixels()
        );
        images.push(image);
    }

    Ok(images)
}
