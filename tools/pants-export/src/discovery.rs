//! Asset discovery
//!
//! Walks the data directory in a fixed order (file names sorted at every
//! level) and sorts paths into images, audio and blob kinds by extension.
//! The order found here becomes the ordinal order of the generated tables.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::manifest::PantsManifest;

/// Paths found under the data directory, each list in discovery order
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DiscoveredAssets {
    pub images: Vec<PathBuf>,
    pub audio: Vec<PathBuf>,
    /// One list per manifest blob entry, same order as `manifest.blobs`
    pub blobs: Vec<Vec<PathBuf>>,
}

impl DiscoveredAssets {
    pub fn total(&self) -> usize {
        self.images.len() + self.audio.len() + self.blobs.iter().map(Vec::len).sum::<usize>()
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
}

/// Enumerate assets below `root`
pub fn discover_assets(root: &Path, manifest: &PantsManifest) -> Result<DiscoveredAssets> {
    if !root.is_dir() {
        anyhow::bail!("Data directory not found: {}", root.display());
    }

    let image_ext = manifest.images.extension.to_ascii_lowercase();
    let audio_ext = manifest.samples.extension.to_ascii_lowercase();
    let blob_exts: Vec<String> = manifest
        .blobs
        .iter()
        .map(|blob| blob.extension.to_ascii_lowercase())
        .collect();

    let mut found = DiscoveredAssets {
        blobs: vec![Vec::new(); blob_exts.len()],
        ..Default::default()
    };

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("Failed to scan data directory: {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        let Some(ext) = extension_of(&path) else {
            tracing::debug!("Skipping {} (no extension)", path.display());
            continue;
        };

        if ext == image_ext {
            found.images.push(path);
        } else if ext == audio_ext {
            found.audio.push(path);
        } else if let Some(kind) = blob_exts.iter().position(|e| *e == ext) {
            found.blobs[kind].push(path);
        } else {
            tracing::debug!("Skipping {} (unrecognized extension)", path.display());
        }
    }

    Ok(found)
}
