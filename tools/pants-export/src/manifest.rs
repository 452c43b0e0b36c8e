//! pants.toml manifest parsing
//!
//! Every field has a default, so a missing manifest builds the standard
//! `data/` folder into `data.h` and `data.cpp`.

use anyhow::{Context, Result};
use pants_common::SegmentParams;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default manifest file name
pub const MANIFEST_NAME: &str = "pants.toml";

/// pants.toml manifest structure
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PantsManifest {
    #[serde(default)]
    pub build: BuildSection,
    #[serde(default)]
    pub images: ImageSection,
    #[serde(default)]
    pub samples: SampleSection,
    #[serde(default = "default_blobs")]
    pub blobs: Vec<BlobEntry>,
}

/// Input and output locations, relative to the manifest
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct BuildSection {
    pub data_dir: String,
    pub header: String,
    pub source: String,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            header: "data.h".to_string(),
            source: "data.cpp".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ImageSection {
    pub extension: String,
}

impl Default for ImageSection {
    fn default() -> Self {
        Self {
            extension: "tga".to_string(),
        }
    }
}

/// Sample segmentation settings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SampleSection {
    pub extension: String,
    /// Bytes skipped before the PCM data
    pub header_bytes: usize,
    /// Expected rate; only checked, never converted
    pub sample_rate: u32,
    pub silence_threshold: i32,
    pub gap_length: usize,
    pub tail_length: usize,
    pub noise_length: usize,
    /// Exact number of samples the runtime table holds
    pub capacity: usize,
}

impl Default for SampleSection {
    fn default() -> Self {
        let params = SegmentParams::default();
        Self {
            extension: "wav".to_string(),
            header_bytes: pants_common::formats::HEADER_BYTES,
            sample_rate: pants_common::formats::SAMPLE_RATE,
            silence_threshold: params.silence_threshold,
            gap_length: params.gap_length,
            tail_length: params.tail_length,
            noise_length: params.noise_length,
            capacity: pants_common::SAMPLE_TABLE_CAPACITY,
        }
    }
}

impl SampleSection {
    pub fn params(&self) -> SegmentParams {
        SegmentParams {
            silence_threshold: self.silence_threshold,
            gap_length: self.gap_length,
            tail_length: self.tail_length,
            noise_length: self.noise_length,
        }
    }
}

/// One opaque blob kind, passed through byte-for-byte
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlobEntry {
    /// Symbol prefix: `<name>_block`, `<NAME>_SIZE`
    pub name: String,
    pub extension: String,
}

impl BlobEntry {
    pub fn new(name: &str, extension: &str) -> Self {
        Self {
            name: name.to_string(),
            extension: extension.to_string(),
        }
    }
}

/// ZSNES and Snes9x save states
fn default_blobs() -> Vec<BlobEntry> {
    vec![BlobEntry::new("zst", "zst"), BlobEntry::new("s9x", "000")]
}

impl Default for PantsManifest {
    fn default() -> Self {
        Self {
            build: BuildSection::default(),
            images: ImageSection::default(),
            samples: SampleSection::default(),
            blobs: default_blobs(),
        }
    }
}

impl PantsManifest {
    /// Load manifest from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse manifest from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse pants.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.samples.tail_length == 0 {
            anyhow::bail!("samples.tail_length must be at least 1");
        }
        if self.samples.gap_length == 0 {
            anyhow::bail!("samples.gap_length must be at least 1");
        }
        if self.samples.silence_threshold <= 0 {
            anyhow::bail!("samples.silence_threshold must be positive");
        }

        let mut extensions = HashSet::new();
        let mut names = HashSet::new();
        let builtin = [
            ("images", &self.images.extension),
            ("samples", &self.samples.extension),
        ];
        let blob_exts = self
            .blobs
            .iter()
            .map(|blob| (blob.name.as_str(), &blob.extension));

        for (owner, ext) in builtin.into_iter().chain(blob_exts) {
            if ext.is_empty() || ext.starts_with('.') {
                anyhow::bail!("Invalid extension '{}' for {} (omit the dot)", ext, owner);
            }
            if !extensions.insert(ext.to_ascii_lowercase()) {
                anyhow::bail!("Extension '{}' is claimed more than once", ext);
            }
        }

        for blob in &self.blobs {
            if !is_c_identifier(&blob.name) {
                anyhow::bail!("Blob name '{}' is not a valid C identifier", blob.name);
            }
            if !names.insert(blob.name.to_ascii_lowercase()) {
                anyhow::bail!("Blob name '{}' is declared more than once", blob.name);
            }
        }

        Ok(())
    }
}

fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Manifest plus the directory its relative paths resolve against
pub struct ManifestContext {
    pub manifest: PantsManifest,
    pub project_dir: PathBuf,
}

impl ManifestContext {
    pub fn data_dir(&self) -> PathBuf {
        self.project_dir.join(&self.manifest.build.data_dir)
    }

    pub fn header_path(&self, out_dir: Option<&Path>) -> PathBuf {
        out_dir
            .unwrap_or(self.project_dir.as_path())
            .join(&self.manifest.build.header)
    }

    pub fn source_path(&self, out_dir: Option<&Path>) -> PathBuf {
        out_dir
            .unwrap_or(self.project_dir.as_path())
            .join(&self.manifest.build.source)
    }
}

/// Load and validate the manifest at `path`
///
/// A missing file at the default location falls back to the standard
/// layout next to `path`; an explicitly named file must exist.
pub fn load_manifest(path: &Path, explicit: bool) -> Result<ManifestContext> {
    let project_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    let manifest = if path.exists() || explicit {
        PantsManifest::load(path)?
    } else {
        tracing::debug!("No {} found, using defaults", path.display());
        PantsManifest::default()
    };
    manifest.validate()?;

    Ok(ManifestContext {
        manifest,
        project_dir,
    })
}
