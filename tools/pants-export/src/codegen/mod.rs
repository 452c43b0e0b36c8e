//! Module emission
//!
//! Renders a packed [`DataPack`] into the header/source pair. Nothing is
//! rendered unless the pack is internally consistent and its sample count
//! matches the runtime table exactly; a short or long table would misalign
//! every sample index in the editor.

use anyhow::{Context, Result};
use pants_common::DataPack;

pub mod c;

/// Emitter settings
#[derive(Debug, Clone)]
pub struct CodegenOptions {
    /// File name the source `#include`s
    pub header_name: String,
    pub source_name: String,
    /// Exact number of sample table entries
    pub sample_capacity: usize,
}

/// Rendered output, not yet written anywhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    pub header: String,
    pub source: String,
}

/// Render both files
pub fn generate(pack: &DataPack, options: &CodegenOptions) -> Result<GeneratedModule> {
    pack.validate().context("Packed data failed validation")?;
    pack.check_capacity(options.sample_capacity)
        .context("Sample table does not match the runtime layout (adjust samples.silence_threshold?)")?;

    Ok(GeneratedModule {
        header: c::generate_header(pack, options).context("Failed to generate header")?,
        source: c::generate_source(pack, options).context("Failed to generate source")?,
    })
}
