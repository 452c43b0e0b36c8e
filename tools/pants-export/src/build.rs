//! Build and check commands
//!
//! discover -> load -> pack -> render -> write. Both files are rendered in
//! memory before either is written, so a failure leaves the previous output
//! untouched.

use anyhow::{Context, Result};
use clap::Args;
use pants_common::DataPack;
use std::path::{Path, PathBuf};
use xxhash_rust::xxh3::xxh3_64;

use crate::assets::load_assets;
use crate::codegen::{self, CodegenOptions, GeneratedModule};
use crate::discovery::discover_assets;
use crate::manifest::{MANIFEST_NAME, ManifestContext, load_manifest};

/// Options shared by build and check
#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Path to pants.toml (defaults are used if the default file is absent)
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Data directory (overrides manifest)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Directory for data.h / data.cpp (overrides manifest location)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

impl BuildArgs {
    fn context(&self) -> Result<ManifestContext> {
        match &self.manifest {
            Some(path) => load_manifest(path, true),
            None => load_manifest(Path::new(MANIFEST_NAME), false),
        }
    }

    fn data_dir(&self, ctx: &ManifestContext) -> PathBuf {
        self.data.clone().unwrap_or_else(|| ctx.data_dir())
    }
}

/// Where a build writes, and what it wrote
#[derive(Debug)]
pub struct BuildOutput {
    pub header_path: PathBuf,
    pub source_path: PathBuf,
    pub module: GeneratedModule,
}

/// Discover, load and pack everything under `data_dir`
pub fn compile_pack(ctx: &ManifestContext, data_dir: &Path) -> Result<DataPack> {
    tracing::info!("Scanning {}", data_dir.display());
    let found = discover_assets(data_dir, &ctx.manifest)?;
    tracing::debug!("Found {} candidate files", found.total());

    let loaded = load_assets(&found, &ctx.manifest)?;
    Ok(loaded.pack())
}

fn codegen_options(ctx: &ManifestContext) -> CodegenOptions {
    let file_name = |name: &str| {
        Path::new(name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string())
    };
    CodegenOptions {
        header_name: file_name(&ctx.manifest.build.header),
        source_name: file_name(&ctx.manifest.build.source),
        sample_capacity: ctx.manifest.samples.capacity,
    }
}

/// Compile and render without touching the output files
pub fn render(args: &BuildArgs) -> Result<BuildOutput> {
    let ctx = args.context()?;
    let pack = compile_pack(&ctx, &args.data_dir(&ctx))?;
    let module = codegen::generate(&pack, &codegen_options(&ctx))?;
    print_summary(&pack);

    Ok(BuildOutput {
        header_path: ctx.header_path(args.out_dir.as_deref()),
        source_path: ctx.source_path(args.out_dir.as_deref()),
        module,
    })
}

/// Build and write both files
pub fn execute(args: &BuildArgs) -> Result<BuildOutput> {
    let output = render(args)?;

    for path in [&output.header_path, &output.source_path] {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create output directory: {}", dir.display())
            })?;
        }
    }
    write_file(&output.header_path, &output.module.header)?;
    write_file(&output.source_path, &output.module.source)?;

    Ok(output)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Wrote {} ({} bytes)", path.display(), content.len());
    Ok(())
}

/// Compare freshly rendered output with the files on disk
///
/// Returns true when both files exist and match byte-for-byte.
pub fn check(args: &BuildArgs) -> Result<bool> {
    let output = render(args)?;
    let mut in_sync = true;

    for (path, expected) in [
        (&output.header_path, &output.module.header),
        (&output.source_path, &output.module.source),
    ] {
        match std::fs::read_to_string(path) {
            Ok(existing) if existing == *expected => {
                tracing::info!("✓ {} is up to date", path.display());
            }
            Ok(_) => {
                tracing::warn!("✗ {} is out of date", path.display());
                in_sync = false;
            }
            Err(e) => {
                tracing::warn!("✗ {} cannot be read ({})", path.display(), e);
                in_sync = false;
            }
        }
    }

    Ok(in_sync)
}

fn print_summary(pack: &DataPack) {
    tracing::info!(
        "Images: {} ({} bytes, xxh3 {:016x})",
        pack.images.len(),
        pack.images.backing.len(),
        xxh3_64(pack.images.as_bytes())
    );
    tracing::info!(
        "Samples: {} ({} values, xxh3 {:016x})",
        pack.samples.len(),
        pack.samples.backing.len(),
        xxh3_64(pack.samples.as_bytes())
    );
    for blob in &pack.blobs {
        tracing::info!(
            "Blob {}: {} bytes, xxh3 {:016x}",
            blob.name,
            blob.size(),
            xxh3_64(&blob.bytes)
        );
    }
}
