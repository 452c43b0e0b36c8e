//! pants-export library
//!
//! Builds the pants editor's `data/` folder into `data.h` and `data.cpp`:
//! icons decoded from .tga files, instrument samples cut from one long .wav
//! recording, and save-state blobs passed through verbatim.

pub mod assets;
pub mod build;
pub mod codegen;
pub mod discovery;
pub mod inspect;
pub mod manifest;

pub use assets::{LoadedAssets, load_assets};
pub use build::{BuildArgs, BuildOutput, compile_pack};
pub use codegen::{CodegenOptions, GeneratedModule, generate};
pub use discovery::{DiscoveredAssets, discover_assets};
pub use manifest::{ManifestContext, PantsManifest, load_manifest};
