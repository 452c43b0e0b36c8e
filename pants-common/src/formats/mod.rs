//! Source file formats understood by the data builder
//!
//! - [`raster`] - uncompressed true-color images (.tga)
//! - [`pcm`] - headered 16-bit mono PCM streams (.wav)

pub mod pcm;
pub mod raster;

pub use pcm::{HEADER_BYTES, SAMPLE_RATE, read_pcm};
pub use raster::{
    ALPHA_THRESHOLD, COLOR_KEY, RasterHeader, RasterImage, TRUE_COLOR, decode_raster,
    descriptor_flags, identifier_from_path, normalize_identifier,
};
