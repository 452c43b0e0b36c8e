//! Core of the pants data builder
//!
//! Turns source assets into the packed tables the editor links against:
//!
//! - [`formats`] - raster image decoding and PCM stream reading
//! - [`segment`] - splitting one long recording into individual samples
//! - [`packing`] - concatenating everything into offset-addressed arrays
//!
//! Discovery and output emission live in `pants-export`; this crate does no I/O.
//!
//! # Usage
//!
//! ```
//! use pants_common::{DataPack, RasterHeader, SegmentParams, decode_raster, segment_samples};
//!
//! let mut tga = RasterHeader::true_color(1, 1, 0, 0).to_bytes().to_vec();
//! tga.extend_from_slice(&[0, 0, 255]); // one red pixel, BGR
//! let image = decode_raster("DOT", &tga).unwrap();
//!
//! let pcm: Vec<i16> = std::iter::repeat_n(0, 100)
//!     .chain(std::iter::repeat_n(1000, 50))
//!     .collect();
//! let samples = segment_samples(&pcm, SegmentParams::default());
//!
//! let pack = DataPack::build(&[image], &samples, vec![]);
//! pack.validate().unwrap();
//! assert_eq!(pack.images.backing, vec![255, 0, 0, 255]);
//! assert_eq!(pack.samples.len(), 1);
//! ```

pub mod error;
pub mod formats;
pub mod packing;
pub mod segment;

pub use error::{AssetError, ImageFormatIssue, Result};

pub use formats::{
    COLOR_KEY, RasterHeader, RasterImage, decode_raster, identifier_from_path, read_pcm,
};

pub use packing::{
    BinaryBlob, DataPack, Descriptor, ImageDescriptor, PackedBlock, PackedImages, PackedSamples,
    SAMPLE_TABLE_CAPACITY, SAMPLES_PER_BANK, SampleDescriptor, Span, check_capacity, pack_images,
    pack_samples,
};

pub use segment::{AudioSample, SegmentParams, Segmenter, fade_tail, segment_samples};
