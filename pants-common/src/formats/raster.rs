//! Uncompressed true-color raster format (.tga)
//!
//! Only type 2 images without a colormap are accepted, at 24 bits (no alpha)
//! or 32 bits (8 alpha bits). Alpha is reduced to a single bit on decode:
//! pixels below [`ALPHA_THRESHOLD`] become the [`COLOR_KEY`] sentinel.
//!
//! # Header (18 bytes, little-endian)
//! ```text
//! 0x00: id_length u8        padding bytes that follow the header
//! 0x01: colormap_type u8    must be 0
//! 0x02: image_type u8       must be 2
//! 0x03: colormap_first u16
//! 0x05: colormap_length u16
//! 0x07: colormap_depth u8
//! 0x08: x_origin u16
//! 0x0A: y_origin u16
//! 0x0C: width u16
//! 0x0E: height u16
//! 0x10: depth u8            24 or 32
//! 0x11: descriptor u8       bits 0-3 alpha bits, 0x10 right-to-left, 0x20 top-to-bottom
//! ```

use std::path::Path;

use crate::error::{AssetError, ImageFormatIssue, Result};

/// Image type code for uncompressed true-color
pub const TRUE_COLOR: u8 = 2;

/// Alpha values below this become fully transparent
pub const ALPHA_THRESHOLD: u8 = 128;

/// Transparent magenta written in place of keyed-out pixels
pub const COLOR_KEY: [u8; 4] = [255, 0, 255, 0];

/// Descriptor byte fields
pub mod descriptor_flags {
    /// Alpha-bit count
    pub const ALPHA_MASK: u8 = 0x0F;
    /// Columns stored right-to-left
    pub const RIGHT_TO_LEFT: u8 = 0x10;
    /// Rows stored top-to-bottom (clear = bottom-to-top)
    pub const TOP_TO_BOTTOM: u8 = 0x20;
}

/// Raster file header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterHeader {
    pub id_length: u8,
    pub colormap_type: u8,
    pub image_type: u8,
    pub colormap_first: u16,
    pub colormap_length: u16,
    pub colormap_depth: u8,
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: u16,
    pub height: u16,
    pub depth: u8,
    pub descriptor: u8,
}

impl RasterHeader {
    pub const SIZE: usize = 18;

    /// Header for an uncompressed image, 24-bit when `alpha_bits` is 0, 32-bit otherwise
    pub fn true_color(width: u16, height: u16, alpha_bits: u8, orientation: u8) -> Self {
        Self {
            image_type: TRUE_COLOR,
            width,
            height,
            depth: if alpha_bits == 0 { 24 } else { 32 },
            descriptor: (alpha_bits & descriptor_flags::ALPHA_MASK)
                | (orientation & !descriptor_flags::ALPHA_MASK),
            ..Self::default()
        }
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(AssetError::TruncatedInput {
                what: "raster header",
                needed: Self::SIZE,
                available: bytes.len(),
            });
        }
        let u16_at = |i: usize| u16::from_le_bytes([bytes[i], bytes[i + 1]]);
        Ok(Self {
            id_length: bytes[0],
            colormap_type: bytes[1],
            image_type: bytes[2],
            colormap_first: u16_at(3),
            colormap_length: u16_at(5),
            colormap_depth: bytes[7],
            x_origin: u16_at(8),
            y_origin: u16_at(10),
            width: u16_at(12),
            height: u16_at(14),
            depth: bytes[16],
            descriptor: bytes[17],
        })
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0] = self.id_length;
        bytes[1] = self.colormap_type;
        bytes[2] = self.image_type;
        bytes[3..5].copy_from_slice(&self.colormap_first.to_le_bytes());
        bytes[5..7].copy_from_slice(&self.colormap_length.to_le_bytes());
        bytes[7] = self.colormap_depth;
        bytes[8..10].copy_from_slice(&self.x_origin.to_le_bytes());
        bytes[10..12].copy_from_slice(&self.y_origin.to_le_bytes());
        bytes[12..14].copy_from_slice(&self.width.to_le_bytes());
        bytes[14..16].copy_from_slice(&self.height.to_le_bytes());
        bytes[16] = self.depth;
        bytes[17] = self.descriptor;
        bytes
    }

    pub fn alpha_bits(&self) -> u8 {
        self.descriptor & descriptor_flags::ALPHA_MASK
    }

    /// Rows are stored bottom-to-top
    pub fn flip_vertical(&self) -> bool {
        self.descriptor & descriptor_flags::TOP_TO_BOTTOM == 0
    }

    /// Columns are stored right-to-left
    pub fn flip_horizontal(&self) -> bool {
        self.descriptor & descriptor_flags::RIGHT_TO_LEFT != 0
    }

    pub fn bytes_per_pixel(&self) -> usize {
        if self.alpha_bits() == 8 { 4 } else { 3 }
    }

    /// Reject everything except uncompressed 24/0 and 32/8 true-color
    pub fn validate(&self) -> Result<()> {
        if self.colormap_type != 0 {
            return Err(AssetError::unsupported(ImageFormatIssue::ColormapPresent(
                self.colormap_type,
            )));
        }
        if self.image_type != TRUE_COLOR {
            return Err(AssetError::unsupported(ImageFormatIssue::ImageType(
                self.image_type,
            )));
        }
        let alpha_bits = self.alpha_bits();
        if alpha_bits != 0 && alpha_bits != 8 {
            return Err(AssetError::unsupported(ImageFormatIssue::AlphaBits(alpha_bits)));
        }
        let expected_depth = if alpha_bits == 8 { 32 } else { 24 };
        if self.depth != expected_depth {
            return Err(AssetError::unsupported(ImageFormatIssue::BitDepth {
                depth: self.depth,
                alpha_bits,
            }));
        }
        Ok(())
    }
}

/// Decoded image: RGBA8, row-major, top-left origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Upper-case identifier used for the ordinal enumeration
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// `width * height * 4` bytes
    pub pixels: Vec<u8>,
}

impl RasterImage {
    pub fn data_size(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    /// RGBA of the pixel at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Number of pixels replaced by the color key
    pub fn keyed_pixels(&self) -> usize {
        self.pixels
            .chunks_exact(4)
            .filter(|px| px[3] == 0)
            .count()
    }
}

/// Derive an image identifier from a file path
///
/// Uses the file stem, upper-cased, with anything that is not ASCII
/// alphanumeric replaced by `_`. A leading digit gets a `_` prefix.
pub fn identifier_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    normalize_identifier(&stem)
}

/// Normalize a base name into an upper-case C identifier
pub fn normalize_identifier(stem: &str) -> String {
    let mut ident: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Decode one raster file into an oriented RGBA8 image
///
/// # Errors
/// `UnsupportedImageFormat` for anything but 24/32-bit uncompressed
/// true-color, `TruncatedInput` when the header, padding or pixel data
/// runs past the end of `data`.
pub fn decode_raster(name: impl Into<String>, data: &[u8]) -> Result<RasterImage> {
    let header = RasterHeader::from_bytes(data)?;
    header.validate()?;

    // Padding is consumed even though there is no colormap
    let pixel_start = RasterHeader::SIZE + header.id_length as usize;
    if data.len() < pixel_start {
        return Err(AssetError::TruncatedInput {
            what: "raster padding",
            needed: pixel_start,
            available: data.len(),
        });
    }

    let width = header.width as usize;
    let height = header.height as usize;
    let bpp = header.bytes_per_pixel();
    let pixel_bytes = width * height * bpp;

    let source = data
        .get(pixel_start..pixel_start + pixel_bytes)
        .ok_or(AssetError::TruncatedInput {
            what: "raster pixel data",
            needed: pixel_start + pixel_bytes,
            available: data.len(),
        })?;

    let expand: fn(&[u8]) -> [u8; 4] = if bpp == 4 { expand_bgra } else { expand_bgr };
    let flip_v = header.flip_vertical();
    let flip_h = header.flip_horizontal();

    let mut pixels = vec![0u8; width * height * 4];
    for (i, src) in source.chunks_exact(bpp).enumerate() {
        let (sx, sy) = (i % width, i / width);
        let x = if flip_h { width - 1 - sx } else { sx };
        let y = if flip_v { height - 1 - sy } else { sy };
        let dst = (y * width + x) * 4;
        pixels[dst..dst + 4].copy_from_slice(&expand(src));
    }

    Ok(RasterImage {
        name: name.into(),
        width: width as u32,
        height: height as u32,
        pixels,
    })
}

/// 32-bit source pixel: binary alpha
fn expand_bgra(px: &[u8]) -> [u8; 4] {
    if px[3] < ALPHA_THRESHOLD {
        COLOR_KEY
    } else {
        [px[2], px[1], px[0], 0xFF]
    }
}

/// 24-bit source pixel: always opaque
fn expand_bgr(px: &[u8]) -> [u8; 4] {
    [px[2], px[1], px[0], 0xFF]
}
