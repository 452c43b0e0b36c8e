//! Error type shared by the decoders and the packer.

use thiserror::Error;

/// The precise precondition a raster header failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormatIssue {
    /// Colormap type byte was non-zero
    ColormapPresent(u8),
    /// Image type other than 2 (uncompressed true-color)
    ImageType(u8),
    /// Alpha-bit count other than 0 or 8
    AlphaBits(u8),
    /// Bit depth does not match the alpha-bit count (24/0 or 32/8)
    BitDepth { depth: u8, alpha_bits: u8 },
}

impl core::fmt::Display for ImageFormatIssue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ImageFormatIssue::ColormapPresent(kind) => {
                write!(f, "colormap present (type {})", kind)
            }
            ImageFormatIssue::ImageType(kind) => {
                write!(f, "image type {} is not uncompressed true-color (2)", kind)
            }
            ImageFormatIssue::AlphaBits(bits) => {
                write!(f, "{} alpha bits (must be 0 or 8)", bits)
            }
            ImageFormatIssue::BitDepth { depth, alpha_bits } => write!(
                f,
                "{}-bit pixels with {} alpha bits (expected 24/0 or 32/8)",
                depth, alpha_bits
            ),
        }
    }
}

/// Errors raised while decoding, segmenting or packing assets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("Unsupported image format: {issue}")]
    UnsupportedImageFormat { issue: ImageFormatIssue },

    #[error("Truncated input: {what} needs {needed} bytes, {available} available")]
    TruncatedInput {
        what: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("Sample count mismatch: {actual} samples, descriptor table holds exactly {expected}")]
    CapacityMismatch { expected: usize, actual: usize },

    #[error("Corrupt {block} pack at item {index}: {reason}")]
    CorruptPack {
        block: &'static str,
        index: usize,
        reason: &'static str,
    },
}

impl AssetError {
    pub(crate) fn unsupported(issue: ImageFormatIssue) -> Self {
        AssetError::UnsupportedImageFormat { issue }
    }
}

pub type Result<T> = std::result::Result<T, AssetError>;
