//! Blob packing
//!
//! Decoded images and segmented samples are concatenated into one backing
//! array per kind. Each item gets a descriptor with its offset into that
//! array; descriptor `i` always describes source item `i`. Opaque blobs are
//! carried verbatim, one per kind.
//!
//! Image offsets are in bytes, sample offsets and lengths in samples.

use crate::error::{AssetError, Result};
use crate::formats::RasterImage;
use crate::segment::AudioSample;

/// Entries in the runtime's sample descriptor table: 15 instruments of 13
/// notes plus 8 extra effects. Fixed by the consumer, not by segmentation.
pub const SAMPLE_TABLE_CAPACITY: usize = (15 * 13) + 8;

/// Samples per instrument bank in the sample table
pub const SAMPLES_PER_BANK: usize = 13;

/// Range of one item inside a backing array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Anything that owns a span of a backing array
pub trait Descriptor {
    fn span(&self) -> Span;
}

/// Image table entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    /// Identifier for the ordinal enumeration
    pub name: String,
    /// Byte offset into the image backing array
    pub offset: usize,
    pub width: u32,
    pub height: u32,
}

impl Descriptor for ImageDescriptor {
    fn span(&self) -> Span {
        Span {
            offset: self.offset,
            len: self.width as usize * self.height as usize * 4,
        }
    }
}

/// Sample table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleDescriptor {
    /// Sample offset into the sample backing array
    pub offset: usize,
    /// Sample count
    pub length: usize,
}

impl Descriptor for SampleDescriptor {
    fn span(&self) -> Span {
        Span {
            offset: self.offset,
            len: self.length,
        }
    }
}

/// Contiguous backing array plus one descriptor per packed item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBlock<T, D> {
    pub backing: Vec<T>,
    pub descriptors: Vec<D>,
}

pub type PackedImages = PackedBlock<u8, ImageDescriptor>;
pub type PackedSamples = PackedBlock<i16, SampleDescriptor>;

impl<T: Copy, D: Descriptor> PackedBlock<T, D> {
    /// Concatenate `items` in order, describing each with `describe(item, offset)`
    pub fn pack<S>(
        items: &[S],
        payload: impl Fn(&S) -> &[T],
        describe: impl Fn(&S, usize) -> D,
    ) -> Self {
        let total = items.iter().map(|item| payload(item).len()).sum();
        let mut backing = Vec::with_capacity(total);
        let mut descriptors = Vec::with_capacity(items.len());

        for item in items {
            descriptors.push(describe(item, backing.len()));
            backing.extend_from_slice(payload(item));
        }

        Self {
            backing,
            descriptors,
        }
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Payload of item `index`
    pub fn get(&self, index: usize) -> Option<&[T]> {
        let span = self.descriptors.get(index)?.span();
        self.backing.get(span.offset..span.end())
    }

    /// Check that descriptors tile the backing array exactly, in order
    pub fn validate(&self, block: &'static str) -> Result<()> {
        let mut next = 0;
        for (index, descriptor) in self.descriptors.iter().enumerate() {
            let span = descriptor.span();
            if span.offset != next {
                return Err(AssetError::CorruptPack {
                    block,
                    index,
                    reason: "offset does not follow the previous item",
                });
            }
            next = span.end();
        }
        if next != self.backing.len() {
            return Err(AssetError::CorruptPack {
                block,
                index: self.descriptors.len(),
                reason: "descriptors do not cover the backing array",
            });
        }
        Ok(())
    }
}

impl<T: bytemuck::Pod, D> PackedBlock<T, D> {
    /// Backing array as raw bytes (native endianness)
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.backing)
    }
}

/// Concatenate image pixels in discovery order
pub fn pack_images(images: &[RasterImage]) -> PackedImages {
    PackedBlock::pack(
        images,
        |image| image.pixels.as_slice(),
        |image, offset| ImageDescriptor {
            name: image.name.clone(),
            offset,
            width: image.width,
            height: image.height,
        },
    )
}

/// Concatenate sample data in segmentation order
pub fn pack_samples(samples: &[AudioSample]) -> PackedSamples {
    PackedBlock::pack(
        samples,
        |sample| sample.data.as_slice(),
        |sample, offset| SampleDescriptor {
            offset,
            length: sample.len(),
        },
    )
}

/// Opaque payload carried byte-for-byte
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryBlob {
    /// Kind name, used for the emitted symbol
    pub name: String,
    pub bytes: Vec<u8>,
}

impl BinaryBlob {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Everything the emitter needs, fully packed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPack {
    pub images: PackedImages,
    pub samples: PackedSamples,
    pub blobs: Vec<BinaryBlob>,
}

impl DataPack {
    /// Pack decoded collections; ordering is preserved
    pub fn build(images: &[RasterImage], samples: &[AudioSample], blobs: Vec<BinaryBlob>) -> Self {
        Self {
            images: pack_images(images),
            samples: pack_samples(samples),
            blobs,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.images.validate("images")?;
        self.samples.validate("samples")
    }

    /// Require exactly `capacity` samples
    pub fn check_capacity(&self, capacity: usize) -> Result<()> {
        check_capacity(self.samples.len(), capacity)
    }

    pub fn blob(&self, name: &str) -> Option<&BinaryBlob> {
        self.blobs.iter().find(|blob| blob.name == name)
    }
}

/// Fail unless `actual == expected`
pub fn check_capacity(actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(AssetError::CapacityMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str, size: u32) -> RasterImage {
        RasterImage {
            name: name.to_string(),
            width: size,
            height: size,
            pixels: (0..size * size * 4).map(|i| i as u8).collect(),
        }
    }

    fn sample(len: usize, value: i16) -> AudioSample {
        AudioSample {
            start: 0,
            end: len,
            data: vec![value; len],
        }
    }

    #[test]
    fn test_image_offsets() {
        let images = [image("ONE", 1), image("TWO", 2), image("FOUR", 4)];
        let packed = pack_images(&images);

        let offsets: Vec<usize> = packed.descriptors.iter().map(|d| d.offset).collect();
        assert_eq!(offsets, vec![0, 4, 20]);
        assert_eq!(packed.backing.len(), 4 + 16 + 64);
        assert_eq!(packed.descriptors[2].name, "FOUR");
        assert_eq!((packed.descriptors[1].width, packed.descriptors[1].height), (2, 2));
        assert_eq!(packed.get(1), Some(images[1].pixels.as_slice()));
        packed.validate("images").unwrap();
    }

    #[test]
    fn test_sample_offsets() {
        let tail = 400;
        let samples: Vec<AudioSample> = [10, 20, 30, 40, 50]
            .iter()
            .enumerate()
            .map(|(i, &len)| sample(len + tail, i as i16))
            .collect();
        let packed = pack_samples(&samples);

        assert_eq!(packed.len(), 5);
        let mut expected_offset = 0;
        for (descriptor, sample) in packed.descriptors.iter().zip(&samples) {
            assert_eq!(descriptor.offset, expected_offset);
            assert_eq!(descriptor.length, sample.len());
            expected_offset += descriptor.length;
        }
        assert_eq!(expected_offset, packed.backing.len());
        assert_eq!(packed.backing.len(), 150 + 5 * tail);
        assert_eq!(packed.get(3).unwrap()[0], 3);
        packed.validate("samples").unwrap();
    }

    #[test]
    fn test_packing_is_idempotent() {
        let images = [image("A", 3), image("B", 1)];
        let samples = [sample(7, 1), sample(9, -1)];
        let first = DataPack::build(&images, &samples, vec![BinaryBlob::new("zst", vec![1, 2])]);
        let second = DataPack::build(&images, &samples, vec![BinaryBlob::new("zst", vec![1, 2])]);
        assert_eq!(first, second);
        assert_eq!(first.samples.as_bytes(), second.samples.as_bytes());
    }

    #[test]
    fn test_empty_collections() {
        let pack = DataPack::build(&[], &[], vec![]);
        assert!(pack.images.is_empty());
        assert!(pack.samples.backing.is_empty());
        pack.validate().unwrap();
        assert!(pack.blob("zst").is_none());
    }

    #[test]
    fn test_validate_detects_gap() {
        let mut packed = pack_samples(&[sample(4, 0), sample(4, 0)]);
        packed.descriptors[1].offset = 5;
        assert_eq!(
            packed.validate("samples").unwrap_err(),
            AssetError::CorruptPack {
                block: "samples",
                index: 1,
                reason: "offset does not follow the previous item",
            }
        );
    }

    #[test]
    fn test_validate_detects_uncovered_bytes() {
        let mut packed = pack_images(&[image("A", 1)]);
        packed.backing.push(0);
        assert!(matches!(
            packed.validate("images"),
            Err(AssetError::CorruptPack { index: 1, .. })
        ));
    }

    #[test]
    fn test_capacity() {
        assert_eq!(SAMPLE_TABLE_CAPACITY, 203);
        let samples: Vec<AudioSample> = (0..3).map(|_| sample(2, 1)).collect();
        let pack = DataPack::build(&[], &samples, vec![]);
        pack.check_capacity(3).unwrap();
        assert_eq!(
            pack.check_capacity(SAMPLE_TABLE_CAPACITY).unwrap_err(),
            AssetError::CapacityMismatch {
                expected: 203,
                actual: 3,
            }
        );
    }

    #[test]
    fn test_blob_verbatim() {
        let bytes: Vec<u8> = (0..=255).collect();
        let pack = DataPack::build(&[], &[], vec![BinaryBlob::new("s9x", bytes.clone())]);
        let blob = pack.blob("s9x").unwrap();
        assert_eq!(blob.bytes, bytes);
        assert_eq!(blob.size(), 256);
    }
}
