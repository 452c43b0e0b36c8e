//! Sample loading: one recording in, many segmented samples out.

use anyhow::{Context, Result};
use pants_common::{AudioSample, read_pcm, segment_samples};
use std::io::Cursor;
use std::path::Path;

use super::utils::{MAX_ASSET_BYTES, file_name, read_file_with_limit};
use crate::manifest::SampleSection;

/// Load a WAV recording and split it into samples
///
/// The header is skipped by size, not parsed. It is still inspected so that
/// a recording in the wrong format produces a warning instead of silently
/// segmenting garbage.
pub fn load_samples(path: &Path, settings: &SampleSection) -> Result<Vec<AudioSample>> {
    let data = read_file_with_limit(path, MAX_ASSET_BYTES)?;
    tracing::info!("Samples: {} ({} bytes)", file_name(path), data.len());

    inspect_header(path, &data, settings);

    let pcm = read_pcm(&data, settings.header_bytes)
        .with_context(|| format!("Failed to read samples: {}", path.display()))?;
    tracing::info!("  {} samples unpacked", pcm.len());

    Ok(segment_samples(&pcm, settings.params()))
}

/// Warn when the header does not describe what the segmenter assumes
fn inspect_header(path: &Path, data: &[u8], settings: &SampleSection) {
    let reader = match hound::WavReader::new(Cursor::new(data)) {
        Ok(reader) => reader,
        Err(e) => {
            tracing::warn!(
                "{}: unreadable WAV header ({}), reading raw PCM after {} bytes",
                file_name(path),
                e,
                settings.header_bytes
            );
            return;
        }
    };

    let spec = reader.spec();
    if spec.channels != 1
        || spec.bits_per_sample != 16
        || spec.sample_format != hound::SampleFormat::Int
    {
        tracing::warn!(
            "{}: {} channel(s), {}-bit {:?}; expected mono 16-bit integer PCM",
            file_name(path),
            spec.channels,
            spec.bits_per_sample,
            spec.sample_format
        );
    }
    if spec.sample_rate != settings.sample_rate {
        tracing::warn!(
            "{}: {} Hz, expected {} Hz (no resampling is done)",
            file_name(path),
            spec.sample_rate,
            settings.sample_rate
        );
    }

    let data_bytes = reader.len() as usize * usize::from(spec.bits_per_sample / 8);
    let body_bytes = data.len().saturating_sub(settings.header_bytes);
    if data_bytes != body_bytes {
        tracing::warn!(
            "{}: data chunk is {} bytes but {} bytes follow the {}-byte header (extra chunks?)",
            file_name(path),
            data_bytes,
            body_bytes,
            settings.header_bytes
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_wav(path: &Path, samples: &[i16]) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 32000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_segments_wav_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inst.wav");

        let mut pcm = vec![0i16; 1000];
        pcm.extend(std::iter::repeat_n(1200, 300));
        pcm.extend(std::iter::repeat_n(0, 4000));
        pcm.extend(std::iter::repeat_n(-1200, 200));
        pcm.extend(std::iter::repeat_n(0, 4000));
        write_wav(&path, &pcm);

        let samples = load_samples(&path, &SampleSection::default()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!((samples[0].start, samples[0].end), (1000, 1300));
        assert_eq!(samples[0].len(), 700);
        assert_eq!(samples[1].data[0], -1200);
    }

    #[test]
    fn test_truncated_wav_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.wav");
        std::fs::write(&path, [0u8; 10]).unwrap();

        let err = load_samples(&path, &SampleSection::default()).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("short.wav"), "{}", message);
        assert!(message.contains("Truncated input"), "{}", message);
    }
}
