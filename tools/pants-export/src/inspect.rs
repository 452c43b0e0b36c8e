//! Single-file inspection commands, for tuning thresholds and checking art.

use anyhow::Result;
use clap::Args;
use pants_common::SAMPLES_PER_BANK;
use std::path::PathBuf;

use crate::assets::{file_name, load_image, load_samples};
use crate::manifest::SampleSection;

/// Arguments for the image command
#[derive(Args, Debug)]
pub struct ImageArgs {
    /// Input .tga file
    pub input: PathBuf,
}

/// Arguments for the segment command
#[derive(Args, Debug)]
pub struct SegmentArgs {
    /// Input .wav file
    pub input: PathBuf,

    /// Silence threshold (samples with smaller magnitude are silent)
    #[arg(short = 't', long)]
    pub silence_threshold: Option<i32>,

    /// Silent run that ends a sample
    #[arg(short, long)]
    pub gap_length: Option<usize>,
}

/// Decode one image and report what the builder would emit for it
pub fn image(args: &ImageArgs) -> Result<()> {
    let image = load_image(&args.input)?;
    let total = image.width as usize * image.height as usize;
    let keyed = image.keyed_pixels();

    println!("{}", file_name(&args.input));
    println!("  Identifier: ICON_{}", image.name);
    println!("  Size: {}x{} ({} bytes RGBA)", image.width, image.height, image.data_size());
    println!("  Opaque: {} pixels, keyed: {} pixels", total - keyed, keyed);
    Ok(())
}

/// Segment one recording and print the sample table it produces
pub fn segment(args: &SegmentArgs) -> Result<usize> {
    let mut settings = SampleSection::default();
    if let Some(threshold) = args.silence_threshold {
        settings.silence_threshold = threshold;
    }
    if let Some(gap) = args.gap_length {
        settings.gap_length = gap;
    }

    let samples = load_samples(&args.input, &settings)?;
    println!("{}", file_name(&args.input));
    for (i, sample) in samples.iter().enumerate() {
        println!(
            "  sample[{:2},{:2}] > {:5} samples [{:6}:{:6}]",
            i / SAMPLES_PER_BANK,
            i % SAMPLES_PER_BANK,
            sample.len(),
            sample.start,
            sample.end
        );
    }
    println!(
        "  {} samples (runtime table holds {})",
        samples.len(),
        settings.capacity
    );
    Ok(samples.len())
}
