//! Silence-driven sample segmentation
//!
//! A continuous recording of many instrument notes is split into one sample
//! per note. Each note starts at the first loud sample after silence and ends
//! once a long enough run of silence follows it. Short candidates are noise
//! and are dropped. Every accepted sample keeps a few hundred samples of what
//! followed it, faded linearly to zero so playback does not end with a pop.

/// Segmentation thresholds
///
/// Defaults are tuned for the 32000 Hz instrument recording; `silence_threshold`
/// in particular may need adjusting to get the expected number of samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentParams {
    /// A sample is silent if its magnitude is strictly below this
    pub silence_threshold: i32,
    /// Run of silent samples that ends a segment
    pub gap_length: usize,
    /// Samples kept past the segment end and faded out
    pub tail_length: usize,
    /// Candidates this long or shorter are discarded as noise
    pub noise_length: usize,
}

impl Default for SegmentParams {
    fn default() -> Self {
        Self {
            silence_threshold: 26,
            gap_length: 3200,
            tail_length: 400,
            noise_length: 5,
        }
    }
}

impl SegmentParams {
    pub fn is_silent(&self, sample: i16) -> bool {
        i32::from(sample).abs() < self.silence_threshold
    }
}

/// One segmented sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSample {
    /// Index of the first sample in the source stream
    pub start: usize,
    /// Source index just past the last loud sample, before the tail
    pub end: usize,
    /// Source samples `start..end + tail`, tail faded
    pub data: Vec<i16>,
}

impl AudioSample {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Iterator over the segments of a PCM stream, in stream order
pub struct Segmenter<'a> {
    samples: &'a [i16],
    params: SegmentParams,
    pos: usize,
}

impl<'a> Segmenter<'a> {
    pub fn new(samples: &'a [i16], params: SegmentParams) -> Self {
        Self {
            samples,
            params,
            pos: 0,
        }
    }

    /// Find the next candidate `(start, end)` or `None` at end of stream
    fn next_candidate(&mut self) -> Option<(usize, usize)> {
        let s = self.samples;
        let params = &self.params;

        while self.pos < s.len() && params.is_silent(s[self.pos]) {
            self.pos += 1;
        }
        if self.pos >= s.len() {
            return None;
        }

        let start = self.pos;
        let mut silent_run = 0;
        let mut end = start + 1;
        while end < s.len() && silent_run < params.gap_length {
            if params.is_silent(s[end]) {
                silent_run += 1;
            } else {
                silent_run = 0;
            }
            end += 1;
        }
        let end = end - silent_run;

        // Resume at the pre-tail boundary; the tail lies inside trailing silence
        self.pos = end;
        Some((start, end))
    }
}

impl Iterator for Segmenter<'_> {
    type Item = AudioSample;

    fn next(&mut self) -> Option<AudioSample> {
        loop {
            let (start, end) = self.next_candidate()?;
            if end - start <= self.params.noise_length {
                continue;
            }

            let tail_end = (end + self.params.tail_length).min(self.samples.len());
            let data = fade_tail(self.samples[start..tail_end].to_vec(), self.params.tail_length);
            return Some(AudioSample { start, end, data });
        }
    }
}

/// Split a PCM stream into samples
pub fn segment_samples(samples: &[i16], params: SegmentParams) -> Vec<AudioSample> {
    Segmenter::new(samples, params).collect()
}

/// Fade the last `tail_length` samples linearly to zero
///
/// Counting `k` from the end (`k = 0` is the final sample) each sample is
/// scaled by `k / tail_length`, truncating toward zero.
pub fn fade_tail(mut data: Vec<i16>, tail_length: usize) -> Vec<i16> {
    if tail_length == 0 {
        return data;
    }
    let len = data.len();
    for k in 0..tail_length.min(len) {
        let p = len - 1 - k;
        data[p] = (k as i64 * i64::from(data[p]) / tail_length as i64) as i16;
    }
    data
}
