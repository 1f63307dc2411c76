//! Uniform pull interface over codec-specific raw sample streams.

pub(crate) mod interleaved;
pub(crate) mod packed;

use crate::foundation::{bound::AmplitudeBound, error::WaveformResult};

/// Forward-only stream of raw samples in the encoding's native range.
///
/// Implementations own their scratch buffers, so one instance serves one render at a time.
pub trait SampleSource {
    /// Fill `buf` with the next samples and return how many were written.
    ///
    /// Returns fewer than `buf.len()` only when the stream is exhausted; `0` means
    /// end-of-stream. Decode and transport faults are returned as errors.
    fn read_samples(&mut self, buf: &mut [f64]) -> WaveformResult<usize>;

    /// Number of samples (per channel) the stream declares.
    fn total_samples(&self) -> usize;

    /// Raw value range used to normalize samples into `[-1, 1]`.
    fn bound(&self) -> AmplitudeBound;
}

impl<S: SampleSource + ?Sized> SampleSource for &mut S {
    fn read_samples(&mut self, buf: &mut [f64]) -> WaveformResult<usize> {
        (**self).read_samples(buf)
    }

    fn total_samples(&self) -> usize {
        (**self).total_samples()
    }

    fn bound(&self) -> AmplitudeBound {
        (**self).bound()
    }
}

impl<S: SampleSource + ?Sized> SampleSource for Box<S> {
    fn read_samples(&mut self, buf: &mut [f64]) -> WaveformResult<usize> {
        (**self).read_samples(buf)
    }

    fn total_samples(&self) -> usize {
        (**self).total_samples()
    }

    fn bound(&self) -> AmplitudeBound {
        (**self).bound()
    }
}

/// How a multi-channel frame collapses into one sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelMode {
    /// Keep only the first channel of every frame.
    #[default]
    First,
    /// Average all channels of every frame.
    Mix,
}

impl ChannelMode {
    pub(crate) fn collapse(self, mut frame: impl Iterator<Item = f64>) -> f64 {
        match self {
            Self::First => frame.next().unwrap_or(0.0),
            Self::Mix => {
                let (sum, n) = frame.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
                if n == 0 { 0.0 } else { sum / n as f64 }
            }
        }
    }
}
