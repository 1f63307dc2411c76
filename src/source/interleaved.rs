use crate::{
    foundation::{
        bound::AmplitudeBound,
        error::{WaveformError, WaveformResult},
    },
    source::{ChannelMode, SampleSource},
};

/// Interleaved signed integer PCM, as delivered by WAV-like decoders.
pub trait PcmFrames {
    fn channels(&self) -> u16;

    fn bits_per_sample(&self) -> u16;

    /// Fill `buf` with interleaved samples and return how many were written. `0` means
    /// end-of-stream.
    fn read_interleaved(&mut self, buf: &mut [i32]) -> WaveformResult<usize>;
}

/// Adapts interleaved multi-channel integer PCM into one sample per frame.
pub struct InterleavedPcm<P> {
    inner: P,
    channels: usize,
    channel_mode: ChannelMode,
    total_samples: usize,
    bound: AmplitudeBound,
    scratch: Vec<i32>,
}

impl<P: PcmFrames> InterleavedPcm<P> {
    /// `total_samples` counts frames.
    pub fn new(inner: P, total_samples: usize) -> WaveformResult<Self> {
        let channels = inner.channels();
        let bits = inner.bits_per_sample();
        if bits < 8 || channels == 0 {
            return Err(WaveformError::config(format!(
                "failed to retrieve correct bit depth / num channels ({bits}, {channels})"
            )));
        }
        Ok(Self {
            bound: AmplitudeBound::from_bit_depth(bits)?,
            inner,
            channels: usize::from(channels),
            channel_mode: ChannelMode::default(),
            total_samples,
            scratch: Vec::new(),
        })
    }

    pub fn with_channel_mode(mut self, mode: ChannelMode) -> Self {
        self.channel_mode = mode;
        self
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: PcmFrames> SampleSource for InterleavedPcm<P> {
    fn read_samples(&mut self, buf: &mut [f64]) -> WaveformResult<usize> {
        let channels = self.channels;
        let wanted = buf.len() * channels;
        if self.scratch.len() < wanted {
            self.scratch.resize(wanted, 0);
        }

        let mut frames = 0usize;
        while frames < buf.len() {
            let expect = (buf.len() - frames) * channels;
            // Decoders have been seen reporting more than the buffer holds.
            let read = self
                .inner
                .read_interleaved(&mut self.scratch[..expect])?
                .min(expect);
            let whole = read / channels;
            if whole == 0 {
                break;
            }

            let mode = self.channel_mode;
            let src = self.scratch[..whole * channels].chunks_exact(channels);
            for (slot, frame) in buf[frames..].iter_mut().zip(src) {
                *slot = mode.collapse(frame.iter().map(|&v| f64::from(v)));
            }
            frames += whole;
        }
        Ok(frames)
    }

    fn total_samples(&self) -> usize {
        self.total_samples
    }

    fn bound(&self) -> AmplitudeBound {
        self.bound
    }
}

/// Already-decoded interleaved PCM held in memory.
#[derive(Clone, Debug)]
pub struct MemoryPcm {
    samples: Vec<i32>,
    pos: usize,
    channels: u16,
    bits_per_sample: u16,
}

impl MemoryPcm {
    pub fn new(samples: Vec<i32>, channels: u16, bits_per_sample: u16) -> Self {
        Self {
            samples,
            pos: 0,
            channels,
            bits_per_sample,
        }
    }

    /// Whole frames held, regardless of the read position.
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / usize::from(self.channels)
        }
    }

    /// Wrap into a sample source declaring every held frame.
    pub fn into_source(self) -> WaveformResult<InterleavedPcm<Self>> {
        let frames = self.frames();
        InterleavedPcm::new(self, frames)
    }
}

impl PcmFrames for MemoryPcm {
    fn channels(&self) -> u16 {
        self.channels
    }

    fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    fn read_interleaved(&mut self, buf: &mut [i32]) -> WaveformResult<usize> {
        let rest = &self.samples[self.pos..];
        let n = rest.len().min(buf.len());
        buf[..n].copy_from_slice(&rest[..n]);
        self.pos += n;
        Ok(n)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/interleaved.rs"]
mod tests;
