use std::io::Read;

use crate::{
    foundation::error::{WaveformError, WaveformResult},
    source::interleaved::{InterleavedPcm, PcmFrames},
};

/// Integer PCM pulled from a WAV container.
pub struct WavPcm<R: Read> {
    reader: hound::WavReader<R>,
}

impl<R: Read> WavPcm<R> {
    pub fn new(reader: R) -> WaveformResult<Self> {
        let reader = hound::WavReader::new(reader)?;
        let spec = reader.spec();
        if spec.sample_format != hound::SampleFormat::Int {
            return Err(WaveformError::config("float wav samples are not supported"));
        }
        if spec.bits_per_sample < 8 || spec.channels == 0 {
            return Err(WaveformError::config(format!(
                "failed to retrieve correct bit depth / num channels ({}, {})",
                spec.bits_per_sample, spec.channels
            )));
        }
        Ok(Self { reader })
    }

    pub fn spec(&self) -> hound::WavSpec {
        self.reader.spec()
    }

    /// Frames declared by the data chunk.
    pub fn frames(&self) -> usize {
        self.reader.duration() as usize
    }
}

impl<R: Read> PcmFrames for WavPcm<R> {
    fn channels(&self) -> u16 {
        self.reader.spec().channels
    }

    fn bits_per_sample(&self) -> u16 {
        self.reader.spec().bits_per_sample
    }

    fn read_interleaved(&mut self, buf: &mut [i32]) -> WaveformResult<usize> {
        let mut n = 0usize;
        for (slot, sample) in buf.iter_mut().zip(self.reader.samples::<i32>()) {
            *slot = sample?;
            n += 1;
        }
        Ok(n)
    }
}

/// Open a WAV stream as a sample source sized to its declared frame count.
#[tracing::instrument(skip_all)]
pub fn open_wav<R: Read>(reader: R) -> WaveformResult<InterleavedPcm<WavPcm<R>>> {
    let pcm = WavPcm::new(reader)?;
    let spec = pcm.spec();
    let frames = pcm.frames();
    tracing::debug!(
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits_per_sample = spec.bits_per_sample,
        frames,
        "opened wav"
    );
    InterleavedPcm::new(pcm, frames)
}

#[cfg(test)]
#[path = "../../tests/unit/decode/wav.rs"]
mod tests;
