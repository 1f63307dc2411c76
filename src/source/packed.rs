use std::io::{ErrorKind, Read};

use crate::{
    foundation::{
        bound::AmplitudeBound,
        error::{WaveformError, WaveformResult},
    },
    source::{ChannelMode, SampleSource},
};

const BYTES_PER_WORD: usize = 2;

/// Little-endian signed 16-bit PCM pulled from a byte stream.
///
/// Each frame holds one word per channel. With the default [`ChannelMode::First`] and a
/// stereo stream only the first word of every 4-byte stride is decoded.
pub struct PackedPcm16<R> {
    inner: R,
    channels: usize,
    channel_mode: ChannelMode,
    total_samples: usize,
    scratch: Vec<u8>,
}

impl<R: Read> PackedPcm16<R> {
    /// `total_samples` counts frames, not bytes.
    pub fn new(inner: R, channels: u16, total_samples: usize) -> WaveformResult<Self> {
        if channels == 0 {
            return Err(WaveformError::config("packed pcm needs at least one channel"));
        }
        Ok(Self {
            inner,
            channels: usize::from(channels),
            channel_mode: ChannelMode::default(),
            total_samples,
            scratch: Vec::new(),
        })
    }

    /// Interleaved stereo: the layout MP3 decoders emit.
    pub fn stereo(inner: R, total_samples: usize) -> Self {
        Self {
            inner,
            channels: 2,
            channel_mode: ChannelMode::default(),
            total_samples,
            scratch: Vec::new(),
        }
    }

    pub fn with_channel_mode(mut self, mode: ChannelMode) -> Self {
        self.channel_mode = mode;
        self
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn frame_bytes(&self) -> usize {
        self.channels * BYTES_PER_WORD
    }
}

impl<R: Read> SampleSource for PackedPcm16<R> {
    fn read_samples(&mut self, buf: &mut [f64]) -> WaveformResult<usize> {
        let frame_bytes = self.frame_bytes();
        let wanted = buf.len() * frame_bytes;
        if self.scratch.len() < wanted {
            self.scratch.resize(wanted, 0);
        }

        let mut total = 0usize;
        while total < buf.len() {
            let expect = (buf.len() - total) * frame_bytes;
            let read = match self.inner.read(&mut self.scratch[..expect]) {
                Ok(0) => break,
                Ok(n) => n.min(expect),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    return Err(WaveformError::decode(format!("pcm16 stream: {e}")));
                }
                Err(e) => return Err(e.into()),
            };
            if read % frame_bytes != 0 {
                return Err(WaveformError::decode(format!(
                    "expected a multiple of {frame_bytes} bytes to be read (got {read})"
                )));
            }

            let mode = self.channel_mode;
            let frames = self.scratch[..read].chunks_exact(frame_bytes);
            for (slot, frame) in buf[total..].iter_mut().zip(frames) {
                *slot = mode.collapse(
                    frame
                        .chunks_exact(BYTES_PER_WORD)
                        .map(|w| f64::from(i16::from_le_bytes([w[0], w[1]]))),
                );
            }
            total += read / frame_bytes;
        }
        Ok(total)
    }

    fn total_samples(&self) -> usize {
        self.total_samples
    }

    fn bound(&self) -> AmplitudeBound {
        AmplitudeBound::PCM16
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/packed.rs"]
mod tests;
