use std::io::{self, Read};

use symphonia::core::{
    audio::SampleBuffer,
    codecs::{Decoder, DecoderOptions},
    errors::Error as SymphoniaError,
    formats::{FormatOptions, FormatReader},
    io::{MediaSource, MediaSourceStream},
    meta::MetadataOptions,
    probe::Hint,
};
use symphonia::default::{get_codecs, get_probe};

use crate::{
    foundation::error::{WaveformError, WaveformResult},
    source::packed::PackedPcm16,
};

/// Decoded MP3 exposed as interleaved little-endian signed 16-bit PCM bytes.
///
/// Reads always return whole frames (`2 * channels` bytes each).
pub struct Mp3Stream {
    format: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,
    channels: u16,
    declared_frames: Option<u64>,
    sample_buf: Option<SampleBuffer<i16>>,
    pending: Vec<u8>,
    cursor: usize,
    finished: bool,
}

impl Mp3Stream {
    /// Probe `source` and decode its first packet to learn the channel layout.
    pub fn open(source: Box<dyn MediaSource>) -> WaveformResult<Self> {
        let mss = MediaSourceStream::new(source, Default::default());
        let mut hint = Hint::new();
        hint.with_extension("mp3");

        let probed = get_probe().format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )?;
        let format = probed.format;
        let track = format
            .default_track()
            .ok_or_else(|| WaveformError::decode("mp3: no audio track"))?;
        let track_id = track.id;
        let channels = track
            .codec_params
            .channels
            .map(|c| c.count() as u16)
            .unwrap_or(0);
        let declared_frames = track.codec_params.n_frames;
        let decoder = get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

        let mut stream = Self {
            format,
            decoder,
            track_id,
            channels,
            declared_frames,
            sample_buf: None,
            pending: Vec::new(),
            cursor: 0,
            finished: false,
        };
        stream.decode_next()?;
        if stream.channels == 0 {
            stream.channels = 2;
        }
        Ok(stream)
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Total frames in the stream.
    ///
    /// Uses the frame count the demuxer reports when present. Otherwise the remainder of
    /// the stream is decoded and held in memory as 16-bit PCM, about 635 MB per hour of
    /// 44.1 kHz stereo.
    pub fn total_frames(&mut self) -> WaveformResult<u64> {
        if let Some(n) = self.declared_frames {
            return Ok(n);
        }

        let mut rest = self.pending.split_off(self.cursor);
        while !self.finished {
            self.decode_next()?;
            rest.extend_from_slice(&self.pending);
        }
        self.pending = rest;
        self.cursor = 0;

        let frames = (self.pending.len() / self.frame_bytes()) as u64;
        self.declared_frames = Some(frames);
        Ok(frames)
    }

    fn frame_bytes(&self) -> usize {
        usize::from(self.channels.max(1)) * 2
    }

    /// Replace `pending` with the next decoded packet, or mark the stream finished.
    fn decode_next(&mut self) -> WaveformResult<()> {
        self.pending.clear();
        self.cursor = 0;

        while !self.finished {
            let packet = match self.format.next_packet() {
                Ok(p) => p,
                Err(SymphoniaError::IoError(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    self.finished = true;
                    break;
                }
                Err(SymphoniaError::ResetRequired) => {
                    self.finished = true;
                    break;
                }
                Err(e) => return Err(e.into()),
            };
            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = match self.decoder.decode(&packet) {
                Ok(d) => d,
                Err(SymphoniaError::DecodeError(msg)) => {
                    tracing::warn!("skipping corrupt mp3 frame: {msg}");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            if decoded.frames() == 0 {
                continue;
            }

            let spec = *decoded.spec();
            let channels = spec.channels.count() as u16;
            if self.channels == 0 {
                self.channels = channels;
            } else if channels != self.channels {
                return Err(WaveformError::decode(format!(
                    "mp3: channel count changed mid-stream ({} -> {channels})",
                    self.channels
                )));
            }

            // SampleBuffer capacity counts samples, AudioBufferRef capacity counts frames.
            let needed = decoded.capacity() * spec.channels.count();
            if self
                .sample_buf
                .as_ref()
                .is_none_or(|b| b.capacity() < needed)
            {
                self.sample_buf = Some(SampleBuffer::new(decoded.capacity() as u64, spec));
            }
            let Some(buf) = self.sample_buf.as_mut() else {
                continue;
            };
            buf.copy_interleaved_ref(decoded);

            self.pending.reserve(buf.samples().len() * 2);
            for s in buf.samples() {
                self.pending.extend_from_slice(&s.to_le_bytes());
            }
            break;
        }
        Ok(())
    }
}

impl Read for Mp3Stream {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let frame_bytes = self.frame_bytes();
        if out.len() < frame_bytes {
            return Ok(0);
        }

        while self.cursor >= self.pending.len() {
            if self.finished {
                return Ok(0);
            }
            self.decode_next().map_err(|e| match e {
                WaveformError::Io(e) => e,
                other => io::Error::new(io::ErrorKind::InvalidData, other),
            })?;
        }

        let avail = self.pending.len() - self.cursor;
        let n = avail.min(out.len() / frame_bytes * frame_bytes);
        out[..n].copy_from_slice(&self.pending[self.cursor..self.cursor + n]);
        self.cursor += n;
        Ok(n)
    }
}

/// Open an MP3 stream as a sample source sized to its frame count.
///
/// When the demuxer reports no frame count (typically an unseekable source), the whole
/// track is decoded into memory up front to learn its length; see
/// [`Mp3Stream::total_frames`].
#[tracing::instrument(skip_all)]
pub fn open_mp3(source: Box<dyn MediaSource>) -> WaveformResult<PackedPcm16<Mp3Stream>> {
    let mut stream = Mp3Stream::open(source)?;
    let frames = stream.total_frames()?;
    let channels = stream.channels();
    tracing::debug!(channels, frames, "opened mp3");

    let frames = usize::try_from(frames)
        .map_err(|_| WaveformError::config(format!("mp3 too long ({frames} frames)")))?;
    PackedPcm16::new(stream, channels, frames)
}

#[cfg(test)]
#[path = "../../tests/unit/decode/mp3.rs"]
mod tests;
