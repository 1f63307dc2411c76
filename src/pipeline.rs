use std::{fs::File, io::Read, path::Path};

use symphonia::core::io::MediaSource;

use crate::{
    decode::{AudioFormat, mp3::open_mp3, wav::open_wav},
    foundation::error::WaveformResult,
    render::{
        options::RenderOptions,
        waveform::{RenderedSvg, render_waveform},
    },
    source::ChannelMode,
};

/// Decode + render a WAV stream.
///
/// Pipeline:
/// 1. [`open_wav`](crate::open_wav)
/// 2. [`render_waveform`](crate::render_waveform)
pub fn render_wav<R: Read>(reader: R, options: RenderOptions) -> WaveformResult<RenderedSvg> {
    render_wav_with_channels(reader, options, ChannelMode::default())
}

pub fn render_wav_with_channels<R: Read>(
    reader: R,
    options: RenderOptions,
    channels: ChannelMode,
) -> WaveformResult<RenderedSvg> {
    options.validate()?;
    let mut source = open_wav(reader)?.with_channel_mode(channels);
    render_waveform(&mut source, options)
}

/// Decode + render an MP3 stream.
///
/// Pipeline:
/// 1. [`open_mp3`](crate::open_mp3)
/// 2. [`render_waveform`](crate::render_waveform)
pub fn render_mp3(
    source: Box<dyn MediaSource>,
    options: RenderOptions,
) -> WaveformResult<RenderedSvg> {
    render_mp3_with_channels(source, options, ChannelMode::default())
}

pub fn render_mp3_with_channels(
    source: Box<dyn MediaSource>,
    options: RenderOptions,
    channels: ChannelMode,
) -> WaveformResult<RenderedSvg> {
    options.validate()?;
    let mut source = open_mp3(source)?.with_channel_mode(channels);
    render_waveform(&mut source, options)
}

/// Render an audio file, choosing the decoder from its extension.
#[tracing::instrument(skip(options))]
pub fn render_path(
    path: &Path,
    options: RenderOptions,
    channels: ChannelMode,
) -> WaveformResult<RenderedSvg> {
    let format = AudioFormat::from_path(path)?;
    options.validate()?;
    let file = File::open(path)?;
    tracing::info!(?format, "decoding");

    match format {
        AudioFormat::Wav => {
            render_wav_with_channels(std::io::BufReader::new(file), options, channels)
        }
        AudioFormat::Mp3 => render_mp3_with_channels(Box::new(file), options, channels),
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
