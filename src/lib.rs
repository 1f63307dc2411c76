//! svg-waveform renders decoded audio (WAV or MP3) into an SVG waveform image.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: a codec binding (`hound` for WAV, `symphonia` for MP3) yields raw PCM.
//! 2. **Adapt**: a [`SampleSource`] turns that PCM into one raw sample per frame, with the
//!    encoding's [`AmplitudeBound`].
//! 3. **Bin**: [`render_waveform`] splits the stream into `resolution` bins and normalizes
//!    each bin to `[-1, 1]`.
//! 4. **Draw**: a [`BarDrawer`] maps each bin to a bar's vertical position and height.
//! 5. **Emit**: an [`SvgSurface`] serializes the bars; [`rasterize`] optionally turns the
//!    document into pixels.
//!
//! The pipeline is synchronous and pull-based. A render returns either a complete
//! document or a [`WaveformError`], never both.
#![forbid(unsafe_code)]

mod decode;
mod foundation;
mod pipeline;
mod render;
mod source;

pub use decode::AudioFormat;
pub use decode::mp3::{Mp3Stream, open_mp3};
pub use decode::wav::{WavPcm, open_wav};
pub use foundation::bound::AmplitudeBound;
pub use foundation::color::{Rgba8, color_to_hex};
pub use foundation::error::{WaveformError, WaveformResult};
pub use pipeline::{
    render_mp3, render_mp3_with_channels, render_path, render_wav, render_wav_with_channels,
};
pub use render::drawer::{BarDrawer, BarStyle, min_max, rms};
pub use render::options::{DEFAULT_HEIGHT, DEFAULT_PX_PER_BAR, RenderOptions, ResolvedOptions};
pub use render::raster::rasterize;
pub use render::svg::SvgSurface;
pub use render::waveform::{
    BAR_SLOT_FILL, Bar, DEFAULT_BAR_WIDTH, RenderedSvg, render_waveform, render_waveform_with,
};
pub use source::interleaved::{InterleavedPcm, MemoryPcm, PcmFrames};
pub use source::packed::PackedPcm16;
pub use source::{ChannelMode, SampleSource};
pub use symphonia::core::io::MediaSource;
