use serde::{Deserialize, Serialize};

use crate::{
    foundation::{
        color::Rgba8,
        error::{WaveformError, WaveformResult},
    },
    render::drawer::BarStyle,
};

/// Height used when none is given.
pub const DEFAULT_HEIGHT: u32 = 540;
/// Default width per bar when no width is given.
pub const DEFAULT_PX_PER_BAR: u32 = 5;

/// Caller-facing image options for one render.
///
/// `width`/`height` of zero are treated as unset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Number of bars. Required.
    pub resolution: usize,
    /// Image width in pixels. Default: `resolution * 5`.
    pub width: Option<u32>,
    /// Image height in pixels. Default: 540.
    pub height: Option<u32>,
    /// Background fill. Default: transparent.
    pub background: Option<Rgba8>,
    /// Bar fill. Default: black.
    pub color: Option<Rgba8>,
    /// Bar shape strategy. Default: min/max.
    pub style: BarStyle,
}

impl RenderOptions {
    pub fn new(resolution: usize) -> Self {
        Self {
            resolution,
            ..Self::default()
        }
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn background(mut self, color: Rgba8) -> Self {
        self.background = Some(color);
        self
    }

    pub fn color(mut self, color: Rgba8) -> Self {
        self.color = Some(color);
        self
    }

    pub fn style(mut self, style: BarStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(&self) -> WaveformResult<()> {
        if self.resolution == 0 {
            return Err(WaveformError::config("resolution option is required"));
        }
        Ok(())
    }

    /// Clamp the resolution to the stream length and fill geometry defaults.
    ///
    /// Consumes the options: one value serves exactly one render.
    pub fn apply_defaults(self, total_samples: usize) -> ResolvedOptions {
        let resolution = self.resolution.min(total_samples);
        let width = self.width.filter(|&w| w > 0);
        let height = self.height.filter(|&h| h > 0);

        ResolvedOptions {
            resolution,
            width: width.unwrap_or_else(|| default_width(resolution)),
            height: height.unwrap_or(DEFAULT_HEIGHT),
            explicit_width: width.is_some(),
            background: self.background,
            color: self.color.unwrap_or(Rgba8::BLACK),
            style: self.style,
        }
    }

    /// [`validate`](Self::validate) then [`apply_defaults`](Self::apply_defaults).
    pub fn resolve(self, total_samples: usize) -> WaveformResult<ResolvedOptions> {
        self.validate()?;
        Ok(self.apply_defaults(total_samples))
    }
}

fn default_width(resolution: usize) -> u32 {
    u32::try_from(resolution.saturating_mul(DEFAULT_PX_PER_BAR as usize)).unwrap_or(u32::MAX)
}

/// Options after validation and defaulting. Immutable for the duration of a render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedOptions {
    pub resolution: usize,
    pub width: u32,
    pub height: u32,
    /// Whether `width` came from the caller rather than the per-bar default.
    pub explicit_width: bool,
    pub background: Option<Rgba8>,
    pub color: Rgba8,
    pub style: BarStyle,
}

#[cfg(test)]
#[path = "../../tests/unit/render/options.rs"]
mod tests;
