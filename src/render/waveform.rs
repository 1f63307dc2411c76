use std::{
    any::Any,
    io,
    panic::{self, AssertUnwindSafe},
};

use kurbo::Rect;

use crate::{
    foundation::{
        bound::AmplitudeBound,
        color::Rgba8,
        error::{WaveformError, WaveformResult},
    },
    render::{
        drawer::BarDrawer,
        options::{RenderOptions, ResolvedOptions},
        svg::SvgSurface,
    },
    source::SampleSource,
};

/// Share of each bar slot a bar covers when the width is given explicitly.
pub const BAR_SLOT_FILL: f64 = 0.4;
/// Bar width when the image width is derived from the resolution.
pub const DEFAULT_BAR_WIDTH: f64 = 2.0;

/// One emitted bar, in image pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Rgba8,
}

impl Bar {
    /// Geometry as given; negative extents are kept, not flipped.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// A complete SVG document plus the geometry it was built from.
#[derive(Clone, Debug)]
pub struct RenderedSvg {
    pub width: u32,
    pub height: u32,
    pub background: Option<Rgba8>,
    pub bars: Vec<Bar>,
    pub svg: String,
}

impl RenderedSvg {
    pub fn as_str(&self) -> &str {
        &self.svg
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.svg.as_bytes()
    }

    /// Consume the document as a readable byte stream.
    pub fn into_reader(self) -> io::Cursor<Vec<u8>> {
        io::Cursor::new(self.svg.into_bytes())
    }

    pub fn write_to<W: io::Write>(&self, mut out: W) -> WaveformResult<()> {
        out.write_all(self.svg.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Render `source` with the drawer selected by `options.style`.
pub fn render_waveform<S>(source: &mut S, options: RenderOptions) -> WaveformResult<RenderedSvg>
where
    S: SampleSource + ?Sized,
{
    let style = options.style;
    render_waveform_with(source, options, &style)
}

/// Render `source` with a caller-supplied drawer.
///
/// Options are validated before the source is touched. A panic raised while drawing is
/// reported as [`WaveformError::Render`]; no partial document is ever returned.
#[tracing::instrument(skip_all, fields(resolution = options.resolution, total = source.total_samples()))]
pub fn render_waveform_with<S, D>(
    source: &mut S,
    options: RenderOptions,
    drawer: &D,
) -> WaveformResult<RenderedSvg>
where
    S: SampleSource + ?Sized,
    D: BarDrawer + ?Sized,
{
    options.validate()?;
    let total = source.total_samples();
    let bound = source.bound();
    let resolved = options.apply_defaults(total);

    match panic::catch_unwind(AssertUnwindSafe(|| {
        draw_bars(source, &resolved, bound, drawer)
    })) {
        Ok(result) => result,
        Err(payload) => Err(WaveformError::render(format!(
            "recovered: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

fn draw_bars<S, D>(
    source: &mut S,
    opts: &ResolvedOptions,
    bound: AmplitudeBound,
    drawer: &D,
) -> WaveformResult<RenderedSvg>
where
    S: SampleSource + ?Sized,
    D: BarDrawer + ?Sized,
{
    let total = source.total_samples();
    let (mut bars_wanted, mut bin) = (opts.resolution, 0usize);
    if bars_wanted > 0 {
        bin = (total as f64 / bars_wanted as f64 + 0.5) as usize;
    }
    if bars_wanted > total {
        bars_wanted = total;
        bin = 1;
    }
    let bin = bin.max(1);

    let width = f64::from(opts.width);
    let height = f64::from(opts.height);
    let bar_width = if opts.explicit_width && bars_wanted > 0 {
        width / bars_wanted as f64 * BAR_SLOT_FILL
    } else {
        DEFAULT_BAR_WIDTH
    };
    tracing::debug!(bars_wanted, bin, bar_width, "binning");

    let mut surface = SvgSurface::new(Vec::new());
    surface.start(width, height)?;
    if let Some(bg) = opts.background {
        surface.rect(Rect::new(0.0, 0.0, width, height), bg)?;
    }

    let mut raw = vec![0.0f64; if total == 0 { 0 } else { bin }];
    let mut normalized = Vec::with_capacity(raw.len());
    let mut bars = Vec::with_capacity(bars_wanted);
    let mut consumed = 0usize;
    while consumed < total {
        let want = bin.min(total - consumed);
        let read = source.read_samples(&mut raw[..want])?.min(want);
        if read == 0 {
            tracing::warn!(consumed, total, "sample source ended early");
            break;
        }

        normalized.clear();
        normalized.extend(raw[..read].iter().map(|&v| bound.normalize(v)));
        let (y, h) = drawer.draw(&normalized);

        let bar = Bar {
            x: consumed as f64 / total as f64 * width,
            y: y * height,
            width: bar_width,
            height: h * height,
            fill: opts.color,
        };
        surface.rect(bar.rect(), bar.fill)?;
        bars.push(bar);

        consumed += read;
    }

    let bytes = surface.end()?;
    let svg = String::from_utf8(bytes)
        .map_err(|e| WaveformError::render(format!("svg output is not utf-8: {e}")))?;
    tracing::debug!(bars = bars.len(), "rendered");

    Ok(RenderedSvg {
        width: opts.width,
        height: opts.height,
        background: opts.background,
        bars,
        svg,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/waveform.rs"]
mod tests;
