use anyhow::Context;

use crate::{
    foundation::error::{WaveformError, WaveformResult},
    render::waveform::RenderedSvg,
};

/// Rasterize a rendered document into straight-alpha RGBA8 pixels.
#[tracing::instrument(skip_all, fields(width = svg.width, height = svg.height))]
pub fn rasterize(svg: &RenderedSvg) -> WaveformResult<image::RgbaImage> {
    if svg.width == 0 || svg.height == 0 {
        return Err(WaveformError::render(format!(
            "cannot rasterize an empty {}x{} canvas",
            svg.width, svg.height
        )));
    }

    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse rendered svg")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(svg.width, svg.height)
        .ok_or_else(|| WaveformError::render("allocate pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::default(),
        &mut pixmap.as_mut(),
    );

    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    image::RgbaImage::from_raw(svg.width, svg.height, rgba)
        .ok_or_else(|| WaveformError::render("pixel buffer does not match canvas size"))
}

impl RenderedSvg {
    /// See [`rasterize`].
    pub fn to_rgba_image(&self) -> WaveformResult<image::RgbaImage> {
        rasterize(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
