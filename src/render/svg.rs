use std::io::Write;

use kurbo::Rect;

use crate::foundation::{
    color::{Rgba8, color_to_hex},
    error::{WaveformError, WaveformResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SurfaceState {
    Fresh,
    Open,
}

/// Append-only SVG document writer: `start`, any number of `rect`s, then `end`.
pub struct SvgSurface<W: Write> {
    out: W,
    state: SurfaceState,
    rects: usize,
}

impl<W: Write> SvgSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            state: SurfaceState::Fresh,
            rects: 0,
        }
    }

    /// Write the prologue and open the root canvas.
    pub fn start(&mut self, width: f64, height: f64) -> WaveformResult<()> {
        if self.state != SurfaceState::Fresh {
            return Err(WaveformError::render("svg surface already started"));
        }
        let (w, h) = (fmt_num(width), fmt_num(height));
        writeln!(self.out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            self.out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        )?;
        self.state = SurfaceState::Open;
        Ok(())
    }

    /// Append one filled rectangle. Alpha is not serialized.
    pub fn rect(&mut self, rect: Rect, fill: Rgba8) -> WaveformResult<()> {
        if self.state != SurfaceState::Open {
            return Err(WaveformError::render("svg surface not started"));
        }
        writeln!(
            self.out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            fmt_num(rect.x0),
            fmt_num(rect.y0),
            fmt_num(rect.width()),
            fmt_num(rect.height()),
            color_to_hex(fill),
        )?;
        self.rects += 1;
        Ok(())
    }

    pub fn rect_count(&self) -> usize {
        self.rects
    }

    /// Close the document and hand back the writer.
    pub fn end(mut self) -> WaveformResult<W> {
        if self.state != SurfaceState::Open {
            return Err(WaveformError::render("svg surface not started"));
        }
        writeln!(self.out, "</svg>")?;
        self.out.flush()?;
        Ok(self.out)
    }
}

/// At most three decimals, no trailing zeros, no negative zero.
pub(crate) fn fmt_num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
