use serde::{Deserialize, Serialize};

/// Maps one batch of samples normalized to `[-1, 1]` to a bar's `(y, height)`, both
/// expected in `[0, 1]`.
///
/// The renderer does not clamp the output; a drawer returning values outside `[0, 1]`
/// draws outside the image.
pub trait BarDrawer {
    fn draw(&self, samples: &[f64]) -> (f64, f64);
}

impl<F> BarDrawer for F
where
    F: Fn(&[f64]) -> (f64, f64),
{
    fn draw(&self, samples: &[f64]) -> (f64, f64) {
        self(samples)
    }
}

/// Built-in drawers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarStyle {
    /// Largest excursion above and below zero.
    #[default]
    MinMax,
    /// Root-mean-square energy, centered on the midline.
    Rms,
}

impl BarStyle {
    pub fn drawer(self) -> fn(&[f64]) -> (f64, f64) {
        match self {
            Self::MinMax => min_max,
            Self::Rms => rms,
        }
    }
}

impl BarDrawer for BarStyle {
    fn draw(&self, samples: &[f64]) -> (f64, f64) {
        (self.drawer())(samples)
    }
}

/// Flat line on the midline.
const EMPTY_BAR: (f64, f64) = (0.5, 0.0);

/// Span from the most negative to the most positive sample, each taken against zero.
pub fn min_max(samples: &[f64]) -> (f64, f64) {
    if samples.is_empty() {
        return EMPTY_BAR;
    }

    let mut min = 0.0f64;
    let mut max = 0.0f64;
    for &s in samples {
        if s >= 0.0 {
            max = max.max(s);
        } else {
            min = min.min(s);
        }
    }

    // [-1, 1] -> [0, 1]
    let min = (min + 1.0) / 2.0;
    let max = (max + 1.0) / 2.0;
    (min, max - min)
}

/// Bar centered on the midline whose height is the batch's RMS level.
pub fn rms(samples: &[f64]) -> (f64, f64) {
    if samples.is_empty() {
        return EMPTY_BAR;
    }

    let mean_sq = samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64;
    let level = mean_sq.sqrt();
    (0.5 - level / 2.0, level)
}

#[cfg(test)]
#[path = "../../tests/unit/render/drawer.rs"]
mod tests;
