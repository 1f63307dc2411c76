use crate::foundation::error::{WaveformError, WaveformResult};

/// Inclusive raw value range an encoding's samples occupy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmplitudeBound {
    pub upper: f64,
    pub lower: f64,
}

impl AmplitudeBound {
    /// Signed 16-bit PCM: `[-32768, 32767]`.
    pub const PCM16: Self = Self {
        upper: 32767.0,
        lower: -32768.0,
    };

    pub fn new(lower: f64, upper: f64) -> WaveformResult<Self> {
        if !lower.is_finite() || !upper.is_finite() || upper <= lower {
            return Err(WaveformError::config(format!(
                "amplitude bound must satisfy lower < upper (got [{lower}, {upper}])"
            )));
        }
        Ok(Self { upper, lower })
    }

    /// Signed N-bit PCM: `[-2^(N-1), 2^(N-1) - 1]`.
    pub fn from_bit_depth(bits: u16) -> WaveformResult<Self> {
        if !(8..=32).contains(&bits) {
            return Err(WaveformError::config(format!(
                "bit depth must be within 8..=32 (got {bits})"
            )));
        }
        let half = 2f64.powi(i32::from(bits) - 1);
        Ok(Self {
            upper: half - 1.0,
            lower: -half,
        })
    }

    /// Map a raw sample into `[-1, 1]`.
    pub fn normalize(&self, v: f64) -> f64 {
        2.0 * (v - self.lower) / (self.upper - self.lower) - 1.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/bound.rs"]
mod tests;
