//! Codec bindings producing the raw sample capabilities the adapters consume.

pub(crate) mod mp3;
pub(crate) mod wav;

use std::path::Path;

use crate::foundation::error::{WaveformError, WaveformResult};

/// Container formats the crate can decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Wav,
    Mp3,
}

impl AudioFormat {
    /// Pick the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> WaveformResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("wav" | "wave") => Ok(Self::Wav),
            Some("mp3") => Ok(Self::Mp3),
            _ => Err(WaveformError::config(format!(
                "unsupported audio file '{}' (expected .wav or .mp3)",
                path.display()
            ))),
        }
    }
}
