/// Convenience result type used across the crate.
pub type WaveformResult<T> = Result<T, WaveformError>;

/// Top-level error taxonomy used by rendering APIs.
#[derive(thiserror::Error, Debug)]
pub enum WaveformError {
    /// Invalid render options or unusable source metadata. Raised before any decoding.
    #[error("config error: {0}")]
    Config(String),

    /// Malformed or truncated raw sample stream.
    #[error("decode error: {0}")]
    Decode(String),

    /// Transport failure while pulling bytes, distinct from end-of-stream.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Faults raised while drawing or serializing the output document.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WaveformError {
    /// Build a [`WaveformError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`WaveformError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`WaveformError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

impl From<hound::Error> for WaveformError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => Self::Io(e),
            hound::Error::Unsupported => Self::config("unsupported wav format"),
            other => Self::decode(format!("wav: {other}")),
        }
    }
}

impl From<symphonia::core::errors::Error> for WaveformError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        use symphonia::core::errors::Error as SymphoniaError;

        match err {
            SymphoniaError::IoError(e) => Self::Io(e),
            other => Self::decode(format!("mp3: {other}")),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
