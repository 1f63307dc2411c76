use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        WaveformError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(
        WaveformError::decode("x")
            .to_string()
            .contains("decode error:")
    );
    assert!(
        WaveformError::render("x")
            .to_string()
            .contains("render error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = WaveformError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn hound_io_errors_stay_io() {
    let err: WaveformError = hound::Error::IoError(std::io::Error::other("pipe")).into();
    assert!(matches!(err, WaveformError::Io(_)));

    let err: WaveformError = hound::Error::FormatError("bad riff").into();
    assert!(matches!(err, WaveformError::Decode(_)));
}

#[test]
fn symphonia_decode_errors_map_to_decode() {
    let err: WaveformError = symphonia::core::errors::Error::DecodeError("bad frame").into();
    assert!(matches!(err, WaveformError::Decode(_)));
}
