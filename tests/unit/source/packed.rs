use std::io::Cursor;

use super::*;

fn stereo_bytes(frames: &[(i16, i16)]) -> Vec<u8> {
    let mut out = Vec::with_capacity(frames.len() * 4);
    for (l, r) in frames {
        out.extend_from_slice(&l.to_le_bytes());
        out.extend_from_slice(&r.to_le_bytes());
    }
    out
}

/// Hands out at most `step` bytes per read.
struct Trickle {
    data: Vec<u8>,
    pos: usize,
    step: usize,
}

impl Read for Trickle {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.step.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

struct Broken;

impl Read for Broken {
    fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
        Err(std::io::Error::other("transport gone"))
    }
}

#[test]
fn decodes_first_word_of_each_stereo_frame() {
    let bytes = stereo_bytes(&[(1, 100), (-2, 200), (32767, 0), (-32768, 5)]);
    let mut src = PackedPcm16::stereo(Cursor::new(bytes), 4);

    let mut buf = [0.0; 4];
    assert_eq!(src.read_samples(&mut buf).unwrap(), 4);
    assert_eq!(buf, [1.0, -2.0, 32767.0, -32768.0]);
    assert_eq!(src.bound(), AmplitudeBound::PCM16);
    assert_eq!(src.total_samples(), 4);
}

#[test]
fn mix_mode_averages_channels() {
    let bytes = stereo_bytes(&[(100, 300), (-10, 10)]);
    let mut src = PackedPcm16::stereo(Cursor::new(bytes), 2).with_channel_mode(ChannelMode::Mix);

    let mut buf = [0.0; 2];
    assert_eq!(src.read_samples(&mut buf).unwrap(), 2);
    assert_eq!(buf, [200.0, 0.0]);
}

#[test]
fn mono_stream_uses_two_byte_frames() {
    let bytes: Vec<u8> = [5i16, -6, 7].iter().flat_map(|v| v.to_le_bytes()).collect();
    let mut src = PackedPcm16::new(Cursor::new(bytes), 1, 3).unwrap();

    let mut buf = [0.0; 3];
    assert_eq!(src.read_samples(&mut buf).unwrap(), 3);
    assert_eq!(buf, [5.0, -6.0, 7.0]);
}

#[test]
fn accumulates_across_partial_reads() {
    let data = stereo_bytes(&[(1, 0), (2, 0), (3, 0)]);
    let mut src = PackedPcm16::stereo(
        Trickle {
            data,
            pos: 0,
            step: 4,
        },
        3,
    );

    let mut buf = [0.0; 3];
    assert_eq!(src.read_samples(&mut buf).unwrap(), 3);
    assert_eq!(buf, [1.0, 2.0, 3.0]);
}

#[test]
fn short_read_only_at_end_of_stream() {
    let bytes = stereo_bytes(&[(9, 0), (8, 0)]);
    let mut src = PackedPcm16::stereo(Cursor::new(bytes), 2);

    let mut buf = [0.0; 5];
    assert_eq!(src.read_samples(&mut buf).unwrap(), 2);
    assert_eq!(src.read_samples(&mut buf).unwrap(), 0);
}

#[test]
fn misaligned_read_is_a_decode_error() {
    let mut bytes = stereo_bytes(&[(1, 1)]);
    bytes.extend_from_slice(&[0xAA, 0xBB]);
    let mut src = PackedPcm16::stereo(Cursor::new(bytes), 2);

    let mut buf = [0.0; 2];
    let err = src.read_samples(&mut buf).unwrap_err();
    assert!(matches!(err, WaveformError::Decode(_)), "{err}");
}

#[test]
fn transport_failure_is_an_io_error() {
    let mut src = PackedPcm16::stereo(Broken, 10);
    let mut buf = [0.0; 2];
    assert!(matches!(
        src.read_samples(&mut buf),
        Err(WaveformError::Io(_))
    ));
}

#[test]
fn zero_channels_rejected() {
    assert!(matches!(
        PackedPcm16::new(Cursor::new(Vec::<u8>::new()), 0, 0),
        Err(WaveformError::Config(_))
    ));
}
