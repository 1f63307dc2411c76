use std::{io::Cursor, path::PathBuf};

use symphonia::core::io::ReadOnlySource;

use super::*;
use crate::{
    render::{options::RenderOptions, waveform::render_waveform},
    source::SampleSource,
};

/// MPEG-2 Layer III, 22.05 kHz mono, 45 frames of 576 samples.
const MONO_FRAMES: usize = 45 * 576;
/// MPEG-1 Layer III, 48 kHz stereo, 24 silent frames of 1152 samples.
const STEREO_FRAMES: usize = 24 * 1152;

fn fixture(name: &str) -> Vec<u8> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read(&path).unwrap()
}

fn drain<S: SampleSource>(src: &mut S) -> usize {
    let mut buf = vec![0.0; 1000];
    let mut seen = 0;
    loop {
        let n = src.read_samples(&mut buf).unwrap();
        if n == 0 {
            return seen;
        }
        seen += n;
    }
}

#[test]
fn empty_input_is_rejected() {
    assert!(Mp3Stream::open(Box::new(Cursor::new(Vec::<u8>::new()))).is_err());
}

#[test]
fn non_mp3_bytes_are_rejected() {
    let junk: Vec<u8> = (0..4096u32).map(|i| (i % 7) as u8).collect();
    assert!(open_mp3(Box::new(Cursor::new(junk))).is_err());
}

#[test]
fn mono_file_reports_channels_and_length() {
    let src = open_mp3(Box::new(Cursor::new(fixture("mono.mp3")))).unwrap();
    assert_eq!(src.channels(), 1);
    assert_eq!(src.total_samples(), MONO_FRAMES);
}

#[test]
fn mono_file_renders_every_bin() {
    let mut src = open_mp3(Box::new(Cursor::new(fixture("mono.mp3")))).unwrap();
    let out = render_waveform(&mut src, RenderOptions::new(50)).unwrap();

    // 25920 / round(518.4) leaves a short 51st bin.
    assert_eq!(out.bars.len(), 51);
    assert!(out.svg.trim_end().ends_with("</svg>"));
}

#[test]
fn stereo_file_keeps_both_channels() {
    let mut src = open_mp3(Box::new(Cursor::new(fixture("stereo_silence.mp3")))).unwrap();
    assert_eq!(src.channels(), 2);
    let total = src.total_samples();
    assert!(
        total > 0 && total % 1152 == 0 && total <= STEREO_FRAMES,
        "{total}"
    );

    let out = render_waveform(&mut src, RenderOptions::new(12)).unwrap();
    assert!(!out.bars.is_empty());
    assert!(out.bars.iter().all(|b| b.height < 0.01));
}

#[test]
fn reads_hand_out_whole_frames() {
    let mut stereo =
        Mp3Stream::open(Box::new(Cursor::new(fixture("stereo_silence.mp3")))).unwrap();
    let mut buf = [0u8; 7];
    assert_eq!(stereo.read(&mut buf).unwrap(), 4);

    let mut mono = Mp3Stream::open(Box::new(Cursor::new(fixture("mono.mp3")))).unwrap();
    assert_eq!(mono.channels(), 1);
    assert_eq!(mono.read(&mut buf).unwrap(), 6);
}

#[test]
fn unseekable_stream_is_counted_by_decoding() {
    let source = ReadOnlySource::new(Cursor::new(fixture("mono.mp3")));
    let mut src = open_mp3(Box::new(source)).unwrap();
    let total = src.total_samples();
    assert!(total > 0);

    // Counting buffers the decoded stream; nothing is lost before the first read.
    assert_eq!(drain(&mut src), total);
}

#[test]
fn frame_count_is_stable_once_known() {
    let source = ReadOnlySource::new(Cursor::new(fixture("mono.mp3")));
    let mut stream = Mp3Stream::open(Box::new(source)).unwrap();
    let first = stream.total_frames().unwrap();
    assert_eq!(stream.total_frames().unwrap(), first);
}
