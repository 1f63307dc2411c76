use super::*;

/// Claims to have written more samples than the buffer holds.
struct OverReporting {
    inner: MemoryPcm,
}

impl PcmFrames for OverReporting {
    fn channels(&self) -> u16 {
        self.inner.channels()
    }

    fn bits_per_sample(&self) -> u16 {
        self.inner.bits_per_sample()
    }

    fn read_interleaved(&mut self, buf: &mut [i32]) -> WaveformResult<usize> {
        let n = self.inner.read_interleaved(buf)?;
        Ok(if n == 0 { 0 } else { n + 7 })
    }
}

struct Failing;

impl PcmFrames for Failing {
    fn channels(&self) -> u16 {
        1
    }

    fn bits_per_sample(&self) -> u16 {
        16
    }

    fn read_interleaved(&mut self, _buf: &mut [i32]) -> WaveformResult<usize> {
        Err(WaveformError::decode("corrupt chunk"))
    }
}

#[test]
fn keeps_first_channel_of_each_frame() {
    let pcm = MemoryPcm::new(vec![1, 10, 100, 2, 20, 200, 3, 30, 300], 3, 16);
    let mut src = pcm.into_source().unwrap();
    assert_eq!(src.total_samples(), 3);

    let mut buf = [0.0; 3];
    assert_eq!(src.read_samples(&mut buf).unwrap(), 3);
    assert_eq!(buf, [1.0, 2.0, 3.0]);
}

#[test]
fn mix_mode_averages_frames() {
    let pcm = MemoryPcm::new(vec![10, 30, -4, 4], 2, 16);
    let mut src = pcm.into_source().unwrap().with_channel_mode(ChannelMode::Mix);

    let mut buf = [0.0; 2];
    assert_eq!(src.read_samples(&mut buf).unwrap(), 2);
    assert_eq!(buf, [20.0, 0.0]);
}

#[test]
fn bound_follows_bit_depth() {
    let src = MemoryPcm::new(vec![], 1, 24).into_source().unwrap();
    assert_eq!(src.bound(), AmplitudeBound::from_bit_depth(24).unwrap());
}

#[test]
fn trailing_partial_frame_is_dropped() {
    let pcm = MemoryPcm::new(vec![1, 0, 2, 0, 3], 2, 16);
    let mut src = InterleavedPcm::new(pcm, 3).unwrap();

    let mut buf = [0.0; 3];
    assert_eq!(src.read_samples(&mut buf).unwrap(), 2);
    assert_eq!(&buf[..2], &[1.0, 2.0]);
}

#[test]
fn over_reported_counts_are_clamped() {
    let inner = MemoryPcm::new(vec![5, 0, 6, 0, 7, 0, 8, 0], 2, 16);
    let mut src = InterleavedPcm::new(OverReporting { inner }, 4).unwrap();

    let mut buf = [0.0; 2];
    assert_eq!(src.read_samples(&mut buf).unwrap(), 2);
    assert_eq!(buf, [5.0, 6.0]);
    assert_eq!(src.read_samples(&mut buf).unwrap(), 2);
    assert_eq!(buf, [7.0, 8.0]);
}

#[test]
fn decoder_errors_propagate() {
    let mut src = InterleavedPcm::new(Failing, 10).unwrap();
    let mut buf = [0.0; 4];
    assert!(matches!(
        src.read_samples(&mut buf),
        Err(WaveformError::Decode(_))
    ));
}

#[test]
fn rejects_unusable_metadata() {
    assert!(matches!(
        InterleavedPcm::new(MemoryPcm::new(vec![], 0, 16), 0),
        Err(WaveformError::Config(_))
    ));
    assert!(matches!(
        InterleavedPcm::new(MemoryPcm::new(vec![], 2, 4), 0),
        Err(WaveformError::Config(_))
    ));
}
