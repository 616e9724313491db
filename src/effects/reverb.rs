//! Single-tap feedback echo.
use crate::{
    effects::{check_unit_interval, with_sample_type, EffectSummary},
    error::{ErrorKind, WavEditResult},
    header::WavHeader,
    log,
    offset::to_byte_offset,
    sample::{read_sample, write_sample, Sample},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbOptions {
    pub delay_ms: u32,
    /// Weight of the delayed sample, from 0 to 1.
    pub decay: f64,
}

impl Default for ReverbOptions {
    fn default() -> Self {
        ReverbOptions {
            delay_ms: 1000,
            decay: 0.1,
        }
    }
}

impl ReverbOptions {
    pub fn new(delay_ms: u32, decay: f64) -> Self {
        ReverbOptions { delay_ms, decay }
    }

    pub fn validate(&self) -> WavEditResult<()> {
        check_unit_interval("decay", self.decay)
    }
}

#[derive(Debug, Clone, Copy)]
struct EchoLayout {
    data_offset: usize,
    n_frames: usize,
    block_align: usize,
    delay_frames: usize,
}

/// Adds `decay` times the sample `delay_ms` earlier to every sample from `delay_ms` on.
///
/// Frames are processed from the last one backward, so each output only mixes in the
/// unprocessed input. A delay at or beyond the data length leaves the buffer unchanged.
pub fn reverb(bytes: &mut [u8], options: &ReverbOptions) -> WavEditResult<EffectSummary> {
    options.validate()?;
    let header = WavHeader::from_bytes(bytes)?;
    let sample_type = header.sample_type()?;
    let unchanged = EffectSummary {
        sample_type,
        frames: 0,
    };

    let data_offset = header.data_chunk_offset()?;
    let delay_bytes = match to_byte_offset(&header, options.delay_ms) {
        Ok(offset) => offset - data_offset,
        Err(e) if e.kind() == ErrorKind::OutOfRange => {
            log!(log::Level::Info, "Delay is longer than the data: {}", e);
            return Ok(unchanged);
        }
        Err(e) => return Err(e),
    };
    if options.decay == 0.0 {
        return Ok(unchanged);
    }

    let block_align = header.block_align()? as usize;
    let layout = EchoLayout {
        data_offset,
        n_frames: header.data_chunk_size()? as usize / block_align,
        block_align,
        delay_frames: delay_bytes / block_align,
    };
    let frames = with_sample_type!(sample_type, T => {
        echo_frames::<T>(bytes, layout, options.decay)
    })?;

    log!(
        log::Level::Debug,
        "Reverb with {} ms delay and decay {}: {} frames of {}",
        options.delay_ms,
        options.decay,
        frames,
        sample_type
    );
    Ok(EffectSummary {
        sample_type,
        frames,
    })
}

fn echo_frames<T: Sample>(
    bytes: &mut [u8],
    layout: EchoLayout,
    decay: f64,
) -> WavEditResult<usize> {
    if layout.delay_frames >= layout.n_frames {
        return Ok(0);
    }
    let width = std::mem::size_of::<T>();
    let channels = layout.block_align / width;
    let delay_bytes = layout.delay_frames * layout.block_align;

    for frame in (layout.delay_frames..layout.n_frames).rev() {
        let offset = layout.data_offset + frame * layout.block_align;
        for channel in 0..channels {
            let at = offset + channel * width;
            let sample: T = read_sample(bytes, at)?;
            let delayed: T = read_sample(bytes, at - delay_bytes)?;
            write_sample(bytes, at, sample.mix(delayed, decay))?;
        }
    }
    Ok(layout.n_frames - layout.delay_frames)
}

#[cfg(test)]
mod reverb_tests {
    use super::*;
    use crate::error::WavEditError;
    use crate::test_utils::{f32_data, i16_data, mono_u8_ramp, sample_data, WavBuilder};
    use crate::wav_type::SampleType;
    use approx_eq::assert_approx_eq;

    #[test]
    fn zero_decay_is_a_no_op() {
        let original = mono_u8_ramp(1000);
        let mut bytes = original.clone();
        reverb(&mut bytes, &ReverbOptions::new(500, 0.0)).unwrap();
        assert_eq!(bytes, original);
    }

    #[test]
    fn mixes_unprocessed_input() {
        let original = mono_u8_ramp(1000);
        let mut bytes = original.clone();
        let summary = reverb(&mut bytes, &ReverbOptions::new(500, 0.5)).unwrap();
        assert_eq!(summary.frames, 500);

        assert_eq!(&bytes[..44 + 500], &original[..44 + 500]);
        for i in 500..1000 {
            let expected = original[44 + i] as f64 + 0.5 * (original[44 + i - 500] as f64 - 128.0);
            let expected = expected.clamp(0.0, 255.0) as u8;
            assert_eq!(bytes[44 + i], expected, "sample {}", i);
        }
        // 600 % 256 = 88, 100: 88 + 0.5 * (100 - 128) = 74
        assert_eq!(bytes[44 + 600], 74);
    }

    #[test]
    fn short_delay_reads_original_samples() {
        // with a 1 frame delay a forward pass would compound the echo
        let samples = vec![1000i16; 8];
        let mut bytes = WavBuilder::pcm(1, 1000, 16).data(i16_data(&samples)).build();
        reverb(&mut bytes, &ReverbOptions::new(1, 0.5)).unwrap();
        assert_eq!(read_sample::<i16>(&bytes, 44).unwrap(), 1000);
        for i in 1..8 {
            assert_eq!(read_sample::<i16>(&bytes, 44 + i * 2).unwrap(), 1500);
        }
    }

    #[test]
    fn channels_echo_independently() {
        let samples: Vec<i16> = (0..400).map(|i| if i % 2 == 0 { 100 } else { -200 }).collect();
        let mut bytes = WavBuilder::pcm(2, 1000, 16).data(i16_data(&samples)).build();
        reverb(&mut bytes, &ReverbOptions::new(100, 0.5)).unwrap();
        assert_eq!(read_sample::<i16>(&bytes, 44 + 99 * 4).unwrap(), 100);
        assert_eq!(read_sample::<i16>(&bytes, 44 + 100 * 4).unwrap(), 150);
        assert_eq!(read_sample::<i16>(&bytes, 44 + 100 * 4 + 2).unwrap(), -300);
    }

    #[test]
    fn float_samples() {
        let mut bytes = WavBuilder::float(1, 1000, 32)
            .data(f32_data(&[0.5; 20]))
            .build();
        let data_offset = WavHeader::from_bytes(&bytes).unwrap().data_chunk_offset().unwrap();
        reverb(&mut bytes, &ReverbOptions::new(10, 0.25)).unwrap();
        let at = |i: usize| read_sample::<f32>(&bytes, data_offset + i * 4).unwrap() as f64;
        assert_approx_eq!(at(9), 0.5, 1e-6);
        assert_approx_eq!(at(10), 0.625, 1e-6);
        assert_approx_eq!(at(19), 0.625, 1e-6);
    }

    #[test]
    fn i64_echo_keeps_every_bit() {
        let big = (1i64 << 62) + 1;
        let mut bytes = WavBuilder::pcm(1, 1000, 64)
            .data(sample_data(&[0, big, 2000, big]))
            .build();
        let summary = reverb(&mut bytes, &ReverbOptions::new(1, 0.5)).unwrap();
        assert_eq!(summary.sample_type, SampleType::I64);
        assert_eq!(summary.frames, 3);

        let at = |i: usize| read_sample::<i64>(&bytes, 44 + i * 8).unwrap();
        assert_eq!(at(0), 0);
        // the delayed sample is silence
        assert_eq!(at(1), big);
        assert_eq!(at(2), 2000 + (1 << 61));
        assert_eq!(at(3), big + 1000);
    }

    #[test]
    fn i32_echo() {
        let mut bytes = WavBuilder::pcm(2, 1000, 32)
            .data(sample_data(&[1i32 << 30; 20]))
            .build();
        let summary = reverb(&mut bytes, &ReverbOptions::new(5, 0.5)).unwrap();
        assert_eq!(summary.sample_type, SampleType::I32);
        assert_eq!(summary.frames, 5);
        assert_eq!(read_sample::<i32>(&bytes, 44 + 4 * 8).unwrap(), 1 << 30);
        assert_eq!(read_sample::<i32>(&bytes, 44 + 5 * 8).unwrap(), (1 << 30) + (1 << 29));
        assert_eq!(read_sample::<i32>(&bytes, 44 + 9 * 8 + 4).unwrap(), (1 << 30) + (1 << 29));
    }

    #[test]
    fn f64_echo() {
        let mut bytes = WavBuilder::float(1, 1000, 64)
            .data(sample_data(&[0.5f64; 20]))
            .build();
        let data_offset = WavHeader::from_bytes(&bytes).unwrap().data_chunk_offset().unwrap();
        let summary = reverb(&mut bytes, &ReverbOptions::new(10, 0.25)).unwrap();
        assert_eq!(summary.sample_type, SampleType::F64);
        let at = |i: usize| read_sample::<f64>(&bytes, data_offset + i * 8).unwrap();
        assert_approx_eq!(at(9), 0.5, 1e-12);
        assert_approx_eq!(at(10), 0.625, 1e-12);
        assert_approx_eq!(at(19), 0.625, 1e-12);
    }

    #[test]
    fn delay_past_the_end_is_a_no_op() {
        let original = mono_u8_ramp(100);
        let mut bytes = original.clone();
        let summary = reverb(&mut bytes, &ReverbOptions::default()).unwrap();
        assert_eq!(summary.frames, 0);
        assert_eq!(bytes, original);

        let summary = reverb(&mut bytes, &ReverbOptions::new(100, 0.5)).unwrap();
        assert_eq!(summary.frames, 0);
        assert_eq!(bytes, original);
    }

    #[test]
    fn rejects_decay_out_of_range() {
        let original = mono_u8_ramp(100);
        let mut bytes = original.clone();
        let err = reverb(&mut bytes, &ReverbOptions::new(10, 1.1)).unwrap_err();
        assert!(matches!(err, WavEditError::InvalidArgument(_)));
        assert_eq!(bytes, original);
    }
}
