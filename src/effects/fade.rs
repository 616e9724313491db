//! Linear fade out between two time points.
use crate::{
    effects::{check_unit_interval, resolve_range, with_sample_type, EffectSummary},
    error::{WavEditError, WavEditResult},
    header::WavHeader,
    log,
    offset::{data_end, to_byte_offset},
    sample::{read_sample, write_sample, Sample},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeOptions {
    pub start_ms: u32,
    /// `None` fades until the end of the data.
    pub end_ms: Option<u32>,
    /// Gain reached at `end_ms`, from 0 (silence) to 1 (unchanged).
    pub end_level: f64,
}

impl Default for FadeOptions {
    fn default() -> Self {
        FadeOptions {
            start_ms: 0,
            end_ms: None,
            end_level: 0.0,
        }
    }
}

impl FadeOptions {
    pub fn new(start_ms: u32, end_ms: Option<u32>, end_level: f64) -> Self {
        FadeOptions {
            start_ms,
            end_ms,
            end_level,
        }
    }

    pub fn validate(&self) -> WavEditResult<()> {
        check_unit_interval("end level", self.end_level)?;
        match self.end_ms {
            Some(end_ms) if self.start_ms > end_ms => Err(WavEditError::InvertedRange {
                start_ms: self.start_ms,
                end_ms,
            }),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct FadeRange {
    start: usize,
    end: usize,
    data_end: usize,
    block_align: usize,
}

/// Scales every frame from `start_ms` to `end_ms` by a gain falling linearly from 1 to
/// `end_level`. Samples outside the range are not touched.
///
/// Unsigned 8-bit samples are scaled around their midpoint so that a level of 0 yields
/// silence (128) rather than the most negative value.
pub fn fade(bytes: &mut [u8], options: &FadeOptions) -> WavEditResult<EffectSummary> {
    options.validate()?;
    let header = WavHeader::from_bytes(bytes)?;
    let sample_type = header.sample_type()?;
    let (start_ms, end_ms) = resolve_range(&header, options.start_ms, options.end_ms)?;

    let range = FadeRange {
        start: to_byte_offset(&header, start_ms)?,
        end: to_byte_offset(&header, end_ms)?,
        data_end: data_end(&header)?,
        block_align: header.block_align()? as usize,
    };
    let frames = with_sample_type!(sample_type, T => {
        fade_frames::<T>(bytes, range, options.end_level)
    })?;

    log!(
        log::Level::Debug,
        "Faded {}..{} ms to level {}: {} frames of {}",
        start_ms,
        end_ms,
        options.end_level,
        frames,
        sample_type
    );
    Ok(EffectSummary {
        sample_type,
        frames,
    })
}

fn fade_frames<T: Sample>(
    bytes: &mut [u8],
    range: FadeRange,
    end_level: f64,
) -> WavEditResult<usize> {
    if range.start == range.end {
        return Ok(0);
    }
    let width = std::mem::size_of::<T>();
    let channels = range.block_align / width;
    let n_frames = ((range.end - range.start) / range.block_align) as f64;

    let mut frames = 0;
    let mut offset = range.start;
    while offset <= range.end && offset + range.block_align <= range.data_end {
        let gain = 1.0 - (frames as f64 / n_frames) * (1.0 - end_level);
        if gain != 1.0 {
            for channel in 0..channels {
                let at = offset + channel * width;
                let sample: T = read_sample(bytes, at)?;
                write_sample(bytes, at, sample.scale(gain))?;
            }
        }
        frames += 1;
        offset += range.block_align;
    }
    Ok(frames)
}
