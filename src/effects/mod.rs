//! Destructive effects applied directly to the encoded sample bytes of a wav buffer.
//!
//! Each effect parses the header from the buffer it is given, converts its time points
//! through [`crate::offset::to_byte_offset`], selects the sample type once and makes a
//! single pass over the affected frames.
pub mod fade;
pub mod reverb;
pub mod trim;

use std::fmt::Display;

pub use crate::effects::fade::{fade, FadeOptions};
pub use crate::effects::reverb::{reverb, ReverbOptions};
pub use crate::effects::trim::{trim, TrimOptions, TrimSummary};
use crate::{
    error::{WavEditError, WavEditResult},
    header::WavHeader,
    offset::length_as_time_point,
    wav_type::SampleType,
};

/// Binds `$T` to the Rust type matching `$sample_type` and evaluates `$body` with it.
macro_rules! with_sample_type {
    ($sample_type:expr, $T:ident => $body:expr) => {
        match $sample_type {
            $crate::wav_type::SampleType::U8 => {
                type $T = u8;
                $body
            }
            $crate::wav_type::SampleType::I16 => {
                type $T = i16;
                $body
            }
            $crate::wav_type::SampleType::I32 => {
                type $T = i32;
                $body
            }
            $crate::wav_type::SampleType::I64 => {
                type $T = i64;
                $body
            }
            $crate::wav_type::SampleType::F32 => {
                type $T = f32;
                $body
            }
            $crate::wav_type::SampleType::F64 => {
                type $T = f64;
                $body
            }
        }
    };
}
pub(crate) use with_sample_type;

/// What a sample-level effect touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectSummary {
    pub sample_type: SampleType,
    /// Number of frames whose samples were rewritten or considered for rewriting.
    pub frames: usize,
}

impl Display for EffectSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} frames of {}", self.frames, self.sample_type)
    }
}

/// Resolves an optional end point to the full data length and rejects descending ranges.
pub(crate) fn resolve_range(
    header: &WavHeader,
    start_ms: u32,
    end_ms: Option<u32>,
) -> WavEditResult<(u32, u32)> {
    let end_ms = match end_ms {
        Some(end_ms) => end_ms,
        None => length_as_time_point(header)?,
    };
    if start_ms > end_ms {
        return Err(WavEditError::InvertedRange { start_ms, end_ms });
    }
    Ok((start_ms, end_ms))
}

pub(crate) fn check_unit_interval(name: &str, value: f64) -> WavEditResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(WavEditError::InvalidArgument(format!(
            "{} should be a float from 0 to 1, got {}",
            name, value
        )))
    }
}
