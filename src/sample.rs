/// Module containing the sample codec: typed reads and writes of single samples inside a raw
/// little-endian byte buffer.
use std::fmt::Debug;

use bytemuck::{bytes_of, bytes_of_mut, Pod, Zeroable};
use num_traits::{Bounded, NumCast, ToPrimitive, Zero};

use crate::error::{WavEditError, WavEditResult};

/// Trait used to indicate that a type is a sample type a wav file can be edited as.
pub trait Sample: Copy + Pod + NumCast + Bounded + Zero + Debug + Send + Sync {
    /// The value encoding silence. Non-zero only for unsigned PCM.
    const MIDPOINT: f64;

    /// Widens the sample for gain arithmetic.
    #[inline(always)]
    fn as_f64(self) -> f64 {
        ToPrimitive::to_f64(&self).unwrap_or(0.0)
    }

    /// Narrows an arithmetic result back to the sample type, truncating toward zero and
    /// saturating at the type's bounds.
    #[inline(always)]
    fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::zero();
        }
        match <Self as NumCast>::from(value) {
            Some(sample) => sample,
            None if value < 0.0 => Self::min_value(),
            None => Self::max_value(),
        }
    }

    /// `sample * gain`, applied around the silence value.
    #[inline(always)]
    fn scale(self, gain: f64) -> Self {
        if gain == 1.0 {
            return self;
        }
        Self::from_f64((self.as_f64() - Self::MIDPOINT) * gain + Self::MIDPOINT)
    }

    /// `self + decay * other`, with `other` recentred around the silence value first.
    #[inline(always)]
    fn mix(self, other: Self, decay: f64) -> Self {
        Self::from_f64(self.as_f64() + decay * (other.as_f64() - Self::MIDPOINT))
    }
}

macro_rules! impl_sample {
    ($($T:ty => $mid:expr), *) => {
        $(
            impl Sample for $T {
                const MIDPOINT: f64 = $mid;
            }
        )*
    };
}

impl_sample!(u8 => 128.0, i16 => 0.0, i32 => 0.0, f32 => 0.0, f64 => 0.0);

impl Sample for i64 {
    const MIDPOINT: f64 = 0.0;

    /// Adds the echo in integer space. Only the echo goes through `f64`, so `self` keeps the
    /// bits beyond the 53-bit mantissa.
    #[inline(always)]
    fn mix(self, other: Self, decay: f64) -> Self {
        let echo = decay * other as f64;
        if echo.is_nan() {
            return self;
        }
        let whole = echo.trunc();
        let fract = echo - whole;
        let sum = self as i128 + whole as i128;
        // truncate the exact sum toward zero
        let sum = if fract > 0.0 && sum < 0 {
            sum + 1
        } else if fract < 0.0 && sum > 0 {
            sum - 1
        } else {
            sum
        };
        sum.clamp(i64::MIN as i128, i64::MAX as i128) as i64
    }
}

#[inline(always)]
fn sample_range<T: Sample>(len: usize, offset: usize) -> WavEditResult<std::ops::Range<usize>> {
    let width = std::mem::size_of::<T>();
    match offset.checked_add(width) {
        Some(end) if end <= len => Ok(offset..end),
        _ => Err(WavEditError::OffsetOutOfRange { offset, limit: len }),
    }
}

/// Reads one little-endian `T` starting at `offset`.
#[inline(always)]
pub fn read_sample<T: Sample>(bytes: &[u8], offset: usize) -> WavEditResult<T> {
    let range = sample_range::<T>(bytes.len(), offset)?;
    let mut sample = <T as Zeroable>::zeroed();
    let raw = bytes_of_mut(&mut sample);
    raw.copy_from_slice(&bytes[range]);
    if cfg!(target_endian = "big") {
        raw.reverse();
    }
    Ok(sample)
}

/// Writes `value` as a little-endian `T` starting at `offset`.
#[inline(always)]
pub fn write_sample<T: Sample>(bytes: &mut [u8], offset: usize, value: T) -> WavEditResult<()> {
    let range = sample_range::<T>(bytes.len(), offset)?;
    let dst = &mut bytes[range];
    dst.copy_from_slice(bytes_of(&value));
    if cfg!(target_endian = "big") {
        dst.reverse();
    }
    Ok(())
}
