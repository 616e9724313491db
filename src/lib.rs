//! # wav-edit
//!
//! wav-edit parses the header of a RIFF/WAVE file held in memory and applies destructive edits
//! directly to its encoded sample bytes. No samples are decoded into an intermediate buffer:
//! every effect reads and writes the little-endian samples in place.
//!
//! ## Core Features
//!
//! - **Header parsing**: RIFF descriptor, `fmt ` chunk (including the extensible variant) and
//!   the location of the `data` chunk. Chunks between `fmt ` and `data` (`fact`, `LIST`, ...)
//!   are skipped and recorded.
//! - **Time to byte mapping**: millisecond time points map to frame aligned offsets in the data
//!   region.
//! - **Effects**:
//!   - trim to a time range, rewriting the size fields
//!   - linear fade out to a target level
//!   - single-tap feedback echo ("reverb")
//! - **Sample types**: unsigned 8-bit, signed 16/32/64-bit PCM and 32/64-bit IEEE float.
//!
//! - **Optional Features**:
//!   - `colored`: coloured header summary
//!   - `logging`: operation logging through the `log` facade (on by default)
//!
//! ## Quick Examples
//!
//! ```no_run
//! use wav_edit::{fade, read_whole_file, trim, write_file, FadeOptions, TrimOptions};
//!
//! let mut bytes = read_whole_file("input.wav")?;
//! trim(&mut bytes, &TrimOptions::new(250, Some(750)))?;
//! fade(&mut bytes, &FadeOptions::new(0, None, 0.0))?;
//! write_file("output.wav", &bytes)?;
//! # Ok::<(), wav_edit::WavEditError>(())
//! ```
//!
//! ```no_run
//! use wav_edit::WavHeader;
//!
//! let header = WavHeader::from_path("input.wav")?;
//! println!("{}", header);
//! println!("{} ms of {}", header.length_ms()?, header.sample_type()?);
//! # Ok::<(), wav_edit::WavEditError>(())
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return `WavEditResult<T>`. [`WavEditError::kind`] groups the variants
//! into malformed input, out-of-range arguments, invalid arguments and IO failures.
//!
pub mod bytes;
pub mod chunks;
pub mod effects;
pub mod error;
pub mod header;
pub mod hex;
pub mod io;
pub mod offset;
pub mod sample;
pub mod wav_type;

#[cfg(test)]
mod test_utils;

pub use crate::bytes::{read_u16_le, read_u32_le, write_u32_le};
pub use crate::chunks::{ChunkIdentifier, ChunkInfo, FmtChunk, DATA, FACT, FMT, LIST, RIFF, WAVE};
pub use crate::effects::{
    fade, reverb, trim, EffectSummary, FadeOptions, ReverbOptions, TrimOptions, TrimSummary,
};
pub use crate::error::{ErrorKind, WavEditError, WavEditResult};
pub use crate::header::WavHeader;
pub use crate::hex::format_hex_columns;
pub use crate::io::{read_file_prefix, read_whole_file, write_file};
pub use crate::offset::to_byte_offset;
pub use crate::sample::{read_sample, write_sample, Sample};
pub use crate::wav_type::{FormatCode, SampleType};

/// A macro for logging messages if the logging feature is enabled.
#[macro_export]
macro_rules! log {
    ($level:expr, $($arg:tt)+) => {
        #[cfg(feature = "logging")]
        log::log!($level, $($arg)+);
    };
}
