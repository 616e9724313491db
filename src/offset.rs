//! Millisecond to byte offset translation.
//!
//! Every effect converts time points through [`to_byte_offset`], which only ever yields
//! offsets on a frame boundary inside (or at the end of) the data region.
use crate::{
    error::{WavEditError, WavEditResult},
    header::WavHeader,
};

/// Absolute byte offset of the frame at `time_ms`:
/// `data_chunk_offset + floor(sample_rate * time_ms / 1000) * block_align`.
///
/// Fails with [`WavEditError::TimeOutOfRange`] when the frame lies beyond the data region,
/// including when the relative offset does not fit in 64 bits.
/// The end of the data region itself is a valid result.
pub fn to_byte_offset(header: &WavHeader, time_ms: u32) -> WavEditResult<usize> {
    let data_offset = header.data_chunk_offset()?;
    let data_size = header.data_chunk_size()? as u64;
    let frames = header.sample_rate()? as u64 * time_ms as u64 / 1000;

    match frames.checked_mul(header.block_align()? as u64) {
        Some(relative) if relative <= data_size => Ok(data_offset + relative as usize),
        _ => Err(WavEditError::TimeOutOfRange {
            time_ms,
            length_ms: header.length_ms()?,
        }),
    }
}

/// Offset one past the last byte of the data region.
pub fn data_end(header: &WavHeader) -> WavEditResult<usize> {
    Ok(header.data_chunk_offset()? + header.data_chunk_size()? as usize)
}

/// Length of the data region in milliseconds, as a time point accepted by [`to_byte_offset`].
pub(crate) fn length_as_time_point(header: &WavHeader) -> WavEditResult<u32> {
    let length_ms = header.length_ms()?;
    u32::try_from(length_ms).map_err(|_| {
        WavEditError::InvalidHeader(format!("{} ms does not fit a time point", length_ms))
    })
}
