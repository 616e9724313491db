//! Trim: keep only the frames between two time points.
use std::fmt::Display;

use crate::{
    bytes::write_u32_le,
    effects::resolve_range,
    error::{WavEditError, WavEditResult},
    header::WavHeader,
    log,
    offset::to_byte_offset,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrimOptions {
    /// First kept time point.
    pub start_ms: u32,
    /// End of the kept fragment. `None` keeps everything up to the end of the data.
    pub end_ms: Option<u32>,
}

impl TrimOptions {
    pub fn new(start_ms: u32, end_ms: Option<u32>) -> Self {
        TrimOptions { start_ms, end_ms }
    }

    pub fn validate(&self) -> WavEditResult<()> {
        match self.end_ms {
            Some(end_ms) if self.start_ms > end_ms => Err(WavEditError::InvertedRange {
                start_ms: self.start_ms,
                end_ms,
            }),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimSummary {
    /// Sample bytes dropped from the data chunk.
    pub removed_bytes: usize,
    /// New value of the data chunk size field.
    pub data_size: u32,
    /// New value of the RIFF size field.
    pub riff_size: u32,
}

impl Display for TrimSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "removed {} bytes (data size: {}, RIFF size: {})",
            self.removed_bytes, self.data_size, self.riff_size
        )
    }
}

/// Removes the sample bytes before `start_ms` and from `end_ms` to the end of the data
/// chunk, then rewrites the data and RIFF size fields.
///
/// The trimmed file is assembled in a separate buffer and only replaces `bytes` once every
/// step has succeeded; on error `bytes` is left untouched. Chunks that follow the data chunk
/// are kept. An odd-sized result gets a zero pad byte.
///
/// The RIFF size field always tracks the actual length of the result minus 8, so it counts a
/// pad byte that was added or dropped along with the removed sample bytes.
pub fn trim(bytes: &mut Vec<u8>, options: &TrimOptions) -> WavEditResult<TrimSummary> {
    options.validate()?;
    let header = WavHeader::from_bytes(bytes)?;
    let (start_ms, end_ms) = resolve_range(&header, options.start_ms, options.end_ms)?;

    let start = to_byte_offset(&header, start_ms)?;
    let end = to_byte_offset(&header, end_ms)?;
    let data_offset = header.data_chunk_offset()?;
    let old_data_size = header.data_chunk_size()? as usize;
    // everything after the data payload and its pad byte
    let tail = header.data().padded_end().min(bytes.len());

    let kept = end - start;
    let mut trimmed = Vec::with_capacity(data_offset + kept + 1 + (bytes.len() - tail));
    trimmed.extend_from_slice(&bytes[..data_offset]);
    trimmed.extend_from_slice(&bytes[start..end]);
    if kept % 2 == 1 {
        trimmed.push(0);
    }
    trimmed.extend_from_slice(&bytes[tail..]);

    let delta = bytes.len() as i64 - trimmed.len() as i64;
    let riff_size = u32::try_from(header.riff_size() as i64 - delta).map_err(|_| {
        WavEditError::InvalidHeader(format!(
            "RIFF size {} cannot shrink by {} bytes",
            header.riff_size(),
            delta
        ))
    })?;
    let data_size = kept as u32;

    write_u32_le(&mut trimmed, header.data_size_field_offset()?, data_size)?;
    write_u32_le(&mut trimmed, 4, riff_size)?;

    let summary = TrimSummary {
        removed_bytes: old_data_size - kept,
        data_size,
        riff_size,
    };
    log!(
        log::Level::Debug,
        "Trimmed {}..{} ms (bytes {}..{}): {}",
        start_ms,
        end_ms,
        start,
        end,
        summary
    );
    *bytes = trimmed;
    Ok(summary)
}
