pub mod fmt;

use std::fmt::Display;

pub use crate::chunks::fmt::{ExtFmtChunkInfo, FmtChunk};
use crate::{
    bytes::{read_tag, read_u32_le},
    log, WavEditError, WavEditResult,
};

// 100% necessary to have these chunks
pub const RIFF: [u8; 4] = *b"RIFF";
pub const WAVE: [u8; 4] = *b"WAVE";
pub const DATA: [u8; 4] = *b"data";
pub const FMT: [u8; 4] = *b"fmt ";

// Optional chunks
pub const LIST: [u8; 4] = *b"LIST";
pub const FACT: [u8; 4] = *b"fact";

/// Smallest possible file: RIFF descriptor, 16 byte fmt chunk and an empty data chunk header.
pub const MIN_FILE_SIZE: usize = 44;
pub const RIFF_SIZE: usize = 12;
pub const CHUNK_HEADER_SIZE: usize = 8;

/// Wrapper around a 4 byte buffer. Used for storing and displaying/debugging the chunk identifier of a chunk.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ChunkIdentifier {
    identifier: [u8; 4],
}

impl ChunkIdentifier {
    pub fn new(identifier: [u8; 4]) -> Self {
        ChunkIdentifier { identifier }
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.identifier
    }
}

impl From<[u8; 4]> for ChunkIdentifier {
    fn from(identifier: [u8; 4]) -> Self {
        ChunkIdentifier { identifier }
    }
}

impl PartialEq<[u8; 4]> for ChunkIdentifier {
    fn eq(&self, other: &[u8; 4]) -> bool {
        &self.identifier == other
    }
}

impl Display for ChunkIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match std::str::from_utf8(&self.identifier) {
            Ok(s) => write!(f, "{:?}", s),
            Err(_) => write!(f, "{:02x?}", self.identifier),
        }
    }
}

/// Location of one sub-chunk. `offset` is the absolute offset of the first payload byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ChunkInfo {
    pub id: ChunkIdentifier,
    pub offset: usize,
    pub size: u32,
}

impl ChunkInfo {
    pub fn new(id: ChunkIdentifier, offset: usize, size: u32) -> Self {
        ChunkInfo { id, offset, size }
    }

    /// Offset one past the last payload byte.
    pub fn end(&self) -> usize {
        self.offset + self.size as usize
    }

    /// Offset of the next sub-chunk header, including the pad byte of an odd-sized payload.
    pub fn padded_end(&self) -> usize {
        self.end() + (self.size as usize % 2)
    }
}

impl Display for ChunkInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (offset: {}, size: {})", self.id, self.offset, self.size)
    }
}

/// Everything the chunk walk extracts from a buffer, before any validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkLayout {
    pub chunk_id: [u8; 4],
    pub riff_size: u32,
    pub format_tag: [u8; 4],
    pub fmt_chunk_id: [u8; 4],
    pub fmt_chunk_size: u32,
    pub fmt_chunk: FmtChunk,
    pub data: ChunkInfo,
    /// Sub-chunks between fmt and data that the walk stepped over.
    pub skipped: Vec<ChunkInfo>,
}

/// Walks the RIFF container in `bytes` and locates the fmt and data sub-chunks.
///
/// Tags are not checked here; that is the job of [`crate::WavHeader::check_validity`].
/// The walk fails when the buffer is shorter than 44 bytes, when it runs out of bytes or
/// of declared RIFF size before reaching a data chunk, or when the data payload extends
/// past the end of the buffer.
pub fn read_chunks(bytes: &[u8]) -> WavEditResult<ChunkLayout> {
    if bytes.len() < MIN_FILE_SIZE {
        return Err(WavEditError::FileTooSmall(bytes.len()));
    }

    let chunk_id = read_tag(bytes, 0)?;
    let riff_size = read_u32_le(bytes, 4)?;
    let format_tag = read_tag(bytes, 8)?;
    let fmt_chunk_id = read_tag(bytes, 12)?;
    let fmt_chunk_size = read_u32_le(bytes, 16)?;
    let fmt_chunk = FmtChunk::from_bytes(bytes, fmt_chunk_size)?;

    let fmt_info = ChunkInfo::new(fmt_chunk_id.into(), fmt::FMT_PAYLOAD_OFFSET, fmt_chunk_size);
    let riff_end = riff_size as usize + CHUNK_HEADER_SIZE;

    let mut skipped = Vec::new();
    let mut offset = fmt_info.padded_end();
    while offset < riff_end {
        if offset + CHUNK_HEADER_SIZE > bytes.len() {
            break;
        }
        let id = ChunkIdentifier::new(read_tag(bytes, offset)?);
        let size = read_u32_le(bytes, offset + 4)?;
        let info = ChunkInfo::new(id, offset + CHUNK_HEADER_SIZE, size);

        if id == DATA {
            if info.end() > bytes.len() {
                return Err(WavEditError::ChunkOutOfBounds {
                    id: id.to_string(),
                    offset: info.offset,
                    size,
                    len: bytes.len(),
                });
            }
            log!(log::Level::Debug, "Found data chunk {}", info);
            return Ok(ChunkLayout {
                chunk_id,
                riff_size,
                format_tag,
                fmt_chunk_id,
                fmt_chunk_size,
                fmt_chunk,
                data: info,
                skipped,
            });
        }

        log!(log::Level::Trace, "Skipping chunk {}", info);
        skipped.push(info);
        offset = info.padded_end();
    }

    Err(WavEditError::MissingChunk(
        ChunkIdentifier::new(DATA).to_string(),
    ))
}
