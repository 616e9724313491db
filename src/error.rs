//! Error types for wav-edit.
use std::path::PathBuf;

use thiserror::Error;

pub type WavEditResult<T> = Result<T, WavEditError>;

/// Coarse classification of a [`WavEditError`], for callers that need to branch on the
/// failure class rather than the exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The byte buffer is not a usable WAVE file.
    MalformedInput,
    /// A time point or byte range lies outside the data region.
    OutOfRange,
    /// An option value was rejected before any work was done.
    Argument,
    /// Reading or writing a file failed.
    Io,
}

/// Error types for wav-edit
#[derive(Error, Debug)]
pub enum WavEditError {
    #[error("Bad file - file is too small ({0} bytes, at least 44 required)")]
    FileTooSmall(usize),
    #[error("Missing {0} chunk")]
    MissingChunk(String),
    #[error("Chunk {id} at offset {offset} declares {size} bytes but the file ends at {len}")]
    ChunkOutOfBounds {
        id: String,
        offset: usize,
        size: u32,
        len: usize,
    },
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
    #[error("Unsupported sample format (format code {format}, {bits_per_sample} bits per sample)")]
    UnsupportedFormat { format: u16, bits_per_sample: u16 },
    #[error("Time point {time_ms} ms is beyond the end of the audio data ({length_ms} ms)")]
    TimeOutOfRange { time_ms: u32, length_ms: u64 },
    #[error("Byte offset {offset} is out of range (limit {limit})")]
    OffsetOutOfRange { offset: usize, limit: usize },
    #[error("Start point ({start_ms} ms) must be lesser than or equal to end point ({end_ms} ms)")]
    InvertedRange { start_ms: u32, end_ms: u32 },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("File path '{0}' could not be opened")]
    FileNotFound(PathBuf),
    #[error("IO error with file")]
    IOError(#[from] std::io::Error),
}

impl WavEditError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WavEditError::FileTooSmall(_)
            | WavEditError::MissingChunk(_)
            | WavEditError::ChunkOutOfBounds { .. }
            | WavEditError::InvalidHeader(_)
            | WavEditError::UnsupportedFormat { .. } => ErrorKind::MalformedInput,
            WavEditError::TimeOutOfRange { .. }
            | WavEditError::OffsetOutOfRange { .. }
            | WavEditError::InvertedRange { .. } => ErrorKind::OutOfRange,
            WavEditError::InvalidArgument(_) => ErrorKind::Argument,
            WavEditError::FileNotFound(_) | WavEditError::IOError(_) => ErrorKind::Io,
        }
    }
}
