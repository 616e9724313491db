//! The "fmt " sub-chunk and its optional extension block.
use crate::{
    bytes::{read_u16_le, read_u32_le},
    wav_type::{EXTENSIBLE, PCM},
    WavEditResult,
};

pub const FMT_SIZE_BASE_SIZE: usize = 16; // Standard wav file format size
pub const FMT_CB_SIZE: usize = 18; // An extended Format chunk is used for non-PCM data. The cbSize field gives the size of the extension. (0 or 22)
pub const FMT_SIZE_EXTENDED_SIZE: usize = 40; // CB_SIZE + 22 (2 bytes valid_bits_per_sample, 4 byte channel_mask, 16(2+14) byte sub_format)

/// Absolute offset of the fmt payload: 12 byte RIFF descriptor + 8 byte sub-chunk header.
pub const FMT_PAYLOAD_OFFSET: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FmtChunk {
    /// Format of the audio data. 1 for PCM, 3 for IEEE float, 0xFFFE for extensible.
    pub format: u16,
    /// Number of channels in the audio data.
    pub channels: u16,
    /// Sample rate of the audio data.
    pub sample_rate: u32,
    /// Byte rate of the audio data.
    pub byte_rate: u32,
    /// Block align of the audio data.
    pub block_align: u16,
    /// Bits per sample of the audio data.
    pub bits_per_sample: u16,
    pub ext_fmt_chunk: ExtFmtChunkInfo,
}

impl FmtChunk {
    /// Reads the fmt payload that starts at absolute offset 20. `fmt_size` is the declared
    /// sub-chunk size and bounds how much of the extension block is read.
    pub fn from_bytes(bytes: &[u8], fmt_size: u32) -> WavEditResult<Self> {
        let base = FMT_PAYLOAD_OFFSET;
        let format = read_u16_le(bytes, base)?;

        let mut ext_fmt_chunk = ExtFmtChunkInfo::default();
        if format != PCM && fmt_size as usize >= FMT_CB_SIZE {
            ext_fmt_chunk.cb_size = read_u16_le(bytes, base + 16)?;
            if format == EXTENSIBLE && fmt_size as usize >= FMT_SIZE_EXTENDED_SIZE {
                ext_fmt_chunk.valid_bits_per_sample = read_u16_le(bytes, base + 18)?;
                ext_fmt_chunk.channel_mask = read_u32_le(bytes, base + 20)?;
                ext_fmt_chunk.sub_format = read_u16_le(bytes, base + 24)?;
            }
        }

        Ok(FmtChunk {
            format,
            channels: read_u16_le(bytes, base + 2)?,
            sample_rate: read_u32_le(bytes, base + 4)?,
            byte_rate: read_u32_le(bytes, base + 8)?,
            block_align: read_u16_le(bytes, base + 12)?,
            bits_per_sample: read_u16_le(bytes, base + 14)?,
            ext_fmt_chunk,
        })
    }

    pub fn is_extended_format(&self) -> bool {
        self.format == EXTENSIBLE
    }

    /// The format code that actually describes the samples.
    pub fn format(&self) -> u16 {
        match self.is_extended_format() {
            true => self.ext_fmt_chunk.sub_format,
            false => self.format,
        }
    }
}

/// Extension fields. All zero when the fmt chunk carries no extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtFmtChunkInfo {
    cb_size: u16,
    valid_bits_per_sample: u16,
    channel_mask: u32,
    sub_format: u16,
}

impl ExtFmtChunkInfo {
    pub fn cb_size(&self) -> u16 {
        self.cb_size
    }

    pub fn valid_bits_per_sample(&self) -> u16 {
        self.valid_bits_per_sample
    }

    pub fn channel_mask(&self) -> u32 {
        self.channel_mask
    }

    pub fn sub_format(&self) -> u16 {
        self.sub_format
    }
}
