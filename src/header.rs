///
/// Module containing the validated header model of a wav file.
///
use std::{fmt::Display, path::Path};

#[cfg(feature = "colored")]
use colored::Colorize;

use crate::{
    chunks::{
        fmt::{FMT_SIZE_BASE_SIZE, FMT_SIZE_EXTENDED_SIZE},
        read_chunks, ChunkIdentifier, ChunkInfo, ChunkLayout, CHUNK_HEADER_SIZE, DATA, FMT, RIFF,
        WAVE,
    },
    error::{WavEditError, WavEditResult},
    io::read_whole_file,
    log,
    wav_type::{describe_format, SampleType, EXTENSIBLE, IEEE_FLOAT, PCM},
};

/// Read-only snapshot of the header fields of a RIFF/WAVE buffer.
///
/// Construct with [`WavHeader::from_bytes`] (validating) or [`WavHeader::read_unchecked`]
/// (chunk walk only). Every derived getter refuses to answer for a header that fails
/// [`WavHeader::check_validity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavHeader {
    layout: ChunkLayout,
}

impl WavHeader {
    /// Walks the chunks in `bytes` without checking any structural invariant.
    pub fn read_unchecked(bytes: &[u8]) -> WavEditResult<Self> {
        Ok(WavHeader {
            layout: read_chunks(bytes)?,
        })
    }

    /// Parses and validates the header of a wav file held in memory.
    pub fn from_bytes(bytes: &[u8]) -> WavEditResult<Self> {
        let header = Self::read_unchecked(bytes)?;
        if let Some(reason) = header.invalid_reason() {
            return Err(WavEditError::InvalidHeader(reason));
        }
        log!(log::Level::Debug, "Parsed header\n{}", header);
        Ok(header)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> WavEditResult<Self> {
        let bytes = read_whole_file(path)?;
        Self::from_bytes(&bytes)
    }

    /// Returns true when every structural invariant of the container holds.
    pub fn check_validity(&self) -> bool {
        self.invalid_reason().is_none()
    }

    fn invalid_reason(&self) -> Option<String> {
        let layout = &self.layout;
        let fmt = &layout.fmt_chunk;

        let tags = [
            (layout.chunk_id, RIFF),
            (layout.format_tag, WAVE),
            (layout.fmt_chunk_id, FMT),
            (*layout.data.id.as_bytes(), DATA),
        ];
        for (found, expected) in tags {
            if found != expected {
                return Some(format!(
                    "expected {} but found {}",
                    ChunkIdentifier::new(expected),
                    ChunkIdentifier::new(found)
                ));
            }
        }

        if fmt.format == PCM && layout.fmt_chunk_size as usize != FMT_SIZE_BASE_SIZE {
            return Some(format!(
                "PCM fmt chunk must be {} bytes, found {}",
                FMT_SIZE_BASE_SIZE, layout.fmt_chunk_size
            ));
        }
        if fmt.format == EXTENSIBLE && layout.fmt_chunk_size as usize != FMT_SIZE_EXTENDED_SIZE {
            return Some(format!(
                "extensible fmt chunk must be {} bytes, found {}",
                FMT_SIZE_EXTENDED_SIZE, layout.fmt_chunk_size
            ));
        }
        if fmt.bits_per_sample > 64 {
            return Some(format!(
                "{} bits per sample is more than 64",
                fmt.bits_per_sample
            ));
        }
        if fmt.channels == 0 {
            return Some("channel count is 0".to_string());
        }
        if fmt.byte_rate == 0 {
            return Some("byte rate is 0".to_string());
        }

        // Only linear layouts tie block alignment to the bit depth.
        let linear = matches!(fmt.format, PCM | IEEE_FLOAT | EXTENSIBLE);
        let expected_align = fmt.channels as u32 * (fmt.bits_per_sample as u32 / 8);
        if linear && fmt.block_align as u32 != expected_align {
            return Some(format!(
                "block align {} does not match {} channels of {} bits",
                fmt.block_align, fmt.channels, fmt.bits_per_sample
            ));
        }
        None
    }

    #[inline(always)]
    fn valid(&self) -> WavEditResult<&ChunkLayout> {
        match self.invalid_reason() {
            None => Ok(&self.layout),
            Some(reason) => Err(WavEditError::InvalidHeader(reason)),
        }
    }

    pub fn sample_rate(&self) -> WavEditResult<u32> {
        Ok(self.valid()?.fmt_chunk.sample_rate)
    }

    pub fn channel_count(&self) -> WavEditResult<u16> {
        Ok(self.valid()?.fmt_chunk.channels)
    }

    pub fn block_align(&self) -> WavEditResult<u16> {
        Ok(self.valid()?.fmt_chunk.block_align)
    }

    pub fn bits_per_sample(&self) -> WavEditResult<u16> {
        Ok(self.valid()?.fmt_chunk.bits_per_sample)
    }

    pub fn byte_rate(&self) -> WavEditResult<u32> {
        Ok(self.valid()?.fmt_chunk.byte_rate)
    }

    /// The sub-format under the extensible layout, the plain format code otherwise.
    pub fn effective_audio_format(&self) -> WavEditResult<u16> {
        Ok(self.valid()?.fmt_chunk.format())
    }

    pub fn sample_type(&self) -> WavEditResult<SampleType> {
        let layout = self.valid()?;
        SampleType::try_from((layout.fmt_chunk.format(), layout.fmt_chunk.bits_per_sample))
    }

    /// Absolute offset of the first sample byte.
    pub fn data_chunk_offset(&self) -> WavEditResult<usize> {
        Ok(self.valid()?.data.offset)
    }

    pub fn data_chunk_size(&self) -> WavEditResult<u32> {
        Ok(self.valid()?.data.size)
    }

    /// Offset of the data sub-chunk's size field.
    pub fn data_size_field_offset(&self) -> WavEditResult<usize> {
        Ok(self.valid()?.data.offset - 4)
    }

    /// Duration of the data region in whole milliseconds.
    pub fn length_ms(&self) -> WavEditResult<u64> {
        let layout = self.valid()?;
        Ok(layout.data.size as u64 * 1000 / layout.fmt_chunk.byte_rate as u64)
    }

    /// Size of the whole file as declared by the RIFF descriptor.
    pub fn total_file_size(&self) -> WavEditResult<u64> {
        Ok(self.valid()?.riff_size as u64 + CHUNK_HEADER_SIZE as u64)
    }

    pub fn riff_size(&self) -> u32 {
        self.layout.riff_size
    }

    pub fn fmt_chunk_size(&self) -> u32 {
        self.layout.fmt_chunk_size
    }

    pub fn audio_format(&self) -> u16 {
        self.layout.fmt_chunk.format
    }

    pub fn extension_size(&self) -> u16 {
        self.layout.fmt_chunk.ext_fmt_chunk.cb_size()
    }

    pub fn subformat(&self) -> u16 {
        self.layout.fmt_chunk.ext_fmt_chunk.sub_format()
    }

    pub fn data(&self) -> &ChunkInfo {
        &self.layout.data
    }

    /// Sub-chunks between fmt and data that were skipped while locating the data chunk.
    pub fn skipped_chunks(&self) -> &[ChunkInfo] {
        &self.layout.skipped
    }
}

#[cfg(not(feature = "colored"))]
impl Display for WavHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fmt = &self.layout.fmt_chunk;
        writeln!(f, "RIFF chunk size: {}", self.layout.riff_size)?;
        writeln!(f, "FMT  subchunk size: {}", self.layout.fmt_chunk_size)?;
        writeln!(f, "Audio compression format: {}", describe_format(fmt.format))?;
        writeln!(f, "Number of channels: {}", fmt.channels)?;
        writeln!(f, "Sampling frequency in Hz: {}", fmt.sample_rate)?;
        writeln!(f, "Bytes per second: {}", fmt.byte_rate)?;
        writeln!(f, "Bytes per block of samples: {}", fmt.block_align)?;
        writeln!(f, "Number of bits per sample: {}", fmt.bits_per_sample)?;
        writeln!(
            f,
            "Size of extension for non-PCM formats: {}",
            fmt.ext_fmt_chunk.cb_size()
        )?;
        writeln!(
            f,
            "Audio subformat of extensible format: {}",
            fmt.ext_fmt_chunk.sub_format()
        )?;
        for chunk in &self.layout.skipped {
            writeln!(f, "Other subchunk: {}", chunk)?;
        }
        write!(f, "Sampled data length: {}", self.layout.data.size)
    }
}

#[cfg(feature = "colored")]
impl Display for WavHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fmt = &self.layout.fmt_chunk;
        let rows: [(&str, String); 10] = [
            ("RIFF chunk size:", self.layout.riff_size.to_string()),
            ("FMT  subchunk size:", self.layout.fmt_chunk_size.to_string()),
            ("Audio compression format:", describe_format(fmt.format)),
            ("Number of channels:", fmt.channels.to_string()),
            ("Sampling frequency in Hz:", fmt.sample_rate.to_string()),
            ("Bytes per second:", fmt.byte_rate.to_string()),
            ("Bytes per block of samples:", fmt.block_align.to_string()),
            ("Number of bits per sample:", fmt.bits_per_sample.to_string()),
            (
                "Size of extension for non-PCM formats:",
                fmt.ext_fmt_chunk.cb_size().to_string(),
            ),
            (
                "Audio subformat of extensible format:",
                fmt.ext_fmt_chunk.sub_format().to_string(),
            ),
        ];
        writeln!(f, "{}", "WavHeader".white().bold().underline())?;
        for (label, value) in rows.iter() {
            writeln!(f, "\t{} {}", label.green().bold(), value.white())?;
        }
        for chunk in &self.layout.skipped {
            writeln!(f, "\t{} {}", "Other subchunk:".green().bold(), chunk)?;
        }
        write!(
            f,
            "\t{} {}",
            "Sampled data length:".green().bold(),
            self.layout.data.size.to_string().white()
        )
    }
}
