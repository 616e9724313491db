use std::fmt::Display;

use crate::error::WavEditError;

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCode {
    WAV_FORMAT_PCM = 1,
    WAV_FORMAT_IEEE_FLOAT = 3,
    WAVE_FORMAT_ALAW = 6,
    WAVE_FORMAT_MULAW = 7,
    WAVE_FORMAT_EXTENSIBLE = 0xFFFE,
}

impl FormatCode {
    pub const fn code(self) -> u16 {
        self as u16
    }
}

/// `"<code> (<name>)"` for known format codes, the bare number otherwise.
pub(crate) fn describe_format(code: u16) -> String {
    match FormatCode::try_from(code) {
        Ok(format) => format!("{} ({})", code, format),
        Err(_) => code.to_string(),
    }
}

impl Display for FormatCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatCode::WAV_FORMAT_PCM => write!(f, "WAV_FORMAT_PCM"),
            FormatCode::WAV_FORMAT_IEEE_FLOAT => write!(f, "WAV_FORMAT_IEEE_FLOAT"),
            FormatCode::WAVE_FORMAT_ALAW => write!(f, "WAVE_FORMAT_ALAW"),
            FormatCode::WAVE_FORMAT_MULAW => write!(f, "WAVE_FORMAT_MULAW"),
            FormatCode::WAVE_FORMAT_EXTENSIBLE => write!(f, "WAVE_FORMAT_EXTENSIBLE"),
        }
    }
}

impl TryFrom<u16> for FormatCode {
    type Error = WavEditError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(FormatCode::WAV_FORMAT_PCM),
            3 => Ok(FormatCode::WAV_FORMAT_IEEE_FLOAT),
            6 => Ok(FormatCode::WAVE_FORMAT_ALAW),
            7 => Ok(FormatCode::WAVE_FORMAT_MULAW),
            0xFFFE => Ok(FormatCode::WAVE_FORMAT_EXTENSIBLE),
            _ => Err(WavEditError::InvalidHeader(format!(
                "Unknown format code: {}",
                value
            ))),
        }
    }
}

pub const PCM: u16 = FormatCode::WAV_FORMAT_PCM.code();
pub const IEEE_FLOAT: u16 = FormatCode::WAV_FORMAT_IEEE_FLOAT.code();
pub const EXTENSIBLE: u16 = FormatCode::WAVE_FORMAT_EXTENSIBLE.code();

/// The in-memory representation used for every sample of a file.
///
/// Chosen once per file from the effective format code and the bit depth. 8-bit PCM is
/// unsigned on disk; every wider PCM width is signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleType {
    U8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl Display for SampleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleType::U8 => write!(f, "PCM_U8"),
            SampleType::I16 => write!(f, "PCM_16"),
            SampleType::I32 => write!(f, "PCM_32"),
            SampleType::I64 => write!(f, "PCM_64"),
            SampleType::F32 => write!(f, "IEEE_FLOAT_32"),
            SampleType::F64 => write!(f, "IEEE_FLOAT_64"),
        }
    }
}

/// `(effective format code, bits per sample)`.
impl TryFrom<(u16, u16)> for SampleType {
    type Error = WavEditError;

    fn try_from(value: (u16, u16)) -> Result<Self, Self::Error> {
        Ok(match value {
            (PCM, 8) => SampleType::U8,
            (PCM, 16) => SampleType::I16,
            (PCM, 32) => SampleType::I32,
            (PCM, 64) => SampleType::I64,
            (IEEE_FLOAT, 32) => SampleType::F32,
            (IEEE_FLOAT, 64) => SampleType::F64,
            (format, bits_per_sample) => {
                return Err(WavEditError::UnsupportedFormat {
                    format,
                    bits_per_sample,
                })
            }
        })
    }
}
