//! Builders for synthetic WAVE buffers used across the unit tests.
use crate::chunks::{DATA, FMT, RIFF, WAVE};
use crate::sample::{write_sample, Sample};
use crate::wav_type::{EXTENSIBLE, IEEE_FLOAT, PCM};

const KSDATAFORMAT_GUID_TAIL: [u8; 14] =
    *b"\x00\x00\x00\x00\x10\x00\x80\x00\x00\xAA\x00\x38\x9B\x71";

#[derive(Debug, Clone)]
pub(crate) struct WavBuilder {
    format: u16,
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
    sub_format: u16,
    format_override: Option<u16>,
    block_align: Option<u16>,
    riff_size: Option<u32>,
    before_data: Vec<([u8; 4], Vec<u8>)>,
    after_data: Vec<([u8; 4], Vec<u8>)>,
    data: Vec<u8>,
}

impl WavBuilder {
    fn new(format: u16, channels: u16, sample_rate: u32, bits_per_sample: u16) -> Self {
        WavBuilder {
            format,
            channels,
            sample_rate,
            bits_per_sample,
            sub_format: 0,
            format_override: None,
            block_align: None,
            riff_size: None,
            before_data: Vec::new(),
            after_data: Vec::new(),
            data: Vec::new(),
        }
    }

    pub(crate) fn pcm(channels: u16, sample_rate: u32, bits_per_sample: u16) -> Self {
        Self::new(PCM, channels, sample_rate, bits_per_sample)
    }

    pub(crate) fn float(channels: u16, sample_rate: u32, bits_per_sample: u16) -> Self {
        Self::new(IEEE_FLOAT, channels, sample_rate, bits_per_sample)
    }

    pub(crate) fn extensible(
        channels: u16,
        sample_rate: u32,
        bits_per_sample: u16,
        sub_format: u16,
    ) -> Self {
        let mut builder = Self::new(EXTENSIBLE, channels, sample_rate, bits_per_sample);
        builder.sub_format = sub_format;
        builder
    }

    pub(crate) fn data(mut self, data: Vec<u8>) -> Self {
        self.data = data;
        self
    }

    pub(crate) fn chunk_before_data(mut self, id: [u8; 4], payload: Vec<u8>) -> Self {
        self.before_data.push((id, payload));
        self
    }

    pub(crate) fn chunk_after_data(mut self, id: [u8; 4], payload: Vec<u8>) -> Self {
        self.after_data.push((id, payload));
        self
    }

    /// Overrides the format code written to the fmt chunk without changing its layout.
    pub(crate) fn format(mut self, format: u16) -> Self {
        self.format_override = Some(format);
        self
    }

    pub(crate) fn block_align(mut self, block_align: u16) -> Self {
        self.block_align = Some(block_align);
        self
    }

    pub(crate) fn riff_size(mut self, riff_size: u32) -> Self {
        self.riff_size = Some(riff_size);
        self
    }

    fn fmt_payload(&self) -> Vec<u8> {
        let block_align = self
            .block_align
            .unwrap_or(self.channels * (self.bits_per_sample / 8));
        let byte_rate = self.sample_rate.wrapping_mul(block_align as u32);

        let mut payload = Vec::with_capacity(40);
        payload.extend_from_slice(&self.format_override.unwrap_or(self.format).to_le_bytes());
        payload.extend_from_slice(&self.channels.to_le_bytes());
        payload.extend_from_slice(&self.sample_rate.to_le_bytes());
        payload.extend_from_slice(&byte_rate.to_le_bytes());
        payload.extend_from_slice(&block_align.to_le_bytes());
        payload.extend_from_slice(&self.bits_per_sample.to_le_bytes());

        if self.format == EXTENSIBLE {
            let channel_mask: u32 = (1u32 << self.channels) - 1;
            payload.extend_from_slice(&22u16.to_le_bytes());
            payload.extend_from_slice(&self.bits_per_sample.to_le_bytes());
            payload.extend_from_slice(&channel_mask.to_le_bytes());
            payload.extend_from_slice(&self.sub_format.to_le_bytes());
            payload.extend_from_slice(&KSDATAFORMAT_GUID_TAIL);
        } else if self.format != PCM {
            payload.extend_from_slice(&0u16.to_le_bytes());
        }
        payload
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&RIFF);
        bytes.extend_from_slice(&[0; 4]);
        bytes.extend_from_slice(&WAVE);

        let fmt_payload = self.fmt_payload();
        let fmt_size = fmt_payload.len() as u32;
        bytes.extend_from_slice(&FMT);
        bytes.extend_from_slice(&fmt_size.to_le_bytes());
        bytes.extend_from_slice(&fmt_payload);

        for (id, payload) in &self.before_data {
            push_chunk(&mut bytes, id, payload);
        }
        push_chunk(&mut bytes, &DATA, &self.data);
        for (id, payload) in &self.after_data {
            push_chunk(&mut bytes, id, payload);
        }

        let riff_size = self.riff_size.unwrap_or(bytes.len() as u32 - 8);
        bytes[4..8].copy_from_slice(&riff_size.to_le_bytes());
        bytes
    }
}

fn push_chunk(bytes: &mut Vec<u8>, id: &[u8; 4], payload: &[u8]) {
    bytes.extend_from_slice(id);
    bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    bytes.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        bytes.push(0);
    }
}

/// 8-bit mono PCM at 1000 Hz: one byte per millisecond.
pub(crate) fn mono_u8_ramp(n_bytes: usize) -> Vec<u8> {
    let data: Vec<u8> = (0..n_bytes).map(|i| (i % 256) as u8).collect();
    WavBuilder::pcm(1, 1000, 8).data(data).build()
}

/// Encodes `samples` as little-endian 16-bit PCM data bytes.
pub(crate) fn i16_data(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

pub(crate) fn f32_data(samples: &[f32]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

/// Encodes `samples` as little-endian data bytes of any sample type.
pub(crate) fn sample_data<T: Sample>(samples: &[T]) -> Vec<u8> {
    let width = std::mem::size_of::<T>();
    let mut bytes = vec![0; samples.len() * width];
    for (i, sample) in samples.iter().enumerate() {
        write_sample(&mut bytes, i * width, *sample).unwrap();
    }
    bytes
}
