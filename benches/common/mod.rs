use std::{fmt::Display, io::Cursor, time::Duration};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BenchSampleType {
    U8,
    I16,
    I32,
    F32,
}

impl Display for BenchSampleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BenchSampleType::U8 => write!(f, "u8"),
            BenchSampleType::I16 => write!(f, "i16"),
            BenchSampleType::I32 => write!(f, "i32"),
            BenchSampleType::F32 => write!(f, "f32"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EditBenchConfig {
    pub duration: Duration,
    pub sample_rate: u32,
    pub num_channels: u16,
    pub sample_type: BenchSampleType,
}

impl EditBenchConfig {
    pub const fn new(
        duration: Duration,
        sample_rate: u32,
        num_channels: u16,
        sample_type: BenchSampleType,
    ) -> Self {
        EditBenchConfig {
            duration,
            sample_rate,
            num_channels,
            sample_type,
        }
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration.as_millis() as u32
    }
}

impl Display for EditBenchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}s_{}Hz_{}ch_{}",
            self.duration.as_secs(),
            self.sample_rate,
            self.num_channels,
            self.sample_type
        )
    }
}

pub const CONFIGS: &[EditBenchConfig] = &[
    EditBenchConfig::new(Duration::from_secs(10), 8000, 1, BenchSampleType::U8),
    EditBenchConfig::new(Duration::from_secs(10), 44100, 2, BenchSampleType::I16),
    EditBenchConfig::new(Duration::from_secs(10), 48000, 2, BenchSampleType::I32),
    EditBenchConfig::new(Duration::from_secs(10), 48000, 2, BenchSampleType::F32),
];

/// A 440 Hz sine encoded as a complete WAVE file in memory.
pub fn generate_wav_bytes(config: &EditBenchConfig) -> Vec<u8> {
    let (bits_per_sample, sample_format) = match config.sample_type {
        BenchSampleType::U8 => (8, hound::SampleFormat::Int),
        BenchSampleType::I16 => (16, hound::SampleFormat::Int),
        BenchSampleType::I32 => (32, hound::SampleFormat::Int),
        BenchSampleType::F32 => (32, hound::SampleFormat::Float),
    };
    let spec = hound::WavSpec {
        channels: config.num_channels,
        sample_rate: config.sample_rate,
        bits_per_sample,
        sample_format,
    };

    let n_frames = (config.duration.as_secs_f64() * config.sample_rate as f64) as usize;
    let freq = 440.0; // A4

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for i in 0..n_frames {
            let t = i as f64 / config.sample_rate as f64;
            let value = (2.0 * std::f64::consts::PI * freq * t).sin();
            for _ in 0..config.num_channels {
                match config.sample_type {
                    // hound takes 8-bit samples as signed and writes them offset by 128
                    BenchSampleType::U8 => writer.write_sample((value * 127.0) as i8).unwrap(),
                    BenchSampleType::I16 => writer
                        .write_sample((value * i16::MAX as f64) as i16)
                        .unwrap(),
                    BenchSampleType::I32 => writer
                        .write_sample((value * i32::MAX as f64) as i32)
                        .unwrap(),
                    BenchSampleType::F32 => writer.write_sample(value as f32).unwrap(),
                }
            }
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}
