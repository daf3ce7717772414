use std::io::Write;
use std::path::{Path, PathBuf};

/// Write interleaved f32 samples in [-1, 1] as a 16-bit PCM WAV file.
pub fn write_wav(dir: &Path, filename: &str, samples: &[f32], channels: u16, sample_rate: u32) -> PathBuf {
    let bits_per_sample: u16 = 16;
    let byte_rate = sample_rate * channels as u32 * bits_per_sample as u32 / 8;
    let block_align = channels * bits_per_sample / 8;
    let data_size = (samples.len() * 2) as u32;

    let path = dir.join(filename);
    let mut file = std::fs::File::create(&path).unwrap();

    // RIFF header
    file.write_all(b"RIFF").unwrap();
    file.write_all(&(36 + data_size).to_le_bytes()).unwrap();
    file.write_all(b"WAVE").unwrap();

    // fmt chunk
    file.write_all(b"fmt ").unwrap();
    file.write_all(&16u32.to_le_bytes()).unwrap();
    file.write_all(&1u16.to_le_bytes()).unwrap(); // PCM
    file.write_all(&channels.to_le_bytes()).unwrap();
    file.write_all(&sample_rate.to_le_bytes()).unwrap();
    file.write_all(&byte_rate.to_le_bytes()).unwrap();
    file.write_all(&block_align.to_le_bytes()).unwrap();
    file.write_all(&bits_per_sample.to_le_bytes()).unwrap();

    // data chunk
    file.write_all(b"data").unwrap();
    file.write_all(&data_size.to_le_bytes()).unwrap();
    for &s in samples {
        let v = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        file.write_all(&v.to_le_bytes()).unwrap();
    }

    path
}

pub fn sine(frequency: f32, amplitude: f32, frames: usize, sample_rate: u32) -> Vec<f32> {
    (0..frames)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            amplitude * (2.0 * std::f32::consts::PI * frequency * t).sin()
        })
        .collect()
}

/// Mono sine WAV of `duration_secs`.
pub fn sine_wav(dir: &Path, filename: &str, frequency: f32, duration_secs: f32, sample_rate: u32) -> PathBuf {
    let frames = (sample_rate as f32 * duration_secs) as usize;
    write_wav(dir, filename, &sine(frequency, 0.8, frames, sample_rate), 1, sample_rate)
}
