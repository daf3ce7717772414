use std::sync::Arc;

use rayon::prelude::*;
use rustfft::{num_complex::Complex, Fft, FftPlanner};

use super::source::SampleSource;
use super::spectrogram::MasterSpectrogram;
use super::window::WindowType;
use crate::error::{AnalysisError, ConfigError};

pub const MIN_FFT_SIZE: usize = 16;
pub const MAX_FFT_SIZE: usize = 65536;

/// Frames computed per parallel batch. Bounds the sliding sample buffer to
/// `(BATCH_FRAMES - 1) * hop_size + fft_size` samples plus one decoder chunk.
const BATCH_FRAMES: usize = 256;

/// How interleaved channels are reduced to the single analysed signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelPolicy {
    /// Average of all channels.
    #[default]
    Mixdown,
    /// One channel, zero-based.
    Select(usize),
}

/// STFT parameters. Checked once by [`validate`](AnalysisConfig::validate)
/// before any samples are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub fft_size: usize,
    pub hop_size: usize,
    pub window: WindowType,
    pub channel_policy: ChannelPolicy,
}

impl AnalysisConfig {
    /// Hann window, mixdown, hop derived as a quarter of the frame.
    pub fn new(fft_size: usize) -> Self {
        Self {
            fft_size,
            hop_size: (fft_size / 4).max(1),
            window: WindowType::default(),
            channel_policy: ChannelPolicy::default(),
        }
    }

    pub fn with_hop_size(mut self, hop_size: usize) -> Self {
        self.hop_size = hop_size;
        self
    }

    pub fn with_window(mut self, window: WindowType) -> Self {
        self.window = window;
        self
    }

    pub fn with_channel_policy(mut self, channel_policy: ChannelPolicy) -> Self {
        self.channel_policy = channel_policy;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fft_size.is_power_of_two()
            || self.fft_size < MIN_FFT_SIZE
            || self.fft_size > MAX_FFT_SIZE
        {
            return Err(ConfigError::UnsupportedFftSize(self.fft_size));
        }
        if self.hop_size == 0 || self.hop_size > self.fft_size {
            return Err(ConfigError::HopSizeOutOfRange {
                hop_size: self.hop_size,
                fft_size: self.fft_size,
            });
        }
        Ok(())
    }

    pub fn bin_count(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Samples shared by consecutive frames.
    pub fn overlap(&self) -> usize {
        self.fft_size.saturating_sub(self.hop_size)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new(2048)
    }
}

/// Snapshot passed to the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Per-channel samples pulled from the source so far.
    pub samples_processed: u64,
    /// Total per-channel samples, when the source knows it.
    pub total_samples: Option<u64>,
}

/// Run the STFT over `source` until it is exhausted.
pub fn analyze<S: SampleSource>(
    source: S,
    config: &AnalysisConfig,
) -> Result<MasterSpectrogram, AnalysisError> {
    analyze_with_progress(source, config, |_| {})
}

/// [`analyze`] with a progress callback, invoked after every batch of frames
/// and once more when the stream ends. The callback only observes.
///
/// Frame `i` covers input samples `[i * hop, i * hop + fft_size)`. Frames that
/// run past the end of the stream are zero-padded, so a stream of `n` samples
/// yields `ceil(n / hop)` frames. A source error aborts the run and the
/// partial matrix is dropped.
pub fn analyze_with_progress<S, F>(
    mut source: S,
    config: &AnalysisConfig,
    mut on_progress: F,
) -> Result<MasterSpectrogram, AnalysisError>
where
    S: SampleSource,
    F: FnMut(Progress),
{
    config.validate()?;

    let spec = source.spec();
    if spec.sample_rate == 0 {
        return Err(ConfigError::InvalidStream("a sample rate of 0 Hz").into());
    }
    if spec.channels == 0 {
        return Err(ConfigError::InvalidStream("zero channels").into());
    }
    if let ChannelPolicy::Select(channel) = config.channel_policy {
        if channel >= spec.channels {
            return Err(ConfigError::ChannelOutOfRange {
                channel,
                channels: spec.channels,
            }
            .into());
        }
    }

    log::debug!(
        "STFT: fft_size={}, hop={} (overlap {}), window={:?}, channels={} ({:?})",
        config.fft_size,
        config.hop_size,
        config.overlap(),
        config.window,
        spec.channels,
        config.channel_policy
    );

    let engine = FrameEngine::new(config);
    let hop = config.hop_size;
    let batch_span = (BATCH_FRAMES - 1) * hop + config.fft_size;

    let mut pending: Vec<f32> = Vec::with_capacity(batch_span * 2);
    // Header lengths are only a progress hint; streamed files may claim
    // billions of frames, so the matrix grows batch by batch instead.
    let mut data: Vec<f32> = Vec::with_capacity(BATCH_FRAMES * engine.bin_count);

    let mut samples_read: u64 = 0;
    let mut exhausted = false;

    loop {
        while !exhausted && pending.len() < batch_span {
            match source.next_chunk() {
                Ok(Some(chunk)) => {
                    let before = pending.len();
                    push_mono(chunk, spec.channels, config.channel_policy, &mut pending);
                    samples_read += (pending.len() - before) as u64;
                }
                Ok(None) => exhausted = true,
                Err(err) => {
                    return Err(AnalysisError::Stream {
                        samples_read,
                        source: err,
                    })
                }
            }
        }

        if exhausted {
            let remaining = pending.len().div_ceil(hop);
            engine.process_batch(&pending, remaining, &mut data);
            break;
        }

        engine.process_batch(&pending, BATCH_FRAMES, &mut data);
        pending.drain(..BATCH_FRAMES * hop);
        on_progress(Progress {
            samples_processed: samples_read,
            total_samples: spec.total_frames,
        });
    }

    on_progress(Progress {
        samples_processed: samples_read,
        total_samples: spec.total_frames,
    });

    let spectrogram = MasterSpectrogram::from_raw(data, spec.sample_rate, config.fft_size, hop);

    log::info!(
        "STFT complete: {} frames x {} bins from {} samples",
        spectrogram.frame_count(),
        spectrogram.bin_count(),
        samples_read
    );

    Ok(spectrogram)
}

/// Append one mono sample per interleaved frame of `chunk`.
fn push_mono(chunk: &[f32], channels: usize, policy: ChannelPolicy, out: &mut Vec<f32>) {
    if channels == 1 {
        out.extend_from_slice(chunk);
        return;
    }
    match policy {
        ChannelPolicy::Mixdown => out.extend(
            chunk
                .chunks_exact(channels)
                .map(|frame| frame.iter().sum::<f32>() / channels as f32),
        ),
        ChannelPolicy::Select(channel) => {
            out.extend(chunk.chunks_exact(channels).map(|frame| frame[channel]))
        }
    }
}

/// Windowed forward FFT of independent frames. The plan is shared across
/// rayon workers; each worker owns its frame and scratch buffers.
struct FrameEngine {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    fft_size: usize,
    hop_size: usize,
    bin_count: usize,
}

impl FrameEngine {
    fn new(config: &AnalysisConfig) -> Self {
        let mut planner = FftPlanner::<f32>::new();
        Self {
            fft: planner.plan_fft_forward(config.fft_size),
            window: config.window.coefficients(config.fft_size),
            fft_size: config.fft_size,
            hop_size: config.hop_size,
            bin_count: config.bin_count(),
        }
    }

    /// Compute `count` frames whose first sample sits at `k * hop` in
    /// `samples`, appending their magnitudes to `out` in frame order.
    /// Samples past the end of `samples` read as zero.
    fn process_batch(&self, samples: &[f32], count: usize, out: &mut Vec<f32>) {
        if count == 0 {
            return;
        }

        let base = out.len();
        out.resize(base + count * self.bin_count, 0.0);

        let scratch_len = self.fft.get_inplace_scratch_len();

        out[base..]
            .par_chunks_mut(self.bin_count)
            .enumerate()
            .for_each_init(
                || {
                    (
                        vec![Complex::new(0.0f32, 0.0); self.fft_size],
                        vec![Complex::new(0.0f32, 0.0); scratch_len],
                    )
                },
                |(buffer, scratch), (k, magnitudes)| {
                    let start = (k * self.hop_size).min(samples.len());
                    let end = (start + self.fft_size).min(samples.len());
                    let frame = &samples[start..end];

                    for (i, slot) in buffer.iter_mut().enumerate() {
                        let s = frame.get(i).copied().unwrap_or(0.0);
                        *slot = Complex::new(s * self.window[i], 0.0);
                    }

                    self.fft.process_with_scratch(buffer, scratch);

                    for (m, c) in magnitudes.iter_mut().zip(buffer.iter()) {
                        *m = c.norm();
                    }
                },
            );
    }
}
