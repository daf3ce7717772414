use thiserror::Error;

/// Invalid analysis or render parameters. Detected before any heavy work and
/// never corrected silently.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unsupported FFT size {0} (expected a power of two between {min} and {max})", min = crate::audio::analysis::MIN_FFT_SIZE, max = crate::audio::analysis::MAX_FFT_SIZE)]
    UnsupportedFftSize(usize),

    #[error("hop size {hop_size} out of range (must be in 1..={fft_size})")]
    HopSizeOutOfRange { hop_size: usize, fft_size: usize },

    #[error("channel {channel} requested but the stream has {channels} channel(s)")]
    ChannelOutOfRange { channel: usize, channels: usize },

    #[error("stream reports {0}")]
    InvalidStream(&'static str),

    #[error("image dimensions must be positive, got {width}x{height}")]
    ZeroImageDimension { width: u32, height: u32 },

    #[error("dynamic range must be a positive number of dB, got {0}")]
    InvalidDynamicRange(f32),
}

/// Failure reported by a sample source.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("failed to open {path}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to probe audio format")]
    Probe(#[source] symphonia::core::errors::Error),

    #[error("no decodable audio track found")]
    NoTrack,

    #[error("missing stream parameter: {0}")]
    MissingParameter(&'static str),

    #[error("decode failed")]
    Decode(#[from] symphonia::core::errors::Error),

    #[error("read failed")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("sample stream failed after {samples_read} samples")]
    Stream {
        samples_read: u64,
        #[source]
        source: StreamError,
    },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("spectrogram has no frames, nothing to render")]
    EmptySpectrogram,
}
