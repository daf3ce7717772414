//! Streaming spectrogram analysis and rendering.
//!
//! Audio is pulled from a [`SampleSource`] in chunks and turned into a
//! [`MasterSpectrogram`] by [`analyze`]. [`render`] fits that matrix into a
//! fixed-size [`PixelGrid`], which [`encode::png::write_png`] stores on disk.

pub mod audio;
pub mod encode;
pub mod error;
pub mod format;
pub mod render;

pub use audio::analysis::{analyze, analyze_with_progress, AnalysisConfig, ChannelPolicy, Progress};
pub use audio::decode::{AudioMetadata, SymphoniaSource};
pub use audio::source::{MemorySource, SampleSource, StreamSpec};
pub use audio::spectrogram::{MasterSpectrogram, SpectralFrame};
pub use audio::window::WindowType;
pub use error::{AnalysisError, ConfigError, RenderError, StreamError};
pub use render::palette::{Color, ColorScheme, GradientMode};
pub use render::pipeline::{render, PixelGrid, RenderConfig};
