use crate::error::StreamError;

/// Stream parameters, queried once before any samples are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSpec {
    pub sample_rate: u32,
    pub channels: usize,
    /// Total frames (one sample per channel), when the container declares it.
    pub total_frames: Option<u64>,
}

/// Pull-based source of interleaved PCM samples.
///
/// Each call to [`next_chunk`](SampleSource::next_chunk) hands out the next
/// bounded chunk of interleaved `f32` samples in the nominal range `[-1, 1]`.
/// `Ok(None)` marks the end of the stream. Chunks always hold whole frames.
pub trait SampleSource {
    fn spec(&self) -> StreamSpec;

    fn next_chunk(&mut self) -> Result<Option<&[f32]>, StreamError>;
}

impl<S: SampleSource + ?Sized> SampleSource for &mut S {
    fn spec(&self) -> StreamSpec {
        (**self).spec()
    }

    fn next_chunk(&mut self) -> Result<Option<&[f32]>, StreamError> {
        (**self).next_chunk()
    }
}

impl<S: SampleSource + ?Sized> SampleSource for Box<S> {
    fn spec(&self) -> StreamSpec {
        (**self).spec()
    }

    fn next_chunk(&mut self) -> Result<Option<&[f32]>, StreamError> {
        (**self).next_chunk()
    }
}

/// Source over samples already in memory, handed out in fixed-size chunks.
pub struct MemorySource {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: usize,
    chunk_frames: usize,
    pos: usize,
}

impl MemorySource {
    const DEFAULT_CHUNK_FRAMES: usize = 4096;

    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: usize) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
            chunk_frames: Self::DEFAULT_CHUNK_FRAMES,
            pos: 0,
        }
    }

    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self::new(samples, sample_rate, 1)
    }

    /// Override the chunk length (in frames). Zero is treated as one.
    pub fn with_chunk_frames(mut self, chunk_frames: usize) -> Self {
        self.chunk_frames = chunk_frames.max(1);
        self
    }
}

impl SampleSource for MemorySource {
    fn spec(&self) -> StreamSpec {
        StreamSpec {
            sample_rate: self.sample_rate,
            channels: self.channels,
            total_frames: Some((self.samples.len() / self.channels.max(1)) as u64),
        }
    }

    fn next_chunk(&mut self) -> Result<Option<&[f32]>, StreamError> {
        if self.pos >= self.samples.len() {
            return Ok(None);
        }
        let len = self.chunk_frames * self.channels.max(1);
        let end = (self.pos + len).min(self.samples.len());
        let chunk = &self.samples[self.pos..end];
        self.pos = end;
        Ok(Some(chunk))
    }
}
