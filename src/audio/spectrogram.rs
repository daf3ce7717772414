/// One analysis hop: linear magnitudes, one per frequency bin, lowest bin first.
pub type SpectralFrame<'a> = &'a [f32];

/// Full-resolution time/frequency magnitude matrix produced by the analysis
/// stage. Read-only once built.
///
/// Frames are stored back to back in a single buffer, so frame `i` occupies
/// `data[i * bin_count..(i + 1) * bin_count]` and starts at sample
/// `i * hop_size` of the input.
#[derive(Debug, PartialEq)]
pub struct MasterSpectrogram {
    data: Vec<f32>,
    bin_count: usize,
    sample_rate: u32,
    fft_size: usize,
    hop_size: usize,
    peak: f32,
}

impl MasterSpectrogram {
    /// Build from a flat buffer of `frame_count * (fft_size / 2 + 1)` linear
    /// magnitudes in time order.
    ///
    /// Panics if the buffer length is not a whole number of frames.
    pub(crate) fn from_raw(data: Vec<f32>, sample_rate: u32, fft_size: usize, hop_size: usize) -> Self {
        let bin_count = fft_size / 2 + 1;
        assert!(
            data.len() % bin_count == 0,
            "buffer of {} values is not a whole number of {}-bin frames",
            data.len(),
            bin_count
        );
        let peak = data.iter().copied().fold(0.0f32, f32::max);
        Self {
            data,
            bin_count,
            sample_rate,
            fft_size,
            hop_size,
            peak,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.data.len() / self.bin_count
    }

    /// Usable bins per frame: `fft_size / 2 + 1`.
    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Largest magnitude anywhere in the matrix (0 for silence or no frames).
    pub fn peak(&self) -> f32 {
        self.peak
    }

    pub fn frame(&self, index: usize) -> Option<SpectralFrame<'_>> {
        let start = index.checked_mul(self.bin_count)?;
        self.data.get(start..start + self.bin_count)
    }

    pub fn frames(&self) -> impl ExactSizeIterator<Item = SpectralFrame<'_>> + '_ {
        self.data.chunks_exact(self.bin_count)
    }

    /// Magnitude at (`frame`, `bin`). Panics when out of range.
    #[inline]
    pub fn magnitude(&self, frame: usize, bin: usize) -> f32 {
        debug_assert!(bin < self.bin_count);
        self.data[frame * self.bin_count + bin]
    }

    /// Center frequency of `bin` in Hz.
    pub fn bin_frequency(&self, bin: usize) -> f32 {
        bin as f32 * self.sample_rate as f32 / self.fft_size as f32
    }

    /// Start time of `frame` in seconds.
    pub fn frame_time(&self, frame: usize) -> f64 {
        (frame * self.hop_size) as f64 / self.sample_rate as f64
    }

    /// Duration covered by the frame starts, in seconds.
    pub fn duration(&self) -> f64 {
        self.frame_time(self.frame_count())
    }
}
