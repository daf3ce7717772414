use std::f32::consts::PI;

/// Analysis window applied to every frame before the FFT.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub enum WindowType {
    #[default]
    Hann,
    Hamming,
    Blackman,
    Rectangular,
}

impl WindowType {
    /// Symmetric window coefficients of length `size` (denominator `size - 1`).
    /// A single-point window is `[1.0]`.
    pub fn coefficients(self, size: usize) -> Vec<f32> {
        if size == 1 {
            return vec![1.0];
        }
        let denom = (size.saturating_sub(1)) as f32;
        (0..size)
            .map(|i| {
                let phase = 2.0 * PI * i as f32 / denom;
                match self {
                    WindowType::Hann => 0.5 - 0.5 * phase.cos(),
                    WindowType::Hamming => 0.54 - 0.46 * phase.cos(),
                    WindowType::Blackman => 0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos(),
                    WindowType::Rectangular => 1.0,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max(window: &[f32]) -> f32 {
        window.iter().copied().fold(f32::MIN, f32::max)
    }

    #[test]
    fn hann_tapers_to_zero_and_peaks_at_one() {
        let w = WindowType::Hann.coefficients(129);
        assert_eq!(w.len(), 129);
        assert!(w[0].abs() < 1e-6);
        assert!(w[128].abs() < 1e-6);
        assert!((w[64] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn hamming_edges_sit_at_point_zero_eight() {
        let w = WindowType::Hamming.coefficients(128);
        assert!((w[0] - 0.08).abs() < 1e-4);
        assert!((w[127] - 0.08).abs() < 1e-4);
        assert!((max(&w) - 1.0).abs() < 0.01);
    }

    #[test]
    fn blackman_edges_are_near_zero() {
        let w = WindowType::Blackman.coefficients(256);
        assert!(w[0].abs() < 1e-4);
        assert!(w[255].abs() < 1e-4);
        assert!((max(&w) - 1.0).abs() < 0.01);
    }

    #[test]
    fn rectangular_is_flat() {
        assert!(WindowType::Rectangular
            .coefficients(16)
            .iter()
            .all(|&c| c == 1.0));
    }

    #[test]
    fn windows_are_symmetric() {
        for window in [
            WindowType::Hann,
            WindowType::Hamming,
            WindowType::Blackman,
            WindowType::Rectangular,
        ] {
            let w = window.coefficients(64);
            for i in 0..32 {
                assert!(
                    (w[i] - w[63 - i]).abs() < 1e-5,
                    "{:?} asymmetric at {}",
                    window,
                    i
                );
            }
        }
    }

    #[test]
    fn degenerate_lengths() {
        assert!(WindowType::Hann.coefficients(0).is_empty());
        assert_eq!(WindowType::Hamming.coefficients(1), vec![1.0]);
    }
}
