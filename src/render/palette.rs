use hsl::HSL;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// From a packed `0xRRGGBB` value.
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// A color pinned at a position in `[0, 1]` of a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub position: f32,
    pub color: Color,
}

const fn stop(position: f32, rgb: u32) -> ColorStop {
    ColorStop {
        position,
        color: Color::from_hex(rgb),
    }
}

const OCEANIC: [ColorStop; 4] = [
    stop(0.0, 0x01041B),
    stop(1.0 / 3.0, 0x072E69),
    stop(2.0 / 3.0, 0x4DA4D5),
    stop(1.0, 0xDCF3FF),
];

const GRAYSCALE: [ColorStop; 3] = [
    stop(0.0, 0x000000),
    stop(0.5, 0x888888),
    stop(1.0, 0xFFFFFF),
];

const INFERNO: [ColorStop; 5] = [
    stop(0.0, 0x000004),
    stop(0.25, 0x3B0F70),
    stop(0.5, 0xAC255E),
    stop(0.75, 0xF98E09),
    stop(1.0, 0xFCFD21),
];

const VIRIDIS: [ColorStop; 5] = [
    stop(0.0, 0x440154),
    stop(0.25, 0x3B528B),
    stop(0.5, 0x21918C),
    stop(0.75, 0x5EC962),
    stop(1.0, 0xFDE725),
];

const SYNTHWAVE: [ColorStop; 4] = [
    stop(0.0, 0x0D0221),
    stop(1.0 / 3.0, 0x2D134B),
    stop(2.0 / 3.0, 0xA537FD),
    stop(1.0, 0x00F6FF),
];

const SUNSET: [ColorStop; 4] = [
    stop(0.0, 0x3C031C),
    stop(1.0 / 3.0, 0x9C1521),
    stop(2.0 / 3.0, 0xFD6A02),
    stop(1.0, 0xFEC812),
];

/// Named palettes for spectrogram rendering, darkest (quietest) first.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub enum ColorScheme {
    /// Navy to ice blue.
    #[default]
    Oceanic,
    Grayscale,
    Inferno,
    Viridis,
    /// Deep purple through violet to cyan.
    Synthwave,
    /// Maroon through orange to yellow.
    Sunset,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 6] = [
        ColorScheme::Oceanic,
        ColorScheme::Grayscale,
        ColorScheme::Inferno,
        ColorScheme::Viridis,
        ColorScheme::Synthwave,
        ColorScheme::Sunset,
    ];

    pub fn stops(self) -> &'static [ColorStop] {
        match self {
            ColorScheme::Oceanic => &OCEANIC,
            ColorScheme::Grayscale => &GRAYSCALE,
            ColorScheme::Inferno => &INFERNO,
            ColorScheme::Viridis => &VIRIDIS,
            ColorScheme::Synthwave => &SYNTHWAVE,
            ColorScheme::Sunset => &SUNSET,
        }
    }
}

/// Color space used to blend between neighbouring stops.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum GradientMode {
    /// Per-channel linear blend.
    #[default]
    Rgb,
    /// Blend hue, saturation and lightness; hue takes the short way round.
    Hsl,
}

/// Entries in a pre-sampled gradient.
pub const GRADIENT_SIZE: usize = 1024;

/// A palette sampled into a fixed lookup table.
#[derive(Debug, Clone)]
pub struct Gradient {
    table: Vec<Color>,
}

impl Gradient {
    /// Sample `stops` (sorted by position, first at 0, last at 1) into a
    /// table of [`GRADIENT_SIZE`] colors.
    ///
    /// Panics if `stops` is empty.
    pub fn new(stops: &[ColorStop], mode: GradientMode) -> Self {
        assert!(!stops.is_empty(), "gradient needs at least one color stop");

        let table = (0..GRADIENT_SIZE)
            .map(|i| {
                let t = i as f32 / (GRADIENT_SIZE - 1) as f32;
                sample(stops, t, mode)
            })
            .collect();

        Self { table }
    }

    pub fn for_scheme(scheme: ColorScheme, mode: GradientMode) -> Self {
        Self::new(scheme.stops(), mode)
    }

    /// Color for a normalized intensity; values outside `[0, 1]` are clamped.
    #[inline]
    pub fn color_at(&self, t: f32) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let index = (t * (GRADIENT_SIZE - 1) as f32).round() as usize;
        self.table[index.min(GRADIENT_SIZE - 1)]
    }
}

fn sample(stops: &[ColorStop], t: f32, mode: GradientMode) -> Color {
    let first = stops[0];
    if stops.len() == 1 || t <= first.position {
        return first.color;
    }
    let last = stops[stops.len() - 1];
    if t >= last.position {
        return last.color;
    }

    let upper = stops
        .iter()
        .position(|s| s.position >= t)
        .unwrap_or(stops.len() - 1);
    let (a, b) = (stops[upper - 1], stops[upper]);
    let span = b.position - a.position;
    let local = if span > 0.0 { (t - a.position) / span } else { 1.0 };

    match mode {
        GradientMode::Rgb => lerp_rgb(a.color, b.color, local),
        GradientMode::Hsl => lerp_hsl(a.color, b.color, local),
    }
}

fn lerp_rgb(a: Color, b: Color, t: f32) -> Color {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round().clamp(0.0, 255.0) as u8;
    Color::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
}

fn lerp_hsl(a: Color, b: Color, t: f32) -> Color {
    let start = HSL::from_rgb(&a.to_array());
    let end = HSL::from_rgb(&b.to_array());
    let t = t as f64;

    let s = start.s + (end.s - start.s) * t;
    let l = start.l + (end.l - start.l) * t;

    let mut h_start = start.h;
    let diff = end.h - h_start;
    if diff > 180.0 {
        h_start += 360.0;
    } else if diff < -180.0 {
        h_start -= 360.0;
    }
    let h = (h_start + (end.h - h_start) * t).rem_euclid(360.0);

    let (r, g, b) = HSL { h, s, l }.to_rgb();
    Color::new(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_unpack() {
        assert_eq!(Color::from_hex(0xFF8040), Color::new(255, 128, 64));
        assert_eq!(Color::new(1, 2, 3).to_array(), [1, 2, 3]);
    }

    #[test]
    fn every_scheme_spans_zero_to_one_in_order() {
        for scheme in ColorScheme::ALL {
            let stops = scheme.stops();
            assert!(stops.len() >= 2, "{:?}", scheme);
            assert_eq!(stops[0].position, 0.0, "{:?}", scheme);
            assert_eq!(stops[stops.len() - 1].position, 1.0, "{:?}", scheme);
            assert!(stops.windows(2).all(|w| w[0].position < w[1].position));
        }
    }

    #[test]
    fn gradient_endpoints_are_the_outer_stops() {
        for scheme in ColorScheme::ALL {
            for mode in [GradientMode::Rgb, GradientMode::Hsl] {
                let g = Gradient::for_scheme(scheme, mode);
                let stops = scheme.stops();
                assert_eq!(g.color_at(0.0), stops[0].color, "{:?} {:?}", scheme, mode);
                assert_eq!(g.color_at(1.0), stops[stops.len() - 1].color);
            }
        }
    }

    #[test]
    fn rgb_blend_hits_middle_stop() {
        let g = Gradient::for_scheme(ColorScheme::Grayscale, GradientMode::Rgb);
        let mid = g.color_at(0.5);
        assert!(mid.r.abs_diff(0x88) <= 1);
        assert_eq!(mid.r, mid.g);
        assert_eq!(mid.g, mid.b);
    }

    #[test]
    fn grayscale_stays_gray_and_monotonic() {
        let g = Gradient::for_scheme(ColorScheme::Grayscale, GradientMode::Rgb);
        let mut prev = 0u8;
        for i in 0..=100 {
            let c = g.color_at(i as f32 / 100.0);
            assert!(c.r == c.g && c.g == c.b);
            assert!(c.r >= prev);
            prev = c.r;
        }
    }

    #[test]
    fn out_of_range_values_clamp() {
        let g = Gradient::for_scheme(ColorScheme::Inferno, GradientMode::Rgb);
        let stops = ColorScheme::Inferno.stops();
        assert_eq!(g.color_at(-3.0), stops[0].color);
        assert_eq!(g.color_at(7.0), stops[stops.len() - 1].color);
        assert_eq!(g.color_at(f32::NAN), stops[0].color);
    }

    #[test]
    fn single_stop_is_flat() {
        let g = Gradient::new(&[stop(0.0, 0xFF0000)], GradientMode::Hsl);
        assert_eq!(g.color_at(0.0), Color::new(255, 0, 0));
        assert_eq!(g.color_at(0.5), Color::new(255, 0, 0));
        assert_eq!(g.color_at(1.0), Color::new(255, 0, 0));
    }

    #[test]
    #[should_panic(expected = "at least one color stop")]
    fn empty_stops_panic() {
        Gradient::new(&[], GradientMode::Rgb);
    }

    #[test]
    fn two_stop_blend_is_halfway() {
        let stops = [stop(0.0, 0x000000), stop(1.0, 0xFFFFFF)];
        let g = Gradient::new(&stops, GradientMode::Rgb);
        let mid = g.color_at(0.5);
        assert!(mid.r.abs_diff(128) <= 1);
    }
}
