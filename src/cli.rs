use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

use specvis::{ChannelPolicy, ColorScheme, GradientMode, WindowType};

#[derive(Parser, Debug)]
#[command(name = "specvis", version, about = "Render a spectrogram image from an audio file")]
pub struct Cli {
    /// Input audio file (WAV, FLAC, MP3, OGG)
    pub input: PathBuf,

    /// Output PNG file [default: <INPUT>.png]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// FFT size, a power of two [default: 2048]
    #[arg(short = 'f', long)]
    pub fft_size: Option<usize>,

    /// Samples between consecutive frames [default: FFT size / 4]
    #[arg(long)]
    pub hop_length: Option<usize>,

    /// Window function [default: hann]
    #[arg(short = 'w', long, value_enum)]
    pub window_type: Option<CliWindowType>,

    /// Color scheme [default: oceanic]
    #[arg(short = 'c', long, value_enum)]
    pub color_scheme: Option<CliColorScheme>,

    /// Image size as WxH [default: 2048x512]
    #[arg(short = 'i', long, value_parser = parse_image_size)]
    pub image_size: Option<ImageSize>,

    /// Dynamic range below the peak, in dB [default: 110]
    #[arg(short = 'd', long)]
    pub dynamic_range: Option<f32>,

    /// Channel to analyse: "mix" or a zero-based index [default: mix]
    #[arg(long, value_parser = parse_channel)]
    pub channel: Option<ChannelPolicy>,

    /// Color blending between palette stops [default: rgb]
    #[arg(long, value_enum)]
    pub gradient: Option<CliGradient>,

    /// Config file (TOML). Falls back to ./specvis.toml or the user config dir
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CliWindowType {
    Hann,
    Hamming,
    Blackman,
    Rectangular,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CliColorScheme {
    Oceanic,
    Grayscale,
    Inferno,
    Viridis,
    Synthwave,
    Sunset,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CliGradient {
    Rgb,
    Hsl,
}

impl From<CliWindowType> for WindowType {
    fn from(w: CliWindowType) -> Self {
        match w {
            CliWindowType::Hann => WindowType::Hann,
            CliWindowType::Hamming => WindowType::Hamming,
            CliWindowType::Blackman => WindowType::Blackman,
            CliWindowType::Rectangular => WindowType::Rectangular,
        }
    }
}

impl From<CliColorScheme> for ColorScheme {
    fn from(c: CliColorScheme) -> Self {
        match c {
            CliColorScheme::Oceanic => ColorScheme::Oceanic,
            CliColorScheme::Grayscale => ColorScheme::Grayscale,
            CliColorScheme::Inferno => ColorScheme::Inferno,
            CliColorScheme::Viridis => ColorScheme::Viridis,
            CliColorScheme::Synthwave => ColorScheme::Synthwave,
            CliColorScheme::Sunset => ColorScheme::Sunset,
        }
    }
}

impl From<CliGradient> for GradientMode {
    fn from(g: CliGradient) -> Self {
        match g {
            CliGradient::Rgb => GradientMode::Rgb,
            CliGradient::Hsl => GradientMode::Hsl,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Parse `WxH`, e.g. `1024x768`. Both sides must be positive integers.
pub fn parse_image_size(s: &str) -> Result<ImageSize, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{}'", s))?;
    let parse = |part: &str| -> Result<u32, String> {
        match part.parse::<u32>() {
            Ok(0) => Err(format!("image dimensions must be positive, got '{}'", s)),
            Ok(v) => Ok(v),
            Err(_) => Err(format!("invalid image dimension '{}' in '{}'", part, s)),
        }
    };
    Ok(ImageSize {
        width: parse(w)?,
        height: parse(h)?,
    })
}

/// Parse `mix` or a zero-based channel index.
pub fn parse_channel(s: &str) -> Result<ChannelPolicy, String> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("mix") {
        return Ok(ChannelPolicy::Mixdown);
    }
    s.parse::<usize>()
        .map(ChannelPolicy::Select)
        .map_err(|_| format!("expected 'mix' or a channel index, got '{}'", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_size_parses_w_by_h() {
        assert_eq!(
            parse_image_size("1024x768"),
            Ok(ImageSize {
                width: 1024,
                height: 768
            })
        );
        assert_eq!(
            parse_image_size("100X50"),
            Ok(ImageSize {
                width: 100,
                height: 50
            })
        );
    }

    #[test]
    fn image_size_rejects_malformed_input() {
        for bad in ["", "1024", "abcxdef", "1024xabc", "0x0", "-1x-1", " 1024x768 ", "1x2x3"] {
            assert!(parse_image_size(bad).is_err(), "accepted '{}'", bad);
        }
    }

    #[test]
    fn channel_parses_mix_or_index() {
        assert_eq!(parse_channel("mix"), Ok(ChannelPolicy::Mixdown));
        assert_eq!(parse_channel("MIX"), Ok(ChannelPolicy::Mixdown));
        assert_eq!(parse_channel("1"), Ok(ChannelPolicy::Select(1)));
        assert!(parse_channel("left").is_err());
    }

    #[test]
    fn cli_enums_convert() {
        assert_eq!(WindowType::from(CliWindowType::Hamming), WindowType::Hamming);
        assert_eq!(ColorScheme::from(CliColorScheme::Sunset), ColorScheme::Sunset);
        assert_eq!(GradientMode::from(CliGradient::Hsl), GradientMode::Hsl);
    }

    #[test]
    fn cli_parses_short_flags() {
        let cli = Cli::try_parse_from([
            "specvis", "song.wav", "-f", "4096", "-w", "hamming", "-c", "viridis", "-i",
            "800x200", "-d", "90",
        ])
        .unwrap();
        assert_eq!(cli.fft_size, Some(4096));
        assert_eq!(cli.window_type, Some(CliWindowType::Hamming));
        assert_eq!(cli.color_scheme, Some(CliColorScheme::Viridis));
        assert_eq!(
            cli.image_size,
            Some(ImageSize {
                width: 800,
                height: 200
            })
        );
        assert_eq!(cli.dynamic_range, Some(90.0));
        assert!(cli.output.is_none());
    }

    #[test]
    fn cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
