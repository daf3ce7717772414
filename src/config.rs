use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::{parse_channel, Cli, CliColorScheme, CliGradient, CliWindowType};
use specvis::{AnalysisConfig, RenderConfig};

pub const DEFAULT_FFT_SIZE: usize = 2048;
pub const DEFAULT_WIDTH: u32 = 2048;
pub const DEFAULT_HEIGHT: u32 = 512;
pub const DEFAULT_DYNAMIC_RANGE: f32 = 110.0;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisSection,
    #[serde(default)]
    pub render: RenderSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisSection {
    pub fft_size: Option<usize>,
    pub hop_size: Option<usize>,
    pub window: Option<CliWindowType>,
    /// "mix" or a zero-based channel index
    pub channel: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderSection {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub color_scheme: Option<CliColorScheme>,
    pub dynamic_range: Option<f32>,
    pub gradient: Option<CliGradient>,
}

/// Effective settings after merging CLI flags, config file and defaults.
#[derive(Debug)]
pub struct Settings {
    pub analysis: AnalysisConfig,
    pub render: RenderConfig,
    pub output: PathBuf,
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Explicit path, else `./specvis.toml`, else `~/.config/specvis/config.toml`,
/// else the platform config dir.
pub fn find_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from("specvis.toml");
    if local.exists() {
        return Some(local);
    }
    if let Some(home) = dirs::home_dir() {
        let xdg = home.join(".config").join("specvis").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        let platform = config_dir.join("specvis").join("config.toml");
        if platform.exists() {
            return Some(platform);
        }
    }
    None
}

/// CLI flag wins over the config file, which wins over the built-in default.
pub fn resolve(cli: &Cli, file: &Config) -> Result<Settings> {
    let fft_size = cli
        .fft_size
        .or(file.analysis.fft_size)
        .unwrap_or(DEFAULT_FFT_SIZE);

    let mut analysis = AnalysisConfig::new(fft_size);
    if let Some(hop) = cli.hop_length.or(file.analysis.hop_size) {
        analysis = analysis.with_hop_size(hop);
    }
    if let Some(window) = cli.window_type.or(file.analysis.window) {
        analysis = analysis.with_window(window.into());
    }
    let channel = match (cli.channel, file.analysis.channel.as_deref()) {
        (Some(policy), _) => Some(policy),
        (None, Some(s)) => Some(
            parse_channel(s).map_err(|e| anyhow::anyhow!("Invalid [analysis] channel: {}", e))?,
        ),
        (None, None) => None,
    };
    if let Some(policy) = channel {
        analysis = analysis.with_channel_policy(policy);
    }

    let width = cli
        .image_size
        .map(|s| s.width)
        .or(file.render.width)
        .unwrap_or(DEFAULT_WIDTH);
    let height = cli
        .image_size
        .map(|s| s.height)
        .or(file.render.height)
        .unwrap_or(DEFAULT_HEIGHT);

    let mut render = RenderConfig::new(width, height).with_dynamic_range(
        cli.dynamic_range
            .or(file.render.dynamic_range)
            .unwrap_or(DEFAULT_DYNAMIC_RANGE),
    );
    if let Some(scheme) = cli.color_scheme.or(file.render.color_scheme) {
        render = render.with_color_scheme(scheme.into());
    }
    if let Some(mode) = cli.gradient.or(file.render.gradient) {
        render = render.with_gradient_mode(mode.into());
    }

    let output = cli.output.clone().unwrap_or_else(|| {
        let mut name = cli.input.as_os_str().to_owned();
        name.push(".png");
        PathBuf::from(name)
    });

    Ok(Settings {
        analysis,
        render,
        output,
    })
}
