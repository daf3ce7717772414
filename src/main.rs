mod cli;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

use cli::Cli;
use specvis::encode::png::write_png;
use specvis::format::{format_duration, format_samples};
use specvis::{analyze_with_progress, render, SampleSource, SymphoniaSource};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    // Explicit --config must load; an auto-detected one only warns
    let file_config = match config::find_config_path(cli.config.as_deref()) {
        Some(path) => match config::load_config(&path) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path.display());
                cfg
            }
            Err(err) if cli.config.is_some() => return Err(err),
            Err(err) => {
                log::warn!("Ignoring config {}: {:#}", path.display(), err);
                config::Config::default()
            }
        },
        None => config::Config::default(),
    };

    let settings = config::resolve(&cli, &file_config)?;
    settings.analysis.validate().context("Invalid analysis settings")?;
    settings.render.validate().context("Invalid render settings")?;

    if !cli.input.exists() {
        anyhow::bail!("Input file not found: {}", cli.input.display());
    }

    log::info!("specvis - spectrogram renderer");
    log::info!("Input: {}", cli.input.display());
    log::info!("Output: {}", settings.output.display());
    log::info!(
        "STFT: fft_size={}, hop={}, window={:?}, channel={:?}",
        settings.analysis.fft_size,
        settings.analysis.hop_size,
        settings.analysis.window,
        settings.analysis.channel_policy
    );
    log::info!(
        "Image: {}x{}, {:?} ({:?}), {} dB",
        settings.render.width,
        settings.render.height,
        settings.render.color_scheme,
        settings.render.gradient_mode,
        settings.render.dynamic_range_db
    );

    // 1. Decode and analyse
    let source = SymphoniaSource::open(&cli.input)
        .with_context(|| format!("Failed to open {}", cli.input.display()))?;
    log::info!("Audio: {}", source.metadata().to_pretty_string());

    let pb = progress_bar(source.spec().total_frames, cli.no_progress)?;
    let start = Instant::now();
    let mut samples = 0;
    let spectrogram = analyze_with_progress(source, &settings.analysis, |p| {
        samples = p.samples_processed;
        pb.set_position(p.samples_processed);
    })
    .context("Spectral analysis failed")?;
    pb.finish_and_clear();
    log::info!(
        "Calculated {} frames x {} bins from {} ({}) in {}",
        spectrogram.frame_count(),
        spectrogram.bin_count(),
        format_samples(samples),
        format_duration(spectrogram.duration()),
        format_duration(start.elapsed().as_secs_f64())
    );

    // 2. Render
    let start = Instant::now();
    let grid = render(&spectrogram, &settings.render).context("Rendering failed")?;
    log::info!(
        "Rendered {}x{} image in {}",
        grid.width(),
        grid.height(),
        format_duration(start.elapsed().as_secs_f64())
    );

    // 3. Encode
    let start = Instant::now();
    write_png(grid, &settings.output)?;
    log::info!("Saved in {}", format_duration(start.elapsed().as_secs_f64()));
    log::info!("Done! Output: {}", settings.output.display());
    Ok(())
}

fn progress_bar(total: Option<u64>, hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let pb = match total {
        Some(total) => {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} samples ({eta} remaining)")?
                    .progress_chars("=>-"),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {pos} samples")?,
            );
            pb
        }
    };
    Ok(pb)
}
