mod common;

use assert_cmd::cargo::cargo_bin_cmd;

#[test]
fn writes_png_of_requested_size() {
    let dir = tempfile::tempdir().unwrap();
    let wav = common::sine_wav(dir.path(), "tone.wav", 440.0, 0.5, 22050);
    let out = dir.path().join("out.png");

    cargo_bin_cmd!("specvis")
        .current_dir(dir.path())
        .args([wav.to_str().unwrap(), "-i", "120x40", "-c", "viridis", "--no-progress", "-o"])
        .arg(&out)
        .assert()
        .success();

    let image = image::open(&out).unwrap();
    assert_eq!((image.width(), image.height()), (120, 40));
    assert!(!dir.path().join("out.png.part").exists());
}

#[test]
fn output_defaults_next_to_input() {
    let dir = tempfile::tempdir().unwrap();
    let wav = common::sine_wav(dir.path(), "tone.wav", 1000.0, 0.25, 8000);

    cargo_bin_cmd!("specvis")
        .current_dir(dir.path())
        .args([wav.to_str().unwrap(), "-i", "32x16", "-f", "256", "--no-progress"])
        .assert()
        .success();

    let image = image::open(dir.path().join("tone.wav.png")).unwrap();
    assert_eq!((image.width(), image.height()), (32, 16));
}

#[test]
fn config_file_supplies_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let wav = common::sine_wav(dir.path(), "tone.wav", 440.0, 0.25, 8000);
    std::fs::write(
        dir.path().join("specvis.toml"),
        "[analysis]\nfft_size = 512\n\n[render]\nwidth = 64\nheight = 24\ncolor_scheme = \"sunset\"\n",
    )
    .unwrap();
    let out = dir.path().join("cfg.png");

    cargo_bin_cmd!("specvis")
        .current_dir(dir.path())
        .args([wav.to_str().unwrap(), "--no-progress", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicates::str::contains("Loaded config from specvis.toml"));

    let image = image::open(&out).unwrap();
    assert_eq!((image.width(), image.height()), (64, 24));
}

#[test]
fn explicit_config_must_parse() {
    let dir = tempfile::tempdir().unwrap();
    let wav = common::sine_wav(dir.path(), "tone.wav", 440.0, 0.25, 8000);
    let cfg = dir.path().join("broken.toml");
    std::fs::write(&cfg, "[render]\nwidth = \"wide\"\n").unwrap();

    cargo_bin_cmd!("specvis")
        .current_dir(dir.path())
        .args([wav.to_str().unwrap(), "--config"])
        .arg(&cfg)
        .assert()
        .failure()
        .stderr(predicates::str::contains("Invalid config file"));
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("specvis")
        .current_dir(dir.path())
        .args(["nope.wav", "--no-progress"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Input file not found"));

    assert!(!dir.path().join("nope.wav.png").exists());
}

#[test]
fn malformed_image_size_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let wav = common::sine_wav(dir.path(), "tone.wav", 440.0, 0.25, 8000);

    cargo_bin_cmd!("specvis")
        .current_dir(dir.path())
        .args([wav.to_str().unwrap(), "-i", "100by50"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("expected WxH"));

    assert!(!dir.path().join("tone.wav.png").exists());
}

#[test]
fn unsupported_fft_size_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let wav = common::sine_wav(dir.path(), "tone.wav", 440.0, 0.25, 8000);

    cargo_bin_cmd!("specvis")
        .current_dir(dir.path())
        .args([wav.to_str().unwrap(), "-f", "1000", "--no-progress"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("unsupported FFT size 1000"));

    assert!(!dir.path().join("tone.wav.png").exists());
}

#[test]
fn channel_out_of_range_fails() {
    let dir = tempfile::tempdir().unwrap();
    let wav = common::sine_wav(dir.path(), "tone.wav", 440.0, 0.25, 8000);

    cargo_bin_cmd!("specvis")
        .current_dir(dir.path())
        .args([wav.to_str().unwrap(), "--channel", "3", "--no-progress"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("channel 3 requested"));
}
