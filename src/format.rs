//! Human readable durations and sample counts for log output.

/// Format a duration in seconds: `123ms`, `1.5s`, `2:05.75m`, `1:01:01.5h`.
///
/// Values are rounded to whole milliseconds; trailing zeros of the fractional
/// second are dropped.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 0.0 {
        return format!("-{}", format_duration(-seconds));
    }

    let total_ms = (seconds * 1000.0).round() as u64;
    if total_ms < 1000 {
        return format!("{}ms", total_ms);
    }

    let ms = total_ms % 60_000;
    if total_ms < 60_000 {
        return format!("{}s", seconds_part(ms, false));
    }

    let total_minutes = total_ms / 60_000;
    if total_minutes < 60 {
        return format!("{}:{}m", total_minutes, seconds_part(ms, true));
    }

    format!(
        "{}:{:02}:{}h",
        total_minutes / 60,
        total_minutes % 60,
        seconds_part(ms, true)
    )
}

fn seconds_part(ms: u64, pad: bool) -> String {
    let mut out = if pad {
        format!("{:02}", ms / 1000)
    } else {
        (ms / 1000).to_string()
    };
    let frac = ms % 1000;
    if frac > 0 {
        let digits = format!("{:03}", frac);
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

/// Format a sample count with a metric suffix: `999spl`, `12.3kspl`, `1.5Mspl`.
pub fn format_samples(samples: u64) -> String {
    const UNITS: [&str; 4] = ["k", "M", "G", "T"];

    if samples < 1000 {
        return format!("{}spl", samples);
    }

    // Pick the unit from the rounded value so 999_999 reads 1.0M, not 1000.0k
    let mut value = samples as f64 / 1000.0;
    let mut unit = 0;
    while unit + 1 < UNITS.len() && (value * 10.0).round() >= 10_000.0 {
        value /= 1000.0;
        unit += 1;
    }

    format!("{:.1}{}spl", value, UNITS[unit])
}
