//! Unit conversions between the three time domains: the domain model counts
//! milliseconds, the timeline widget counts seconds, the render engine counts
//! microseconds.

pub const MS_PER_SEC: f64 = 1000.0;
pub const MICROS_PER_MS: u64 = 1_000;
pub const MICROS_PER_SEC: f64 = 1_000_000.0;

pub fn ms_to_secs(ms: u64) -> f64 {
    ms as f64 / MS_PER_SEC
}

pub fn secs_to_ms(secs: f64) -> u64 {
    (secs * MS_PER_SEC).round().max(0.0) as u64
}

pub fn ms_to_micros(ms: u64) -> u64 {
    ms * MICROS_PER_MS
}

pub fn micros_to_ms(micros: u64) -> u64 {
    (micros + MICROS_PER_MS / 2) / MICROS_PER_MS
}

pub fn secs_to_micros(secs: f64) -> u64 {
    (secs * MICROS_PER_SEC).round().max(0.0) as u64
}

pub fn micros_to_secs(micros: u64) -> f64 {
    micros as f64 / MICROS_PER_SEC
}

/// Rounds a time to the nearest multiple of the grid interval.
pub fn snap_to_grid(ms: u64, grid_ms: u64) -> u64 {
    if grid_ms == 0 {
        return ms;
    }
    ((ms as f64 / grid_ms as f64).round() as u64) * grid_ms
}

pub fn pixels_to_ms(pixels: f64, pixels_per_second: f64) -> u64 {
    if pixels_per_second <= 0.0 {
        return 0;
    }
    secs_to_ms(pixels / pixels_per_second)
}

pub fn ms_to_pixels(ms: u64, pixels_per_second: f64) -> f64 {
    ms_to_secs(ms) * pixels_per_second
}
