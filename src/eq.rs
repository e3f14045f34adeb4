//! Band math shared by the curve renderer, the region layout and the target
//! generator: geometric band edges, log-frequency/pixel mapping and dB/pixel
//! mapping.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EqError {
    #[error("band count must be at least 2, got {0}")]
    InvalidBandCount(usize),
}

/// Geometrically spaced band edges from `min_freq` to `max_freq` inclusive,
/// rounded to the nearest integer Hz. Adjacent edges can collapse to the same
/// value for extreme inputs near `min_freq`; such a band simply has zero
/// on-screen width.
pub fn generate_bands(min_freq: f32, max_freq: f32, bands: usize) -> Result<Vec<f32>, EqError> {
    if bands < 2 {
        return Err(EqError::InvalidBandCount(bands));
    }

    let ratio = max_freq / min_freq;
    let multiplier = ratio.powf(1.0 / (bands - 1) as f32);

    Ok((0..bands)
        .map(|i| (min_freq * multiplier.powi(i as i32)).round())
        .collect())
}

/// Horizontal pixel position of `freq` on a log-frequency axis.
/// `min_freq` maps to 0 and `max_freq` to `width`.
pub fn freq_to_x(freq: f32, width: f32, min_freq: f32, max_freq: f32) -> f32 {
    width * (freq.log10() - min_freq.log10()) / (max_freq.log10() - min_freq.log10())
}

/// Inverse of [`freq_to_x`].
pub fn x_to_freq(x: f32, width: f32, min_freq: f32, max_freq: f32) -> f32 {
    10f32.powf(min_freq.log10() + (x / width) * (max_freq.log10() - min_freq.log10()))
}

/// Vertical pixel position of `db` on a linear dB axis.
/// `min_db` maps to the bottom (`height`) and `max_db` to the top (0).
pub fn db_to_y(db: f32, height: f32, min_db: f32, max_db: f32) -> f32 {
    height * (1.0 - (db - min_db) / (max_db - min_db))
}

/// Geometric mean of a band's edges.
pub fn center_freq(freq_low: f32, freq_high: f32) -> f32 {
    (freq_low * freq_high).sqrt()
}

/// Q whose half-power bandwidth approximates the band width.
pub fn band_q(freq_low: f32, freq_high: f32) -> f32 {
    center_freq(freq_low, freq_high) / (freq_high - freq_low)
}
