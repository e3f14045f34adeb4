//! Peaking biquad cascade used for actual playback filtering. The response
//! curve on screen is a separate, additive visualization; this is the real
//! series filter chain applied to samples.

use crate::filter::{Filter, FilterKind};
use std::f32::consts::PI;

pub struct ParametricEq {
    sample_rate: u32,
    bands: Vec<Band>,
}

impl ParametricEq {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            bands: Vec::new(),
        }
    }

    /// Build a cascade from filter descriptors. Only peaking filters are
    /// realized; other kinds exist solely for export.
    pub fn from_filters(sample_rate: u32, filters: &[Filter]) -> Self {
        let mut eq = Self::new(sample_rate);
        for filter in filters {
            if filter.kind == FilterKind::Peaking {
                eq.add_band(filter.frequency, filter.q, filter.gain);
            }
        }
        eq
    }

    pub fn add_band(&mut self, frequency: f32, q: f32, gain_db: f32) {
        self.bands
            .push(Band::new(frequency, q, gain_db, self.sample_rate));
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    /// Process an interleaved stereo buffer in-place.
    pub fn process_buffer(&mut self, buffer: &mut [f32]) {
        for frame in buffer.chunks_exact_mut(2) {
            for band in &mut self.bands {
                frame[0] = band.left.process(&band.coeffs, frame[0]);
                frame[1] = band.right.process(&band.coeffs, frame[1]);
            }
        }
    }
}

/// RBJ peaking-EQ coefficients, normalized by a0.
struct Coeffs {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
}

#[derive(Default)]
struct ChannelState {
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl ChannelState {
    fn process(&mut self, c: &Coeffs, x: f32) -> f32 {
        let y = c.b0 * x + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;
        y
    }
}

struct Band {
    coeffs: Coeffs,
    left: ChannelState,
    right: ChannelState,
}

impl Band {
    fn new(frequency: f32, q: f32, gain_db: f32, sample_rate: u32) -> Self {
        let omega = 2.0 * PI * frequency / sample_rate as f32;
        let sn = omega.sin();
        let cs = omega.cos();
        let alpha = sn / (2.0 * q);
        let a = 10f32.powf(gain_db / 40.0);

        let a0 = 1.0 + alpha / a;
        let norm = 1.0 / a0;

        Self {
            coeffs: Coeffs {
                b0: (1.0 + alpha * a) * norm,
                b1: (-2.0 * cs) * norm,
                b2: (1.0 - alpha * a) * norm,
                a1: (-2.0 * cs) * norm,
                a2: (1.0 - alpha / a) * norm,
            },
            left: ChannelState::default(),
            right: ChannelState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn sine_stereo(freq: f32, sample_rate: u32, frames: usize) -> Vec<f32> {
        (0..frames)
            .flat_map(|i| {
                let s = (TAU * freq * i as f32 / sample_rate as f32).sin();
                [s, s]
            })
            .collect()
    }

    fn rms(buffer: &[f32]) -> f32 {
        (buffer.iter().map(|s| s * s).sum::<f32>() / buffer.len() as f32).sqrt()
    }

    #[test]
    fn test_zero_gain_band_is_transparent() {
        let mut eq = ParametricEq::new(44100);
        eq.add_band(1000.0, 1.0, 0.0);

        let dry = sine_stereo(440.0, 44100, 4410);
        let mut wet = dry.clone();
        eq.process_buffer(&mut wet);

        for (d, w) in dry.iter().zip(&wet) {
            assert!((d - w).abs() < 1e-4);
        }
    }

    #[test]
    fn test_boost_raises_level_at_center() {
        let mut eq = ParametricEq::new(44100);
        eq.add_band(1000.0, 1.0, 6.0);

        let dry = sine_stereo(1000.0, 44100, 44100);
        let mut wet = dry.clone();
        eq.process_buffer(&mut wet);

        // +6 dB is a factor of ~2 in amplitude
        let ratio = rms(&wet[8820..]) / rms(&dry[8820..]);
        assert!(ratio > 1.8 && ratio < 2.2, "ratio {}", ratio);
    }

    #[test]
    fn test_cut_lowers_level_at_center() {
        let mut eq = ParametricEq::new(44100);
        eq.add_band(1000.0, 1.0, -6.0);

        let dry = sine_stereo(1000.0, 44100, 44100);
        let mut wet = dry.clone();
        eq.process_buffer(&mut wet);

        let ratio = rms(&wet[8820..]) / rms(&dry[8820..]);
        assert!(ratio > 0.45 && ratio < 0.55, "ratio {}", ratio);
    }

    #[test]
    fn test_from_filters_skips_non_peaking() {
        let mut lowpass = Filter::peaking(500.0, 3.0, 1.0);
        lowpass.kind = FilterKind::Lowpass;
        let filters = [Filter::peaking(1000.0, 4.0, 1.0), lowpass];

        let eq = ParametricEq::from_filters(44100, &filters);
        assert_eq!(eq.band_count(), 1);
    }
}
