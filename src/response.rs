//! Combined frequency response of a set of peaking filters, sampled into a
//! polyline plus grid lines for the graph to stroke.

use crate::eq::{self, EqError};
use crate::filter::{Filter, FilterKind};
use std::f32::consts::PI;

/// Graph geometry shared by the curve renderer and the region layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub width: f32,
    pub height: f32,
    pub min_freq: f32,
    pub max_freq: f32,
    pub bands: usize,
    pub min_db: f32,
    pub max_db: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub pos: f32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLines {
    pub verticals: Vec<GridLine>,
    pub horizontals: Vec<GridLine>,
    pub zero_db_y: f32,
}

/// Sum of each peaking filter's response in dB at `frequency`. Filters are
/// summed independently, not cascaded; at a filter's own center frequency
/// the value is `gain / 2` dB. This matches the analog-prototype
/// visualization formula, which scales only the numerator by `A²`.
pub fn combined_response_db(filters: &[Filter], frequency: f32) -> f32 {
    let mut total_db = 0.0;

    for filter in filters {
        if filter.kind != FilterKind::Peaking {
            continue;
        }

        let w = 2.0 * PI * frequency;
        let w0 = 2.0 * PI * filter.frequency;
        let a = 10f32.powf(filter.gain / 40.0);

        let detune = (w * w - w0 * w0).powi(2);
        let band = (w * w0 / filter.q).powi(2);

        total_db += 10.0 * ((detune + band * a * a) / (detune + band)).log10();
    }

    total_db
}

/// One curve point per integer pixel column in `[0, width)`.
pub fn sample_curve(filters: &[Filter], geo: &Geometry) -> Vec<CurvePoint> {
    (0..geo.width as usize)
        .map(|px| {
            let x = px as f32;
            let freq = eq::x_to_freq(x, geo.width, geo.min_freq, geo.max_freq);
            let response = combined_response_db(filters, freq);
            CurvePoint {
                x,
                y: eq::db_to_y(response, geo.height, geo.min_db, geo.max_db),
            }
        })
        .collect()
}

/// Verticals at every band edge, horizontals every 3 dB inclusive, plus the
/// distinguished 0 dB line.
pub fn grid_lines(geo: &Geometry) -> Result<GridLines, EqError> {
    let edges = eq::generate_bands(geo.min_freq, geo.max_freq, geo.bands)?;

    let verticals = edges
        .iter()
        .map(|&freq| GridLine {
            pos: eq::freq_to_x(freq, geo.width, geo.min_freq, geo.max_freq),
            label: freq_label(freq),
        })
        .collect();

    let mut horizontals = Vec::new();
    let mut db = geo.min_db;
    while db <= geo.max_db {
        horizontals.push(GridLine {
            pos: eq::db_to_y(db, geo.height, geo.min_db, geo.max_db),
            label: format!("{}", db as i32),
        });
        db += 3.0;
    }

    Ok(GridLines {
        verticals,
        horizontals,
        zero_db_y: eq::db_to_y(0.0, geo.height, geo.min_db, geo.max_db),
    })
}

/// `20` stays `20`, `2629` becomes `2.63k`.
pub fn freq_label(freq: f32) -> String {
    if freq >= 1000.0 {
        format!("{}k", (freq / 1000.0 * 100.0).round() / 100.0)
    } else {
        format!("{}", freq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_geometry() -> Geometry {
        Geometry {
            width: 1280.0,
            height: 800.0,
            min_freq: 20.0,
            max_freq: 20480.0,
            bands: 4,
            min_db: -12.0,
            max_db: 12.0,
        }
    }

    #[test]
    fn test_empty_filter_list_is_flat() {
        for freq in [20.0, 440.0, 20480.0] {
            assert_eq!(combined_response_db(&[], freq), 0.0);
        }
    }

    #[test]
    fn test_peak_response_at_center() {
        // A enters the numerator only, so the drawn peak sits at gain / 2.
        let filter = Filter::peaking(1000.0, 6.0, 1.0);
        let response = combined_response_db(&[filter], 1000.0);
        assert_relative_eq!(response, 3.0, max_relative = 1e-4);

        let cut = Filter::peaking(1000.0, -6.0, 1.0);
        assert_relative_eq!(
            combined_response_db(&[cut], 1000.0),
            -3.0,
            max_relative = 1e-4
        );
    }

    #[test]
    fn test_response_decays_away_from_center() {
        let filter = Filter::peaking(1000.0, 6.0, 1.0);
        let at_center = combined_response_db(&[filter], 1000.0);
        let far_below = combined_response_db(&[filter], 30.0);
        let far_above = combined_response_db(&[filter], 18000.0);
        assert!(far_below < at_center / 4.0);
        assert!(far_above < at_center / 4.0);
    }

    #[test]
    fn test_responses_sum_additively() {
        let a = Filter::peaking(500.0, 4.0, 1.0);
        let b = Filter::peaking(2000.0, -5.0, 1.0);
        let combined = combined_response_db(&[a, b], 1000.0);
        let sum = combined_response_db(&[a], 1000.0) + combined_response_db(&[b], 1000.0);
        assert_relative_eq!(combined, sum, max_relative = 1e-5);
    }

    #[test]
    fn test_non_peaking_filters_are_ignored() {
        let mut filter = Filter::peaking(1000.0, 6.0, 1.0);
        filter.kind = FilterKind::Lowpass;
        assert_eq!(combined_response_db(&[filter], 1000.0), 0.0);
    }

    #[test]
    fn test_sample_curve_covers_every_column() {
        let geo = test_geometry();
        let curve = sample_curve(&[], &geo);
        assert_eq!(curve.len(), 1280);
        assert_eq!(curve[0].x, 0.0);
        assert_eq!(curve.last().unwrap().x, 1279.0);
        // no filters: flat line at 0 dB, mid-height
        for point in &curve {
            assert_relative_eq!(point.y, 400.0, max_relative = 1e-4);
        }
    }

    #[test]
    fn test_grid_lines_layout() {
        let geo = test_geometry();
        let grid = grid_lines(&geo).unwrap();

        assert_eq!(grid.verticals.len(), 4);
        assert_relative_eq!(grid.verticals[0].pos, 0.0);
        assert_relative_eq!(grid.verticals[3].pos, 1280.0, max_relative = 1e-4);

        // -12..=12 every 3 dB
        assert_eq!(grid.horizontals.len(), 9);
        assert_eq!(grid.horizontals[0].label, "-12");
        assert_eq!(grid.horizontals[8].label, "12");
        assert_eq!(grid.zero_db_y, 400.0);
    }

    #[test]
    fn test_grid_lines_propagates_band_error() {
        let mut geo = test_geometry();
        geo.bands = 1;
        assert!(grid_lines(&geo).is_err());
    }

    #[test]
    fn test_freq_labels() {
        assert_eq!(freq_label(20.0), "20");
        assert_eq!(freq_label(229.0), "229");
        assert_eq!(freq_label(1000.0), "1k");
        assert_eq!(freq_label(2629.0), "2.63k");
        assert_eq!(freq_label(20480.0), "20.48k");
    }
}
