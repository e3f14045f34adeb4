//! EqualizerAPO-style text export of a filter list.

use crate::filter::{Filter, FilterKind};

fn type_code(kind: FilterKind) -> &'static str {
    match kind {
        FilterKind::Peaking => "PK",
        FilterKind::Lowpass => "LP",
        FilterKind::Highpass => "HP",
        FilterKind::Lowshelf => "LS",
        FilterKind::Highshelf => "HS",
        FilterKind::Notch => "NO",
        FilterKind::Allpass => "AP",
        FilterKind::Bandpass => "BP",
    }
}

pub fn export_filters_apo(filters: &[Filter], preamp: f32) -> String {
    let mut lines = vec![format!("Preamp: {} db", format_one(preamp))];

    for (i, filter) in filters.iter().enumerate() {
        lines.push(format!(
            "Filter {}: ON {} Fc {} Hz Gain {} dB Q {}",
            i + 1,
            type_code(filter.kind),
            format_freq(filter.frequency),
            format_one(filter.gain),
            format_one(filter.q),
        ));
    }

    lines.join("\n")
}

/// One decimal place, trailing zeros trimmed: `2.0` -> `2`, `1.5` -> `1.5`.
fn format_one(n: f32) -> String {
    trim_zeros(format!("{:.1}", n))
}

fn format_freq(n: f32) -> String {
    let rounded = n.round();
    if (n - rounded).abs() < 1e-6 {
        format!("{}", rounded as i64)
    } else {
        trim_zeros(format!("{:.1}", n))
    }
}

fn trim_zeros(s: String) -> String {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_single_peaking_filter() {
        let filters = [Filter::peaking(1000.0, 2.0, 1.0)];
        let text = export_filters_apo(&filters, 0.0);
        assert_eq!(
            text,
            "Preamp: 0 db\nFilter 1: ON PK Fc 1000 Hz Gain 2 dB Q 1"
        );
    }

    #[test]
    fn test_export_numbers_are_trimmed() {
        let filters = [
            Filter::peaking(3000.0, -3.0, 5.0),
            Filter::peaking(640.5, 2.5, 1.2),
        ];
        let text = export_filters_apo(&filters, -1.5);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Preamp: -1.5 db");
        assert_eq!(lines[1], "Filter 1: ON PK Fc 3000 Hz Gain -3 dB Q 5");
        assert_eq!(lines[2], "Filter 2: ON PK Fc 640.5 Hz Gain 2.5 dB Q 1.2");
    }

    #[test]
    fn test_export_type_codes() {
        let kinds = [
            (FilterKind::Peaking, "PK"),
            (FilterKind::Lowpass, "LP"),
            (FilterKind::Highpass, "HP"),
            (FilterKind::Lowshelf, "LS"),
            (FilterKind::Highshelf, "HS"),
            (FilterKind::Notch, "NO"),
            (FilterKind::Allpass, "AP"),
            (FilterKind::Bandpass, "BP"),
        ];
        for (kind, code) in kinds {
            let filter = Filter {
                kind,
                frequency: 100.0,
                gain: 0.0,
                q: 1.0,
            };
            let text = export_filters_apo(&[filter], 0.0);
            assert!(text.contains(&format!("ON {} Fc", code)), "{}", text);
        }
    }

    #[test]
    fn test_export_empty_list_is_just_the_preamp() {
        assert_eq!(export_filters_apo(&[], 0.0), "Preamp: 0 db");
    }
}
