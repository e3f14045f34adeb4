/// Biquad filter classes understood by the exporter. The game itself only
/// ever produces peaking filters; the rest exist so exported presets can
/// describe a full EqualizerAPO chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Peaking,
    Lowpass,
    Highpass,
    Lowshelf,
    Highshelf,
    Notch,
    Allpass,
    Bandpass,
}

/// Immutable description of one filter. Equality is exact numeric equality
/// over all four fields: every frequency and Q in the application is derived
/// from the same band formulas on both sides of a comparison, so two
/// descriptors for the same band are bit-identical. Never compare with an
/// epsilon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Filter {
    pub kind: FilterKind,
    pub frequency: f32,
    pub gain: f32,
    pub q: f32,
}

impl Filter {
    pub fn peaking(frequency: f32, gain: f32, q: f32) -> Self {
        Self {
            kind: FilterKind::Peaking,
            frequency,
            gain,
            q,
        }
    }
}
