//! Hit sounds. The tone shapes are plain data so they can be checked
//! natively; the Web Audio player lives in `web::audio`.

use crate::target::TargetKind;

/// Played on every target hit. Implementations must never fail outward:
/// missing or blocked audio is a silent no-op.
pub trait SoundEmitter {
    fn play(&mut self, kind: TargetKind);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

/// A short pitch sweep with an attack/decay envelope.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneSpec {
    pub waveform: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    pub peak_gain: f32,
    pub attack_secs: f64,
    pub duration_secs: f64,
}

impl ToneSpec {
    /// Good hits chirp upward and bright, bad hits thud downward.
    pub fn for_kind(kind: TargetKind) -> Self {
        match kind {
            TargetKind::Good => Self {
                waveform: Waveform::Sine,
                start_hz: 880.0,
                end_hz: 1_320.0,
                peak_gain: 0.25,
                attack_secs: 0.005,
                duration_secs: 0.12,
            },
            TargetKind::Bad => Self {
                waveform: Waveform::Triangle,
                start_hz: 220.0,
                end_hz: 110.0,
                peak_gain: 0.3,
                attack_secs: 0.01,
                duration_secs: 0.2,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn good_is_higher_and_shorter_than_bad() {
        let good = ToneSpec::for_kind(TargetKind::Good);
        let bad = ToneSpec::for_kind(TargetKind::Bad);
        assert!(good.start_hz > bad.start_hz);
        assert!(good.end_hz > good.start_hz);
        assert!(bad.end_hz < bad.start_hz);
        assert!(good.duration_secs < bad.duration_secs);
    }

    #[test]
    fn envelopes_are_well_formed() {
        for kind in [TargetKind::Good, TargetKind::Bad] {
            let t = ToneSpec::for_kind(kind);
            assert!(t.attack_secs > 0.0 && t.attack_secs < t.duration_secs);
            assert!(t.peak_gain > 0.0 && t.peak_gain <= 1.0);
        }
    }
}
