//! Session-wide tuning knobs. Difficulty-specific cadence lives in
//! [`crate::difficulty`]; everything here is shared by every difficulty.

/// Game-wide configuration. All durations are milliseconds unless the field
/// name says otherwise.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Length of one session in whole seconds.
    pub duration_secs: u32,
    /// Cadence of the countdown tick.
    pub countdown_tick_ms: u32,
    /// Edge length of a (square) target in CSS pixels.
    pub target_size: f64,
    /// How long a milestone banner stays up before hiding itself.
    pub banner_display_ms: u32,
    pub good_points: i64,
    pub bad_penalty: i64,
}

pub const DEFAULT_DURATION_SECS: u32 = 30;
pub const DEFAULT_COUNTDOWN_TICK_MS: u32 = 100;
pub const DEFAULT_TARGET_SIZE: f64 = 60.0;
pub const DEFAULT_BANNER_DISPLAY_MS: u32 = 2_000;

/// Longest delay a browser timer accepts.
pub const MAX_TIMER_MS: u32 = i32::MAX as u32;
/// Countdown ticks faster than this only burn CPU.
pub const MIN_COUNTDOWN_TICK_MS: u32 = 10;
/// Cap on per-hit points so score arithmetic never comes near overflow.
pub const MAX_POINTS: i64 = 1_000_000;

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            countdown_tick_ms: DEFAULT_COUNTDOWN_TICK_MS,
            target_size: DEFAULT_TARGET_SIZE,
            banner_display_ms: DEFAULT_BANNER_DISPLAY_MS,
            good_points: 1,
            bad_penalty: 2,
        }
    }
}

impl GameConfig {
    /// Score change for hitting a target of the given kind.
    pub fn score_delta(&self, kind: crate::target::TargetKind) -> i64 {
        match kind {
            crate::target::TargetKind::Good => self.good_points,
            crate::target::TargetKind::Bad => self.bad_penalty.saturating_neg(),
        }
    }

    /// Pull every field back into a playable range: at least one second of
    /// play, timer delays the browser accepts, a finite positive target size
    /// and non-negative points no larger than [`MAX_POINTS`].
    pub fn sanitized(self) -> Self {
        let target_size = if self.target_size.is_finite() && self.target_size > 0.0 {
            self.target_size
        } else {
            DEFAULT_TARGET_SIZE
        };
        Self {
            duration_secs: self.duration_secs.max(1),
            countdown_tick_ms: self.countdown_tick_ms.clamp(MIN_COUNTDOWN_TICK_MS, MAX_TIMER_MS),
            target_size,
            banner_display_ms: self.banner_display_ms.min(MAX_TIMER_MS),
            good_points: self.good_points.clamp(0, MAX_POINTS),
            bad_penalty: self.bad_penalty.clamp(0, MAX_POINTS),
        }
    }

    /// Parse a (possibly partial) JSON config; missing fields keep their
    /// defaults and out-of-range values are clamped by [`Self::sanitized`].
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }
}
