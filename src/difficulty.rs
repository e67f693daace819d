//! Difficulty presets. The table is immutable; the session resolves a
//! setting once at start and keeps it for the whole run.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Spawn cadence, good-outcome probability and target lifetime for one preset.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultySetting {
    pub spawn_interval_ms: u32,
    /// Probability in `[0, 1]` that a spawned target is good.
    pub good_chance: f64,
    pub target_lifetime_ms: u32,
}

pub static DIFFICULTY_TABLE: [(Difficulty, DifficultySetting); 3] = [
    (
        Difficulty::Easy,
        DifficultySetting { spawn_interval_ms: 900, good_chance: 0.75, target_lifetime_ms: 2_000 },
    ),
    (
        Difficulty::Normal,
        DifficultySetting { spawn_interval_ms: 700, good_chance: 0.60, target_lifetime_ms: 1_500 },
    ),
    (
        Difficulty::Hard,
        DifficultySetting { spawn_interval_ms: 500, good_chance: 0.45, target_lifetime_ms: 1_100 },
    ),
];

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Strict lookup: `None` for anything that is not a known preset name.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(name))
    }

    /// Lenient lookup used by the start control: unknown names fall back to Normal.
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_default()
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn setting(self) -> DifficultySetting {
        DIFFICULTY_TABLE
            .iter()
            .find(|(d, _)| *d == self)
            .map(|(_, s)| *s)
            // Table covers every variant; Normal's row is index 1.
            .unwrap_or(DIFFICULTY_TABLE[1].1)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
