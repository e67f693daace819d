//! Score milestones and the banner that announces them.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;

pub struct Milestone {
    pub threshold: i64,
    pub messages: &'static [&'static str],
}

// Ascending by threshold.
pub const MILESTONES: &[Milestone] = &[
    Milestone {
        threshold: 5,
        messages: &["Nice start!", "Making a splash!", "First drops collected!"],
    },
    Milestone {
        threshold: 10,
        messages: &["Double digits!", "Keep it flowing!", "You're on a roll!"],
    },
    Milestone {
        threshold: 20,
        messages: &["Bucket's filling up!", "Steady hands!", "Halfway to legend!"],
    },
    Milestone {
        threshold: 35,
        messages: &["Drop master!", "Unstoppable current!", "Nothing slips past you!"],
    },
    Milestone {
        threshold: 50,
        messages: &["Legendary catcher!", "A whole well's worth!", "Flawless flow!"],
    },
];

/// One banner-worthy event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MilestoneReached {
    pub threshold: i64,
    pub message: &'static str,
}

/// Remembers which thresholds already fired in the current session.
#[derive(Debug, Default)]
pub struct MilestoneTracker {
    shown: BTreeSet<i64>,
}

impl MilestoneTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every unshown threshold that `score` has reached, lowest first.
    pub fn check<R: Rng + ?Sized>(&mut self, score: i64, rng: &mut R) -> Vec<MilestoneReached> {
        self.check_against(MILESTONES, score, rng)
    }

    fn check_against<R: Rng + ?Sized>(
        &mut self,
        table: &[Milestone],
        score: i64,
        rng: &mut R,
    ) -> Vec<MilestoneReached> {
        let mut fired = Vec::new();
        for m in table {
            if score < m.threshold {
                break;
            }
            if !self.shown.insert(m.threshold) {
                continue;
            }
            let message = m.messages.choose(rng).copied().unwrap_or("Milestone reached!");
            fired.push(MilestoneReached { threshold: m.threshold, message });
        }
        fired
    }

    pub fn has_shown(&self, threshold: i64) -> bool {
        self.shown.contains(&threshold)
    }

    pub fn reset(&mut self) {
        self.shown.clear();
    }
}

/// Visibility of the milestone banner. Every `show` hands out a new token;
/// only the hide timer carrying the latest token may take the banner down,
/// so a fresh message restarts the display window.
#[derive(Debug, Default)]
pub struct Banner {
    token: u64,
    visible: bool,
}

impl Banner {
    pub fn show(&mut self) -> u64 {
        self.token = self.token.wrapping_add(1);
        self.visible = true;
        self.token
    }

    /// Returns true if the banner should be hidden now.
    pub fn expire(&mut self, token: u64) -> bool {
        if self.visible && token == self.token {
            self.visible = false;
            return true;
        }
        false
    }

    /// Force-hide; outstanding hide timers become stale. Returns whether it was visible.
    pub fn dismiss(&mut self) -> bool {
        let was_visible = self.visible;
        self.visible = false;
        self.token = self.token.wrapping_add(1);
        was_visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn fires_once_per_threshold() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut tracker = MilestoneTracker::new();
        assert!(tracker.check(4, &mut rng).is_empty());
        let fired = tracker.check(5, &mut rng);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].threshold, 5);
        assert!(MILESTONES[0].messages.contains(&fired[0].message));
        assert!(tracker.check(6, &mut rng).is_empty());
        assert!(tracker.check(5, &mut rng).is_empty());
    }

    #[test]
    fn jump_fires_each_crossed_threshold_in_order() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut tracker = MilestoneTracker::new();
        let fired: Vec<i64> = tracker.check(22, &mut rng).iter().map(|m| m.threshold).collect();
        assert_eq!(fired, vec![5, 10, 20]);
    }

    #[test]
    fn dropping_below_does_not_refire() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut tracker = MilestoneTracker::new();
        tracker.check(10, &mut rng);
        assert!(tracker.check(-4, &mut rng).is_empty());
        assert!(tracker.check(10, &mut rng).is_empty());
    }

    #[test]
    fn reset_allows_refire() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut tracker = MilestoneTracker::new();
        tracker.check(5, &mut rng);
        tracker.reset();
        assert!(!tracker.has_shown(5));
        assert_eq!(tracker.check(5, &mut rng).len(), 1);
    }

    #[test]
    fn empty_pool_uses_fallback_message() {
        let table = [Milestone { threshold: 1, messages: &[] }];
        let mut rng = StdRng::seed_from_u64(5);
        let mut tracker = MilestoneTracker::new();
        let fired = tracker.check_against(&table, 3, &mut rng);
        assert_eq!(fired[0].message, "Milestone reached!");
    }

    #[test]
    fn newer_banner_invalidates_older_hide() {
        let mut banner = Banner::default();
        let first = banner.show();
        let second = banner.show();
        assert!(!banner.expire(first));
        assert!(banner.is_visible());
        assert!(banner.expire(second));
        assert!(!banner.is_visible());
        assert!(!banner.expire(second));
    }

    #[test]
    fn dismiss_stales_pending_hide() {
        let mut banner = Banner::default();
        let token = banner.show();
        assert!(banner.dismiss());
        assert!(!banner.expire(token));
        assert!(!banner.dismiss());
    }
}
