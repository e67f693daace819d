//! Target entities and their spawner.
//!
//! A target leaves the live set exactly once, either because it was clicked
//! or because its lifetime ran out. Membership in the live set is the
//! "not yet removed" flag, so a second removal finds nothing and does nothing.

use std::collections::BTreeMap;
use std::fmt;

use rand::Rng;

use crate::host::Scheduler;
use crate::position::{PlayArea, Position, next_position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetKind {
    Good,
    Bad,
}

impl TargetKind {
    pub fn is_good(self) -> bool {
        matches!(self, TargetKind::Good)
    }

    /// Tooltip text shown on the target element.
    pub fn label(self) -> &'static str {
        match self {
            TargetKind::Good => "Good Drop",
            TargetKind::Bad => "Bad Drop",
        }
    }
}

/// Identifier unique for the lifetime of a spawner (never reused, even
/// across sessions).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetId(pub u32);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub id: TargetId,
    pub kind: TargetKind,
    pub position: Position,
    pub created_at_ms: f64,
    pub lifetime_ms: u32,
}

impl Target {
    pub fn expires_at_ms(&self) -> f64 {
        self.created_at_ms + self.lifetime_ms as f64
    }
}

/// Why a target left the play area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removal {
    Clicked,
    Expired,
    /// Session start/end swept the surface.
    Cleared,
}

/// Everything `spawn` needs to place one target.
#[derive(Clone, Copy, Debug)]
pub struct SpawnRequest {
    pub generation: u64,
    pub kind: TargetKind,
    pub lifetime_ms: u32,
    pub area: PlayArea,
    pub target_size: f64,
    pub now_ms: f64,
}

#[derive(Debug, Default)]
pub struct TargetSpawner {
    next_id: u32,
    live: BTreeMap<TargetId, Target>,
}

impl TargetSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a new target at a random position and arm its expiry.
    /// The caller hands the returned target to the renderer.
    pub fn spawn<R, S>(&mut self, req: SpawnRequest, rng: &mut R, scheduler: &mut S) -> Target
    where
        R: Rng + ?Sized,
        S: Scheduler + ?Sized,
    {
        let id = TargetId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let target = Target {
            id,
            kind: req.kind,
            position: next_position(rng, req.area, req.target_size),
            created_at_ms: req.now_ms,
            lifetime_ms: req.lifetime_ms,
        };
        self.live.insert(id, target.clone());
        scheduler.schedule_expiry(req.generation, id, req.lifetime_ms);
        target
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.live.get(&id)
    }

    pub fn is_live(&self, id: TargetId) -> bool {
        self.live.contains_key(&id)
    }

    /// Take the target out of the live set. Returns `None` if it is already
    /// gone. Any removal other than expiry cancels the pending expiry timer.
    pub fn remove<S: Scheduler + ?Sized>(
        &mut self,
        id: TargetId,
        why: Removal,
        scheduler: &mut S,
    ) -> Option<Target> {
        let target = self.live.remove(&id)?;
        if why != Removal::Expired {
            scheduler.cancel_expiry(id);
        }
        Some(target)
    }

    /// Remove every live target, cancelling their expiries. Returns the ids
    /// removed, ascending.
    pub fn clear<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> Vec<TargetId> {
        let ids: Vec<TargetId> = self.live.keys().copied().collect();
        for id in &ids {
            self.remove(*id, Removal::Cleared, scheduler);
        }
        ids
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[derive(Default)]
    struct Timers {
        scheduled: Vec<(u64, TargetId, u32)>,
        cancelled: Vec<TargetId>,
    }

    impl Scheduler for Timers {
        fn start_ticks(&mut self, _: u64, _: u32, _: u32) {}
        fn stop_ticks(&mut self) {}
        fn schedule_expiry(&mut self, generation: u64, id: TargetId, after_ms: u32) {
            self.scheduled.push((generation, id, after_ms));
        }
        fn cancel_expiry(&mut self, id: TargetId) {
            self.cancelled.push(id);
        }
        fn schedule_banner_hide(&mut self, _: u64, _: u32) {}
    }

    fn req(kind: TargetKind) -> SpawnRequest {
        SpawnRequest {
            generation: 3,
            kind,
            lifetime_ms: 1_500,
            area: PlayArea::new(500.0, 400.0),
            target_size: 60.0,
            now_ms: 100.0,
        }
    }

    #[test]
    fn spawn_arms_expiry_and_assigns_fresh_ids() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut timers = Timers::default();
        let mut spawner = TargetSpawner::new();

        let a = spawner.spawn(req(TargetKind::Good), &mut rng, &mut timers);
        let b = spawner.spawn(req(TargetKind::Bad), &mut rng, &mut timers);

        assert_ne!(a.id, b.id);
        assert_eq!(a.expires_at_ms(), 1_600.0);
        assert_eq!(timers.scheduled, vec![(3, a.id, 1_500), (3, b.id, 1_500)]);
        assert_eq!(spawner.live_count(), 2);
    }

    #[test]
    fn click_removal_cancels_expiry_once() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut timers = Timers::default();
        let mut spawner = TargetSpawner::new();
        let t = spawner.spawn(req(TargetKind::Good), &mut rng, &mut timers);

        assert!(spawner.remove(t.id, Removal::Clicked, &mut timers).is_some());
        assert!(spawner.remove(t.id, Removal::Clicked, &mut timers).is_none());
        assert!(spawner.remove(t.id, Removal::Expired, &mut timers).is_none());
        assert_eq!(timers.cancelled, vec![t.id]);
    }

    #[test]
    fn expiry_removal_does_not_cancel() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut timers = Timers::default();
        let mut spawner = TargetSpawner::new();
        let t = spawner.spawn(req(TargetKind::Bad), &mut rng, &mut timers);

        assert!(spawner.remove(t.id, Removal::Expired, &mut timers).is_some());
        assert!(timers.cancelled.is_empty());
        assert!(!spawner.is_live(t.id));
    }

    #[test]
    fn clear_sweeps_everything_and_ids_keep_counting() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut timers = Timers::default();
        let mut spawner = TargetSpawner::new();
        let a = spawner.spawn(req(TargetKind::Good), &mut rng, &mut timers);
        let b = spawner.spawn(req(TargetKind::Good), &mut rng, &mut timers);

        assert_eq!(spawner.clear(&mut timers), vec![a.id, b.id]);
        assert_eq!(spawner.live_count(), 0);

        let c = spawner.spawn(req(TargetKind::Good), &mut rng, &mut timers);
        assert!(c.id > b.id);
    }
}
