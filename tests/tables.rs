// Invariants on the static game tables.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use drop_dash::{DIFFICULTY_TABLE, Difficulty, MILESTONES};

#[test]
fn milestone_thresholds_ascend_and_are_positive() {
    let mut prev = 0;
    for m in MILESTONES {
        assert!(m.threshold > prev, "threshold {} not above {}", m.threshold, prev);
        prev = m.threshold;
    }
    assert_eq!(MILESTONES[0].threshold, 5);
}

#[test]
fn milestone_pools_are_nonempty_and_unique() {
    let mut seen = HashSet::new();
    for m in MILESTONES {
        assert!(!m.messages.is_empty(), "empty pool for threshold {}", m.threshold);
        for msg in m.messages {
            assert!(!msg.trim().is_empty(), "blank message at threshold {}", m.threshold);
            assert!(seen.insert(*msg), "duplicate milestone message '{}'", msg);
        }
    }
}

#[test]
fn difficulty_table_covers_every_preset_once() {
    let presets: Vec<Difficulty> = DIFFICULTY_TABLE.iter().map(|(d, _)| *d).collect();
    assert_eq!(presets, Difficulty::ALL.to_vec());
    for (d, s) in DIFFICULTY_TABLE.iter() {
        assert!((0.0..=1.0).contains(&s.good_chance), "{d} good chance out of range");
        assert!(s.spawn_interval_ms > 0, "{d} spawns with zero interval");
        assert!(s.target_lifetime_ms > 0, "{d} targets never live");
        assert_eq!(d.setting(), *s);
        assert_eq!(Difficulty::from_name(d.name()), *d);
    }
}
