//! Random placement of targets inside the play area.

use rand::Rng;

/// Size of the bounded play surface in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayArea {
    pub width: f64,
    pub height: f64,
}

impl PlayArea {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Top-left corner of a target, relative to the play area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Draws `x` and `y` independently and uniformly from
/// `[0, width - size]` and `[0, height - size]`. A dimension no larger than
/// the target collapses to `[0, 0]`.
pub fn next_position<R: Rng + ?Sized>(rng: &mut R, area: PlayArea, target_size: f64) -> Position {
    Position {
        x: sample_axis(rng, area.width - target_size),
        y: sample_axis(rng, area.height - target_size),
    }
}

fn sample_axis<R: Rng + ?Sized>(rng: &mut R, max: f64) -> f64 {
    // NaN from a detached element also lands here
    if !max.is_finite() || max <= 0.0 {
        return 0.0;
    }
    rng.gen_range(0.0..=max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn positions_stay_inside_area() {
        let mut rng = StdRng::seed_from_u64(7);
        let area = PlayArea::new(400.0, 300.0);
        for _ in 0..1_000 {
            let p = next_position(&mut rng, area, 60.0);
            assert!((0.0..=340.0).contains(&p.x), "x out of range: {}", p.x);
            assert!((0.0..=240.0).contains(&p.y), "y out of range: {}", p.y);
        }
    }

    #[test]
    fn degenerate_area_clamps_to_origin() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = next_position(&mut rng, PlayArea::new(50.0, 500.0), 60.0);
        assert_eq!(p.x, 0.0);
        assert!(p.y <= 440.0);

        let p = next_position(&mut rng, PlayArea::new(60.0, 60.0), 60.0);
        assert_eq!(p, Position { x: 0.0, y: 0.0 });
    }

    #[test]
    fn nan_area_is_treated_as_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        let p = next_position(&mut rng, PlayArea::new(f64::NAN, 200.0), 60.0);
        assert_eq!(p.x, 0.0);
    }
}
