//! Star field generation and the per-frame star math.

use crate::constants::*;
use crate::random::between;
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    /// Base position in backing-surface pixels.
    pub position: Vec2,
    pub radius: f32,
    /// Parallax multiplier; larger values move further.
    pub depth: f32,
    pub twinkle: f32,
    pub phase: f32,
}

/// Everything that displaces stars this frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct Drift {
    pub time: f32,
    /// Drift amplitude per axis (css px).
    pub amplitude: Vec2,
    /// Pointer in [-1, 1] per axis; zero when pointer parallax is off.
    pub pointer: Vec2,
    /// Scroll fraction in [0, 1].
    pub scroll: f32,
}

impl Star {
    pub fn displaced(&self, drift: &Drift) -> Vec2 {
        let pointer = drift.amplitude * POINTER_PARALLAX_WEIGHT * drift.pointer;
        let dx = (drift.time * DRIFT_RATE_X + self.phase).sin() * drift.amplitude.x + pointer.x;
        let dy = (drift.time * DRIFT_RATE_Y + self.phase).cos() * drift.amplitude.y
            + pointer.y
            + SCROLL_DRIFT_AMPLITUDE * drift.scroll;
        self.position + Vec2::new(dx, dy) * self.depth
    }

    #[inline]
    pub fn twinkle_alpha(&self, time: f32) -> f32 {
        TWINKLE_BASE + (time * TWINKLE_RATE * self.twinkle + self.phase).sin() * TWINKLE_AMPLITUDE
    }
}

/// Star count for a css viewport width: the base count scaled by the width
/// relative to the reference width, with the scale clamped.
pub fn star_count(base: usize, css_width: f32) -> usize {
    let scale = (css_width / STAR_COUNT_REFERENCE_WIDTH)
        .clamp(STAR_COUNT_SCALE_MIN, STAR_COUNT_SCALE_MAX);
    let count = (base as f32 * scale).round();
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

/// Generate `count` stars scattered over a surface of `size` backing pixels.
pub fn generate<R: Rng>(
    rng: &mut R,
    count: usize,
    size: Vec2,
    pixel_ratio: f32,
    max_radius: f32,
) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            position: Vec2::new(between(rng, 0.0, size.x), between(rng, 0.0, size.y)),
            radius: between(rng, STAR_RADIUS_MIN, max_radius) * pixel_ratio,
            depth: between(rng, STAR_DEPTH_MIN, STAR_DEPTH_MAX),
            twinkle: between(rng, STAR_TWINKLE_MIN, STAR_TWINKLE_MAX),
            phase: between(rng, 0.0, STAR_PHASE_MAX),
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    /// 1 at zero distance, 0 at the threshold.
    pub strength: f32,
}

/// Index pairs examined by the constellation scan, in scan order.
///
/// Each star only looks at the next [`LINK_WINDOW`] stars in generation
/// order, so the cost is O(N x window) whatever the layout.
pub fn link_candidates(len: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..len).flat_map(move |i| {
        (i + 1..len)
            .take_while(move |&j| j - i <= LINK_WINDOW)
            .map(move |j| (i, j))
    })
}

/// Links between base positions closer than `threshold` backing pixels.
pub fn constellation_links(stars: &[Star], threshold: f32) -> impl Iterator<Item = Link> + '_ {
    link_candidates(stars.len()).filter_map(move |(i, j)| {
        let dist = stars[i].position.distance(stars[j].position);
        (dist < threshold).then(|| Link {
            from: i,
            to: j,
            strength: 1.0 - dist / threshold,
        })
    })
}
