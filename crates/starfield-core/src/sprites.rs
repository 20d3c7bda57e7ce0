//! Short-lived sprites: shooting-star streaks and the decorative asteroids.
//!
//! Both follow the same lifecycle: spawn off-screen at one edge, integrate
//! forward each frame, fade linearly with age, and disappear once their age
//! reaches the population lifetime.

use crate::constants::*;
use crate::random::between;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// Linear fade: 1 at birth, 0 at `lifetime_ms`.
#[inline]
pub fn fade(age_ms: f64, lifetime_ms: f64) -> f32 {
    if lifetime_ms <= 0.0 {
        return 0.0;
    }
    (1.0 - age_ms / lifetime_ms).clamp(0.0, 1.0) as f32
}

pub trait Transient {
    /// Host timestamp (ms) at which the sprite was spawned.
    fn born_at(&self) -> f64;
    /// Advance one frame.
    fn step(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn pick<R: Rng>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// +1 when travelling rightwards from the left edge, -1 otherwise.
    fn heading(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Streak {
    pub born_at: f64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub length: f32,
    pub thickness: f32,
}

impl Streak {
    pub fn spawn<R: Rng>(rng: &mut R, now_ms: f64, surface: Vec2, pixel_ratio: f32) -> Self {
        let side = Side::pick(rng);
        let y = between(rng, surface.y * STREAK_Y_RANGE.0, surface.y * STREAK_Y_RANGE.1);
        let speed = between(rng, STREAK_SPEED_RANGE.0, STREAK_SPEED_RANGE.1) * pixel_ratio;
        let length = between(rng, STREAK_LENGTH_RANGE.0, STREAK_LENGTH_RANGE.1) * pixel_ratio;
        let thickness =
            between(rng, STREAK_THICKNESS_RANGE.0, STREAK_THICKNESS_RANGE.1) * pixel_ratio;
        let margin = STREAK_ENTRY_MARGIN * pixel_ratio;
        let x = match side {
            Side::Left => -margin,
            Side::Right => surface.x + margin,
        };
        let vy = between(rng, -STREAK_VERTICAL_JITTER, STREAK_VERTICAL_JITTER) * speed;
        Self {
            born_at: now_ms,
            position: Vec2::new(x, y),
            velocity: Vec2::new(side.heading() * speed * STREAK_HORIZONTAL_SHARE, vy),
            length,
            thickness,
        }
    }

    /// End of the trail behind the head.
    #[inline]
    pub fn tail(&self) -> Vec2 {
        self.position - self.velocity * self.length
    }
}

impl Transient for Streak {
    fn born_at(&self) -> f64 {
        self.born_at
    }

    fn step(&mut self) {
        self.position += self.velocity * STREAK_STEP_SCALE;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Asteroid {
    pub born_at: f64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub spin: f32,
}

impl Asteroid {
    pub fn spawn<R: Rng>(rng: &mut R, now_ms: f64, surface: Vec2, pixel_ratio: f32) -> Self {
        let side = Side::pick(rng);
        let y = between(rng, surface.y * SPRITE_Y_RANGE.0, surface.y * SPRITE_Y_RANGE.1);
        let speed = between(rng, SPRITE_SPEED_RANGE.0, SPRITE_SPEED_RANGE.1) * pixel_ratio;
        let size = between(rng, SPRITE_SIZE_RANGE.0, SPRITE_SIZE_RANGE.1) * pixel_ratio;
        let rotation = between(rng, 0.0, TAU);
        let spin = between(rng, SPRITE_SPIN_RANGE.0, SPRITE_SPIN_RANGE.1);
        let margin = size + SPRITE_ENTRY_MARGIN * pixel_ratio;
        let x = match side {
            Side::Left => -margin,
            Side::Right => surface.x + margin,
        };
        let vy = between(rng, -SPRITE_VERTICAL_JITTER, SPRITE_VERTICAL_JITTER) * speed;
        Self {
            born_at: now_ms,
            position: Vec2::new(x, y),
            velocity: Vec2::new(side.heading() * speed, vy),
            size,
            rotation,
            spin,
        }
    }
}

impl Transient for Asteroid {
    fn born_at(&self) -> f64 {
        self.born_at
    }

    fn step(&mut self) {
        self.position += self.velocity * SPRITE_STEP_SCALE;
        self.rotation += self.spin;
    }
}

/// Unordered collection of transient sprites sharing one lifetime.
#[derive(Clone, Debug)]
pub struct Population<T> {
    items: Vec<T>,
    lifetime_ms: f64,
}

impl<T: Transient> Population<T> {
    pub fn new(lifetime_ms: f64) -> Self {
        Self {
            items: Vec::new(),
            lifetime_ms,
        }
    }

    #[inline]
    pub fn lifetime_ms(&self) -> f64 {
        self.lifetime_ms
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Drop every sprite whose age has reached the lifetime.
    pub fn cull(&mut self, now_ms: f64) {
        let lifetime = self.lifetime_ms;
        self.items.retain(|s| now_ms - s.born_at() < lifetime);
    }

    /// Cull, then step the survivors and hand each one to `draw` with its
    /// fade. Culling first means an expired sprite is never drawn.
    pub fn advance(&mut self, now_ms: f64, mut draw: impl FnMut(&T, f32)) {
        self.cull(now_ms);
        let lifetime = self.lifetime_ms;
        for item in &mut self.items {
            item.step();
            draw(item, fade(now_ms - item.born_at(), lifetime));
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
