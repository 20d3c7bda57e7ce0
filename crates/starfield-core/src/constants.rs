use std::f32::consts::TAU;

// Engine tuning constants shared by every front end.

// Device classification
pub const CONSTRAINED_MAX_WIDTH: f32 = 900.0; // css px at or below counts as constrained
pub const CONSTRAINED_MAX_PIXEL_RATIO: f32 = 1.5; // caps fill-rate cost on constrained devices

// Star population
pub const STAR_COUNT_BASE: usize = 140;
pub const STAR_COUNT_BASE_CONSTRAINED: usize = 100;
pub const STAR_COUNT_REFERENCE_WIDTH: f32 = 1280.0; // width at which the base count applies exactly
pub const STAR_COUNT_SCALE_MIN: f32 = 0.75;
pub const STAR_COUNT_SCALE_MAX: f32 = 1.2;

// Star shape (css px, multiplied by the pixel ratio)
pub const STAR_RADIUS_MIN: f32 = 0.4;
pub const STAR_RADIUS_MAX: f32 = 1.8;
pub const STAR_DEPTH_MIN: f32 = 0.3;
pub const STAR_DEPTH_MAX: f32 = 1.5;
pub const STAR_TWINKLE_MIN: f32 = 0.75;
pub const STAR_TWINKLE_MAX: f32 = 1.25;
pub const STAR_PHASE_MAX: f32 = TAU;
pub const STAR_FILL_ALPHA: f32 = 0.85;

// Twinkle: alpha = BASE + AMPLITUDE * sin(RATE * t * twinkle + phase)
pub const TWINKLE_BASE: f32 = 0.75;
pub const TWINKLE_AMPLITUDE: f32 = 0.25;
pub const TWINKLE_RATE: f32 = 2.0;

// Drift frequencies applied to the global time accumulator
pub const DRIFT_RATE_X: f32 = 0.6;
pub const DRIFT_RATE_Y: f32 = 0.5;

// Parallax (css px)
pub const PARALLAX_X: f32 = 12.0;
pub const PARALLAX_Y: f32 = 8.0;
pub const PARALLAX_X_CONSTRAINED: f32 = 8.0;
pub const PARALLAX_Y_CONSTRAINED: f32 = 5.0;
pub const POINTER_PARALLAX_WEIGHT: f32 = 0.7; // share of the drift amplitude driven by the pointer
pub const SCROLL_DRIFT_AMPLITUDE: f32 = 20.0;

// Time accumulator step per frame
pub const MOTION_SPEED: f32 = 0.015;
pub const MOTION_SPEED_CONSTRAINED: f32 = 0.01;

// Constellation links
pub const LINK_DISTANCE: f32 = 150.0;
pub const LINK_DISTANCE_CONSTRAINED: f32 = 120.0;
pub const LINK_WINDOW: usize = 45; // max index distance scanned per star
pub const LINK_ALPHA: f32 = 0.08;
pub const LINK_WIDTH: f32 = 0.6;

// Shooting stars
pub const STREAK_LIFETIME_MS: f64 = 1400.0;
pub const STREAK_CADENCE_MS: u32 = 3500;
pub const STREAK_SPAWN_PROBABILITY: f64 = 0.7;
pub const STREAK_STEP_SCALE: f32 = 12.0;
pub const STREAK_ALPHA: f32 = 0.25;
pub const STREAK_Y_RANGE: (f32, f32) = (0.1, 0.9); // fraction of surface height
pub const STREAK_SPEED_RANGE: (f32, f32) = (0.7, 1.2);
pub const STREAK_LENGTH_RANGE: (f32, f32) = (120.0, 220.0);
pub const STREAK_THICKNESS_RANGE: (f32, f32) = (1.0, 1.8);
pub const STREAK_ENTRY_MARGIN: f32 = 50.0;
pub const STREAK_HORIZONTAL_SHARE: f32 = 0.9;
pub const STREAK_VERTICAL_JITTER: f32 = 0.15;

// Decorative sprites ("cat asteroids")
pub const SPRITE_LIFETIME_MS: f64 = 3000.0;
pub const SPRITE_CADENCE_MS: u32 = 4500;
pub const SPRITE_SPAWN_PROBABILITY: f64 = 0.5;
pub const SPRITE_STEP_SCALE: f32 = 8.0;
pub const SPRITE_ALPHA: f32 = 0.7;
pub const SPRITE_Y_RANGE: (f32, f32) = (0.15, 0.85);
pub const SPRITE_SPEED_RANGE: (f32, f32) = (0.4, 0.8);
pub const SPRITE_SIZE_RANGE: (f32, f32) = (32.0, 50.0);
pub const SPRITE_SPIN_RANGE: (f32, f32) = (-0.08, 0.08);
pub const SPRITE_ENTRY_MARGIN: f32 = 20.0;
pub const SPRITE_VERTICAL_JITTER: f32 = 0.1;

// Resize debounce quiet period
pub const RESIZE_DEBOUNCE_MS: u32 = 120;
