//! Seams between the engine and whatever hosts it.
//!
//! The engine never touches a window, canvas or timer directly. A front end
//! implements these three traits (the wasm crate binds them to `web-sys`;
//! tests bind them to in-memory doubles).

use glam::Vec2;

/// Viewport in css pixels plus the raw device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            device_pixel_ratio: 1.0,
        }
    }
}

impl Viewport {
    /// Map a css-pixel point to [-1, 1] per axis, origin at the centre.
    pub fn normalize(&self, point: Vec2) -> Vec2 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            point.x / self.width * 2.0 - 1.0,
            point.y / self.height * 2.0 - 1.0,
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub offset: f32,
    pub scroll_height: f32,
    pub viewport_height: f32,
}

impl ScrollMetrics {
    /// Scroll position as a fraction of the scrollable range.
    pub fn fraction(&self) -> f32 {
        let max = (self.scroll_height - self.viewport_height).max(1.0);
        (self.offset / max).clamp(0.0, 1.0)
    }
}

/// Current state of the environment the engine reacts to.
pub trait InputProvider {
    fn viewport(&self) -> Viewport;
    /// Last known pointer position in css px, if the pointer has moved yet.
    fn pointer(&self) -> Option<Vec2>;
    fn scroll(&self) -> ScrollMetrics;
    fn prefers_reduced_motion(&self) -> bool;
}

/// Semantic drawing operations. Coordinates are backing-surface pixels.
pub trait Surface {
    /// Resize the backing store and set the unscaled display size.
    fn resize(&mut self, backing_width: u32, backing_height: u32, css_width: f32, css_height: f32);
    fn clear(&mut self, size: Vec2);
    /// Soft radial glow composited beneath the stars.
    fn glow(&mut self, size: Vec2);
    fn star(&mut self, center: Vec2, radius: f32, alpha: f32);
    fn link(&mut self, from: Vec2, to: Vec2, width: f32, alpha: f32);
    fn streak(&mut self, head: Vec2, tail: Vec2, thickness: f32, alpha: f32);
    /// The shared sprite image, rotated about its centre.
    fn sprite(&mut self, center: Vec2, size: f32, rotation: f32, alpha: f32);
}

/// Work the engine asks the host to run later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Task {
    SpawnStreak,
    SpawnSprite,
    ResizeSettled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerHandle {
    pub id: i32,
    pub repeating: bool,
}

/// Host-side scheduling. When a frame or timer fires, the host calls back
/// into [`crate::Starfield::frame`] or [`crate::Starfield::run_task`].
///
/// A `None` return means the host could not schedule the callback; the engine
/// treats that as "nothing outstanding".
pub trait Scheduler {
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
    fn set_interval(&mut self, task: Task, period_ms: u32) -> Option<TimerHandle>;
    fn set_timeout(&mut self, task: Task, delay_ms: u32) -> Option<TimerHandle>;
    fn clear_timer(&mut self, handle: TimerHandle);
}
