//! The starfield engine: one owned value holding the star field, both sprite
//! populations, the render-loop state machine and the host seams.

use crate::config::{recompute_config, DeviceClass, EngineConfig};
use crate::constants::*;
use crate::host::{FrameHandle, InputProvider, Scheduler, Surface, Task, TimerHandle};
use crate::sprites::{Asteroid, Population, Streak};
use crate::stars::{self, Drift, Star};
use glam::Vec2;
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
    /// Terminal; every later call is ignored.
    TornDown,
}

/// Load state of the shared sprite image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteImage {
    Loading,
    Ready,
    /// Failed once; the decorative sprites stay off for the session.
    Unavailable,
}

pub struct Starfield<S, I, H> {
    surface: S,
    input: I,
    scheduler: H,
    rng: StdRng,

    config: EngineConfig,
    device: DeviceClass,
    reduced_motion: bool,
    pixel_ratio: f32,
    surface_size: Vec2,

    stars: Vec<Star>,
    streaks: Population<Streak>,
    asteroids: Population<Asteroid>,
    sprite_image: SpriteImage,
    time: f32,

    state: LoopState,
    frame: Option<FrameHandle>,
    streak_timer: Option<TimerHandle>,
    asteroid_timer: Option<TimerHandle>,
    resize_timer: Option<TimerHandle>,
}

impl<S, I, H> Starfield<S, I, H>
where
    S: Surface,
    I: InputProvider,
    H: Scheduler,
{
    pub fn new(surface: S, input: I, scheduler: H, seed: u64) -> Self {
        let viewport = input.viewport();
        let device = DeviceClass::from_viewport_width(viewport.width);
        let reduced_motion = input.prefers_reduced_motion();
        Self {
            surface,
            input,
            scheduler,
            rng: StdRng::seed_from_u64(seed),
            config: recompute_config(device, reduced_motion),
            device,
            reduced_motion,
            pixel_ratio: device.clamp_pixel_ratio(viewport.device_pixel_ratio),
            surface_size: Vec2::ZERO,
            stars: Vec::new(),
            streaks: Population::new(STREAK_LIFETIME_MS),
            asteroids: Population::new(SPRITE_LIFETIME_MS),
            sprite_image: SpriteImage::Loading,
            time: 0.0,
            state: LoopState::Stopped,
            frame: None,
            streak_timer: None,
            asteroid_timer: None,
            resize_timer: None,
        }
    }

    /// Initial load: size the surface, arm both spawn timers and start the
    /// loop unless reduced motion is requested.
    pub fn boot(&mut self) {
        if self.state == LoopState::TornDown {
            return;
        }
        self.fit();
        if self.streak_timer.is_none() {
            self.streak_timer = self
                .scheduler
                .set_interval(Task::SpawnStreak, STREAK_CADENCE_MS);
        }
        if self.asteroid_timer.is_none() {
            self.asteroid_timer = self
                .scheduler
                .set_interval(Task::SpawnSprite, SPRITE_CADENCE_MS);
        }
        self.start();
        log::info!(
            "[starfield] boot stars={} ratio={:.2} device={:?} reduced_motion={}",
            self.stars.len(),
            self.pixel_ratio,
            self.device,
            self.reduced_motion
        );
    }

    /// Re-read viewport and pixel ratio, recompute the config for the
    /// device class, resize the backing surface and regenerate the whole
    /// star field.
    pub fn fit(&mut self) {
        if self.state == LoopState::TornDown {
            return;
        }
        let viewport = self.input.viewport();
        self.device = DeviceClass::from_viewport_width(viewport.width);
        self.config = recompute_config(self.device, self.reduced_motion);
        self.pixel_ratio = self.device.clamp_pixel_ratio(viewport.device_pixel_ratio);

        let css = Vec2::new(viewport.width.max(0.0), viewport.height.max(0.0));
        let backing = (css * self.pixel_ratio).floor();
        self.surface_size = backing;
        self.surface
            .resize(backing.x as u32, backing.y as u32, css.x, css.y);

        let count = if backing.x < 1.0 || backing.y < 1.0 {
            0
        } else {
            stars::star_count(self.config.star_count_base, css.x)
        };
        self.stars = stars::generate(
            &mut self.rng,
            count,
            backing,
            self.pixel_ratio,
            self.config.max_star_radius,
        );
        log::debug!(
            "[starfield] fit {}x{} -> {} stars",
            backing.x,
            backing.y,
            self.stars.len()
        );
    }

    fn refresh_config(&mut self) {
        self.device = DeviceClass::from_viewport_width(self.input.viewport().width);
        self.config = recompute_config(self.device, self.reduced_motion);
    }

    /// Schedule frames. No-op when already running, torn down, paused by
    /// reduced motion, or inside a resize debounce window.
    pub fn start(&mut self) {
        if self.state != LoopState::Stopped || self.reduced_motion || self.resize_timer.is_some() {
            return;
        }
        self.frame = self.scheduler.request_frame();
        if self.frame.is_some() {
            self.state = LoopState::Running;
            log::debug!("[starfield] loop running");
        } else {
            log::warn!("[starfield] host refused a frame callback");
        }
    }

    /// Cancel the outstanding frame callback. No-op unless running.
    pub fn stop(&mut self) {
        if self.state != LoopState::Running {
            return;
        }
        if let Some(handle) = self.frame.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.state = LoopState::Stopped;
        log::debug!("[starfield] loop stopped");
    }

    /// Reduced-motion preference changed.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        if self.state == LoopState::TornDown {
            return;
        }
        self.reduced_motion = reduced;
        self.refresh_config();
        if reduced {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Viewport resized: stop drawing and (re)open the debounce window.
    pub fn on_resize(&mut self) {
        if self.state == LoopState::TornDown {
            return;
        }
        self.stop();
        if let Some(pending) = self.resize_timer.take() {
            self.scheduler.clear_timer(pending);
        }
        self.resize_timer = self
            .scheduler
            .set_timeout(Task::ResizeSettled, RESIZE_DEBOUNCE_MS);
        if self.resize_timer.is_none() {
            // no debounce available; settle right away
            self.run_task(Task::ResizeSettled, 0.0);
        }
    }

    /// Sprite image finished loading (or failed for good).
    pub fn set_sprite_image(&mut self, status: SpriteImage) {
        if self.sprite_image == SpriteImage::Unavailable {
            return;
        }
        if status == SpriteImage::Unavailable {
            log::warn!("[starfield] sprite image unavailable, decorative sprites disabled");
            self.asteroids.clear();
        }
        self.sprite_image = status;
    }

    /// A timer previously handed to the scheduler fired.
    pub fn run_task(&mut self, task: Task, now_ms: f64) {
        if self.state == LoopState::TornDown {
            return;
        }
        match task {
            Task::SpawnStreak => {
                self.streaks.cull(now_ms);
                if self.spawns_allowed()
                    && self.config.streaks_enabled
                    && self.rng.gen_bool(STREAK_SPAWN_PROBABILITY)
                {
                    let streak =
                        Streak::spawn(&mut self.rng, now_ms, self.surface_size, self.pixel_ratio);
                    self.streaks.push(streak);
                }
            }
            Task::SpawnSprite => {
                self.asteroids.cull(now_ms);
                if self.spawns_allowed()
                    && self.config.sprites_enabled
                    && self.sprite_image == SpriteImage::Ready
                    && self.rng.gen_bool(SPRITE_SPAWN_PROBABILITY)
                {
                    let asteroid = Asteroid::spawn(
                        &mut self.rng,
                        now_ms,
                        self.surface_size,
                        self.pixel_ratio,
                    );
                    self.asteroids.push(asteroid);
                }
            }
            Task::ResizeSettled => {
                self.resize_timer = None;
                self.fit();
                self.start();
            }
        }
    }

    #[inline]
    fn spawns_allowed(&self) -> bool {
        self.state == LoopState::Running
    }

    /// The scheduled frame callback fired: draw, then request the next one.
    pub fn frame(&mut self, now_ms: f64) {
        if self.state != LoopState::Running {
            return;
        }
        self.frame = None;
        self.render(now_ms);
        self.frame = self.scheduler.request_frame();
        if self.frame.is_none() {
            self.state = LoopState::Stopped;
            log::warn!("[starfield] host refused a frame callback");
        }
    }

    /// The host lost the outstanding frame callback before it ran. Drop the
    /// stale handle and request a fresh one so the loop keeps exactly one.
    pub fn frame_dropped(&mut self) {
        if self.state != LoopState::Running {
            return;
        }
        if let Some(stale) = self.frame.take() {
            self.scheduler.cancel_frame(stale);
        }
        self.frame = self.scheduler.request_frame();
        if self.frame.is_none() {
            self.state = LoopState::Stopped;
            log::warn!("[starfield] host refused a frame callback");
        } else {
            log::debug!("[starfield] frame callback re-armed");
        }
    }

    /// Composite one frame onto the surface.
    fn render(&mut self, now_ms: f64) {
        self.time += self.config.motion_speed;
        let size = self.surface_size;
        let ratio = self.pixel_ratio;

        self.surface.clear(size);
        if self.config.background_glow {
            self.surface.glow(size);
        }

        let drift = self.drift();
        for star in &self.stars {
            let pos = star.displaced(&drift);
            let alpha = STAR_FILL_ALPHA * star.twinkle_alpha(self.time);
            self.surface.star(pos, star.radius, alpha);
        }

        let threshold = self.config.link_distance * ratio;
        for link in stars::constellation_links(&self.stars, threshold) {
            self.surface.link(
                self.stars[link.from].position,
                self.stars[link.to].position,
                LINK_WIDTH * ratio,
                LINK_ALPHA * link.strength,
            );
        }

        let surface = &mut self.surface;
        if self.config.streaks_enabled {
            self.streaks.advance(now_ms, |s, fade| {
                surface.streak(s.position, s.tail(), s.thickness, STREAK_ALPHA * fade);
            });
        } else {
            self.streaks.cull(now_ms);
        }
        if self.config.sprites_enabled && self.sprite_image == SpriteImage::Ready {
            self.asteroids.advance(now_ms, |a, fade| {
                surface.sprite(a.position, a.size, a.rotation, SPRITE_ALPHA * fade);
            });
        } else {
            self.asteroids.cull(now_ms);
        }
    }

    fn drift(&self) -> Drift {
        let pointer = if self.device.is_constrained() {
            Vec2::ZERO
        } else {
            // pointer is in current css px, which may postdate the last fit
            let viewport = self.input.viewport();
            self.input
                .pointer()
                .map(|p| viewport.normalize(p))
                .unwrap_or(Vec2::ZERO)
        };
        Drift {
            time: self.time,
            amplitude: Vec2::new(self.config.parallax_x, self.config.parallax_y),
            pointer,
            scroll: self.input.scroll().fraction(),
        }
    }

    /// Cancel the frame loop, both spawn timers and any pending resize.
    pub fn teardown(&mut self) {
        if self.state == LoopState::TornDown {
            return;
        }
        self.stop();
        for timer in [
            self.streak_timer.take(),
            self.asteroid_timer.take(),
            self.resize_timer.take(),
        ]
        .into_iter()
        .flatten()
        {
            self.scheduler.clear_timer(timer);
        }
        self.state = LoopState::TornDown;
        log::info!("[starfield] torn down");
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn streaks(&self) -> &Population<Streak> {
        &self.streaks
    }

    pub fn asteroids(&self) -> &Population<Asteroid> {
        &self.asteroids
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn surface_size(&self) -> Vec2 {
        self.surface_size
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &H {
        &self.scheduler
    }
}
