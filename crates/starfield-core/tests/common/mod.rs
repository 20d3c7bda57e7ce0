// In-memory host doubles shared by the integration tests.

#![allow(dead_code)]

use glam::Vec2;
use starfield_core::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum Draw {
    Resize { backing: (u32, u32), css: (f32, f32) },
    Clear,
    Glow,
    Star { center: Vec2, radius: f32, alpha: f32 },
    Link { from: Vec2, to: Vec2, alpha: f32 },
    Streak { head: Vec2, alpha: f32 },
    Sprite { center: Vec2, alpha: f32 },
}

#[derive(Default)]
pub struct RecordingSurface {
    pub log: Vec<Draw>,
}

impl RecordingSurface {
    pub fn resizes(&self) -> usize {
        self.log
            .iter()
            .filter(|d| matches!(d, Draw::Resize { .. }))
            .count()
    }

    pub fn frames(&self) -> usize {
        self.log.iter().filter(|d| matches!(d, Draw::Clear)).count()
    }

    /// Commands issued since the most recent clear.
    pub fn last_frame(&self) -> &[Draw] {
        match self.log.iter().rposition(|d| matches!(d, Draw::Clear)) {
            Some(i) => &self.log[i..],
            None => &[],
        }
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, backing_width: u32, backing_height: u32, css_width: f32, css_height: f32) {
        self.log.push(Draw::Resize {
            backing: (backing_width, backing_height),
            css: (css_width, css_height),
        });
    }
    fn clear(&mut self, _size: Vec2) {
        self.log.push(Draw::Clear);
    }
    fn glow(&mut self, _size: Vec2) {
        self.log.push(Draw::Glow);
    }
    fn star(&mut self, center: Vec2, radius: f32, alpha: f32) {
        self.log.push(Draw::Star { center, radius, alpha });
    }
    fn link(&mut self, from: Vec2, to: Vec2, _width: f32, alpha: f32) {
        self.log.push(Draw::Link { from, to, alpha });
    }
    fn streak(&mut self, head: Vec2, _tail: Vec2, _thickness: f32, alpha: f32) {
        self.log.push(Draw::Streak { head, alpha });
    }
    fn sprite(&mut self, center: Vec2, _size: f32, _rotation: f32, alpha: f32) {
        self.log.push(Draw::Sprite { center, alpha });
    }
}

#[derive(Clone, Debug)]
pub struct Env {
    pub viewport: Viewport,
    pub pointer: Option<Vec2>,
    pub scroll: ScrollMetrics,
    pub reduced_motion: bool,
}

impl Env {
    pub fn desktop() -> Self {
        Self {
            viewport: Viewport {
                width: 1280.0,
                height: 720.0,
                device_pixel_ratio: 1.0,
            },
            pointer: None,
            scroll: ScrollMetrics::default(),
            reduced_motion: false,
        }
    }

    pub fn phone() -> Self {
        Self {
            viewport: Viewport {
                width: 390.0,
                height: 844.0,
                device_pixel_ratio: 3.0,
            },
            ..Self::desktop()
        }
    }
}

#[derive(Clone)]
pub struct ScriptedInput(pub Rc<RefCell<Env>>);

impl InputProvider for ScriptedInput {
    fn viewport(&self) -> Viewport {
        self.0.borrow().viewport
    }
    fn pointer(&self) -> Option<Vec2> {
        self.0.borrow().pointer
    }
    fn scroll(&self) -> ScrollMetrics {
        self.0.borrow().scroll
    }
    fn prefers_reduced_motion(&self) -> bool {
        self.0.borrow().reduced_motion
    }
}

#[derive(Clone, Debug)]
pub struct Timer {
    pub handle: TimerHandle,
    pub task: Task,
    pub period_ms: u32,
    pub due_ms: f64,
}

#[derive(Default)]
pub struct Clock {
    pub now_ms: f64,
    next_id: i32,
    pub frames: Vec<FrameHandle>,
    pub frame_requests: usize,
    pub timers: Vec<Timer>,
    pub cleared: Vec<TimerHandle>,
}

impl Clock {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn has_task(&self, task: Task) -> bool {
        self.timers.iter().any(|t| t.task == task)
    }
}

/// Scheduler over a virtual clock; tests drive it with [`pump`].
#[derive(Clone, Default)]
pub struct ManualScheduler(pub Rc<RefCell<Clock>>);

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let mut c = self.0.borrow_mut();
        let handle = FrameHandle(c.next_id());
        c.frames.push(handle);
        c.frame_requests += 1;
        Some(handle)
    }
    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.0.borrow_mut().frames.retain(|h| *h != handle);
    }
    fn set_interval(&mut self, task: Task, period_ms: u32) -> Option<TimerHandle> {
        let mut c = self.0.borrow_mut();
        let handle = TimerHandle {
            id: c.next_id(),
            repeating: true,
        };
        let due_ms = c.now_ms + period_ms as f64;
        c.timers.push(Timer {
            handle,
            task,
            period_ms,
            due_ms,
        });
        Some(handle)
    }
    fn set_timeout(&mut self, task: Task, delay_ms: u32) -> Option<TimerHandle> {
        let mut c = self.0.borrow_mut();
        let handle = TimerHandle {
            id: c.next_id(),
            repeating: false,
        };
        let due_ms = c.now_ms + delay_ms as f64;
        c.timers.push(Timer {
            handle,
            task,
            period_ms: delay_ms,
            due_ms,
        });
        Some(handle)
    }
    fn clear_timer(&mut self, handle: TimerHandle) {
        let mut c = self.0.borrow_mut();
        c.timers.retain(|t| t.handle != handle);
        c.cleared.push(handle);
    }
}

pub type TestStarfield = Starfield<RecordingSurface, ScriptedInput, ManualScheduler>;

pub struct Harness {
    pub engine: TestStarfield,
    pub env: Rc<RefCell<Env>>,
    pub clock: Rc<RefCell<Clock>>,
}

impl Harness {
    pub fn new(env: Env, seed: u64) -> Self {
        let env = Rc::new(RefCell::new(env));
        let scheduler = ManualScheduler::default();
        let clock = scheduler.0.clone();
        let engine = Starfield::new(
            RecordingSurface::default(),
            ScriptedInput(env.clone()),
            scheduler,
            seed,
        );
        Self { engine, env, clock }
    }

    pub fn booted(env: Env, seed: u64) -> Self {
        let mut h = Self::new(env, seed);
        h.engine.boot();
        h
    }

    pub fn now(&self) -> f64 {
        self.clock.borrow().now_ms
    }

    pub fn outstanding_frames(&self) -> usize {
        self.clock.borrow().frames.len()
    }

    /// Advance virtual time to `until_ms` in `step_ms` ticks, firing due
    /// timers first and then any outstanding frame callback at each tick.
    pub fn pump(&mut self, until_ms: f64, step_ms: f64) {
        while self.now() < until_ms {
            let now = (self.now() + step_ms).min(until_ms);
            self.clock.borrow_mut().now_ms = now;

            loop {
                let due = {
                    let mut c = self.clock.borrow_mut();
                    let pos = c
                        .timers
                        .iter()
                        .enumerate()
                        .filter(|(_, t)| t.due_ms <= now)
                        .min_by(|a, b| a.1.due_ms.total_cmp(&b.1.due_ms))
                        .map(|(i, _)| i);
                    pos.map(|i| {
                        let t = c.timers[i].clone();
                        if t.handle.repeating {
                            c.timers[i].due_ms += t.period_ms.max(1) as f64;
                        } else {
                            c.timers.remove(i);
                        }
                        (t.task, t.due_ms)
                    })
                };
                match due {
                    Some((task, at)) => self.engine.run_task(task, at),
                    None => break,
                }
            }

            let fired = !self.clock.borrow_mut().frames.is_empty();
            if fired {
                self.clock.borrow_mut().frames.clear();
                self.engine.frame(now);
            }
        }
    }
}
