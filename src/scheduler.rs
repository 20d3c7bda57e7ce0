use crate::WebStarfield;
use starfield_core::{FrameHandle, Scheduler, Task, TimerHandle};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// `requestAnimationFrame` plus window timers, calling back into the engine
/// through a weak reference so a late callback after drop is a no-op.
pub struct WindowScheduler {
    window: web::Window,
    frame_cb: Closure<dyn FnMut(f64)>,
    streak_cb: Closure<dyn FnMut()>,
    sprite_cb: Closure<dyn FnMut()>,
    resize_cb: Closure<dyn FnMut()>,
}

fn task_closure(engine: Weak<RefCell<WebStarfield>>, task: Task) -> Closure<dyn FnMut()> {
    Closure::wrap(Box::new(move || {
        let Some(engine) = engine.upgrade() else {
            return;
        };
        match engine.try_borrow_mut() {
            Ok(mut e) => e.run_task(task, instant::now()),
            Err(_) => log::debug!("[scheduler] {:?} skipped, engine busy", task),
        };
    }) as Box<dyn FnMut()>)
}

/// The frame fired while the engine was borrowed, so its callback is gone.
/// Re-arm once the current borrow has been released.
fn rearm_after_busy_frame(engine: Weak<RefCell<WebStarfield>>) {
    spawn_local(async move {
        let Some(engine) = engine.upgrade() else {
            return;
        };
        match engine.try_borrow_mut() {
            Ok(mut e) => e.frame_dropped(),
            Err(_) => log::warn!("[scheduler] frame dropped, engine still busy"),
        };
    });
}

impl WindowScheduler {
    pub fn new(window: web::Window, engine: Weak<RefCell<WebStarfield>>) -> Self {
        let frame_engine = engine.clone();
        let frame_cb = Closure::wrap(Box::new(move |timestamp: f64| {
            let Some(engine) = frame_engine.upgrade() else {
                return;
            };
            match engine.try_borrow_mut() {
                Ok(mut e) => e.frame(timestamp),
                Err(_) => rearm_after_busy_frame(Rc::downgrade(&engine)),
            };
        }) as Box<dyn FnMut(f64)>);
        Self {
            window,
            frame_cb,
            streak_cb: task_closure(engine.clone(), Task::SpawnStreak),
            sprite_cb: task_closure(engine.clone(), Task::SpawnSprite),
            resize_cb: task_closure(engine, Task::ResizeSettled),
        }
    }

    fn callback(&self, task: Task) -> &js_sys::Function {
        let cb = match task {
            Task::SpawnStreak => &self.streak_cb,
            Task::SpawnSprite => &self.sprite_cb,
            Task::ResizeSettled => &self.resize_cb,
        };
        cb.as_ref().unchecked_ref()
    }
}

impl Scheduler for WindowScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.window
            .request_animation_frame(self.frame_cb.as_ref().unchecked_ref())
            .map(FrameHandle)
            .map_err(|e| log::warn!("[scheduler] requestAnimationFrame: {:?}", e))
            .ok()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        _ = self.window.cancel_animation_frame(handle.0);
    }

    fn set_interval(&mut self, task: Task, period_ms: u32) -> Option<TimerHandle> {
        self.window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                self.callback(task),
                period_ms as i32,
            )
            .map(|id| TimerHandle {
                id,
                repeating: true,
            })
            .map_err(|e| log::warn!("[scheduler] setInterval {:?}: {:?}", task, e))
            .ok()
    }

    fn set_timeout(&mut self, task: Task, delay_ms: u32) -> Option<TimerHandle> {
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.callback(task),
                delay_ms as i32,
            )
            .map(|id| TimerHandle {
                id,
                repeating: false,
            })
            .map_err(|e| log::warn!("[scheduler] setTimeout {:?}: {:?}", task, e))
            .ok()
    }

    fn clear_timer(&mut self, handle: TimerHandle) {
        if handle.repeating {
            self.window.clear_interval_with_handle(handle.id);
        } else {
            self.window.clear_timeout_with_handle(handle.id);
        }
    }
}
