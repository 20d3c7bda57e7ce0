use crate::dom;
use glam::Vec2;
use starfield_core::{InputProvider, ScrollMetrics, Viewport};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Latest pointer and scroll readings, written by window listeners and read
/// once per frame.
#[derive(Default, Clone, Copy)]
pub struct ParallaxState {
    pub pointer: Option<Vec2>,
    pub scroll: ScrollMetrics,
}

pub struct WindowInput {
    window: web::Window,
    parallax: Rc<RefCell<ParallaxState>>,
    reduced_motion: Option<web::MediaQueryList>,
}

impl WindowInput {
    pub fn new(
        window: web::Window,
        parallax: Rc<RefCell<ParallaxState>>,
        reduced_motion: Option<web::MediaQueryList>,
    ) -> Self {
        Self {
            window,
            parallax,
            reduced_motion,
        }
    }
}

impl InputProvider for WindowInput {
    fn viewport(&self) -> Viewport {
        dom::viewport(&self.window)
    }

    fn pointer(&self) -> Option<Vec2> {
        self.parallax.borrow().pointer
    }

    fn scroll(&self) -> ScrollMetrics {
        self.parallax.borrow().scroll
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
            .as_ref()
            .map(|mql| mql.matches())
            .unwrap_or(false)
    }
}
