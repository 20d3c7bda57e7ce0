mod pointer;
mod viewport;

pub use pointer::*;
pub use viewport::*;

use crate::WebStarfield;
use std::cell::RefCell;
use std::rc::Weak;

/// Run `f` against the engine if it is still alive and not mid-frame.
fn with_engine(engine: &Weak<RefCell<WebStarfield>>, f: impl FnOnce(&mut WebStarfield)) {
    let Some(engine) = engine.upgrade() else {
        return;
    };
    match engine.try_borrow_mut() {
        Ok(mut e) => f(&mut e),
        Err(_) => log::debug!("[events] engine busy, event dropped"),
    };
}
