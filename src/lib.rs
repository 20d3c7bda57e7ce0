#![cfg(target_arch = "wasm32")]
use crate::constants::{CANVAS_ID, REDUCED_MOTION_QUERY, SPRITE_URL};
use crate::input::{ParallaxState, WindowInput};
use crate::scheduler::WindowScheduler;
use crate::surface::CanvasSurface;
use starfield_core::{SpriteImage, Starfield, StarfieldError};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

mod constants;
mod dom;
mod events;
mod input;
mod lighting;
mod scheduler;
mod surface;

pub(crate) type WebStarfield = Starfield<CanvasSurface, WindowInput, WindowScheduler>;

thread_local! {
    static STARFIELD: RefCell<Option<Rc<RefCell<WebStarfield>>>> = const { RefCell::new(None) };
}

/// Decode the sprite image off the critical path; failure turns the
/// decorative sprites off for the session.
fn load_sprite(image: web::HtmlImageElement, engine: Weak<RefCell<WebStarfield>>) {
    spawn_local(async move {
        let status = match JsFuture::from(image.decode()).await {
            Ok(_) => SpriteImage::Ready,
            Err(e) => {
                let err = StarfieldError::SpriteUnavailable(format!("{SPRITE_URL}: {e:?}"));
                log::warn!("{}", err);
                SpriteImage::Unavailable
            }
        };
        if let Some(engine) = engine.upgrade() {
            engine.borrow_mut().set_sprite_image(status);
        };
    });
}

fn init() -> anyhow::Result<Rc<RefCell<WebStarfield>>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas = dom::canvas_by_id(&document, CANVAS_ID)?;
    let ctx = dom::context_2d(&canvas)?;

    let sprite = web::HtmlImageElement::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    sprite.set_src(SPRITE_URL);

    let parallax = Rc::new(RefCell::new(ParallaxState::default()));
    let reduced_motion = dom::media_query(&window, REDUCED_MOTION_QUERY);
    let input = WindowInput::new(window.clone(), parallax.clone(), reduced_motion.clone());
    let surface = CanvasSurface::new(canvas, ctx, sprite.clone());
    let seed: u64 = rand::random();

    let engine = Rc::<RefCell<WebStarfield>>::new_cyclic(|weak| {
        let scheduler = WindowScheduler::new(window.clone(), weak.clone());
        RefCell::new(Starfield::new(surface, input, scheduler, seed))
    });

    events::wire_parallax_pointer(&window, parallax.clone());
    events::wire_scroll(&window, parallax);
    events::wire_resize(&window, Rc::downgrade(&engine));
    if let Some(query) = &reduced_motion {
        events::wire_reduced_motion(query, Rc::downgrade(&engine));
    }
    events::wire_hero_lighting(&window, &document);

    load_sprite(sprite, Rc::downgrade(&engine));
    engine.borrow_mut().boot();
    Ok(engine)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("starfield-web starting");

    if STARFIELD.with(|s| s.borrow().is_some()) {
        return Ok(());
    }
    match init() {
        Ok(engine) => STARFIELD.with(|s| *s.borrow_mut() = Some(engine)),
        // decorative only: the page carries on without it
        Err(e) => log::warn!("starfield disabled: {:?}", e),
    }
    Ok(())
}

/// Stop the frame loop and both spawn timers. Nothing restarts afterwards.
#[wasm_bindgen]
pub fn teardown() {
    if let Some(engine) = STARFIELD.with(|s| s.borrow_mut().take()) {
        engine.borrow_mut().teardown();
    }
}
