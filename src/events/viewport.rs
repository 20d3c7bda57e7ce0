use super::with_engine;
use crate::dom;
use crate::input::ParallaxState;
use crate::WebStarfield;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_scroll(window: &web::Window, parallax: Rc<RefCell<ParallaxState>>) {
    parallax.borrow_mut().scroll = dom::scroll_metrics(window);
    let wnd = window.clone();
    let closure = Closure::wrap(Box::new(move || {
        parallax.borrow_mut().scroll = dom::scroll_metrics(&wnd);
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn wire_resize(window: &web::Window, engine: Weak<RefCell<WebStarfield>>) {
    let closure = Closure::wrap(Box::new(move || {
        with_engine(&engine, |e| e.on_resize());
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn wire_reduced_motion(query: &web::MediaQueryList, engine: Weak<RefCell<WebStarfield>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::MediaQueryListEvent| {
        let reduced = ev.matches();
        log::info!("[events] reduced motion -> {}", reduced);
        with_engine(&engine, |e| e.set_reduced_motion(reduced));
    }) as Box<dyn FnMut(_)>);
    _ = query.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
    closure.forget();
}
