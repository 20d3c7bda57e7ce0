use crate::constants::{HERO_SELECTOR, LIGHT_INITIAL, LIT_SELECTOR};
use crate::dom;
use crate::input::ParallaxState;
use crate::lighting;
use glam::Vec2;
use starfield_core::DeviceClass;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Track the pointer for star parallax. Constrained devices skip the update
/// entirely, so their stars ignore the pointer.
pub fn wire_parallax_pointer(window: &web::Window, parallax: Rc<RefCell<ParallaxState>>) {
    let wnd = window.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        if DeviceClass::from_viewport_width(dom::viewport(&wnd).width).is_constrained() {
            return;
        }
        let pointer = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        parallax.borrow_mut().pointer = Some(pointer);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn set_light(document: &web::Document, light: [f32; 2]) {
    let lx = lighting::percent(light[0]);
    let ly = lighting::percent(light[1]);
    for el in dom::html_elements(document, LIT_SELECTOR) {
        let style = el.style();
        _ = style.set_property("--lx", &lx);
        _ = style.set_property("--ly", &ly);
    }
}

/// Move the hero lighting with the pointer, at most once per animation
/// frame. Regular devices only.
pub fn wire_hero_lighting(window: &web::Window, document: &web::Document) {
    if DeviceClass::from_viewport_width(dom::viewport(window).width).is_constrained() {
        return;
    }
    let Ok(Some(hero)) = document.query_selector(HERO_SELECTOR) else {
        return;
    };
    set_light(document, LIGHT_INITIAL);

    let latest: Rc<Cell<Option<[f32; 2]>>> = Rc::new(Cell::new(None));
    let pending = Rc::new(Cell::new(false));

    let apply = {
        let latest = latest.clone();
        let pending = pending.clone();
        let document = document.clone();
        Closure::wrap(Box::new(move || {
            pending.set(false);
            if let Some(light) = latest.take() {
                set_light(&document, light);
            }
        }) as Box<dyn FnMut()>)
    };

    let wnd = window.clone();
    let hero_rect = hero.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let rect = hero_rect.get_bounding_client_rect();
        let local = [
            (ev.client_x() as f64 - rect.left()) as f32,
            (ev.client_y() as f64 - rect.top()) as f32,
        ];
        let size = [rect.width() as f32, rect.height() as f32];
        latest.set(lighting::light_position(local, size));
        if !pending.get() && wnd.request_animation_frame(apply.as_ref().unchecked_ref()).is_ok() {
            pending.set(true);
        }
    }) as Box<dyn FnMut(_)>);
    _ = hero.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
    closure.forget();
}
