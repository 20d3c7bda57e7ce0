use starfield_core::{ScrollMetrics, StarfieldError, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn canvas_by_id(
    document: &web::Document,
    id: &str,
) -> Result<web::HtmlCanvasElement, StarfieldError> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
        .ok_or_else(|| StarfieldError::MissingSurface(id.to_string()))
}

pub fn context_2d(
    canvas: &web::HtmlCanvasElement,
) -> Result<web::CanvasRenderingContext2d, StarfieldError> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<web::CanvasRenderingContext2d>().ok())
        .ok_or(StarfieldError::MissingContext)
}

#[inline]
pub fn media_query(window: &web::Window, query: &str) -> Option<web::MediaQueryList> {
    window.match_media(query).ok().flatten()
}

pub fn viewport(window: &web::Window) -> Viewport {
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    Viewport {
        width: dim(window.inner_width()),
        height: dim(window.inner_height()),
        device_pixel_ratio: window.device_pixel_ratio() as f32,
    }
}

pub fn scroll_metrics(window: &web::Window) -> ScrollMetrics {
    let scroll_height = window
        .document()
        .and_then(|d| d.body())
        .map(|b| b.scroll_height() as f32)
        .unwrap_or(0.0);
    ScrollMetrics {
        offset: window.scroll_y().unwrap_or(0.0) as f32,
        scroll_height,
        viewport_height: viewport(window).height,
    }
}

/// Every element matching `selector` that is an `HtmlElement`.
pub fn html_elements(document: &web::Document, selector: &str) -> Vec<web::HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web::HtmlElement>().ok())
        .collect()
}
