use crate::constants::{LIGHT_X_BASE, LIGHT_X_SPAN, LIGHT_Y_BASE, LIGHT_Y_SPAN};

/// Map a pointer position inside an element's rect to the light position
/// (percent) written into `--lx` / `--ly`.
#[inline]
pub fn light_position(local: [f32; 2], rect_size: [f32; 2]) -> Option<[f32; 2]> {
    let [w, h] = rect_size;
    if !(w > 0.0 && h > 0.0) {
        return None;
    }
    let nx = local[0] / w;
    let ny = local[1] / h;
    Some([LIGHT_X_BASE + nx * LIGHT_X_SPAN, LIGHT_Y_BASE + ny * LIGHT_Y_SPAN])
}

#[inline]
pub fn percent(value: f32) -> String {
    format!("{value}%")
}
