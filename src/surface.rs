use crate::constants::*;
use glam::Vec2;
use starfield_core::Surface;
use std::f64::consts::TAU;
use web_sys as web;

/// Draws the starfield onto a 2D canvas context.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    sprite: web::HtmlImageElement,
}

impl CanvasSurface {
    pub fn new(
        canvas: web::HtmlCanvasElement,
        ctx: web::CanvasRenderingContext2d,
        sprite: web::HtmlImageElement,
    ) -> Self {
        Self {
            canvas,
            ctx,
            sprite,
        }
    }

    fn segment(&self, from: Vec2, to: Vec2, width: f32, style: &str) {
        self.ctx.set_line_width(width as f64);
        self.ctx.set_stroke_style_str(style);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }
}

#[inline]
fn rgba(rgb: &str, alpha: f32) -> String {
    format!("rgba({rgb},{alpha:.3})")
}

impl Surface for CanvasSurface {
    fn resize(&mut self, backing_width: u32, backing_height: u32, css_width: f32, css_height: f32) {
        self.canvas.set_width(backing_width);
        self.canvas.set_height(backing_height);
        let style = self.canvas.style();
        _ = style.set_property("width", &format!("{css_width}px"));
        _ = style.set_property("height", &format!("{css_height}px"));
    }

    fn clear(&mut self, size: Vec2) {
        self.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn glow(&mut self, size: Vec2) {
        let (w, h) = (size.x as f64, size.y as f64);
        let gradient = match self.ctx.create_radial_gradient(
            w * GLOW_INNER_CENTER[0],
            h * GLOW_INNER_CENTER[1],
            0.0,
            w * GLOW_OUTER_CENTER[0],
            h * GLOW_OUTER_CENTER[1],
            w.max(h) * GLOW_OUTER_RADIUS,
        ) {
            Ok(g) => g,
            Err(e) => {
                log::debug!("[surface] glow gradient: {:?}", e);
                return;
            }
        };
        _ = gradient.add_color_stop(0.0, GLOW_INNER);
        _ = gradient.add_color_stop(1.0, GLOW_OUTER);
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, w, h);
    }

    fn star(&mut self, center: Vec2, radius: f32, alpha: f32) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_err()
        {
            return;
        }
        self.ctx.set_fill_style_str(&rgba(STAR_RGB, alpha));
        self.ctx.fill();
    }

    fn link(&mut self, from: Vec2, to: Vec2, width: f32, alpha: f32) {
        self.segment(from, to, width, &rgba(LINK_RGB, alpha));
    }

    fn streak(&mut self, head: Vec2, tail: Vec2, thickness: f32, alpha: f32) {
        self.segment(head, tail, thickness, &rgba(STREAK_RGB, alpha));
    }

    fn sprite(&mut self, center: Vec2, size: f32, rotation: f32, alpha: f32) {
        let half = size as f64 / 2.0;
        self.ctx.save();
        self.ctx.set_global_alpha(alpha as f64);
        let drawn = self
            .ctx
            .translate(center.x as f64, center.y as f64)
            .and_then(|_| self.ctx.rotate(rotation as f64))
            .and_then(|_| {
                self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    &self.sprite,
                    -half,
                    -half,
                    size as f64,
                    size as f64,
                )
            });
        if let Err(e) = drawn {
            log::debug!("[surface] sprite draw: {:?}", e);
        }
        self.ctx.restore();
    }
}
