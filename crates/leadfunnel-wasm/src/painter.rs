use leadfunnel_core::frame::{Rgb, Sprite};
use leadfunnel_core::geometry::{CalendarGeometry, FunnelGeometry};
use leadfunnel_core::render::Painter;
use std::f64::consts::TAU;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

const DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const CORNER_RADIUS: f64 = 12.0;

fn rgba(c: Rgb, alpha: f32) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        c.r.round() as u8,
        c.g.round() as u8,
        c.b.round() as u8,
        alpha.clamp(0.0, 1.0)
    )
}

fn teal(alpha: f32) -> String {
    format!("rgba(0, 212, 200, {})", alpha.clamp(0.0, 1.0))
}

fn glow(alpha: f32) -> String {
    format!("rgba(0, 255, 229, {})", alpha.clamp(0.0, 1.0))
}

/// [`Painter`] over a 2d canvas context. The context is expected to be
/// scaled by the device pixel ratio so all coordinates are CSS pixels.
pub struct CanvasPainter<'a> {
    ctx: &'a CanvasRenderingContext2d,
    error: Option<JsValue>,
}

impl<'a> CanvasPainter<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx, error: None }
    }

    /// First canvas error raised while drawing, if any.
    pub fn finish(self) -> Result<(), JsValue> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn check(&mut self, result: Result<(), JsValue>) {
        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
    }

    fn rounded_rect(&mut self, x: f64, y: f64, w: f64, h: f64, top_r: f64, bottom_r: f64) {
        let ctx = self.ctx;
        ctx.begin_path();
        ctx.move_to(x + top_r, y);
        let steps = [
            ctx.arc_to(x + w, y, x + w, y + h, top_r),
            ctx.arc_to(x + w, y + h, x, y + h, bottom_r),
            ctx.arc_to(x, y + h, x, y, bottom_r),
            ctx.arc_to(x, y, x + w, y, top_r),
        ];
        for step in steps {
            self.check(step);
        }
        ctx.close_path();
    }

    fn funnel_edge(&self, f: &FunnelGeometry, side: f64) {
        let ctx = self.ctx;
        let cx = f.center_x as f64;
        let top_w = f.top_half_width as f64;
        let mid_y = (f.top_y as f64 + f.bottom_y as f64) / 2.0;
        ctx.move_to(cx + side * top_w, f.top_y as f64);
        ctx.quadratic_curve_to(
            cx + side * top_w * 0.9,
            mid_y,
            cx + side * f.spout_half_width as f64,
            f.bottom_y as f64,
        );
    }
}

impl Painter for CanvasPainter<'_> {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn funnel(&mut self, f: &FunnelGeometry, opacity: f32) {
        let ctx = self.ctx;
        let cx = f.center_x as f64;
        let top_y = f.top_y as f64;
        let bottom_y = f.bottom_y as f64;
        let spout_y = f.spout_bottom_y as f64;
        let top_w = f.top_half_width as f64;
        let spout_w = f.spout_half_width as f64;

        let body = ctx.create_linear_gradient(cx, top_y, cx, spout_y);
        for (offset, color) in [
            (0.0, teal(0.06 * opacity)),
            (0.4, teal(0.04 * opacity)),
            (0.7, glow(0.08 * opacity)),
            (1.0, glow(0.12 * opacity)),
        ] {
            let r = body.add_color_stop(offset, &color);
            self.check(r);
        }
        ctx.set_fill_style_canvas_gradient(&body);

        // cone
        ctx.begin_path();
        self.funnel_edge(f, -1.0);
        ctx.line_to(cx + spout_w, bottom_y);
        ctx.quadratic_curve_to(cx + top_w * 0.9, (top_y + bottom_y) / 2.0, cx + top_w, top_y);
        ctx.close_path();
        ctx.fill();

        // spout
        ctx.begin_path();
        ctx.rect(cx - spout_w, bottom_y, spout_w * 2.0, spout_y - bottom_y);
        ctx.fill();

        ctx.set_stroke_style_str(&glow(0.4 * opacity));
        ctx.set_line_width(1.5);
        ctx.set_shadow_color("rgba(0, 255, 229, 0.5)");
        ctx.set_shadow_blur(8.0 * opacity as f64);
        for side in [-1.0, 1.0] {
            ctx.begin_path();
            self.funnel_edge(f, side);
            ctx.line_to(cx + side * spout_w, spout_y);
            ctx.stroke();
        }

        // rim
        ctx.set_stroke_style_str(&glow(0.5 * opacity));
        ctx.set_line_width(2.0);
        ctx.begin_path();
        let r = ctx.ellipse(cx, top_y, top_w.max(0.0), 15.0, 0.0, 0.0, TAU);
        self.check(r);
        ctx.stroke();
        ctx.set_shadow_blur(0.0);

        match ctx.create_radial_gradient(cx, spout_y, 0.0, cx, spout_y, spout_w * 2.0) {
            Ok(spot) => {
                for (offset, color) in [
                    (0.0, glow(0.3 * opacity)),
                    (0.5, teal(0.1 * opacity)),
                    (1.0, teal(0.0)),
                ] {
                    let r = spot.add_color_stop(offset, &color);
                    self.check(r);
                }
                ctx.set_fill_style_canvas_gradient(&spot);
                ctx.begin_path();
                let r = ctx.arc(cx, spout_y, spout_w * 2.0, 0.0, TAU);
                self.check(r);
                ctx.fill();
            }
            Err(e) => self.check(Err(e)),
        }
    }

    fn calendar(&mut self, cal: &CalendarGeometry, opacity: f32) {
        let ctx = self.ctx;
        let left = cal.left as f64;
        let top = cal.top as f64;
        let width = cal.width as f64;
        let height = cal.height as f64;
        let header = cal.header_height as f64;
        let cell_w = cal.cell_width as f64;
        let cell_h = cal.cell_height as f64;
        let grid_top = cal.grid_top() as f64;

        ctx.set_shadow_color("rgba(0, 255, 229, 0.4)");
        ctx.set_shadow_blur(20.0 * opacity as f64);
        let bg = ctx.create_linear_gradient(left, top, left, top + height);
        for (offset, color) in [
            (0.0, format!("rgba(15, 25, 35, {})", 0.95 * opacity)),
            (1.0, format!("rgba(10, 20, 30, {})", 0.98 * opacity)),
        ] {
            let r = bg.add_color_stop(offset, &color);
            self.check(r);
        }
        ctx.set_fill_style_canvas_gradient(&bg);
        self.rounded_rect(left, top, width, height, CORNER_RADIUS, CORNER_RADIUS);
        ctx.fill();
        ctx.set_stroke_style_str(&teal(0.5 * opacity));
        ctx.set_line_width(2.0);
        ctx.stroke();
        ctx.set_shadow_blur(0.0);

        ctx.set_fill_style_str(&teal(0.15 * opacity));
        self.rounded_rect(left, top, width, header, CORNER_RADIUS, 0.0);
        ctx.fill();

        ctx.set_fill_style_str(&glow(opacity));
        ctx.set_font("bold 18px system-ui, sans-serif");
        ctx.set_text_align("center");
        let r = ctx.fill_text("Your Calendar", cal.center_x() as f64, top + 28.0);
        self.check(r);

        ctx.set_font("13px system-ui, sans-serif");
        ctx.set_fill_style_str(&teal(0.7 * opacity));
        for (i, day) in DAYS.iter().take(cal.cols as usize).enumerate() {
            let r = ctx.fill_text(day, left + cell_w * i as f64 + cell_w / 2.0, top + header + 20.0);
            self.check(r);
        }

        ctx.set_stroke_style_str(&teal(0.15 * opacity));
        ctx.set_line_width(1.0);
        for i in 1..cal.cols {
            let x = left + i as f64 * cell_w;
            ctx.begin_path();
            ctx.move_to(x, grid_top);
            ctx.line_to(x, top + height);
            ctx.stroke();
        }
        for i in 0..cal.rows {
            let y = grid_top + i as f64 * cell_h;
            ctx.begin_path();
            ctx.move_to(left, y);
            ctx.line_to(left + width, y);
            ctx.stroke();
        }
    }

    fn lead(&mut self, sprite: &Sprite) {
        let ctx = self.ctx;
        let x = sprite.x as f64;
        let y = sprite.y as f64;
        let scale = sprite.size as f64 / 20.0;
        let color = sprite.color();
        let fill = rgba(color, sprite.opacity);

        if sprite.is_glowing() {
            ctx.set_shadow_color(&rgba(color, 0.8));
            ctx.set_shadow_blur(20.0);
        }
        ctx.set_fill_style_str(&fill);

        // head
        let head_r = 5.0 * scale;
        let head_y = y - 12.0 * scale;
        ctx.begin_path();
        let r = ctx.arc(x, head_y, head_r.max(0.0), 0.0, TAU);
        self.check(r);
        ctx.fill();

        // body
        let body_top = head_y + head_r + 2.0 * scale;
        let body_w = 10.0 * scale;
        let body_h = 14.0 * scale;
        ctx.begin_path();
        ctx.move_to(x - body_w / 2.0, body_top);
        ctx.line_to(x + body_w / 2.0, body_top);
        ctx.quadratic_curve_to(
            x + body_w / 2.0,
            body_top + body_h * 0.3,
            x + body_w * 0.35,
            body_top + body_h,
        );
        ctx.line_to(x - body_w * 0.35, body_top + body_h);
        ctx.quadratic_curve_to(x - body_w / 2.0, body_top + body_h * 0.3, x - body_w / 2.0, body_top);
        ctx.close_path();
        ctx.fill();

        // arms
        ctx.set_stroke_style_str(&fill);
        ctx.set_line_width(2.5 * scale);
        ctx.set_line_cap("round");
        for side in [-1.0, 1.0] {
            ctx.begin_path();
            ctx.move_to(x + side * body_w / 2.0, body_top + 2.0 * scale);
            ctx.line_to(x + side * (body_w / 2.0 + 4.0 * scale), body_top + 8.0 * scale);
            ctx.stroke();
        }

        ctx.set_shadow_blur(0.0);
    }
}
