use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use worksheet_core::{InkCanvas, InkStyle, Point};

use crate::utils::backing_size;

// Non-deprecated helper to set the stroke colour via property assignment.
pub fn set_stroke_style(ctx: &CanvasRenderingContext2d, color: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        &JsValue::from_str(color),
    );
}

/// On-screen ink: a pad's `<canvas>` with its 2D context. Drawn in CSS
/// pixels onto a backing store at the device pixel ratio.
pub struct WebInk {
    ctx: CanvasRenderingContext2d,
    css_size: (u32, u32),
}

impl WebInk {
    /// Sizes the backing store once; `css_w` and `css_h` are at least 1.
    pub fn new(
        canvas: &HtmlCanvasElement,
        css_w: u32,
        css_h: u32,
        dpr: f64,
    ) -> Result<Self, JsValue> {
        let (w, h) = backing_size(css_w as f64, css_h as f64, dpr);
        canvas.set_width(w);
        canvas.set_height(h);
        let ctx = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;
        ctx.scale(w as f64 / css_w as f64, h as f64 / css_h as f64)?;
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        Ok(WebInk {
            ctx,
            css_size: (css_w, css_h),
        })
    }
}

impl InkCanvas for WebInk {
    fn size(&self) -> (u32, u32) {
        self.css_size
    }

    fn segment(&mut self, from: Point, to: Point, style: &InkStyle) {
        self.ctx.set_line_width(style.width as f64);
        set_stroke_style(&self.ctx, &style.css_color());
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn clear(&mut self) {
        let (w, h) = self.css_size;
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }
}
