//! [`Surface`] over a browser 2D canvas context.

use std::f64::consts::TAU;

use flow_field_core::{Color, FlowError, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Looks up the canvas element by id and acquires its 2D context.
    ///
    /// Returns `FlowError::MissingHostCapability` if the element is missing,
    /// is not a canvas, or has no 2D context.
    pub fn from_id(document: &Document, id: &str) -> Result<Self, FlowError> {
        let missing = |what: &str| FlowError::MissingHostCapability(format!("{what} (#{id})"));
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(id)
            .ok_or_else(|| missing("canvas element"))?
            .dyn_into()
            .map_err(|_| missing("element is not a canvas"))?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or_else(|| missing("2d context"))?
            .dyn_into()
            .map_err(|_| missing("2d context"))?;
        Ok(Self { canvas, ctx })
    }

    /// Sets the canvas backing-store size. Resizing clears the canvas.
    pub fn set_size(&self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
    }

    #[allow(deprecated)]
    fn set_fill(&self, color: Color) {
        self.ctx.set_fill_style(&JsValue::from_str(&color.to_css()));
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        self.set_fill(color);
        self.ctx.fill_rect(x, y, w, h);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        self.set_fill(color);
        self.ctx.begin_path();
        if self.ctx.arc(x, y, radius, 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
    }
}
