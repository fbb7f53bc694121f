use std::f64::consts::{FRAC_PI_2, TAU};

use log::error;
use shared::{Color, MultiplierSequence, ResultDisplay, Sound, WheelSurface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::NodeRef;

use super::sound::SoundBoard;

const RING_WIDTH: f64 = 0.22;
const POINTER_COLOR: &str = "#dc2626";
const SEPARATOR_COLOR: &str = "#111827";
// Swing of the pointer while the wheel turns, counter-clockwise
const POINTER_SWING: f64 = 0.35;

/// Draws the wheel onto a `<canvas>` and plays its sounds.
///
/// The core pushes state in through [`WheelSurface`]; nothing touches the DOM
/// until [`CanvasSurface::render`] is called from the animation frame.
pub struct CanvasSurface {
    canvas: NodeRef,
    sounds: SoundBoard,
    colors: Vec<Color>,
    rotation: f64,
    pointer_deflected: bool,
    result: Option<ResultDisplay>,
    result_scale: f64,
    dirty: bool,
}

impl CanvasSurface {
    pub fn new(canvas: NodeRef, sounds: SoundBoard) -> Self {
        Self {
            canvas,
            sounds,
            colors: Vec::new(),
            rotation: 0.0,
            pointer_deflected: false,
            result: None,
            result_scale: 0.0,
            dirty: true,
        }
    }

    fn context(&self) -> Option<(HtmlCanvasElement, CanvasRenderingContext2d)> {
        let canvas = self.canvas.cast::<HtmlCanvasElement>()?;
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some((canvas, context))
    }

    /// Repaints the canvas if anything changed since the last frame.
    pub fn render(&mut self) {
        if !self.dirty {
            return;
        }
        // Not mounted yet, try again next frame
        let Some((canvas, context)) = self.context() else {
            return;
        };
        self.dirty = false;
        if let Err(e) = self.paint(&context, canvas.width() as f64, canvas.height() as f64) {
            error!("Failed to draw wheel: {:?}", e);
        }
    }

    fn paint(&self, context: &CanvasRenderingContext2d, width: f64, height: f64) -> Result<(), JsValue> {
        let center_x = width / 2.0;
        let center_y = height / 2.0;
        let radius = width.min(height) / 2.0 - 20.0;

        context.clear_rect(0.0, 0.0, width, height);
        self.paint_segments(context, center_x, center_y, radius)?;
        self.paint_pointer(context, center_x, center_y - radius)?;
        self.paint_result(context, center_x, center_y)
    }

    fn paint_segments(
        &self,
        context: &CanvasRenderingContext2d,
        center_x: f64,
        center_y: f64,
        radius: f64,
    ) -> Result<(), JsValue> {
        if self.colors.is_empty() {
            return Ok(());
        }
        let inner = radius * (1.0 - RING_WIDTH);
        let arc = TAU / self.colors.len() as f64;

        context.save();
        context.translate(center_x, center_y)?;
        context.rotate(self.rotation)?;
        context.set_stroke_style_str(SEPARATOR_COLOR);
        context.set_line_width(2.0);

        for (i, color) in self.colors.iter().enumerate() {
            // Segment 0 starts at the top and segments run clockwise
            let start = i as f64 * arc - FRAC_PI_2;
            let end = start + arc;

            context.begin_path();
            context.arc(0.0, 0.0, radius, start, end)?;
            context.arc_with_anticlockwise(0.0, 0.0, inner, end, start, true)?;
            context.close_path();
            context.set_fill_style_str(color.hex());
            context.fill();
            context.stroke();
        }

        context.restore();
        Ok(())
    }

    fn paint_pointer(&self, context: &CanvasRenderingContext2d, x: f64, y: f64) -> Result<(), JsValue> {
        context.save();
        context.translate(x, y - 8.0)?;
        if self.pointer_deflected {
            context.rotate(-POINTER_SWING)?;
        }

        context.set_fill_style_str(POINTER_COLOR);
        context.begin_path();
        context.move_to(-10.0, 0.0);
        context.line_to(10.0, 0.0);
        context.line_to(0.0, 26.0);
        context.close_path();
        context.fill();

        context.begin_path();
        context.arc(0.0, 0.0, 10.0, 0.0, TAU)?;
        context.fill();

        context.restore();
        Ok(())
    }

    fn paint_result(&self, context: &CanvasRenderingContext2d, x: f64, y: f64) -> Result<(), JsValue> {
        let Some(result) = self.result.filter(|result| result.visible) else {
            return Ok(());
        };
        if self.result_scale <= 0.0 {
            return Ok(());
        }

        context.save();
        context.translate(x, y)?;
        context.scale(self.result_scale, self.result_scale)?;
        context.set_font("bold 36px sans-serif");
        context.set_text_align("center");
        context.set_text_baseline("middle");
        context.set_fill_style_str(result.color.hex());
        context.fill_text(&result.label(), 0.0, 0.0)?;
        context.restore();
        Ok(())
    }
}

impl WheelSurface for CanvasSurface {
    fn play_sound(&mut self, sound: Sound) {
        self.sounds.play(sound);
    }

    fn draw_segments(&mut self, sequence: &MultiplierSequence) {
        self.colors = (0..sequence.len()).filter_map(|i| sequence.color_at(i)).collect();
        self.dirty = true;
    }

    fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
        self.dirty = true;
    }

    fn set_pointer_deflected(&mut self, deflected: bool) {
        self.pointer_deflected = deflected;
        self.dirty = true;
    }

    fn draw_result(&mut self, result: Option<&ResultDisplay>, scale: f64) {
        self.result = result.copied();
        self.result_scale = scale;
        self.dirty = true;
    }
}
