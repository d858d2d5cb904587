/// Glyph3D Web - WASM bindings painting the scene onto a 2D canvas
///
/// Exposes the scene command surface to JavaScript. Commands that name an
/// axis, letter or mode take short strings ("x", "a", "filled").

use glyph3d_core::{
    Axis, Color, Command, DisplayMode, LetterId, LetterParam, Scene, SceneConfig, ScreenPoint,
    Surface,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Canvas-backed painting surface
struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface<'_> {
    fn trace(&self, points: &[ScreenPoint]) {
        self.ctx.begin_path();
        for (i, p) in points.iter().enumerate() {
            if i == 0 {
                self.ctx.move_to(p.x as f64, p.y as f64);
            } else {
                self.ctx.line_to(p.x as f64, p.y as f64);
            }
        }
        self.ctx.close_path();
    }
}

#[allow(deprecated)]
impl Surface for CanvasSurface<'_> {
    fn clear(&mut self, color: Color) {
        self.ctx.set_fill_style(&JsValue::from_str(&color.to_hex()));
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn draw_point(&mut self, point: ScreenPoint, color: Color, size: f32) {
        let size = size as f64;
        self.ctx.set_fill_style(&JsValue::from_str(&color.to_hex()));
        self.ctx
            .fill_rect(point.x as f64 - size / 2.0, point.y as f64 - size / 2.0, size, size);
    }

    fn stroke_polygon(&mut self, points: &[ScreenPoint], color: Color, width: f32) {
        if points.len() < 2 {
            return;
        }
        self.trace(points);
        self.ctx.set_line_width(width as f64);
        self.ctx.set_stroke_style(&JsValue::from_str(&color.to_hex()));
        self.ctx.stroke();
    }

    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Color) {
        if points.len() < 3 {
            return;
        }
        self.trace(points);
        self.ctx.set_fill_style(&JsValue::from_str(&color.to_hex()));
        self.ctx.fill();
    }
}

#[wasm_bindgen]
pub struct WebRenderer {
    scene: Scene,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Bind to the canvas with id `canvas_id`
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebRenderer, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{canvas_id}'")))?
            .dyn_into::<HtmlCanvasElement>()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let scene = Scene::with_config(SceneConfig::default(), canvas.width(), canvas.height());
        log::info!("bound to canvas '{canvas_id}' ({}x{})", canvas.width(), canvas.height());
        Ok(WebRenderer { scene, canvas, ctx })
    }

    /// Paint the current frame
    pub fn render(&mut self) {
        let mut surface = CanvasSurface {
            ctx: &self.ctx,
            width: self.canvas.width() as f64,
            height: self.canvas.height() as f64,
        };
        self.scene.render().paint(&mut surface);
    }

    pub fn rotate_letter(&mut self, letter: &str, axis: &str, degrees: f32) -> Result<(), JsValue> {
        let command = Command::RotateLetter {
            letter: parse_letter(letter)?,
            axis: parse_axis(axis)?,
            degrees,
        };
        self.scene.apply(command);
        Ok(())
    }

    pub fn scale_letter(&mut self, letter: &str, factor: f32) -> Result<(), JsValue> {
        let letter = parse_letter(letter)?;
        self.scene.apply(Command::ScaleLetter { letter, factor });
        Ok(())
    }

    pub fn set_letter_param(
        &mut self,
        letter: &str,
        param: &str,
        value: f32,
    ) -> Result<(), JsValue> {
        let command = Command::SetLetterParam {
            letter: parse_letter(letter)?,
            param: parse_param(param)?,
            value,
        };
        self.scene.apply(command);
        Ok(())
    }

    pub fn rotate_camera(&mut self, axis: &str, degrees: f32) -> Result<(), JsValue> {
        let axis = parse_axis(axis)?;
        self.scene.apply(Command::RotateCamera { axis, degrees });
        Ok(())
    }

    pub fn toggle_mirror(&mut self, axis: &str) -> Result<(), JsValue> {
        let axis = parse_axis(axis)?;
        self.scene.apply(Command::ToggleMirror(axis));
        Ok(())
    }

    pub fn set_display_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = parse_mode(mode)?;
        self.scene.apply(Command::SetDisplayMode(mode));
        Ok(())
    }

    pub fn reset(&mut self) {
        self.scene.apply(Command::Reset);
    }

    /// Call after changing the canvas size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.scene.apply(Command::Resize { width, height });
    }
}

fn parse_letter(name: &str) -> Result<LetterId, JsValue> {
    match name {
        "a" | "A" => Ok(LetterId::A),
        "b" | "B" => Ok(LetterId::B),
        _ => Err(JsValue::from_str(&format!("unknown letter '{name}'"))),
    }
}

fn parse_axis(name: &str) -> Result<Axis, JsValue> {
    match name {
        "x" | "X" => Ok(Axis::X),
        "y" | "Y" => Ok(Axis::Y),
        "z" | "Z" => Ok(Axis::Z),
        _ => Err(JsValue::from_str(&format!("unknown axis '{name}'"))),
    }
}

fn parse_param(name: &str) -> Result<LetterParam, JsValue> {
    match name {
        "height" => Ok(LetterParam::Height),
        "width" => Ok(LetterParam::Width),
        "depth" => Ok(LetterParam::Depth),
        _ => Err(JsValue::from_str(&format!("unknown parameter '{name}'"))),
    }
}

fn parse_mode(name: &str) -> Result<DisplayMode, JsValue> {
    DisplayMode::ALL
        .into_iter()
        .find(|mode| mode.label() == name)
        .ok_or_else(|| JsValue::from_str(&format!("unknown display mode '{name}'")))
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_log::init_with_level(log::Level::Warn).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(())
}
