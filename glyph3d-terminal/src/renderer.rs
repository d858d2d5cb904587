/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor::MoveTo,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use glyph3d_core::{Color, ScreenPoint, Surface};
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Letter tones are dark; stretch their luma across the ramp
const LUMA_GAIN: f32 = 2.5;

/// Surface pixels per terminal row. Cells are roughly twice as tall as wide.
pub const CELL_ASPECT: f32 = 2.0;

const POINT_CHAR: char = 'o';
const EDGE_CHAR: char = '+';

/// Character-grid painting surface. Later draws overwrite earlier ones.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    background: Color,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            background: Color::rgb(0, 0, 0),
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::rgb(0, 0, 0); size],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    /// Surface size in pixels, as reported to the scene
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width as u32, (self.height as f32 * CELL_ASPECT) as u32)
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<(char, Color)> {
        if col >= self.width || row >= self.height {
            return None;
        }
        let idx = row * self.width + col;
        Some((self.char_buffer[idx], self.color_buffer[idx]))
    }

    fn plot(&mut self, x: f32, y: f32, character: char, color: Color) {
        let col = x.floor();
        let row = (y / CELL_ASPECT).floor();
        if col < 0.0 || row < 0.0 {
            return;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.width || row >= self.height {
            return;
        }
        let idx = row * self.width + col;
        self.char_buffer[idx] = character;
        self.color_buffer[idx] = color;
    }

    fn draw_line(&mut self, a: ScreenPoint, b: ScreenPoint, color: Color) {
        let dx = b.x - a.x;
        let dy = (b.y - a.y) / CELL_ASPECT;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.plot(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t, EDGE_CHAR, color);
        }
    }

    fn rasterize_triangle(
        &mut self,
        v0: ScreenPoint,
        v1: ScreenPoint,
        v2: ScreenPoint,
        character: char,
        color: Color,
    ) {
        // Bounding box in cells
        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
        let min_y = (v0.y.min(v1.y).min(v2.y) / CELL_ASPECT).floor() as i32;
        let max_y = (v0.y.max(v1.y).max(v2.y) / CELL_ASPECT).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = (y as f32 + 0.5) * CELL_ASPECT;

                if let Some((w0, w1, w2)) = barycentric(
                    (v0.x, v0.y),
                    (v1.x, v1.y),
                    (v2.x, v2.y),
                    (px, py),
                ) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let idx = y as usize * self.width + x as usize;
                        self.char_buffer[idx] = character;
                        self.color_buffer[idx] = color;
                    }
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.queue(SetBackgroundColor(to_terminal(self.background)))?;
        for y in 0..self.height {
            writer.queue(MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(to_terminal(self.color_buffer[idx])))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for AsciiRenderer {
    fn clear(&mut self, color: Color) {
        self.background = color;
        self.char_buffer.fill(' ');
        self.color_buffer.fill(color);
    }

    fn draw_point(&mut self, point: ScreenPoint, color: Color, _size: f32) {
        self.plot(point.x, point.y, POINT_CHAR, color);
    }

    fn stroke_polygon(&mut self, points: &[ScreenPoint], color: Color, _width: f32) {
        if points.len() < 2 {
            return;
        }
        for (i, &a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            self.draw_line(a, b, color);
        }
    }

    /// Fan triangulation; letter faces are convex quads
    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Color) {
        if points.len() < 3 {
            return;
        }
        let character = shade(color);
        for i in 1..points.len() - 1 {
            self.rasterize_triangle(points[0], points[i], points[i + 1], character, color);
        }
    }
}

/// Map a fill color to a ramp character by brightness
fn shade(color: Color) -> char {
    let last = LUMINOSITY_RAMP.len() - 1;
    let index = (color.luma() * LUMA_GAIN * last as f32) as usize;
    LUMINOSITY_RAMP[index.min(last)]
}

fn to_terminal(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
