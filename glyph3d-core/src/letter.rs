/// Parametric bar-built letter solids
use crate::geometry::{Color, Face};
use crate::transform::{Axis, Transform};
use crate::vector::Vec3;

/// Stroke thickness as a fraction of the letter height
pub const STROKE_RATIO: f32 = 0.2;

/// Three tones standing in for shading: front/back, side walls, caps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub face: Color,
    pub side: Color,
    pub cap: Color,
}

pub const LETTER_PALETTE: Palette = Palette {
    face: Color::rgb(0, 102, 204),
    side: Color::rgb(0, 82, 163),
    cap: Color::rgb(0, 61, 122),
};

/// Shape parameter that can be changed after construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterParam {
    Height,
    Width,
    Depth,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterParams {
    pub height: f32,
    pub width: f32,
    pub depth: f32,
    pub offset_x: f32,
}

impl LetterParams {
    pub fn new(height: f32, width: f32, depth: f32, offset_x: f32) -> Self {
        Self {
            height,
            width,
            depth,
            offset_x,
        }
    }

    pub fn stroke_thickness(&self) -> f32 {
        self.height * STROKE_RATIO
    }

    pub fn set(&mut self, param: LetterParam, value: f32) {
        match param {
            LetterParam::Height => self.height = value,
            LetterParam::Width => self.width = value,
            LetterParam::Depth => self.depth = value,
        }
    }
}

/// An axis-aligned rectangle in the glyph plane, later extruded along z
#[derive(Debug, Clone, Copy, PartialEq)]
struct Stroke {
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
}

impl Stroke {
    fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }
}

/// Glyph recipe selector. Each variant is a pure function of the shape
/// parameters; new glyphs are new variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// Top bar over two short verticals, a full-width crossbar and two legs
    M,
    /// Full-height left stem with top, middle and bottom bars and a short
    /// right stem closing the lower bowl
    B,
}

impl Glyph {
    pub fn name(self) -> &'static str {
        match self {
            Glyph::M => "M",
            Glyph::B => "B",
        }
    }

    fn strokes(self, params: &LetterParams) -> Vec<Stroke> {
        match self {
            Glyph::M => m_strokes(params),
            Glyph::B => b_strokes(params),
        }
    }

    /// Extrude every stroke into a closed prism
    pub fn build(self, params: &LetterParams, palette: &Palette) -> Geometry {
        let strokes = self.strokes(params);
        let mut geometry = Geometry::with_capacity(strokes.len());
        for stroke in &strokes {
            geometry.extrude(stroke, params.depth / 2.0, palette);
        }
        geometry
    }
}

fn m_strokes(p: &LetterParams) -> Vec<Stroke> {
    let t = p.stroke_thickness();
    let hw = p.width / 2.0;
    let ox = p.offset_x;
    let mid = p.height / 2.0;
    // The legs sit on the outer edges; the upper verticals step in by half a
    // stroke so the crossbar reads as a flared base. The top bar spans the
    // gap between the verticals so no two prisms overlap.
    let inset = t / 2.0;

    vec![
        Stroke::new(ox - hw + inset, ox - hw + inset + t, mid + t / 2.0, p.height),
        Stroke::new(ox + hw - inset - t, ox + hw - inset, mid + t / 2.0, p.height),
        Stroke::new(ox - hw + inset + t, ox + hw - inset - t, p.height - t, p.height),
        Stroke::new(ox - hw, ox + hw, mid - t / 2.0, mid + t / 2.0),
        Stroke::new(ox - hw, ox - hw + t, 0.0, mid - t / 2.0),
        Stroke::new(ox + hw - t, ox + hw, 0.0, mid - t / 2.0),
    ]
}

fn b_strokes(p: &LetterParams) -> Vec<Stroke> {
    let t = p.stroke_thickness();
    let hw = p.width / 2.0;
    let ox = p.offset_x;
    let mid = p.height / 2.0;

    vec![
        Stroke::new(ox - hw, ox - hw + t, 0.0, p.height),
        Stroke::new(ox - hw + t, ox + hw, p.height - t, p.height),
        Stroke::new(ox - hw + t, ox + hw, 0.0, t),
        Stroke::new(ox - hw + t, ox + hw, mid - t / 2.0, mid + t / 2.0),
        Stroke::new(ox + hw - t, ox + hw, 0.0, mid),
    ]
}

/// Vertex list plus faces; `face_indices[i]` lists the vertex indices of
/// `faces[i]` in winding order.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Face>,
    pub face_indices: Vec<Vec<usize>>,
}

impl Geometry {
    fn with_capacity(strokes: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(strokes * 8),
            faces: Vec::with_capacity(strokes * 6),
            face_indices: Vec::with_capacity(strokes * 6),
        }
    }

    /// Emit a prism: front, back, then the four walls starting at the top.
    /// Walls alternate cap and side tones. All normals point inward.
    fn extrude(&mut self, stroke: &Stroke, half_depth: f32, palette: &Palette) {
        let base = self.vertices.len();
        let outline = [
            (stroke.left, stroke.top),
            (stroke.right, stroke.top),
            (stroke.right, stroke.bottom),
            (stroke.left, stroke.bottom),
        ];
        for z in [-half_depth, half_depth] {
            for &(x, y) in &outline {
                self.vertices.push(Vec3::new(x, y, z));
            }
        }

        let front = |i: usize| base + i;
        let back = |i: usize| base + 4 + i;

        self.push_face(vec![front(0), front(3), front(2), front(1)], palette.face);
        self.push_face(vec![back(0), back(1), back(2), back(3)], palette.face);
        for i in 0..4 {
            let next = (i + 1) % 4;
            let color = if i % 2 == 0 { palette.cap } else { palette.side };
            self.push_face(vec![front(i), front(next), back(next), back(i)], color);
        }
    }

    fn push_face(&mut self, indices: Vec<usize>, color: Color) {
        let vertices = indices.iter().map(|&i| self.vertices[i]).collect();
        self.faces.push(Face::new(vertices, color));
        self.face_indices.push(indices);
    }

    /// Normalized sum of incident face normals per vertex, `+z` for a vertex
    /// no face touches
    pub fn vertex_normals(&self) -> Vec<Vec3> {
        let mut sums = vec![Vec3::ZERO; self.vertices.len()];
        let mut counts = vec![0usize; self.vertices.len()];
        for (face, indices) in self.faces.iter().zip(&self.face_indices) {
            for &i in indices {
                sums[i] += face.normal();
                counts[i] += 1;
            }
        }
        sums.into_iter()
            .zip(counts)
            .map(|(sum, count)| {
                if count > 0 {
                    sum.normalized()
                } else {
                    Vec3::new(0.0, 0.0, 1.0)
                }
            })
            .collect()
    }
}

/// A letter solid: shape parameters, generated geometry, and an accumulated
/// model transform with a uniform scale on top.
#[derive(Debug, Clone)]
pub struct SolidModel {
    glyph: Glyph,
    params: LetterParams,
    palette: Palette,
    geometry: Geometry,
    transform: Transform,
    scale: f32,
}

impl SolidModel {
    /// The model starts turned upside down about X so that the glyph's
    /// `+y` ends up pointing up on a y-down screen.
    pub fn new(glyph: Glyph, params: LetterParams, scale: f32) -> Self {
        let palette = LETTER_PALETTE;
        Self {
            glyph,
            params,
            palette,
            geometry: glyph.build(&params, &palette),
            transform: Self::upright(),
            scale,
        }
    }

    pub fn upright() -> Transform {
        Transform::rotation_x(180.0)
    }

    /// Regenerate vertices and faces from the current parameters. The
    /// transform and scale are kept.
    pub fn rebuild_geometry(&mut self) {
        self.geometry = self.glyph.build(&self.params, &self.palette);
    }

    pub fn set_param(&mut self, param: LetterParam, value: f32) {
        self.params.set(param, value);
        self.rebuild_geometry();
    }

    pub fn set_offset_x(&mut self, offset_x: f32) {
        self.params.offset_x = offset_x;
        self.rebuild_geometry();
    }

    /// Pre-multiply the stored transform: the new rotation applies after
    /// every rotation made so far.
    pub fn rotate(&mut self, axis: Axis, degrees: f32) {
        self.transform = Transform::rotation(axis, degrees) * self.transform;
    }

    /// Absolute, not cumulative
    pub fn set_scale(&mut self, factor: f32) {
        self.scale = factor;
    }

    pub fn glyph(&self) -> Glyph {
        self.glyph
    }

    pub fn params(&self) -> &LetterParams {
        &self.params
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.geometry.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.geometry.faces
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Local coordinates to scene coordinates, without any scene-wide transform
    pub fn model_transform(&self) -> Transform {
        self.transform * Transform::scaling(self.scale, self.scale, self.scale)
    }
}
