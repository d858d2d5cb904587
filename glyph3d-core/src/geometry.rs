/// Geometry primitives for 3D rendering
use crate::vector::Vec3;

/// Flat RGB fill color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived brightness in `[0, 1]`
    pub fn luma(&self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }

    /// `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Whether a face at `centroid` with `normal` faces a viewer at `eye`.
///
/// Faces wind so that their normals point into the solid, so a face is seen
/// from the front when the normal runs along the view direction.
pub fn faces_viewer(normal: Vec3, centroid: Vec3, eye: Vec3) -> bool {
    let view_dir = (centroid - eye).normalized();
    normal.dot(view_dir) > 0.0
}

/// A planar polygon with a flat color.
///
/// Normal and centroid are derived once at construction. A face is never
/// edited in place; regenerated geometry produces new faces.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    vertices: Vec<Vec3>,
    color: Color,
    normal: Vec3,
    centroid: Vec3,
}

impl Face {
    pub fn new(vertices: Vec<Vec3>, color: Color) -> Self {
        let normal = Self::calculate_normal(&vertices);
        let centroid = Vec3::mean(&vertices);
        Self {
            vertices,
            color,
            normal,
            centroid,
        }
    }

    /// Normalized `(v1 - v0) x (v2 - v0)`; zero with fewer than 3 vertices
    fn calculate_normal(vertices: &[Vec3]) -> Vec3 {
        if vertices.len() < 3 {
            return Vec3::ZERO;
        }
        let edge1 = vertices[1] - vertices[0];
        let edge2 = vertices[2] - vertices[0];
        edge1.cross(edge2).normalized()
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn centroid(&self) -> Vec3 {
        self.centroid
    }

    /// Fewer than 3 vertices
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Roberts' visibility test against a camera position
    pub fn is_visible(&self, camera_pos: Vec3) -> bool {
        faces_viewer(self.normal, self.centroid, camera_pos)
    }
}

/// Per-face visibility strategy applied while the render cache is rebuilt.
///
/// Inputs are in camera space, where the eye sits at the origin.
pub trait FaceCulling {
    fn keep(&self, normal: Vec3, centroid: Vec3) -> bool;
}

/// Draws every face and leaves occlusion to the depth sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepAllFaces;

impl FaceCulling for KeepAllFaces {
    fn keep(&self, _normal: Vec3, _centroid: Vec3) -> bool {
        true
    }
}

/// Drops faces that point away from the eye.
#[derive(Debug, Clone, Copy, Default)]
pub struct RobertsCulling;

impl FaceCulling for RobertsCulling {
    fn keep(&self, normal: Vec3, centroid: Vec3) -> bool {
        faces_viewer(normal, centroid, Vec3::ZERO)
    }
}
