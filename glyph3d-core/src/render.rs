/// Draw primitives handed to a painting surface
use crate::geometry::Color;
use crate::projection::ScreenPoint;
use crate::scene::LetterId;
use crate::vector::Vec3;

/// Background painted before every frame
pub const BACKGROUND: Color = Color::rgb(0, 0, 255);

pub const POINT_SIZE: f32 = 5.0;
pub const WIREFRAME_WIDTH: f32 = 2.0;
pub const OUTLINE_WIDTH: f32 = 1.0;

/// How cached polygons are painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayMode {
    Points,
    Wireframe,
    #[default]
    Filled,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [
        DisplayMode::Points,
        DisplayMode::Wireframe,
        DisplayMode::Filled,
    ];

    pub fn next(self) -> Self {
        match self {
            DisplayMode::Points => DisplayMode::Wireframe,
            DisplayMode::Wireframe => DisplayMode::Filled,
            DisplayMode::Filled => DisplayMode::Points,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DisplayMode::Points => "points",
            DisplayMode::Wireframe => "wireframe",
            DisplayMode::Filled => "filled",
        }
    }
}

/// One projected face in the render cache
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPolygon {
    /// Mean camera-space z of the face's vertices
    pub depth: f32,
    pub letter: LetterId,
    pub face_index: usize,
    pub color: Color,
    pub points: Vec<ScreenPoint>,
    pub vertex_normals: Vec<Vec3>,
}

/// Sort far to near; later entries overpaint earlier ones
pub fn sort_far_to_near(polygons: &mut [DrawPolygon]) {
    polygons.sort_by(|a, b| b.depth.total_cmp(&a.depth));
}

/// The painting collaborator. Implementations only put pixels down; order
/// and culling are already settled by the frame.
pub trait Surface {
    fn clear(&mut self, color: Color);
    fn draw_point(&mut self, point: ScreenPoint, color: Color, size: f32);
    fn stroke_polygon(&mut self, points: &[ScreenPoint], color: Color, width: f32);
    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Color);
}

/// A depth-sorted view of the render cache
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub mode: DisplayMode,
    pub polygons: &'a [DrawPolygon],
}

impl<'a> Frame<'a> {
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// `(points, color, mode)` in draw order
    pub fn commands(self) -> impl Iterator<Item = (&'a [ScreenPoint], Color, DisplayMode)> + 'a {
        let mode = self.mode;
        self.polygons
            .iter()
            .map(move |p| (p.points.as_slice(), p.color, mode))
    }

    pub fn paint<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear(BACKGROUND);
        for polygon in self.polygons {
            match self.mode {
                DisplayMode::Points => {
                    for &point in &polygon.points {
                        surface.draw_point(point, polygon.color, POINT_SIZE);
                    }
                }
                DisplayMode::Wireframe => {
                    surface.stroke_polygon(&polygon.points, polygon.color, WIREFRAME_WIDTH);
                }
                DisplayMode::Filled => {
                    surface.fill_polygon(&polygon.points, polygon.color);
                    surface.stroke_polygon(&polygon.points, polygon.color, OUTLINE_WIDTH);
                }
            }
        }
    }
}
