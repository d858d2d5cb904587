/// Two-letter scene with a lazily rebuilt, depth-sorted render cache
use log::{debug, trace};

use crate::config::SceneConfig;
use crate::geometry::{FaceCulling, KeepAllFaces};
use crate::letter::{LetterParam, SolidModel};
use crate::projection::{Camera, Projection, ScreenPoint, OFF_SCREEN};
use crate::render::{sort_far_to_near, DisplayMode, DrawPolygon, Frame};
use crate::transform::{Axis, Transform};
use crate::vector::Vec3;

/// Which of the two letters a command targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterId {
    A,
    B,
}

impl LetterId {
    pub const ALL: [LetterId; 2] = [LetterId::A, LetterId::B];

    pub fn index(self) -> usize {
        match self {
            LetterId::A => 0,
            LetterId::B => 1,
        }
    }
}

/// Every state change a control panel can ask for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    RotateLetter {
        letter: LetterId,
        axis: Axis,
        degrees: f32,
    },
    ScaleLetter {
        letter: LetterId,
        factor: f32,
    },
    SetLetterParam {
        letter: LetterId,
        param: LetterParam,
        value: f32,
    },
    RotateCamera {
        axis: Axis,
        degrees: f32,
    },
    ToggleMirror(Axis),
    SetDisplayMode(DisplayMode),
    Reset,
    Resize {
        width: u32,
        height: u32,
    },
}

#[derive(Debug, Default)]
struct RenderCache {
    polygons: Vec<DrawPolygon>,
    valid: bool,
    generation: u64,
}

/// Owns the letters, the camera and the render cache.
///
/// Mutations only mark the cache stale. Projection and sorting run once, on
/// the first `render` after any number of mutations.
pub struct Scene {
    config: SceneConfig,
    letters: [SolidModel; 2],
    camera: Camera,
    object_transform: Transform,
    mirror: [bool; 3],
    display_mode: DisplayMode,
    projection: Projection,
    culling: Box<dyn FaceCulling>,
    cache: RenderCache,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_config(SceneConfig::default(), width, height)
    }

    pub fn with_config(config: SceneConfig, width: u32, height: u32) -> Self {
        let mut projection = Projection::new(
            config.focal,
            config.depth_offset,
            config.reference_size,
            config.auto_scale,
            config.base_scale,
        );
        projection.resize(width, height);

        Self {
            letters: [config.letters[0].build(), config.letters[1].build()],
            camera: config.camera(),
            object_transform: Transform::identity(),
            mirror: [false; 3],
            display_mode: config.display_mode,
            projection,
            culling: Box::new(KeepAllFaces),
            cache: RenderCache::default(),
            config,
        }
    }

    /// Replace the face culling strategy
    pub fn with_culling(mut self, culling: Box<dyn FaceCulling>) -> Self {
        self.set_culling(culling);
        self
    }

    pub fn set_culling(&mut self, culling: Box<dyn FaceCulling>) {
        self.culling = culling;
        self.invalidate();
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::RotateLetter {
                letter,
                axis,
                degrees,
            } => self.rotate_letter(letter, axis, degrees),
            Command::ScaleLetter { letter, factor } => self.scale_letter(letter, factor),
            Command::SetLetterParam {
                letter,
                param,
                value,
            } => self.set_letter_param(letter, param, value),
            Command::RotateCamera { axis, degrees } => self.rotate_camera(axis, degrees),
            Command::ToggleMirror(axis) => self.toggle_mirror(axis),
            Command::SetDisplayMode(mode) => self.set_display_mode(mode),
            Command::Reset => self.reset(),
            Command::Resize { width, height } => self.notify_resize(width, height),
        }
    }

    pub fn rotate_letter(&mut self, letter: LetterId, axis: Axis, degrees: f32) {
        trace!("rotate letter {letter:?} about {axis:?} by {degrees}");
        self.letters[letter.index()].rotate(axis, degrees);
        self.invalidate();
    }

    /// Absolute scale; `factor` must be positive
    pub fn scale_letter(&mut self, letter: LetterId, factor: f32) {
        trace!("scale letter {letter:?} to {factor}");
        self.letters[letter.index()].set_scale(factor);
        self.invalidate();
    }

    /// Rebuilds the letter's geometry; `value` must be positive
    pub fn set_letter_param(&mut self, letter: LetterId, param: LetterParam, value: f32) {
        trace!("set letter {letter:?} {param:?} to {value}");
        self.letters[letter.index()].set_param(param, value);
        self.invalidate();
    }

    pub fn rotate_camera(&mut self, axis: Axis, degrees: f32) {
        trace!("rotate camera about {axis:?} by {degrees}");
        self.camera.rotate(axis, degrees);
        self.invalidate();
    }

    /// Flip one mirror flag and rebuild the object transform from all three
    pub fn toggle_mirror(&mut self, axis: Axis) {
        let flag = &mut self.mirror[axis.index()];
        *flag = !*flag;
        trace!("mirror {axis:?} {}", if *flag { "on" } else { "off" });

        let sign = |mirrored: bool| if mirrored { -1.0 } else { 1.0 };
        self.object_transform = Transform::scaling(
            sign(self.mirror[0]),
            sign(self.mirror[1]),
            sign(self.mirror[2]),
        );
        self.invalidate();
    }

    /// Display mode is applied at draw time and leaves the cache alone
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        trace!("display mode {}", mode.label());
        self.display_mode = mode;
    }

    /// Restore letters, camera, mirrors and display mode to their
    /// construction-time values
    pub fn reset(&mut self) {
        trace!("reset");
        self.letters = [self.config.letters[0].build(), self.config.letters[1].build()];
        self.camera = self.config.camera();
        self.object_transform = Transform::identity();
        self.mirror = [false; 3];
        self.display_mode = self.config.display_mode;
        if !self.projection.auto_scale {
            self.projection.set_base_scale(self.config.base_scale);
        }
        self.invalidate();
    }

    pub fn notify_resize(&mut self, width: u32, height: u32) {
        trace!("resize to {width}x{height}");
        self.projection.resize(width, height);
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.cache.valid = false;
    }

    /// Depth-sorted polygons for the current state, rebuilt only when stale
    pub fn render(&mut self) -> Frame<'_> {
        if !self.cache.valid {
            self.rebuild_cache();
        }
        Frame {
            mode: self.display_mode,
            polygons: &self.cache.polygons,
        }
    }

    fn rebuild_cache(&mut self) {
        let view = self.camera.view_transform();
        let total: usize = self.letters.iter().map(|l| l.faces().len()).sum();
        let mut polygons = Vec::with_capacity(total);

        for id in LetterId::ALL {
            self.project_letter(id, &view, &mut polygons);
        }
        sort_far_to_near(&mut polygons);

        let culled = total - polygons.len();
        self.cache.polygons = polygons;
        self.cache.valid = true;
        self.cache.generation += 1;
        debug!(
            "render cache rebuilt: generation {}, {} faces drawn, {} culled",
            self.cache.generation,
            self.cache.polygons.len(),
            culled
        );
    }

    fn project_letter(&self, id: LetterId, view: &Transform, out: &mut Vec<DrawPolygon>) {
        let letter = &self.letters[id.index()];
        let geometry = letter.geometry();
        let model = self.object_transform * letter.model_transform();

        // Approximate normal matrix: exact only while the combined transform
        // is a rotation (or reflection) with uniform scale.
        let scale = letter.scale();
        let inv_scale = if scale != 0.0 { 1.0 / scale } else { 1.0 };
        let combined = self.object_transform * *letter.transform();
        let normal_transform = Transform::from_linear_block(combined.linear_block() * inv_scale);

        let camera_vertices: Vec<Vec3> = geometry
            .vertices
            .iter()
            .map(|&v| view.transform_point(model.transform_point(v)))
            .collect();
        let vertex_normals: Vec<Vec3> = geometry
            .vertex_normals()
            .into_iter()
            .map(|n| normal_transform.transform_direction(n).normalized())
            .collect();

        for (face_index, (face, indices)) in geometry
            .faces
            .iter()
            .zip(&geometry.face_indices)
            .enumerate()
        {
            if face.is_degenerate() {
                continue;
            }
            let corners: Vec<Vec3> = indices.iter().map(|&i| camera_vertices[i]).collect();
            if corners.iter().any(|v| v.z <= 0.0) {
                continue;
            }

            let centroid = Vec3::mean(&corners);
            let normal = view
                .transform_direction(normal_transform.transform_direction(face.normal()))
                .normalized();
            if !self.culling.keep(normal, centroid) {
                continue;
            }

            let points: Option<Vec<ScreenPoint>> =
                corners.iter().map(|&v| self.projection.project(v)).collect();
            let Some(points) = points else {
                continue;
            };

            out.push(DrawPolygon {
                depth: centroid.z,
                letter: id,
                face_index,
                color: face.color(),
                points,
                vertex_normals: indices.iter().map(|&i| vertex_normals[i]).collect(),
            });
        }
    }

    /// Project one scene-space point through the object transform, the
    /// camera and the perspective mapping. Points at or behind the camera
    /// plane map to `OFF_SCREEN`.
    pub fn project_point(&self, point: Vec3) -> ScreenPoint {
        self.project_point_without_object_transform(self.object_transform.transform_point(point))
    }

    pub fn project_point_without_object_transform(&self, point: Vec3) -> ScreenPoint {
        let v = self.camera.view_transform().transform_point(point);
        self.projection.project(v).unwrap_or(OFF_SCREEN)
    }

    pub fn letter(&self, id: LetterId) -> &SolidModel {
        &self.letters[id.index()]
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn object_transform(&self) -> &Transform {
        &self.object_transform
    }

    pub fn is_mirrored(&self, axis: Axis) -> bool {
        self.mirror[axis.index()]
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn base_scale(&self) -> f32 {
        self.projection.base_scale()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn is_cache_valid(&self) -> bool {
        self.cache.valid
    }

    /// Number of cache rebuilds so far
    pub fn cache_generation(&self) -> u64 {
        self.cache.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RobertsCulling;

    fn scene() -> Scene {
        Scene::new(800, 600)
    }

    #[test]
    fn test_default_render_draws_every_face() {
        let mut scene = scene();
        let frame = scene.render();
        assert_eq!(frame.len(), 66);
        assert_eq!(frame.mode, DisplayMode::Filled);
        for pair in frame.polygons.windows(2) {
            assert!(pair[0].depth >= pair[1].depth);
        }
    }

    #[test]
    fn test_render_twice_reuses_cache() {
        let mut scene = scene();
        let first = scene.render().polygons.as_ptr();
        let first_content = scene.render().polygons.to_vec();
        let second = scene.render().polygons.as_ptr();

        assert_eq!(first, second);
        assert_eq!(scene.render().polygons, first_content.as_slice());
        assert_eq!(scene.cache_generation(), 1);
    }

    #[test]
    fn test_many_mutations_one_rebuild() {
        let mut scene = scene();
        scene.render();
        scene.rotate_letter(LetterId::A, Axis::X, 10.0);
        scene.rotate_letter(LetterId::B, Axis::Z, -10.0);
        scene.rotate_camera(Axis::Y, 10.0);
        scene.scale_letter(LetterId::A, 1.5);
        assert!(!scene.is_cache_valid());

        scene.render();
        scene.render();
        assert_eq!(scene.cache_generation(), 2);
    }

    #[test]
    fn test_every_mutation_invalidates() {
        let commands = [
            Command::RotateLetter {
                letter: LetterId::A,
                axis: Axis::Y,
                degrees: 10.0,
            },
            Command::ScaleLetter {
                letter: LetterId::B,
                factor: 1.2,
            },
            Command::SetLetterParam {
                letter: LetterId::A,
                param: LetterParam::Depth,
                value: 50.0,
            },
            Command::RotateCamera {
                axis: Axis::X,
                degrees: -10.0,
            },
            Command::ToggleMirror(Axis::X),
            Command::Reset,
            Command::Resize {
                width: 1024,
                height: 768,
            },
        ];
        let mut scene = scene();
        for command in commands {
            scene.render();
            assert!(scene.is_cache_valid());
            scene.apply(command);
            assert!(!scene.is_cache_valid(), "{command:?} left the cache valid");
        }
    }

    #[test]
    fn test_display_mode_does_not_invalidate() {
        let mut scene = scene();
        scene.render();
        scene.set_display_mode(DisplayMode::Wireframe);
        assert!(scene.is_cache_valid());
        assert_eq!(scene.render().mode, DisplayMode::Wireframe);
        assert_eq!(scene.cache_generation(), 1);
    }

    #[test]
    fn test_commands_follow_draw_order_and_mode() {
        let mut scene = scene();
        for mode in [DisplayMode::Filled, DisplayMode::Wireframe] {
            scene.set_display_mode(mode);
            let frame = scene.render();
            let commands: Vec<_> = frame.commands().collect();
            assert_eq!(commands.len(), frame.len());
            for ((points, color, command_mode), polygon) in commands.iter().zip(frame.polygons) {
                assert_eq!(*points, polygon.points.as_slice());
                assert_eq!(*color, polygon.color);
                assert_eq!(*command_mode, mode);
            }
            for pair in frame.polygons.windows(2) {
                assert!(pair[0].depth >= pair[1].depth);
            }
        }
    }

    #[test]
    fn test_mutation_changes_output() {
        let mut scene = scene();
        let before = scene.render().polygons.to_vec();
        scene.rotate_letter(LetterId::B, Axis::Y, 40.0);
        let after = scene.render().polygons.to_vec();
        assert_ne!(before, after);
    }

    #[test]
    fn test_mirror_toggle_twice_is_identity() {
        let mut scene = scene();
        scene.toggle_mirror(Axis::X);
        assert!(scene.is_mirrored(Axis::X));
        assert_eq!(*scene.object_transform(), Transform::scaling(-1.0, 1.0, 1.0));

        scene.toggle_mirror(Axis::Y);
        assert_eq!(*scene.object_transform(), Transform::scaling(-1.0, -1.0, 1.0));

        scene.toggle_mirror(Axis::X);
        scene.toggle_mirror(Axis::Y);
        assert_eq!(*scene.object_transform(), Transform::identity());

        scene.toggle_mirror(Axis::Z);
        assert!(scene.is_mirrored(Axis::Z));
        assert_eq!(*scene.object_transform(), Transform::scaling(1.0, 1.0, -1.0));
        scene.toggle_mirror(Axis::Z);
        assert!(!scene.is_mirrored(Axis::Z));
        assert_eq!(*scene.object_transform(), Transform::identity());
    }

    #[test]
    fn test_mirror_x_reflects_projection() {
        let mut scene = scene();
        let p = Vec3::new(50.0, 20.0, 0.0);
        let plain = scene.project_point(p);
        scene.toggle_mirror(Axis::X);
        let mirrored = scene.project_point(p);
        assert!((plain.x - 400.0 + (mirrored.x - 400.0)).abs() < 1e-3);
        assert!((plain.y - mirrored.y).abs() < 1e-3);
    }

    #[test]
    fn test_project_point_center() {
        let scene = scene();
        let s = scene.project_point(Vec3::ZERO);
        assert!((s.x - 400.0).abs() < 1.0);
        assert!((s.y - 300.0).abs() < 1.0);
        assert_eq!(scene.project_point_without_object_transform(Vec3::ZERO), s);
    }

    #[test]
    fn test_project_point_behind_camera() {
        let scene = scene();
        assert_eq!(scene.project_point(Vec3::new(0.0, 0.0, -500.0)), OFF_SCREEN);
        assert_eq!(scene.project_point(Vec3::new(0.0, 0.0, -400.0)), OFF_SCREEN);
    }

    #[test]
    fn test_camera_inside_letters_drops_crossing_faces() {
        let config = SceneConfig {
            camera_position: Vec3::ZERO,
            ..SceneConfig::default()
        };
        let mut scene = Scene::with_config(config, 800, 600);
        let frame = scene.render();
        // Only the slab faces on the near side of z = 0 survive.
        assert_eq!(frame.len(), 11);
        for polygon in frame.polygons {
            assert!(polygon.depth > 0.0);
        }
    }

    #[test]
    fn test_roberts_culling_drops_faces() {
        let mut all = scene();
        let all_count = all.render().len();

        let mut culled = scene().with_culling(Box::new(RobertsCulling));
        let culled_count = culled.render().len();
        assert!(culled_count < all_count);
        assert!(culled_count >= 11);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut scene = scene();
        scene.rotate_letter(LetterId::A, Axis::X, 30.0);
        scene.scale_letter(LetterId::B, 0.5);
        scene.set_letter_param(LetterId::B, LetterParam::Height, 180.0);
        scene.rotate_camera(Axis::Z, 20.0);
        scene.toggle_mirror(Axis::Y);
        scene.set_display_mode(DisplayMode::Points);

        scene.reset();

        assert_eq!(*scene.letter(LetterId::A).transform(), SolidModel::upright());
        assert_eq!(scene.letter(LetterId::B).scale(), 2.0);
        assert_eq!(scene.letter(LetterId::B).params().height, 100.0);
        assert_eq!(*scene.camera(), scene.config().camera());
        assert_eq!(*scene.object_transform(), Transform::identity());
        assert!(!scene.is_mirrored(Axis::Y));
        assert_eq!(scene.display_mode(), DisplayMode::Filled);
    }

    #[test]
    fn test_resize_rescales() {
        let mut scene = scene();
        assert!((scene.base_scale() - 1.0).abs() < 1e-6);
        scene.notify_resize(1200, 1800);
        assert!((scene.base_scale() - 2.0).abs() < 1e-6);
        let s = scene.project_point(Vec3::ZERO);
        assert!((s.x - 600.0).abs() < 1.0);
        assert!((s.y - 900.0).abs() < 1.0);
    }

    #[test]
    fn test_vertex_normals_travel_with_polygons() {
        let mut scene = scene();
        for polygon in scene.render().polygons {
            assert_eq!(polygon.vertex_normals.len(), polygon.points.len());
            for n in &polygon.vertex_normals {
                assert!((n.length() - 1.0).abs() < 1e-4);
            }
        }
    }
}
