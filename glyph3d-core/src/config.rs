/// Construction-time defaults for a scene
use crate::letter::{Glyph, LetterParams, SolidModel};
use crate::projection::Camera;
use crate::render::DisplayMode;
use crate::transform::RotationState;
use crate::vector::Vec3;

/// How to build one letter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterSpec {
    pub glyph: Glyph,
    pub params: LetterParams,
    pub scale: f32,
}

impl LetterSpec {
    pub fn build(&self) -> SolidModel {
        SolidModel::new(self.glyph, self.params, self.scale)
    }
}

/// Everything `Scene::reset` restores
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub letters: [LetterSpec; 2],
    pub camera_position: Vec3,
    pub camera_rotation: RotationState,
    /// `K` in `K / (z + C)`
    pub focal: f32,
    /// `C` in `K / (z + C)`
    pub depth_offset: f32,
    /// Viewport edge that maps to a base scale of 1
    pub reference_size: f32,
    pub auto_scale: bool,
    /// Used when `auto_scale` is off
    pub base_scale: f32,
    pub display_mode: DisplayMode,
}

impl SceneConfig {
    pub fn camera(&self) -> Camera {
        Camera::new(self.camera_position, self.camera_rotation)
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            letters: [
                LetterSpec {
                    glyph: Glyph::M,
                    params: LetterParams::new(100.0, 60.0, 30.0, -60.0),
                    scale: 2.0,
                },
                LetterSpec {
                    glyph: Glyph::B,
                    params: LetterParams::new(100.0, 60.0, 30.0, 60.0),
                    scale: 2.0,
                },
            ],
            camera_position: Vec3::new(0.0, 0.0, -400.0),
            camera_rotation: RotationState::zero(),
            focal: 500.0,
            depth_offset: 300.0,
            reference_size: 600.0,
            auto_scale: true,
            base_scale: 2.0,
            display_mode: DisplayMode::Filled,
        }
    }
}
