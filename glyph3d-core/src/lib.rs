//! Glyph3D Core Library - software 3D pipeline for two letter solids
//!
//! Vector and matrix primitives, parametric letter geometry, a camera with
//! perspective projection, and a scene that caches depth-sorted screen
//! polygons for painter's-algorithm drawing.

pub mod config;
pub mod geometry;
pub mod letter;
pub mod projection;
pub mod render;
pub mod scene;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use config::{LetterSpec, SceneConfig};
pub use geometry::{Color, Face, FaceCulling, KeepAllFaces, RobertsCulling};
pub use letter::{Glyph, LetterParam, LetterParams, SolidModel};
pub use projection::{Camera, Projection, ScreenPoint, OFF_SCREEN};
pub use render::{DisplayMode, DrawPolygon, Frame, Surface};
pub use scene::{Command, LetterId, Scene};
pub use transform::{Axis, RotationState, Transform};
pub use vector::Vec3;
