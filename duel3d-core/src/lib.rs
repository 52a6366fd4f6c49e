/// duel3d Core Library - transforms, projections and match rules
///
/// This library provides the stateless core shared by the terminal and web
/// frontends: 4x4 matrix construction, camera and projection derivation,
/// the rotating-cube scene, and the two-robot match state machine.

pub mod arena;
pub mod config;
pub mod geometry;
pub mod projection;
pub mod transform;
pub mod vector;
pub mod viewer;

// Re-export commonly used types
pub use arena::{Arena, MatchState, Side};
pub use config::{Config, ConfigError};
pub use geometry::{random_face_colors, Mesh, Rgb, Triangle};
pub use projection::{Camera, ClipVolume, ProjectionMode};
pub use transform::Matrix;
pub use vector::{cross_product, unit_vector, vector_modulus, Vector};
pub use viewer::{CubeViewer, ViewerSettings};
