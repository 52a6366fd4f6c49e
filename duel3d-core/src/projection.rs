/// Camera and projection utilities
use crate::transform::Matrix;
use crate::vector::{cross_product, difference, unit_vector, Vector};

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    #[default]
    Orthographic,
    Perspective,
}

/// Camera placement: eye position, look-at reference point, up direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vector,
    pub reference: Vector,
    pub up: Vector,
}

impl Camera {
    pub fn new(eye: Vector, reference: Vector, up: Vector) -> Self {
        Self { eye, reference, up }
    }

    /// World-to-camera matrix.
    ///
    /// Builds the basis `n = |eye - reference|`, `u = |up × n|`, `v = n × u`
    /// and returns `R · T`, with `T` moving the eye to the origin. An `up`
    /// parallel to the viewing direction has no basis and yields NaN.
    pub fn viewing_matrix(&self) -> Matrix {
        let n = unit_vector(&difference(&self.eye, &self.reference));
        let u = unit_vector(&cross_product(&self.up, &n));
        let v = cross_product(&n, &u);

        let t = Matrix::translation(-self.eye[0], -self.eye[1], -self.eye[2]);
        let r = Matrix([
            u[0], v[0], n[0], 0.0, //
            u[1], v[1], n[1], 0.0, //
            u[2], v[2], n[2], 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);

        r * t
    }

    /// Combined projection · viewing matrix
    pub fn view_projection(&self, mode: ProjectionMode, clip: &ClipVolume) -> Matrix {
        clip.projection(mode) * self.viewing_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new([1.0, 1.0, 2.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0])
    }
}

/// Clipping window and depth range.
///
/// `z_near` and `z_far` are view-space z coordinates; the camera looks down
/// -z, so both are normally negative with `z_far < z_near`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipVolume {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl ClipVolume {
    /// Parallel projection mapping the volume onto the NDC cube.
    ///
    /// Equal opposing bounds divide by zero.
    pub fn orthographic(&self) -> Matrix {
        let Self { x_min, x_max, y_min, y_max, z_near, z_far } = *self;
        Matrix([
            2.0 / (x_max - x_min), 0.0, 0.0, 0.0, //
            0.0, 2.0 / (y_max - y_min), 0.0, 0.0, //
            0.0, 0.0, -2.0 / (z_near - z_far), 0.0, //
            -(x_max + x_min) / (x_max - x_min),
            -(y_max + y_min) / (y_max - y_min),
            (z_near + z_far) / (z_near - z_far),
            1.0,
        ])
    }

    /// Perspective projection with the window on the near plane.
    ///
    /// Equal opposing bounds divide by zero; `z_near == 0` collapses x and y.
    /// Slot 14 holds the full `-2·near·far/(near-far)` depth translation, not a bare `-1`.
    pub fn perspective(&self) -> Matrix {
        let Self { x_min, x_max, y_min, y_max, z_near, z_far } = *self;
        Matrix([
            -(2.0 * z_near) / (x_max - x_min), 0.0, 0.0, 0.0, //
            0.0, -(2.0 * z_near) / (y_max - y_min), 0.0, 0.0, //
            (x_max + x_min) / (x_max - x_min),
            (y_max + y_min) / (y_max - y_min),
            (z_near + z_far) / (z_near - z_far),
            -1.0, //
            0.0, 0.0, -(2.0 * z_near * z_far) / (z_near - z_far), 0.0,
        ])
    }

    pub fn projection(&self, mode: ProjectionMode) -> Matrix {
        match mode {
            ProjectionMode::Orthographic => self.orthographic(),
            ProjectionMode::Perspective => self.perspective(),
        }
    }
}

impl Default for ClipVolume {
    fn default() -> Self {
        Self {
            x_min: -1.0,
            x_max: 1.0,
            y_min: -1.0,
            y_max: 1.0,
            z_near: -1.0,
            z_far: -20.0,
        }
    }
}
