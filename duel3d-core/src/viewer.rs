/// Rotating-cube viewer state
use tracing::debug;

use crate::geometry::{Mesh, Rgb};
use crate::projection::{Camera, ClipVolume, ProjectionMode};
use crate::transform::Matrix;

/// Where the four cubes sit before orbiting the y axis
const ORBIT_OFFSETS: [[f32; 3]; 4] = [
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
];
const CUBE_SCALE: f32 = 0.5;

/// Viewer settings that are not camera placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerSettings {
    pub mode: ProjectionMode,
    /// Orbit speed in degrees per frame
    pub spin: f32,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            mode: ProjectionMode::Orthographic,
            spin: 1.0,
        }
    }
}

/// Four unit cubes orbiting the y axis, seen through one camera
#[derive(Debug, Clone)]
pub struct CubeViewer {
    pub camera: Camera,
    pub clip: ClipVolume,
    pub settings: ViewerSettings,
    mesh: Mesh,
    /// Orbit angle in degrees
    theta: f32,
    view_projection: Matrix,
}

impl CubeViewer {
    pub fn new(camera: Camera, clip: ClipVolume, settings: ViewerSettings, face_colors: &[Rgb; 6]) -> Self {
        Self {
            view_projection: camera.view_projection(settings.mode, &clip),
            camera,
            clip,
            settings,
            mesh: Mesh::cube(1.0, face_colors),
            theta: 0.0,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn mode(&self) -> ProjectionMode {
        self.settings.mode
    }

    pub fn set_mode(&mut self, mode: ProjectionMode) {
        if mode != self.settings.mode {
            debug!(?mode, "projection changed");
        }
        self.settings.mode = mode;
        self.view_projection = self.camera.view_projection(mode, &self.clip);
    }

    /// `1` selects orthographic, `2` perspective. Returns whether the key was used.
    pub fn key_down(&mut self, key: &str) -> bool {
        let mode = match key {
            "1" => ProjectionMode::Orthographic,
            "2" => ProjectionMode::Perspective,
            _ => return false,
        };
        self.set_mode(mode);
        true
    }

    /// Advance the orbit by one frame
    pub fn advance(&mut self) {
        self.theta = (self.theta + self.settings.spin) % 360.0;
    }

    /// Model matrices of the four cubes: orbit, then offset, then shrink
    pub fn model_matrices(&self) -> [Matrix; 4] {
        let orbit = Matrix::identity().y_rotate(self.theta.to_radians());
        ORBIT_OFFSETS.map(|[x, y, z]| {
            orbit
                .translate(x, y, z)
                .scale(CUBE_SCALE, CUBE_SCALE, CUBE_SCALE)
        })
    }

    /// Full clip-space matrices, one per cube
    pub fn frame_matrices(&self) -> [Matrix; 4] {
        self.model_matrices().map(|model| self.view_projection * model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::random_face_colors;

    fn viewer() -> CubeViewer {
        CubeViewer::new(
            Camera::default(),
            ClipVolume::default(),
            ViewerSettings::default(),
            &random_face_colors(0),
        )
    }

    #[test]
    fn test_keys_switch_projection() {
        let mut v = viewer();
        assert_eq!(v.mode(), ProjectionMode::Orthographic);
        assert!(v.key_down("2"));
        assert_eq!(v.mode(), ProjectionMode::Perspective);
        assert!(!v.key_down("3"));
        assert_eq!(v.mode(), ProjectionMode::Perspective);
        assert!(v.key_down("1"));
        assert_eq!(v.mode(), ProjectionMode::Orthographic);
    }

    #[test]
    fn test_orbit_advances_and_wraps() {
        let mut v = viewer();
        for _ in 0..361 {
            v.advance();
        }
        assert!((v.theta() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_cube_centres_orbit() {
        let mut v = viewer();
        let centre = |v: &CubeViewer| v.model_matrices()[0].transform_point(&[0.0, 0.0, 0.0]);
        let start = centre(&v);
        assert!((start[2] - 1.0).abs() < 1e-6);

        for _ in 0..90 {
            v.advance();
        }
        // a quarter turn about y carries +z onto +x
        let quarter = centre(&v);
        assert!((quarter[0] - 1.0).abs() < 1e-3);
        assert!(quarter[2].abs() < 1e-3);
    }

    #[test]
    fn test_cubes_are_scaled() {
        let v = viewer();
        let m = v.model_matrices()[2];
        let corner = m.transform_point(&[0.5, 0.5, 0.5]);
        assert!((corner[0] - 1.25).abs() < 1e-6);
        assert!((corner[1] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_frame_matrices_stay_in_view() {
        let mut v = viewer();
        for mode in [ProjectionMode::Orthographic, ProjectionMode::Perspective] {
            v.set_mode(mode);
            for m in v.frame_matrices() {
                let [x, y, z, w] = m.transform_point(&[0.0, 0.0, 0.0]);
                for c in [x / w, y / w, z / w] {
                    assert!((-1.0..=1.0).contains(&c), "{mode:?}: {c}");
                }
            }
        }
    }
}
