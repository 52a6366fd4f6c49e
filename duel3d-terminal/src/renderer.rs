/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use duel3d_core::arena::Shape;
use duel3d_core::{Matrix, Mesh, Rgb, Triangle};
use nalgebra::Vector3;
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Glyph used for flat 2D shapes
const SOLID: char = '█';

/// Cell a triangle vertex lands in: screen x, screen y, NDC depth
type ScreenPoint = (f32, f32, f32);

/// Depth-tested character grid that triangles are rasterized into
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::Reset);
    }

    /// Character stored at a cell, for inspection
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    /// Draw a mesh placed by `model` through the full clip-space matrix `mvp`
    pub fn render_mesh(&mut self, mesh: &Mesh, model: &Matrix, mvp: &Matrix) {
        let light = Vector3::new(0.3, 0.8, 0.5).normalize();
        'triangles: for triangle in &mesh.triangles {
            let mut ndc = [[0.0; 3]; 3];
            for (out, vertex) in ndc.iter_mut().zip(&triangle.vertices) {
                let [x, y, z, w] = mvp.transform_point(vertex);
                // behind the eye
                if w <= 0.0 {
                    continue 'triangles;
                }
                *out = [x / w, y / w, z / w];
            }

            let placed = Triangle {
                vertices: triangle.vertices.map(|v| {
                    let [x, y, z, _] = model.transform_point(&v);
                    [x, y, z]
                }),
                ..*triangle
            };
            let brightness = placed.calculate_normal().dot(&light).abs();

            let index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
            let glyph = LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)];
            self.fill_triangle(ndc, glyph, rgb_color(&triangle.color));
        }
    }

    /// Draw flat shapes in list order, later shapes on top
    pub fn render_shapes(&mut self, shapes: &[Shape]) {
        for shape in shapes {
            let [red, green, blue, _] = shape.color;
            let color = rgb_color(&[red, green, blue]);
            for [a, b, c] in shape.triangles() {
                self.fill_triangle([[a[0], a[1], 0.0], [b[0], b[1], 0.0], [c[0], c[1], 0.0]], SOLID, color);
            }
        }
    }

    /// Rasterize one triangle given in normalized device coordinates
    pub fn fill_triangle(&mut self, ndc: [[f32; 3]; 3], character: char, color: Color) {
        let (w, h) = (self.width as f32, self.height as f32);
        let coords = ndc.map(|[x, y, z]| ((x + 1.0) * 0.5 * w, (1.0 - y) * 0.5 * h, z));
        self.rasterize_triangle(&coords, character, color);
    }

    fn rasterize_triangle(&mut self, coords: &[ScreenPoint; 3], character: char, color: Color) {
        let [v0, v1, v2] = *coords;

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let idx = y as usize * self.width + x as usize;
                // equal depth overwrites, so flat shapes paint in order
                if depth <= self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.char_buffer[idx] = character;
                    self.color_buffer[idx] = color;
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let idx = y * self.width + x;
                let color = self.color_buffer[idx];
                if current != Some(color) {
                    writer.queue(SetForegroundColor(color))?;
                    current = Some(color);
                }
                writer.queue(Print(self.char_buffer[idx]))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn rgb_color(rgb: &Rgb) -> Color {
    let [r, g, b] = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    Color::Rgb { r, g, b }
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
