/// Flat 2D draw list for the arena, in normalized device coordinates.
use std::f32::consts::TAU;

use super::combatant::Side;
use super::state::MatchState;

pub type Rgba = [f32; 4];

pub const CLEAR_COLOR: Rgba = [0.0, 0.0, 0.0, 1.0];

const GREY: Rgba = [0.5, 0.5, 0.5, 1.0];
const LIGHT_GREY: Rgba = [0.8, 0.8, 0.8, 1.0];
const BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];
const YELLOW: Rgba = [1.0, 1.0, 0.0, 1.0];
const CYAN: Rgba = [0.0, 1.0, 1.0, 1.0];

const CYLINDER_SEGMENTS: usize = 30;

/// How a shape's vertex list is assembled into triangles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Every three vertices form a triangle
    Triangles,
    /// Each vertex after the second closes a triangle with the previous two
    TriangleStrip,
}

/// A solid-coloured shape: local vertices plus an offset
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub primitive: Primitive,
    pub vertices: Vec<[f32; 2]>,
    pub color: Rgba,
    pub offset: [f32; 2],
}

impl Shape {
    fn strip(vertices: Vec<[f32; 2]>, color: Rgba, offset: [f32; 2]) -> Self {
        Self {
            primitive: Primitive::TriangleStrip,
            vertices,
            color,
            offset,
        }
    }

    fn quad(half_width: f32, half_height: f32, color: Rgba, offset: [f32; 2]) -> Self {
        let (w, h) = (half_width, half_height);
        Self::strip(vec![[-w, -h], [w, -h], [-w, h], [w, h]], color, offset)
    }

    /// Disc of `radius` over its copy shifted down by `height`
    fn cylinder(radius: f32, height: f32, color: Rgba, offset: [f32; 2]) -> Self {
        let step = TAU / CYLINDER_SEGMENTS as f32;
        let mut vertices = Vec::with_capacity(CYLINDER_SEGMENTS * 6);
        for i in 0..CYLINDER_SEGMENTS {
            let (s0, c0) = (i as f32 * step).sin_cos();
            let (s1, c1) = ((i + 1) as f32 * step).sin_cos();
            vertices.extend([[radius * c0, radius * s0], [radius * c1, radius * s1], [0.0, 0.0]]);
            vertices.extend([
                [radius * c0, radius * s0 - height],
                [radius * c1, radius * s1 - height],
                [0.0, 0.0],
            ]);
        }
        Self {
            primitive: Primitive::Triangles,
            vertices,
            color,
            offset,
        }
    }

    /// Flat `x, y` buffer of the local vertices
    pub fn flat_vertices(&self) -> Vec<f32> {
        self.vertices.iter().flatten().copied().collect()
    }

    /// Assembled triangles with the offset applied
    pub fn triangles(&self) -> Vec<[[f32; 2]; 3]> {
        let [dx, dy] = self.offset;
        let placed: Vec<[f32; 2]> = self.vertices.iter().map(|[x, y]| [x + dx, y + dy]).collect();
        match self.primitive {
            Primitive::Triangles => placed
                .chunks_exact(3)
                .map(|t| [t[0], t[1], t[2]])
                .collect(),
            Primitive::TriangleStrip => placed.windows(3).map(|t| [t[0], t[1], t[2]]).collect(),
        }
    }
}

fn body_color(side: Side, defending: bool) -> Rgba {
    match (side, defending) {
        (Side::One, false) => [1.0, 0.0, 0.0, 1.0],
        (Side::One, true) => YELLOW,
        (Side::Two, false) => [0.0, 0.0, 1.0, 1.0],
        (Side::Two, true) => CYAN,
    }
}

/// Everything to draw for `state`, back to front
pub fn arena_scene(state: &MatchState) -> Vec<Shape> {
    let mut shapes = vec![Shape::cylinder(0.8, 0.1, GREY, [0.0, -0.2])];

    for side in Side::BOTH {
        let c = state.combatant(side);
        shapes.push(Shape::quad(0.05, 0.1, body_color(side, c.is_defending()), [c.position, 0.0]));
    }
    for side in Side::BOTH {
        let x = state.combatant(side).position;
        shapes.push(Shape::quad(0.02, 0.02, BLACK, [x - 0.05, -0.1]));
        shapes.push(Shape::quad(0.02, 0.02, BLACK, [x + 0.05, -0.1]));
    }

    shapes.push(Shape::cylinder(0.05, 0.2, YELLOW, [-0.6, 0.4]));
    shapes.push(Shape::cylinder(0.05, 0.2, YELLOW, [0.6, 0.4]));
    shapes.push(Shape::quad(0.05, 0.1, LIGHT_GREY, [-0.9, -0.7]));
    shapes.push(Shape::quad(0.05, 0.1, LIGHT_GREY, [0.8, -0.7]));

    for side in Side::BOTH {
        let c = state.combatant(side);
        if c.is_attacking() {
            let sword = vec![[-0.01, -0.01], [0.01, -0.09], [-0.01, 0.01], [0.01, 0.09]];
            shapes.push(Shape::strip(sword, body_color(side, false), [c.position, 0.15]));
        }
    }
    for side in Side::BOTH {
        let c = state.combatant(side);
        if c.is_defending() {
            let shield = vec![[-0.02, 0.1], [0.02, 0.1], [0.0, -0.1]];
            shapes.push(Shape::strip(shield, body_color(side, true), [c.position, -0.1]));
        }
    }

    shapes
}
