// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! A single static triangle with a color per corner, drawn once.

use glam::{vec2, vec3, Vec2, Vec3, Vec4};
use renderer::{derive_vertex, Layer, Renderer, Result, Shader, TriangleBuffer};

const VERTEX_SHADER: &str = include_str!("shaders/triangle.vert");
const FRAGMENT_SHADER: &str = include_str!("shaders/color.frag");

/// Color behind the triangle.
pub const BACKGROUND: [f32; 4] = [0.1, 0.2, 0.2, 1.0];

derive_vertex!(
    /// A 2D corner of the triangle.
    #[derive(Debug, PartialEq)]
    pub struct TriangleVertex {
        "vertPosition" => pub pos: Vec2,
        "vertColor" => pub color: Vec3,
    }
);

/// The three corners, counter-clockwise.
pub fn vertices() -> [TriangleVertex; 3] {
    [
        TriangleVertex {
            pos: vec2(-0.6, 0.7),
            color: vec3(1.0, 0.0, 1.0),
        },
        TriangleVertex {
            pos: vec2(-0.5, -0.5),
            color: vec3(0.8, 1.0, 0.1),
        },
        TriangleVertex {
            pos: vec2(0.5, 0.5),
            color: vec3(0.3, 0.5, 1.0),
        },
    ]
}

/// Draws the triangle with array based rendering.
pub struct TriangleLayer {
    shader: Shader,
    buffer: TriangleBuffer<TriangleVertex>,
}

impl TriangleLayer {
    /// Compiles the shader, then uploads the vertices.
    pub fn new(renderer: &Renderer) -> Result<Self> {
        let shader = renderer.create_shader(VERTEX_SHADER, FRAGMENT_SHADER)?;
        let buffer = TriangleBuffer::new(renderer, &vertices(), &[]);
        Ok(Self { shader, buffer })
    }
}

impl Layer for TriangleLayer {
    fn render(&mut self, renderer: &Renderer) {
        let shader = self.shader.bind(renderer);
        self.buffer.bind(renderer, &shader).draw();
    }
}

/// Sets up and renders a single frame. Returns the [`Renderer`] so the caller can inspect it.
pub fn draw(mut renderer: Renderer) -> Result<Renderer> {
    renderer.set_background_color(Vec4::from(BACKGROUND));
    let mut layer = TriangleLayer::new(&renderer)?;
    renderer.frame(&mut layer, 0.0);
    Ok(renderer)
}
