// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! A vertex colored cube that spins about two axes at once, redrawn every frame.

use glam::{Mat4, Vec3, Vec4};
use renderer::{
    derive_vertex, AnimationLoop, Camera3d, Layer, MeshBuilder, Perspective, Renderer, Result,
    Shader, Spin, TriangleBuffer,
};

const VERTEX_SHADER: &str = include_str!("shaders/cube.vert");
const FRAGMENT_SHADER: &str = include_str!("shaders/color.frag");

/// Color behind the cube.
pub const BACKGROUND: [f32; 4] = [0.1, 0.2, 0.2, 1.0];

/// Where the camera sits, looking at the origin.
pub const EYE: [f32; 3] = [0.0, 0.0, -6.0];

derive_vertex!(
    /// A 3D corner of one face of the cube.
    #[derive(Debug, PartialEq)]
    pub struct CubeVertex {
        "vertPosition" => pub pos: Vec3,
        "vertColor" => pub color: Vec3,
    }
);

/// Four corners of a face and the two triangles that cover it, counter-clockwise from outside.
struct Face {
    corners: [[f32; 3]; 4],
    triangles: [[usize; 3]; 2],
}

const FACES: [Face; 6] = [
    // Top.
    Face {
        corners: [[-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0]],
        triangles: [[0, 1, 2], [0, 2, 3]],
    },
    // Left.
    Face {
        corners: [[-1.0, 1.0, 1.0], [-1.0, -1.0, 1.0], [-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0]],
        triangles: [[1, 0, 2], [2, 0, 3]],
    },
    // Right.
    Face {
        corners: [[1.0, 1.0, 1.0], [1.0, -1.0, 1.0], [1.0, -1.0, -1.0], [1.0, 1.0, -1.0]],
        triangles: [[0, 1, 2], [0, 2, 3]],
    },
    // Front.
    Face {
        corners: [[1.0, 1.0, 1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0]],
        triangles: [[1, 0, 2], [3, 2, 0]],
    },
    // Back.
    Face {
        corners: [[1.0, 1.0, -1.0], [1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0]],
        triangles: [[0, 1, 2], [0, 2, 3]],
    },
    // Bottom.
    Face {
        corners: [[-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, -1.0, -1.0]],
        triangles: [[1, 0, 2], [2, 0, 3]],
    },
];

/// Each corner of the cube has its own color, shared by the 3 faces that meet there.
fn corner_color(pos: Vec3) -> Vec3 {
    Vec3::new(1.0 - pos.z, 1.0 + pos.y, 1.0 - pos.x) * 0.5
}

/// 24 vertices (4 per face so faces don't share) and 36 indices.
pub fn mesh() -> MeshBuilder<CubeVertex> {
    let mut mesh = MeshBuilder::new();
    for face in &FACES {
        let quad = mesh.push_vertices(face.corners.map(|corner| {
            let pos = Vec3::from(corner);
            CubeVertex {
                pos,
                color: corner_color(pos),
            }
        }));
        for triangle in face.triangles {
            mesh.push_triangle(triangle.map(|i| quad[i]));
        }
    }
    mesh
}

/// Draws the cube with indexed rendering.
pub struct CubeLayer {
    shader: Shader,
    buffer: TriangleBuffer<CubeVertex>,
    camera: Camera3d,
    perspective: Perspective,
    spin: Spin,
    world: Mat4,
}

impl CubeLayer {
    /// Compiles the shader, uploads the mesh and points the camera at it.
    pub fn new(renderer: &Renderer) -> Result<Self> {
        let shader = renderer.create_shader(VERTEX_SHADER, FRAGMENT_SHADER)?;
        let buffer = TriangleBuffer::from_mesh(renderer, &mesh());

        let perspective = Perspective {
            aspect: renderer.aspect_ratio(),
            ..Perspective::default()
        };
        let camera = Camera3d::looking_at(Vec3::from(EYE), Vec3::ZERO, &perspective);

        Ok(Self {
            shader,
            buffer,
            camera,
            perspective,
            spin: Spin::default(),
            world: Mat4::IDENTITY,
        })
    }

    /// The current world matrix.
    pub fn world(&self) -> Mat4 {
        self.world
    }
}

impl Layer for CubeLayer {
    fn pre_prepare(&mut self, renderer: &Renderer) {
        self.world = self.spin.world_matrix(renderer.time);
    }

    fn resize(&mut self, renderer: &Renderer) {
        self.perspective.aspect = renderer.aspect_ratio();
        self.camera.set_projection(&self.perspective);
    }

    fn render(&mut self, renderer: &Renderer) {
        let shader = self.shader.bind(renderer);
        self.camera.prepare(&shader);
        shader.uniform_matrix4f("mWorld", &self.world);
        self.buffer.bind(renderer, &shader).draw();
    }
}

/// Sets up the cube and starts animating it on the next frame.
pub fn start(renderer: Renderer) -> Result<AnimationLoop> {
    renderer.set_background_color(Vec4::from(BACKGROUND));
    renderer.enable_depth_test();
    renderer.enable_cull_face();
    let layer = CubeLayer::new(&renderer)?;
    Ok(AnimationLoop::start(renderer, layer))
}
