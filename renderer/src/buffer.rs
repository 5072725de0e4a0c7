// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::attribs::VertexLayout;
use crate::gl::*;
use crate::index::Index;
use crate::renderer::Renderer;
use crate::shader::ShaderBinding;
use crate::vertex::Vertex;
use bytemuck::Pod;
use std::marker::PhantomData;
use std::mem::size_of;
use web_sys::WebGlBuffer;

/// Vertex indices of a triangle, in counter-clockwise order.
pub type Triangle<I> = [I; 3];

/// Vertex indices of a quad, in counter-clockwise order.
pub type Quad<I> = [I; 4];

/// Allows building a triangle mesh presumably to draw with [`TriangleBuffer`].
#[derive(Debug)]
pub struct MeshBuilder<V, I = u16> {
    /// Vertices of a mesh that are indexed by indices.
    pub vertices: Vec<V>,
    /// Indices into `vertices` that form counter-clockwise triangles.
    pub indices: Vec<I>,
}

impl<V: Vertex, I: Index> Default for MeshBuilder<V, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex, I: Index> MeshBuilder<V, I> {
    /// Create an empty [`MeshBuilder`].
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Pushes a single [`Triangle`] to `indices`.
    pub fn push_triangle(&mut self, triangle: Triangle<I>) {
        self.indices.extend_from_slice(&triangle);
    }

    /// Pushes a single [`Quad`] to `indices`.
    pub fn push_quad(&mut self, quad: Quad<I>) {
        self.indices
            .extend_from_slice(&[quad[0], quad[1], quad[2], quad[2], quad[3], quad[0]]);
    }

    /// Pushes 4 `vertices` and returns the [`Quad`] of their indices, which isn't pushed.
    pub fn push_vertices(&mut self, vertices: [V; 4]) -> Quad<I> {
        let start = self.vertices.len();
        self.vertices.extend_from_slice(&vertices);
        [0, 1, 2, 3].map(|i| I::from_usize(start + i))
    }

    /// Returns true if every index refers to a vertex.
    pub fn indices_in_bounds(&self) -> bool {
        indices_in_bounds(&self.indices, self.vertices.len())
    }

    /// Returns true if `vertices.is_empty()`.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

fn indices_in_bounds<I: Index>(indices: &[I], vertices: usize) -> bool {
    indices.iter().all(|&i| i.to_usize() < vertices)
}

pub(crate) enum GpuBufferType {
    Array,
    Element,
}

impl GpuBufferType {
    pub(crate) const fn to(self) -> bool {
        match self {
            Self::Array => true,
            Self::Element => false,
        }
    }

    const fn fr(v: bool) -> Self {
        match v {
            true => Self::Array,
            false => Self::Element,
        }
    }

    const fn target(self) -> u32 {
        match self {
            Self::Array => Gl::ARRAY_BUFFER,
            Self::Element => Gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// A write-once buffer on the GPU, sized exactly to its contents.
pub(crate) struct GpuBuffer<E, const B: bool> {
    elements: WebGlBuffer,
    length: u32, // The amount of elements in the buffer.
    element: PhantomData<E>,
}

impl<E: Pod, const B: bool> GpuBuffer<E, B> {
    pub(crate) fn new(gl: &Gl, elements: &[E]) -> Self {
        let buffer = Self {
            elements: gl.create_buffer().expect("failed to create buffer"),
            length: elements.len().try_into().expect("too many elements"),
            element: PhantomData,
        };

        if !buffer.is_empty() {
            let target = GpuBufferType::fr(B).target();
            gl.bind_buffer(target, Some(&buffer.elements));

            let b = |a: &js_sys::Object| {
                gl.buffer_data_with_array_buffer_view(target, a, Gl::STATIC_DRAW)
            };

            // Safety: the views are consumed by buffer_data before anything can allocate.
            unsafe {
                match GpuBufferType::fr(B) {
                    GpuBufferType::Array => {
                        b(&js_sys::Float32Array::view(bytemuck::cast_slice(elements)))
                    }
                    GpuBufferType::Element => match size_of::<E>() {
                        1 => b(&js_sys::Uint8Array::view(bytemuck::cast_slice(elements))),
                        2 => b(&js_sys::Uint16Array::view(bytemuck::cast_slice(elements))),
                        4 => b(&js_sys::Uint32Array::view(bytemuck::cast_slice(elements))),
                        _ => panic!("invalid index size"),
                    },
                }
            }

            // Unbind (not required in release mode).
            #[cfg(debug_assertions)]
            gl.bind_buffer(target, None);
        }

        buffer
    }

    pub(crate) fn len(&self) -> u32 {
        self.length
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub(crate) fn byte_len(&self) -> usize {
        self.length as usize * size_of::<E>()
    }

    fn bind(&self, gl: &Gl) {
        gl.bind_buffer(GpuBufferType::fr(B).target(), Some(&self.elements));
    }

    #[cfg(debug_assertions)]
    fn unbind(gl: &Gl) {
        gl.bind_buffer(GpuBufferType::fr(B).target(), None);
    }
}

/// [`TriangleBuffer`] facilitates drawing a triangle mesh. Its contents are immutable.
pub struct TriangleBuffer<V, I = u16> {
    vertices: GpuBuffer<V, { GpuBufferType::Array.to() }>,
    indices: GpuBuffer<I, { GpuBufferType::Element.to() }>,
    layout: VertexLayout,
}

impl<V: Vertex, I: Index> TriangleBuffer<V, I> {
    /// Uploads `vertices` and `indices` once. If `indices` is empty it performs array based
    /// rendering.
    ///
    /// # Panics
    ///
    /// If `vertices` is empty or an index is out of bounds.
    pub fn new(renderer: &Renderer, vertices: &[V], indices: &[I]) -> Self {
        assert!(!vertices.is_empty(), "buffering no vertices");
        assert!(
            indices_in_bounds(indices, vertices.len()),
            "index out of bounds"
        );
        let gl = &renderer.gl;
        Self {
            vertices: GpuBuffer::new(gl, vertices),
            indices: GpuBuffer::new(gl, indices),
            layout: VertexLayout::of::<V>(),
        }
    }

    /// Copies a whole [`MeshBuilder`] into a new buffer.
    pub fn from_mesh(renderer: &Renderer, mesh: &MeshBuilder<V, I>) -> Self {
        Self::new(renderer, &mesh.vertices, &mesh.indices)
    }

    /// Number of vertices in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() as usize
    }

    /// Number of indices in the buffer (zero for array based rendering).
    pub fn index_count(&self) -> usize {
        self.indices.len() as usize
    }

    /// Size of the vertex buffer in bytes.
    pub fn vertex_bytes(&self) -> usize {
        self.vertices.byte_len()
    }

    /// Binds the [`TriangleBuffer`] and points its attributes at `shader`'s inputs to draw
    /// triangles.
    #[must_use]
    pub fn bind<'a>(
        &'a self,
        renderer: &'a Renderer,
        shader: &ShaderBinding,
    ) -> TriangleBufferBinding<'a, V, I> {
        TriangleBufferBinding::new(renderer, shader, self)
    }
}

/// A bound [`TriangleBuffer`] that can draw triangles.
pub struct TriangleBufferBinding<'a, V: Vertex, I: Index> {
    renderer: &'a Renderer,
    buffer: &'a TriangleBuffer<V, I>,
}

impl<'a, V: Vertex, I: Index> TriangleBufferBinding<'a, V, I> {
    fn new(
        renderer: &'a Renderer,
        shader: &ShaderBinding,
        buffer: &'a TriangleBuffer<V, I>,
    ) -> Self {
        let gl = &renderer.gl;

        // Attributes read from whatever array buffer is bound when they are pointed.
        buffer.vertices.bind(gl);
        buffer.layout.apply(gl, shader.program());

        if !buffer.indices.is_empty() {
            buffer.indices.bind(gl);
        }

        Self { renderer, buffer }
    }

    /// Draws triangles.
    pub fn draw(&self) {
        let gl = &self.renderer.gl;
        let primitive = Gl::TRIANGLES;
        if !self.buffer.indices.is_empty() {
            gl.draw_elements_with_i32(
                primitive,
                self.buffer.indices.len() as i32,
                I::GL_ENUM,
                0,
            );
        } else {
            gl.draw_arrays(primitive, 0, self.buffer.vertices.len() as i32)
        }
        self.renderer.count_draw_call();
    }
}

impl<'a, V: Vertex, I: Index> Drop for TriangleBufferBinding<'a, V, I> {
    fn drop(&mut self) {
        // Unbind (not required in release mode).
        #[cfg(debug_assertions)]
        {
            let gl = &self.renderer.gl;
            GpuBuffer::<V, { GpuBufferType::Array.to() }>::unbind(gl);
            GpuBuffer::<I, { GpuBufferType::Element.to() }>::unbind(gl);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive_vertex;
    use glam::Vec3;

    derive_vertex!(
        #[derive(Debug, PartialEq)]
        struct Corner {
            "vertPosition" => pos: Vec3,
        }
    );

    fn corner(x: f32, y: f32) -> Corner {
        Corner {
            pos: Vec3::new(x, y, 0.0),
        }
    }

    #[test]
    fn quads() {
        let mut mesh = MeshBuilder::<Corner, u16>::new();
        assert!(mesh.is_empty());

        let first = mesh.push_vertices([
            corner(0.0, 0.0),
            corner(1.0, 0.0),
            corner(1.0, 1.0),
            corner(0.0, 1.0),
        ]);
        assert_eq!(first, [0, 1, 2, 3]);
        mesh.push_quad(first);

        let second = mesh.push_vertices([corner(2.0, 0.0); 4]);
        assert_eq!(second, [4, 5, 6, 7]);
        mesh.push_triangle([second[0], second[1], second[2]]);

        assert_eq!(mesh.indices, vec![0, 1, 2, 2, 3, 0, 4, 5, 6]);
        assert_eq!(mesh.vertices.len(), 8);
        assert!(mesh.indices_in_bounds());

        mesh.push_triangle([7, 8, 0]);
        assert!(!mesh.indices_in_bounds());
    }

    #[test]
    fn buffer_targets() {
        assert_eq!(GpuBufferType::fr(true).target(), Gl::ARRAY_BUFFER);
        assert_eq!(GpuBufferType::fr(false).target(), Gl::ELEMENT_ARRAY_BUFFER);
    }
}
