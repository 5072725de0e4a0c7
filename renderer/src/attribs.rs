// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::gl::*;
use crate::vertex::{Attribute, Vertex};
use js_hooks::console_log;
use std::mem::size_of;
use web_sys::WebGlProgram;

/// How to read one named shader input out of an interleaved vertex buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AttribBinding {
    /// Name of the `attribute` in the vertex shader.
    pub name: &'static str,
    /// Number of [`prim@f32`] components.
    pub components: i32,
    /// Bytes between consecutive vertices.
    pub stride: i32,
    /// Bytes from the start of a vertex to this attribute.
    pub offset: i32,
}

/// For describing [`Vertex`] attributes to shaders. Not extensible right now.
pub struct Attribs {
    bindings: Vec<AttribBinding>,
    bytes: usize,
    size: usize,
}

impl Attribs {
    fn new<V: Vertex>() -> Self {
        Self {
            bindings: Vec::new(),
            bytes: 0,
            size: size_of::<V>(),
        }
    }

    fn offset(&mut self, bytes: usize) -> i32 {
        let b = self.bytes;
        self.bytes += bytes;
        b as i32
    }

    /// Appends an attribute named `name` made of an [`Attribute`] `A`.
    pub fn attrib<A: Attribute>(&mut self, name: &'static str) {
        self.floats(name, A::FLOATS);
    }

    /// Appends an attribute named `name` made of `count` [`prim@f32`]s.
    pub fn floats(&mut self, name: &'static str, count: usize) {
        let offset = self.offset(count * size_of::<f32>());
        self.bindings.push(AttribBinding {
            name,
            components: count as i32,
            stride: self.size as i32,
            offset,
        });
    }
}

/// The attribute layout of a [`Vertex`] type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexLayout {
    bindings: Vec<AttribBinding>,
    stride: usize,
}

impl VertexLayout {
    /// Builds the layout of `V`.
    ///
    /// # Panics
    ///
    /// If the attributes don't add up to the size of `V`.
    pub fn of<V: Vertex>() -> Self {
        let mut attribs = Attribs::new::<V>();
        V::bind_attribs(&mut attribs);

        // Make sure all attributes were added.
        assert_eq!(attribs.bytes, attribs.size, "attributes don't add up");
        Self {
            bindings: attribs.bindings,
            stride: attribs.size,
        }
    }

    /// The attributes in the order they are stored in a vertex.
    pub fn bindings(&self) -> &[AttribBinding] {
        &self.bindings
    }

    /// Size of one vertex in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Points each attribute at the currently bound array buffer. Locations are looked up by name
    /// so `program` must already be linked.
    pub(crate) fn apply(&self, gl: &Gl, program: &WebGlProgram) {
        for binding in &self.bindings {
            let location = gl.get_attrib_location(program, binding.name);
            if location < 0 {
                if cfg!(debug_assertions) {
                    console_log!(
                        "warning: attribute {} does not exist or is not in use",
                        binding.name
                    );
                }
                continue;
            }
            let location = location as u32;

            gl.vertex_attrib_pointer_with_i32(
                location,
                binding.components,
                Gl::FLOAT,
                false,
                binding.stride,
                binding.offset,
            );
            // Disabled attributes silently read as zero.
            gl.enable_vertex_attrib_array(location);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive_vertex;
    use glam::{Vec2, Vec3};

    derive_vertex!(
        struct ColorVertex2 {
            "vertPosition" => pos: Vec2,
            "vertColor" => color: Vec3,
        }
    );

    // Declares fewer floats than it has.
    #[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
    #[repr(C)]
    struct Lopsided([f32; 3]);

    impl Vertex for Lopsided {
        fn bind_attribs(attribs: &mut Attribs) {
            attribs.floats("a", 2);
        }
    }

    #[test]
    fn interleaved() {
        let layout = VertexLayout::of::<ColorVertex2>();
        assert_eq!(layout.stride(), 5 * 4);
        assert_eq!(
            layout.bindings(),
            &[
                AttribBinding {
                    name: "vertPosition",
                    components: 2,
                    stride: 20,
                    offset: 0
                },
                AttribBinding {
                    name: "vertColor",
                    components: 3,
                    stride: 20,
                    offset: 8
                },
            ]
        );
    }

    #[test]
    #[should_panic(expected = "attributes don't add up")]
    fn missing_attribute() {
        VertexLayout::of::<Lopsided>();
    }
}
