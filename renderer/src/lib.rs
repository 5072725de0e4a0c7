// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

#![warn(missing_docs)]
#![crate_name = "renderer"]

//! # Renderer
//!
//! [`renderer`][`crate`] is a small abstraction over
//! [WebGL](https://rustwasm.github.io/wasm-bindgen/api/web_sys/struct.WebGlRenderingContext.html)/
//! [WebGL2](https://rustwasm.github.io/wasm-bindgen/api/web_sys/struct.WebGl2RenderingContext.html)
//! for drawing static, vertex colored meshes.
//!
//! Setup is strictly sequential: create a [`Renderer`], compile a [`Shader`], upload a
//! [`TriangleBuffer`], then bind both and draw, either once or every frame with an
//! [`AnimationLoop`].

// Gl primitives should not escape this crate.
#[macro_use]
mod gl;

mod animation;
mod attribs;
mod buffer;
mod camera;
mod error;
mod index;
mod renderer;
mod shader;
mod spin;
mod vertex;

// Required to be public so derive_vertex! works.
#[doc(hidden)]
pub use attribs::Attribs;

// Re-export to provide a simpler api.
pub use animation::*;
pub use attribs::{AttribBinding, VertexLayout};
pub use buffer::{MeshBuilder, Quad, Triangle, TriangleBuffer, TriangleBufferBinding};
pub use camera::*;
pub use error::{Error, Result, ShaderStage};
pub use index::*;
pub use renderer::*;
pub use shader::*;
pub use spin::*;
pub use vertex::*;
