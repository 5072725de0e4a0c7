// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::error::{trim_info_log, Error, Result, ShaderStage};
use crate::gl::*;
use crate::renderer::Renderer;
use glam::Mat4;
use js_hooks::console_log;
use linear_map::LinearMap;
use std::cell::{RefCell, RefMut};
use std::rc::Rc;
use web_sys::{WebGlProgram, WebGlShader, WebGlUniformLocation};

/// References a linked and validated glsl shader program. As cheap to clone as an [`Rc`].
#[derive(Clone)]
pub struct Shader(Rc<ShaderInner>);

struct ShaderInner {
    program: WebGlProgram,
    // Kept alive for the lifetime of the program.
    _vert_shader: WebGlShader,
    _frag_shader: WebGlShader,
    // Use a LinearMap because there are relatively few uniforms.
    uniform_cache: RefCell<LinearMap<&'static str, Option<WebGlUniformLocation>>>,
}

impl Shader {
    /// Compiles, links and validates a new glsl shader from sources. Fails on the first step that
    /// fails, with that step's info log.
    pub fn new(renderer: &Renderer, vertex: &str, fragment: &str) -> Result<Self> {
        let gl = &renderer.gl;
        let vert_shader = compile_shader(gl, ShaderStage::Vertex, vertex)?;
        let frag_shader = compile_shader(gl, ShaderStage::Fragment, fragment)?;
        let program = link_program(gl, &vert_shader, &frag_shader)?;
        validate_program(gl, &program)?;

        Ok(Self(Rc::new(ShaderInner {
            program,
            _vert_shader: vert_shader,
            _frag_shader: frag_shader,
            uniform_cache: Default::default(),
        })))
    }

    /// Binds the shader for handling subsequent draw calls.
    pub fn bind<'a>(&'a self, renderer: &'a Renderer) -> ShaderBinding<'a> {
        ShaderBinding::new(&renderer.gl, &self.0)
    }
}

impl ShaderInner {
    /// uniform gets the (cached) location of a named uniform.
    fn uniform<'a>(
        &'a self,
        gl: &Gl,
        name: &'static str,
    ) -> RefMut<'a, Option<WebGlUniformLocation>> {
        // Pre-borrow because using self in closure borrows all of self.
        let program = &self.program;
        let r = self.uniform_cache.borrow_mut();

        // Map mutable ref to avoid indexing again.
        RefMut::map(r, |r| {
            r.entry(name).or_insert_with(|| {
                let uniform = gl.get_uniform_location(program, name);
                if uniform.is_none() && cfg!(debug_assertions) {
                    console_log!("warning: uniform {} does not exist or is not in use", name);
                }
                uniform
            })
        })
    }
}

/// A bound [`Shader`] that you can draw with.
pub struct ShaderBinding<'a> {
    gl: &'a Gl,
    shader: &'a ShaderInner,
}

impl<'a> ShaderBinding<'a> {
    fn new(gl: &'a Gl, shader: &'a ShaderInner) -> Self {
        gl.use_program(Some(&shader.program));
        Self { gl, shader }
    }

    /// The linked program, for looking up attribute locations.
    pub(crate) fn program(&self) -> &WebGlProgram {
        &self.shader.program
    }

    /// Sets a `mat4` uniform. Uploaded column-major, so never transposed.
    pub fn uniform_matrix4f(&self, name: &'static str, m: &Mat4) {
        let u = self.shader.uniform(self.gl, name);
        self.gl
            .uniform_matrix4fv_with_f32_array(u.as_ref(), false, &m.to_cols_array());
    }
}

impl<'a> Drop for ShaderBinding<'a> {
    fn drop(&mut self) {
        // Unbind (not required in release mode).
        #[cfg(debug_assertions)]
        self.gl.use_program(None);
    }
}

/// compile_shader compiles either the vertex or fragment shader of a shader program.
fn compile_shader(gl: &Gl, stage: ShaderStage, source: &str) -> Result<WebGlShader> {
    let shader_type = match stage {
        ShaderStage::Vertex => Gl::VERTEX_SHADER,
        ShaderStage::Fragment => Gl::FRAGMENT_SHADER,
    };
    let shader = gl
        .create_shader(shader_type)
        .expect("failed to create shader");
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = trim_info_log(gl.get_shader_info_log(&shader));
        gl.delete_shader(Some(&shader));
        Err(Error::Compile { stage, log })
    }
}

/// link_program links the two shaders to form a shader program.
fn link_program(
    gl: &Gl,
    vert_shader: &WebGlShader,
    frag_shader: &WebGlShader,
) -> Result<WebGlProgram> {
    let program = gl.create_program().expect("failed to create program");

    gl.attach_shader(&program, vert_shader);
    gl.attach_shader(&program, frag_shader);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = trim_info_log(gl.get_program_info_log(&program));
        gl.delete_program(Some(&program));
        Err(Error::Link(log))
    }
}

/// validate_program checks the program can execute in the current state.
fn validate_program(gl: &Gl, program: &WebGlProgram) -> Result<()> {
    gl.validate_program(program);

    if gl
        .get_program_parameter(program, Gl::VALIDATE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(())
    } else {
        Err(Error::Validation(trim_info_log(
            gl.get_program_info_log(program),
        )))
    }
}
