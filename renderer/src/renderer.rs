// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::error::{Error, Result};
use crate::gl::*;
use crate::shader::Shader;
use glam::*;
use js_hooks::{console_log, error_message};
use linear_map::LinearMap;
use std::cell::{Cell, RefCell};
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

/// Contains things that can be drawn.
pub trait Layer {
    /// Called at the start of each frame. Useful for copying the [`Renderer`]'s time.
    fn pre_prepare(&mut self, renderer: &Renderer) {
        let _ = renderer;
    }

    /// Called when the canvas size changed since the previous frame, before rendering. Useful for
    /// recomputing projections that depend on [`Renderer::aspect_ratio`].
    fn resize(&mut self, renderer: &Renderer) {
        let _ = renderer;
    }

    /// Renders the [`Layer`].
    fn render(&mut self, renderer: &Renderer);
}

/// How to create a [`Renderer`].
#[derive(Clone, Debug)]
pub struct RendererOptions {
    /// Id of the `<canvas>` element to draw on.
    pub canvas_id: String,
    /// Whether the drawing buffer has an alpha channel.
    pub alpha: bool,
    /// Whether to use the browser's builtin antialiasing.
    pub antialias: bool,
    /// Whether the drawing buffer has a depth buffer.
    pub depth: bool,
    /// Whether colors in the drawing buffer have premultiplied alpha.
    pub premultiplied_alpha: bool,
    /// Whether the drawing buffer is kept after it is presented.
    pub preserve_drawing_buffer: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            canvas_id: "drawingcanvas".to_owned(),
            alpha: true,
            antialias: true,
            depth: true,
            premultiplied_alpha: true,
            preserve_drawing_buffer: false,
        }
    }
}

impl RendererOptions {
    /// WebGL context attributes as JSON.
    fn context_attributes(&self) -> String {
        format!(
            r##"{{
            "alpha": {},
            "antialias": {},
            "depth": {},
            "premultipliedAlpha": {},
            "preserveDrawingBuffer": {}
        }}"##,
            self.alpha,
            self.antialias,
            self.depth,
            self.premultiplied_alpha,
            self.preserve_drawing_buffer
        )
    }
}

/// An abstraction over
/// [WebGL](https://rustwasm.github.io/wasm-bindgen/api/web_sys/struct.WebGlRenderingContext.html)/
/// [WebGL2](https://rustwasm.github.io/wasm-bindgen/api/web_sys/struct.WebGl2RenderingContext.html).
pub struct Renderer {
    /// HTML Canvas.
    canvas: HtmlCanvasElement,
    cached_canvas_size: Cell<Option<UVec2>>,
    /// Canvas size during the previous frame.
    last_canvas_size: Cell<Option<UVec2>>,
    /// WebGL context.
    pub(crate) gl: Gl,
    /// Current time in seconds since start.
    pub time: f32,
    /// Draw calls issued since the start of the frame.
    draw_calls: Cell<u32>,
    /// Cache of static shaders.
    shader_cache: RefCell<LinearMap<(&'static str, &'static str), Shader>>,
}

impl Renderer {
    /// Creates a new WebGL/WebGL2 renderer, attaching it to the canvas element with the id
    /// `options.canvas_id`.
    pub fn new(options: &RendererOptions) -> Result<Self> {
        let canvas = js_hooks::canvas(&options.canvas_id).map_err(Error::Canvas)?;
        Self::with_canvas(canvas, options)
    }

    /// Creates a new WebGL/WebGL2 renderer on an existing canvas. `options.canvas_id` is ignored.
    pub fn with_canvas(canvas: HtmlCanvasElement, options: &RendererOptions) -> Result<Self> {
        let attributes = js_sys::JSON::parse(&options.context_attributes())
            .expect("invalid context attributes");

        // See: https://developer.mozilla.org/en-US/docs/Web/API/HTMLCanvasElement/getContext
        let mut gl = None;
        for (i, name) in GL_NAMES.into_iter().enumerate() {
            if i > 0 {
                console_log!(concat!(gl_title!(), " not supported, using {}"), name);
            }
            match canvas.get_context_with_context_options(name, &attributes) {
                Ok(Some(context)) => {
                    gl = context.dyn_into::<Gl>().ok();
                    if gl.is_some() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    let message = error_message(&e)
                        .unwrap_or_else(|| concat!("Error initializing ", gl_title!()).into());
                    console_log!("{}: {}", name, message);
                }
            }
        }
        let gl = gl.ok_or(Error::ContextUnavailable { title: gl_title!() })?;

        Ok(Self {
            canvas,
            cached_canvas_size: Cell::new(None),
            last_canvas_size: Cell::new(None),
            gl,
            time: 0.0,
            draw_calls: Cell::new(0),
            shader_cache: Default::default(),
        })
    }

    /// Returns the aspect ratio (width / height) of the canvas.
    pub fn aspect_ratio(&self) -> f32 {
        viewport_to_aspect(self.canvas_size())
    }

    /// Size of the canvas in real pixels (doesn't account for device pixel ratio).
    pub fn canvas_size(&self) -> UVec2 {
        let cached_size = self.cached_canvas_size.get();
        if let Some(size) = cached_size {
            size
        } else {
            let size = uvec2(self.canvas.width(), self.canvas.height());
            self.cached_canvas_size.set(Some(size));
            size
        }
    }

    /// Creates a new shader from static glsl sources. Only compiles each shader once.
    /// For runtime defined shaders use [`Shader::new`].
    pub fn create_shader(&self, vertex: &'static str, fragment: &'static str) -> Result<Shader> {
        if let Some(shader) = self.shader_cache.borrow().get(&(vertex, fragment)) {
            return Ok(shader.clone());
        }
        let shader = Shader::new(self, vertex, fragment)?;
        self.shader_cache
            .borrow_mut()
            .insert((vertex, fragment), shader.clone());
        Ok(shader)
    }

    /// Enables the depth test with depth func less.
    pub fn enable_depth_test(&self) {
        self.gl.enable(Gl::DEPTH_TEST);
    }

    /// Culls back faces, where front faces are wound counter-clockwise.
    pub fn enable_cull_face(&self) {
        self.gl.enable(Gl::CULL_FACE);
        self.gl.front_face(Gl::CCW);
        self.gl.cull_face(Gl::BACK);
    }

    /// Sets the background color to RGBA with components 0.0-1.0. Will take effect at the start of
    /// the next render.
    pub fn set_background_color(&self, color: Vec4) {
        self.gl.clear_color(color.x, color.y, color.z, color.w);
    }

    /// Draw calls issued since the start of the current frame.
    pub fn draw_calls(&self) -> u32 {
        self.draw_calls.get()
    }

    pub(crate) fn count_draw_call(&self) {
        self.draw_calls.set(self.draw_calls.get() + 1);
    }

    fn set_viewport(&self, viewport: UVec2) {
        let size = viewport.as_ivec2();
        self.gl.viewport(0, 0, size.x, size.y);
    }

    /// Resets caches with latest information, calls [`Layer::pre_prepare`] and, if the canvas
    /// was resized, [`Layer::resize`].
    pub fn pre_prepare(&mut self, layer: &mut impl Layer, time_seconds: f32) {
        self.cached_canvas_size.set(None);
        self.draw_calls.set(0);
        self.time = time_seconds;

        layer.pre_prepare(self);

        let size = self.canvas_size();
        if self.last_canvas_size.replace(Some(size)) != Some(size) {
            layer.resize(self);
        }
    }

    /// Sets viewport, clears screen and calls [`Layer::render`].
    pub fn render(&mut self, layer: &mut impl Layer) {
        // Set viewport and clear last frame to background color.
        self.set_viewport(self.canvas_size());
        self.gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);

        // Render everything.
        layer.render(self);
    }

    /// Renders one whole frame of `layer` at `time_seconds`.
    pub fn frame(&mut self, layer: &mut impl Layer, time_seconds: f32) {
        self.pre_prepare(layer, time_seconds);
        self.render(layer);
    }
}

/// Converts a viewport to an aspect ratio. A zero height counts as one pixel so the ratio stays
/// finite.
pub fn viewport_to_aspect(viewport: UVec2) -> f32 {
    let [width, height] = viewport.as_vec2().to_array();
    width / height.max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect() {
        assert_eq!(viewport_to_aspect(uvec2(800, 600)), 800.0 / 600.0);
        assert_eq!(viewport_to_aspect(uvec2(300, 300)), 1.0);
    }

    #[test]
    fn collapsed_canvas() {
        assert_eq!(viewport_to_aspect(uvec2(800, 0)), 800.0);
        assert_eq!(viewport_to_aspect(uvec2(0, 0)), 0.0);
    }

    #[test]
    fn context_attributes_are_json() {
        let options = RendererOptions {
            antialias: false,
            ..Default::default()
        };
        let json = options.context_attributes();
        assert!(json.contains(r#""antialias": false"#));
        assert!(json.contains(r#""depth": true"#));
        assert!(json.contains(r#""preserveDrawingBuffer": false"#));
        // Left to the browser.
        assert!(!json.contains("powerPreference"));
        assert_eq!(options.canvas_id, "drawingcanvas");
    }
}
