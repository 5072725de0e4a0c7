// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

#![cfg(target_arch = "wasm32")]

use glam::{vec2, vec3, Vec2, Vec3};
use renderer::{
    derive_vertex, AnimationLoop, Error, Layer, MeshBuilder, Renderer, RendererOptions, Shader,
    ShaderStage, TriangleBuffer,
};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

const VERTEX: &str = "
precision mediump float;
attribute vec2 vertPosition;
attribute vec3 vertColor;
varying vec3 fragColor;
void main() {
    fragColor = vertColor;
    gl_Position = vec4(vertPosition, 0.0, 1.0);
}
";

const FRAGMENT: &str = "
precision mediump float;
varying vec3 fragColor;
void main() {
    gl_FragColor = vec4(fragColor, 1.0);
}
";

derive_vertex!(
    struct TestVertex {
        "vertPosition" => pos: Vec2,
        "vertColor" => color: Vec3,
    }
);

fn renderer() -> Renderer {
    let canvas = js_hooks::document()
        .unwrap()
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(64);
    canvas.set_height(64);
    Renderer::with_canvas(canvas, &RendererOptions::default()).unwrap()
}

fn vertex(x: f32, y: f32) -> TestVertex {
    TestVertex {
        pos: vec2(x, y),
        color: vec3(1.0, 0.5, 0.0),
    }
}

struct TestLayer {
    shader: Shader,
    buffer: TriangleBuffer<TestVertex>,
}

impl Layer for TestLayer {
    fn render(&mut self, renderer: &Renderer) {
        let shader = self.shader.bind(renderer);
        self.buffer.bind(renderer, &shader).draw();
    }
}

#[wasm_bindgen_test]
fn compiles() {
    let renderer = renderer();
    assert!(Shader::new(&renderer, VERTEX, FRAGMENT).is_ok());
}

#[wasm_bindgen_test]
fn compile_error() {
    let renderer = renderer();
    let broken = VERTEX.replacen('}', "", 1);
    match Shader::new(&renderer, &broken, FRAGMENT) {
        Err(Error::Compile { stage, .. }) => assert_eq!(stage, ShaderStage::Vertex),
        Err(e) => panic!("unexpected error {e}"),
        Ok(_) => panic!("compiled with a missing brace"),
    }
}

#[wasm_bindgen_test]
fn one_draw_call() {
    let mut renderer = renderer();
    let mut layer = TestLayer {
        shader: renderer.create_shader(VERTEX, FRAGMENT).unwrap(),
        buffer: TriangleBuffer::new(
            &renderer,
            &[vertex(-0.5, -0.5), vertex(0.5, -0.5), vertex(0.0, 0.5)],
            &[],
        ),
    };
    assert_eq!(layer.buffer.vertex_count(), 3);
    assert_eq!(layer.buffer.vertex_bytes(), 3 * 5 * 4);
    assert_eq!(layer.buffer.index_count(), 0);

    renderer.frame(&mut layer, 0.0);
    assert_eq!(renderer.draw_calls(), 1);
}

#[wasm_bindgen_test]
fn one_draw_call_per_frame() {
    let mut renderer = renderer();
    let mut mesh = MeshBuilder::new();
    let quad = mesh.push_vertices([
        vertex(-0.5, -0.5),
        vertex(0.5, -0.5),
        vertex(0.5, 0.5),
        vertex(-0.5, 0.5),
    ]);
    mesh.push_quad(quad);

    let mut layer = TestLayer {
        shader: renderer.create_shader(VERTEX, FRAGMENT).unwrap(),
        buffer: TriangleBuffer::from_mesh(&renderer, &mesh),
    };
    assert_eq!(layer.buffer.index_count(), 6);
    for frame in 0..3 {
        renderer.frame(&mut layer, frame as f32 / 60.0);
        assert_eq!(renderer.draw_calls(), 1);
    }
}

/// Counts how many times it was rendered.
struct CountingLayer(Rc<Cell<u64>>);

impl Layer for CountingLayer {
    fn render(&mut self, _: &Renderer) {
        self.0.set(self.0.get() + 1);
    }
}

/// Resolves on the next animation frame, after callbacks that were requested before it.
async fn next_frames(n: usize) {
    for _ in 0..n {
        let promise = js_sys::Promise::new(&mut |resolve, _| {
            js_hooks::window()
                .unwrap()
                .request_animation_frame(&resolve)
                .unwrap();
        });
        JsFuture::from(promise).await.unwrap();
    }
}

#[wasm_bindgen_test]
async fn animation_loop_stop() {
    let rendered = Rc::new(Cell::new(0));
    let animation = AnimationLoop::start(renderer(), CountingLayer(Rc::clone(&rendered)));
    assert!(animation.is_running());

    next_frames(3).await;
    let frames = animation.frames();
    assert!(frames > 0);
    assert_eq!(rendered.get(), frames);

    animation.stop();
    assert!(!animation.is_running());
    next_frames(3).await;
    assert_eq!(animation.frames(), frames);
    assert_eq!(rendered.get(), frames);
}

#[wasm_bindgen_test]
async fn animation_loop_drop() {
    let rendered = Rc::new(Cell::new(0));
    let animation = AnimationLoop::start(renderer(), CountingLayer(Rc::clone(&rendered)));
    next_frames(2).await;
    assert!(rendered.get() > 0);

    drop(animation);
    let before = rendered.get();
    next_frames(3).await;
    assert_eq!(rendered.get(), before);
}
