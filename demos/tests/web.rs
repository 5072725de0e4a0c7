// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

#![cfg(target_arch = "wasm32")]

use demos::cube::{self, CubeLayer};
use demos::triangle;
use renderer::{Renderer, RendererOptions, Spin, TriangleBuffer};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn renderer() -> Renderer {
    let canvas = js_hooks::document()
        .unwrap()
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(160);
    canvas.set_height(120);
    Renderer::with_canvas(canvas, &RendererOptions::default()).unwrap()
}

#[wasm_bindgen_test]
fn triangle_draws_once() {
    let renderer = triangle::draw(renderer()).unwrap();
    assert_eq!(renderer.draw_calls(), 1);
}

#[wasm_bindgen_test]
fn uploaded_sizes() {
    let renderer = renderer();

    let triangle = TriangleBuffer::new(&renderer, &triangle::vertices(), &[]);
    assert_eq!(triangle.vertex_count(), 3);
    assert_eq!(triangle.vertex_bytes(), 60);
    assert_eq!(triangle.index_count(), 0);

    let cube = TriangleBuffer::from_mesh(&renderer, &cube::mesh());
    assert_eq!(cube.vertex_count(), 24);
    assert_eq!(cube.vertex_bytes(), 576);
    assert_eq!(cube.index_count(), 36);
}

#[wasm_bindgen_test]
fn cube_draws_once_per_frame() {
    let mut renderer = renderer();
    let mut layer = CubeLayer::new(&renderer).unwrap();
    let spin = Spin::default();

    for t in [0.0, 4.0, 4.5] {
        renderer.frame(&mut layer, t);
        assert_eq!(renderer.draw_calls(), 1);
        assert_eq!(layer.world(), spin.world_matrix(t));
    }
}

#[wasm_bindgen_test]
fn cube_starts_animating() {
    let animation = cube::start(renderer()).unwrap();
    assert!(animation.is_running());
    animation.stop();
    assert!(!animation.is_running());
}
