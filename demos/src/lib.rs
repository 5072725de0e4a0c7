// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

#![crate_name = "demos"]

//! # Demos
//!
//! A static triangle and a spinning cube, exported to JavaScript.

pub mod cube;
pub mod triangle;

use js_hooks::{alert, console_error};
use renderer::{AnimationLoop, Error, Renderer, RendererOptions};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    // Required to get stack traces in WASM.
    #[cfg(target_family = "wasm")]
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
}

/// Draws the triangle once on the canvas with the id `canvas_id` (default `drawingcanvas`).
/// Returns false if setup failed, in which case nothing was drawn.
#[wasm_bindgen]
pub fn run_triangle(canvas_id: Option<String>) -> bool {
    match create_renderer(canvas_id).and_then(triangle::draw) {
        Ok(_) => true,
        Err(e) => {
            report(&e);
            false
        }
    }
}

/// Starts spinning the cube on the canvas with the id `canvas_id` (default `drawingcanvas`).
/// Returns nothing if setup failed, in which case nothing will be drawn.
#[wasm_bindgen]
pub fn run_cube(canvas_id: Option<String>) -> Option<CubeDemo> {
    match create_renderer(canvas_id).and_then(cube::start) {
        Ok(animation) => Some(CubeDemo { animation }),
        Err(e) => {
            report(&e);
            None
        }
    }
}

/// Handle to a running cube demo. Stops the animation when freed.
#[wasm_bindgen]
pub struct CubeDemo {
    animation: AnimationLoop,
}

#[wasm_bindgen]
impl CubeDemo {
    /// Stops the animation. The last frame stays on the canvas.
    pub fn stop(&self) {
        self.animation.stop();
    }

    /// Returns true until stopped.
    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.animation.is_running()
    }

    /// Number of frames drawn so far.
    pub fn frames(&self) -> f64 {
        self.animation.frames() as f64
    }
}

fn create_renderer(canvas_id: Option<String>) -> Result<Renderer, Error> {
    let mut options = RendererOptions::default();
    if let Some(canvas_id) = canvas_id {
        options.canvas_id = canvas_id;
    }
    Renderer::new(&options)
}

/// Logs setup errors, and also alerts the ones the user can do something about.
fn report(error: &Error) {
    console_error!("{}", error);
    if error.is_user_facing() {
        alert(&error.to_string());
    }
}
