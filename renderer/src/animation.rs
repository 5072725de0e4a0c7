// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::renderer::{Layer, Renderer};
use gloo_render::{request_animation_frame, AnimationFrame};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Renders a [`Layer`] on every animation frame until stopped. Stops when dropped.
pub struct AnimationLoop {
    control: Rc<Control>,
}

struct Control {
    running: Cell<bool>,
    frames: Cell<u64>,
    // Cancels the pending callback when dropped.
    pending: RefCell<Option<AnimationFrame>>,
}

struct State<L> {
    renderer: Renderer,
    layer: L,
    clock: FirstFrameClock,
}

/// Converts `requestAnimationFrame` timestamps to seconds since the first one.
#[derive(Default)]
struct FirstFrameClock {
    /// Timestamp of the first frame in milliseconds.
    start: Option<f64>,
}

impl FirstFrameClock {
    fn seconds(&mut self, timestamp: f64) -> f32 {
        let start = *self.start.get_or_insert(timestamp);
        ((timestamp - start) * (1.0 / 1000.0)) as f32
    }
}

impl AnimationLoop {
    /// Starts rendering `layer` with `renderer` on the next animation frame. The first frame is
    /// rendered at time zero.
    pub fn start<L: Layer + 'static>(renderer: Renderer, layer: L) -> Self {
        let control = Rc::new(Control {
            running: Cell::new(true),
            frames: Cell::new(0),
            pending: RefCell::new(None),
        });
        let state = Rc::new(RefCell::new(State {
            renderer,
            layer,
            clock: FirstFrameClock::default(),
        }));
        schedule(Rc::clone(&control), state);
        Self { control }
    }

    /// Cancels the pending frame and doesn't schedule any more.
    pub fn stop(&self) {
        self.control.running.set(false);
        // Drop outside the borrow since dropping cancels the callback.
        let pending = self.control.pending.borrow_mut().take();
        drop(pending);
    }

    /// Returns true until [`AnimationLoop::stop`] is called.
    pub fn is_running(&self) -> bool {
        self.control.running.get()
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.control.frames.get()
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn schedule<L: Layer + 'static>(control: Rc<Control>, state: Rc<RefCell<State<L>>>) {
    let next = Rc::clone(&control);
    let frame = request_animation_frame(move |timestamp| {
        if !next.running.get() {
            return;
        }

        {
            let mut state = state.borrow_mut();
            let State {
                renderer,
                layer,
                clock,
            } = &mut *state;
            renderer.frame(layer, clock.seconds(timestamp));
        }
        next.frames.set(next.frames.get() + 1);

        schedule(next, state);
    });
    *control.pending.borrow_mut() = Some(frame);
}
