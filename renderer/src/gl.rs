// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

pub(crate) use gl::*;

/// This module provides utilities to write code that is compatible with WebGL and WebGL2.
/// It accomplishes this by aliasing either WebGlRenderingContext or WebGl2RenderingContext to Gl.
/// Both expose the same names for everything the renderer uses.

#[cfg(not(feature = "webgl2"))]
#[macro_use]
#[allow(clippy::module_inception)]
mod gl {
    use web_sys::WebGlRenderingContext;

    pub(crate) type Gl = WebGlRenderingContext;

    /// Names of context for get_context call, in order of preference.
    pub(crate) const GL_NAMES: [&str; 2] = ["webgl", "experimental-webgl"];

    // Use a macro so concat!() works.
    macro_rules! gl_title {
        () => {
            "WebGL"
        };
    }
}

#[cfg(feature = "webgl2")]
#[macro_use]
#[allow(clippy::module_inception)]
mod gl {
    use web_sys::WebGl2RenderingContext;

    pub(crate) type Gl = WebGl2RenderingContext;

    pub(crate) const GL_NAMES: [&str; 2] = ["webgl2", "experimental-webgl2"];

    macro_rules! gl_title {
        () => {
            "WebGL2"
        };
    }
}
