// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;
use thiserror::Error;

/// Which half of a [`Shader`][`crate::Shader`] a compile error came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    /// The vertex shader.
    Vertex,
    /// The fragment shader.
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}

/// Everything that can go wrong while setting up rendering. None of these are retried.
#[derive(Debug, Error)]
pub enum Error {
    /// The canvas element couldn't be found.
    #[error("canvas: {0}")]
    Canvas(String),
    /// Neither the primary nor the fallback context name gave a context.
    #[error("{title} not supported on this browser")]
    ContextUnavailable {
        /// Human readable name of the context e.g. `WebGL`.
        title: &'static str,
    },
    /// A shader failed to compile. Contains the shader info log.
    #[error("error compiling {stage} shader: {log}")]
    Compile {
        /// The shader that failed.
        stage: ShaderStage,
        /// Compiler diagnostics.
        log: String,
    },
    /// The program failed to link. Contains the program info log.
    #[error("error linking program: {0}")]
    Link(String),
    /// The program failed validation. Contains the program info log.
    #[error("error validating program: {0}")]
    Validation(String),
}

impl Error {
    /// Returns true if the error should be shown to the user, not just logged.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::Canvas(_) | Self::ContextUnavailable { .. })
    }
}

/// Shorthand for results of renderer setup.
pub type Result<T> = std::result::Result<T, Error>;

/// Cleans up an info log from WebGL.
pub(crate) fn trim_info_log(log: Option<String>) -> String {
    let log = log.unwrap_or_default();
    log.trim_end_matches(|c: char| c == '\x00' || c.is_whitespace())
        .to_owned()
}
