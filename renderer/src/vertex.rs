// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::attribs::Attribs;
use bytemuck::Pod;
use glam::*;

#[doc(hidden)]
pub use bytemuck::{Pod as __Pod, Zeroable as __Zeroable};

/// Any data consisting of [`prim@f32`]s that a vertex shader reads from named `attribute`s. You can
/// declare one with [`derive_vertex`][`crate::derive_vertex`].
pub trait Vertex: Pod {
    /// Appends each field to `attribs` in memory order.
    fn bind_attribs(attribs: &mut Attribs);
}

/// A single vertex field type, made of some number of [`prim@f32`]s.
pub trait Attribute: Pod {
    /// Number of [`prim@f32`] components.
    const FLOATS: usize;
}

/// For easily declaring a [`Vertex`]. Each field is prefixed by the name of the shader
/// `attribute` it feeds. Unfortunately requires putting `bytemuck = "1.9"` in your `Cargo.toml`.
///
/// ```ignore
/// derive_vertex!(
///     pub struct PosColor {
///         "vertPosition" => pub pos: Vec2,
///         "vertColor" => pub color: Vec3,
///     }
/// );
/// ```
#[macro_export]
macro_rules! derive_vertex {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($attrib:literal => $field_vis:vis $field:ident: $typ:ty),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, $crate::__Pod, $crate::__Zeroable)]
        #[repr(C)]
        $vis struct $name {
            $($field_vis $field: $typ),*
        }

        impl $crate::Vertex for $name {
            fn bind_attribs(attribs: &mut $crate::Attribs) {
                $(attribs.attrib::<$typ>($attrib);)*
            }
        }
    };
}

macro_rules! impl_attribute_floats {
    ($a: ty, $floats: literal) => {
        impl Attribute for $a {
            const FLOATS: usize = $floats;
        }
    };
}

impl_attribute_floats!(f32, 1);
impl_attribute_floats!(Vec2, 2);
impl_attribute_floats!(Vec3, 3);

// These are normally 16 byte aligned (breaking derive Pod) but not with glam's scalar-math feature.
impl_attribute_floats!(Vec4, 4);
