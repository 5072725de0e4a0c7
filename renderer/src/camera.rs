// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::shader::ShaderBinding;
use glam::{Mat4, Vec3};

/// A 3 dimensional camera.
#[derive(Clone, Debug, Default)]
pub struct Camera3d {
    /// The [projection matrix](https://en.wikipedia.org/wiki/Projection_matrix).
    pub projection_matrix: Mat4,
    /// Transforms world space to camera space.
    pub view_matrix: Mat4,
}

impl Camera3d {
    /// Creates a new [`Camera3d`] that is looking from `pos` at `target`. Assumes up is +Y.
    pub fn looking_at(pos: Vec3, target: Vec3, projection: &impl Projection) -> Self {
        let view_matrix = Mat4::look_at_rh(pos, target, Vec3::Y);
        Self::with_view(view_matrix, projection)
    }

    /// Creates a new [`Camera3d`] with a `view_matrix`.
    pub fn with_view(view_matrix: Mat4, projection: &impl Projection) -> Self {
        Self {
            projection_matrix: projection.projection_matrix(),
            view_matrix,
        }
    }

    /// Replaces the projection e.g. after the viewport is resized.
    pub fn set_projection(&mut self, projection: &impl Projection) {
        self.projection_matrix = projection.projection_matrix();
    }

    /// Sets `uniform mat4 mView;` and `uniform mat4 mProj;`.
    pub fn prepare(&self, shader: &ShaderBinding) {
        shader.uniform_matrix4f("mView", &self.view_matrix);
        shader.uniform_matrix4f("mProj", &self.projection_matrix);
    }
}

/// [`Perspective`] projections make objects that are further from the [`Camera3d`] appear smaller.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Perspective {
    /// [Aspect ratio](https://en.wikipedia.org/wiki/Aspect_ratio_(image)) of viewport (get with
    /// [`Renderer::aspect_ratio`][`crate::Renderer::aspect_ratio`]). Required
    /// or defaults to `1.0`.
    pub aspect: f32,
    /// Vertical [field of view](https://en.wikipedia.org/wiki/Field_of_view) in degrees. Defaults
    /// to `45.0`.
    pub fov: f32,
    /// Near [clip](https://en.wikipedia.org/wiki/Clipping_(computer_graphics)) plane in world
    /// space. Defaults to `0.1`.
    pub z_near: f32,
    /// Far [clip](https://en.wikipedia.org/wiki/Clipping_(computer_graphics)) plane in world space.
    /// Defaults to `1000.0`.
    pub z_far: f32,
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            aspect: 1.0,
            fov: 45.0,
            z_near: 0.1,
            z_far: 1000.0,
        }
    }
}

impl Projection for Perspective {
    fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.z_near, self.z_far)
    }
}

/// A [`Projection`] defines how objects appear based on their distance to the [`Camera3d`].
pub trait Projection {
    /// Gets the [projection matrix](https://en.wikipedia.org/wiki/Projection_matrix).
    fn projection_matrix(&self) -> Mat4;
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn looking_at_origin() {
        let camera = Camera3d::looking_at(
            Vec3::new(0.0, 0.0, -6.0),
            Vec3::ZERO,
            &Perspective::default(),
        );
        // The eye ends up at the origin of camera space.
        let eye = camera.view_matrix * Vec4::new(0.0, 0.0, -6.0, 1.0);
        assert!(eye.abs_diff_eq(Vec4::new(0.0, 0.0, 0.0, 1.0), 1e-5));

        // The origin is straight ahead, 6 units down the camera's -Z.
        let origin = camera.view_matrix * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(origin.abs_diff_eq(Vec4::new(0.0, 0.0, -6.0, 1.0), 1e-5));
    }

    #[test]
    fn perspective_defaults() {
        let p = Perspective::default();
        assert_eq!(p.fov, 45.0);
        assert_eq!(p.z_near, 0.1);
        assert_eq!(p.z_far, 1000.0);

        let m = p.projection_matrix();
        let focal = 1.0 / (22.5f32).to_radians().tan();
        assert!((m.x_axis.x - focal).abs() < 1e-5);
        assert!((m.y_axis.y - focal).abs() < 1e-5);
    }

    #[test]
    fn resize() {
        let mut perspective = Perspective::default();
        let mut camera = Camera3d::looking_at(Vec3::Z, Vec3::ZERO, &perspective);
        let square = camera.projection_matrix;

        perspective.aspect = 2.0;
        camera.set_projection(&perspective);
        assert!((camera.projection_matrix.x_axis.x - square.x_axis.x / 2.0).abs() < 1e-5);
        assert_eq!(camera.projection_matrix.y_axis.y, square.y_axis.y);
    }
}
