// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use glam::Mat4;
use std::f32::consts::TAU;

/// Rotates a model about the vertical (Y) and horizontal (X) axes at the same time, each at a
/// constant rate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Spin {
    /// Seconds per full turn about the Y axis.
    pub y_period: f32,
    /// Seconds per full turn about the X axis.
    pub x_period: f32,
}

impl Default for Spin {
    fn default() -> Self {
        Self {
            y_period: 8.0,
            x_period: 16.0,
        }
    }
}

impl Spin {
    /// Returns the `(y, x)` angles in radians after `seconds`.
    pub fn angles(&self, seconds: f32) -> (f32, f32) {
        (
            seconds / self.y_period * TAU,
            seconds / self.x_period * TAU,
        )
    }

    /// Returns the world matrix after `seconds`, equal to `rotation_x * rotation_y`.
    pub fn world_matrix(&self, seconds: f32) -> Mat4 {
        let (y, x) = self.angles(seconds);
        Mat4::from_rotation_x(x) * Mat4::from_rotation_y(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn identity_at_start() {
        assert_eq!(Spin::default().world_matrix(0.0), Mat4::IDENTITY);
    }

    #[test]
    fn four_seconds() {
        let (y, x) = Spin::default().angles(4.0);
        assert!((y - PI).abs() < 1e-6);
        assert!((x - FRAC_PI_2).abs() < 1e-6);

        // Half turn about Y flips +X and +Z, then quarter turn about X takes -Z to +Y.
        let world = Spin::default().world_matrix(4.0);
        assert!(world
            .transform_vector3(Vec3::X)
            .abs_diff_eq(-Vec3::X, 1e-5));
        assert!(world
            .transform_vector3(Vec3::Z)
            .abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn deterministic() {
        let spin = Spin::default();
        assert_eq!(spin.world_matrix(12.345), spin.world_matrix(12.345));
    }

    #[test]
    fn full_turn() {
        let spin = Spin::default();
        assert!(spin
            .world_matrix(16.0)
            .abs_diff_eq(Mat4::IDENTITY, 1e-5));
    }
}
