// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides linear interpolation helpers for bounding
//! boxes. Interpolation is purely linear in each of the four box
//! scalars independently; no easing, no rounding.

use crate::models::region::BoundingBox;

/// Linear interpolation between two scalars.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Interpolate each scalar of two bounding boxes independently.
pub fn lerp_box(a: &BoundingBox, b: &BoundingBox, t: f64) -> BoundingBox {
    BoundingBox {
        left: lerp(a.left, b.left, t),
        top: lerp(a.top, b.top, t),
        width: lerp(a.width, b.width, t),
        height: lerp(a.height, b.height, t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(2.0, 10.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(2.0, 10.0, 0.5), 6.0);
    }

    #[test]
    fn test_lerp_box_midpoint() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(10.0, 20.0, 20.0, 30.0);
        let mid = lerp_box(&a, &b, 0.5);

        assert_eq!(mid.left, 5.0);
        assert_eq!(mid.top, 10.0);
        assert_eq!(mid.width, 15.0);
        assert_eq!(mid.height, 20.0);
    }

    #[test]
    fn test_lerp_box_is_componentwise_linear() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(0.0, 0.0, 20.0, 20.0);

        // 2/5 of the way from frame 10 to frame 15
        let step = lerp_box(&a, &b, 2.0 / 5.0);
        assert!((step.width - 14.0).abs() < 1e-9);
        assert!((step.height - 14.0).abs() < 1e-9);
    }
}
