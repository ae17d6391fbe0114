//! Pure ellipse geometry shared by both motion models.

use serde::Serialize;
use std::f64::consts::TAU;

/// Position and scale written to one rendered element per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub scale: f64,
}

impl Transform {
    /// Component-wise linear interpolation, `t` in [0, 1].
    pub fn lerp(self, to: Transform, t: f64) -> Transform {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Transform {
            x: mix(self.x, to.x),
            y: mix(self.y, to.y),
            z: mix(self.z, to.z),
            scale: mix(self.scale, to.scale),
        }
    }

    /// CSS `transform` value for this position.
    pub fn to_css(&self) -> String {
        format!(
            "translate3d({}px, {}px, {}px) scale({})",
            self.x, self.y, self.z, self.scale
        )
    }
}

/// Ellipse by semi-axes. Angle 0 is the right-hand side, π/2 the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    /// Horizontal semi-axis.
    pub a: f64,
    /// Vertical semi-axis.
    pub b: f64,
}

impl Ellipse {
    /// Ellipse inscribed in a `width` × `height` box.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            a: width / 2.0,
            b: height / 2.0,
        }
    }

    /// Point on the flat ellipse: `(a·cosθ, b·sinθ)`.
    pub fn point(&self, angle: f64) -> (f64, f64) {
        (self.a * angle.cos(), self.b * angle.sin())
    }
}

/// Angle folded into [0, 2π).
pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

/// Angular distance from angle 0, in [0, π].
pub fn distance_from_front(angle: f64) -> f64 {
    let a = normalize_angle(angle);
    a.min(TAU - a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn ellipse_from_size_halves_dimensions() {
        let e = Ellipse::from_size(600.0, 300.0);
        assert_eq!(e, Ellipse { a: 300.0, b: 150.0 });
    }

    #[test]
    fn ellipse_points_at_quarter_turns() {
        let e = Ellipse::from_size(600.0, 300.0);
        let (x, y) = e.point(0.0);
        assert!(close(x, 300.0) && close(y, 0.0));
        let (x, y) = e.point(PI / 2.0);
        assert!(close(x, 0.0) && close(y, 150.0));
        let (x, y) = e.point(PI);
        assert!(close(x, -300.0) && close(y, 0.0));
    }

    #[test]
    fn normalize_handles_negative_and_large_angles() {
        assert!(close(normalize_angle(-PI / 2.0), 1.5 * PI));
        assert!(close(normalize_angle(5.0 * PI), PI));
    }

    #[test]
    fn distance_from_front_is_symmetric() {
        assert!(close(distance_from_front(0.3), 0.3));
        assert!(close(distance_from_front(-0.3), 0.3));
        assert!(close(distance_from_front(TAU - 0.3), 0.3));
        assert!(close(distance_from_front(PI), PI));
    }

    #[test]
    fn lerp_midpoint() {
        let a = Transform {
            x: 0.0,
            y: 0.0,
            z: -10.0,
            scale: 0.4,
        };
        let b = Transform {
            x: 10.0,
            y: 20.0,
            z: 10.0,
            scale: 1.0,
        };
        let m = a.lerp(b, 0.5);
        assert!(close(m.x, 5.0) && close(m.y, 10.0) && close(m.z, 0.0) && close(m.scale, 0.7));
    }

    #[test]
    fn css_transform_format() {
        let t = Transform {
            x: 1.5,
            y: -2.0,
            z: 0.0,
            scale: 1.0,
        };
        assert_eq!(t.to_css(), "translate3d(1.5px, -2px, 0px) scale(1)");
    }
}
