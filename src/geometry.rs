//! Points and segments of the unit circle figure, derived from the angle.
//!
//! Nothing here guards against `cos θ` or `sin θ` being zero: the secant and
//! cosecant points go to infinity (or NaN) and are passed on as-is.

use crate::math::Point;

/// Radius of the drawn circle in scene units
pub const RADIUS: f64 = 2.5;

pub const ORIGIN: Point = [0.0, 0.0];

/// A line segment from `.0` to `.1`
pub type Segment = (Point, Point);

/// Point on the circle at angle `theta`
pub fn circle_point(r: f64, theta: f64) -> Point {
    let (sin, cos) = theta.sin_cos();
    [r * cos, r * sin]
}

/// Where the tangent at the circle point meets the x-axis
pub fn secant_point(r: f64, theta: f64) -> Point {
    [r * (1.0 / theta.cos()), 0.0]
}

/// Where the tangent at the circle point meets the y-axis
pub fn cosecant_point(r: f64, theta: f64) -> Point {
    [0.0, r * (1.0 / theta.sin())]
}

/// The radius along the positive x-axis; does not move
pub fn fixed_radius(r: f64) -> Segment {
    (ORIGIN, [r, 0.0])
}

pub fn hypotenuse(r: f64, theta: f64) -> Segment {
    (ORIGIN, circle_point(r, theta))
}

pub fn sin_line(r: f64, theta: f64) -> Segment {
    let p = circle_point(r, theta);
    ([p[0], 0.0], p)
}

pub fn cos_line(r: f64, theta: f64) -> Segment {
    let p = circle_point(r, theta);
    ([0.0, p[1]], p)
}

pub fn csc_line(r: f64, theta: f64) -> Segment {
    (ORIGIN, cosecant_point(r, theta))
}

pub fn sec_line(r: f64, theta: f64) -> Segment {
    (ORIGIN, secant_point(r, theta))
}

pub fn tan_line(r: f64, theta: f64) -> Segment {
    (secant_point(r, theta), circle_point(r, theta))
}

pub fn cot_line(r: f64, theta: f64) -> Segment {
    (cosecant_point(r, theta), circle_point(r, theta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{length, sub};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn circle_point_at_eighth_turn() {
        let p = circle_point(RADIUS, FRAC_PI_4);
        assert_relative_eq!(p[0], 1.7678, epsilon = 1e-4);
        assert_relative_eq!(p[1], 1.7678, epsilon = 1e-4);
    }

    #[test]
    fn axis_intersections_at_eighth_turn() {
        let x = secant_point(RADIUS, FRAC_PI_4);
        let y = cosecant_point(RADIUS, FRAC_PI_4);
        assert_relative_eq!(x[0], RADIUS * 2.0_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(x[1], 0.0);
        assert_eq!(y[0], 0.0);
        assert_relative_eq!(y[1], RADIUS * 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn segment_lengths_match_trig_values() {
        let theta = 0.7_f64;
        let r = RADIUS;
        let len = |s: Segment| length(sub(s.1, s.0));
        assert_relative_eq!(len(sin_line(r, theta)), r * theta.sin(), epsilon = 1e-12);
        assert_relative_eq!(len(cos_line(r, theta)), r * theta.cos(), epsilon = 1e-12);
        assert_relative_eq!(len(tan_line(r, theta)), r * theta.tan(), epsilon = 1e-12);
        assert_relative_eq!(len(cot_line(r, theta)), r / theta.tan(), epsilon = 1e-12);
        assert_relative_eq!(len(sec_line(r, theta)), r / theta.cos(), epsilon = 1e-12);
        assert_relative_eq!(len(csc_line(r, theta)), r / theta.sin(), epsilon = 1e-12);
        assert_relative_eq!(len(hypotenuse(r, theta)), r, epsilon = 1e-12);
    }

    #[test]
    fn tangent_touches_circle_point() {
        let theta = 2.2;
        let (_, end) = tan_line(RADIUS, theta);
        assert_eq!(end, circle_point(RADIUS, theta));
        let (_, end) = cot_line(RADIUS, theta);
        assert_eq!(end, circle_point(RADIUS, theta));
    }

    #[test]
    fn cosecant_blows_up_at_zero() {
        let y = cosecant_point(RADIUS, 0.0);
        assert!(y[1].is_infinite());
        // sin(π) is not exactly zero, so only a very large value comes out
        assert!(cosecant_point(RADIUS, PI)[1].abs() > 1e15);
    }

    #[test]
    fn secant_is_huge_near_quarter_turn() {
        let x = secant_point(RADIUS, FRAC_PI_2);
        assert!(x[0].abs() > 1e15);
        assert_abs_diff_eq!(circle_point(RADIUS, FRAC_PI_2)[0], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn fixed_radius_ignores_angle() {
        assert_eq!(fixed_radius(RADIUS), (ORIGIN, [RADIUS, 0.0]));
    }
}
