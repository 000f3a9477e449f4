use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// A point or vector in scene units
pub type Point = [f64; 2];

/// Adds two vectors
pub fn add(a: Point, b: Point) -> Point {
    [a[0] + b[0], a[1] + b[1]]
}

/// Subtracts `b` from `a`
pub fn sub(a: Point, b: Point) -> Point {
    [a[0] - b[0], a[1] - b[1]]
}

/// Multiplies a vector by a scalar
pub fn scale(v: Point, factor: f64) -> Point {
    [v[0] * factor, v[1] * factor]
}

pub fn length(v: Point) -> f64 {
    v[0].hypot(v[1])
}

pub fn midpoint(a: Point, b: Point) -> Point {
    [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0]
}

pub fn is_finite(p: Point) -> bool {
    p[0].is_finite() && p[1].is_finite()
}

/// Normalizes a vector, returning the zero vector when it has no length
pub fn normalize(v: Point) -> Point {
    let length = length(v);
    if length > 0.0 {
        [v[0] / length, v[1] / length]
    } else {
        [0.0, 0.0]
    }
}

/// Counter-clockwise quarter turn used to place a brace beside its line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuarterTurn {
    /// Rotation by 90 degrees
    Ccw90,
    /// Rotation by 270 degrees
    Ccw270,
}

impl QuarterTurn {
    /// Rotates a vector by this quarter turn without rounding error
    pub fn rotate(self, v: Point) -> Point {
        match self {
            QuarterTurn::Ccw90 => [-v[1], v[0]],
            QuarterTurn::Ccw270 => [v[1], -v[0]],
        }
    }
}

/// Reduces an angle into [0, 2π)
fn reduce_angle(theta: f64) -> f64 {
    theta.rem_euclid(TAU)
}

/// Brace side for the sin, cos, sec, tan and cot lines
pub fn brace_side(theta: f64) -> QuarterTurn {
    let theta = reduce_angle(theta);
    if (0.0..FRAC_PI_2).contains(&theta) || (PI..3.0 * FRAC_PI_2).contains(&theta) {
        QuarterTurn::Ccw270
    } else {
        QuarterTurn::Ccw90
    }
}

/// Brace side for the csc line, the mirror image of [`brace_side`]
pub fn csc_brace_side(theta: f64) -> QuarterTurn {
    let theta = reduce_angle(theta);
    if (FRAC_PI_2..PI).contains(&theta) || (3.0 * FRAC_PI_2..TAU).contains(&theta) {
        QuarterTurn::Ccw270
    } else {
        QuarterTurn::Ccw90
    }
}

/// Unit direction pointing to the side of `line` on which its brace is drawn
pub fn brace_direction(line: (Point, Point), theta: f64) -> Point {
    brace_side(theta).rotate(normalize(sub(line.1, line.0)))
}

/// Like [`brace_direction`], for the cosecant line
pub fn csc_brace_direction(line: (Point, Point), theta: f64) -> Point {
    csc_brace_side(theta).rotate(normalize(sub(line.1, line.0)))
}

/// Axis-aligned rectangle in scene units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn contains(&self, p: Point) -> bool {
        p[0] >= self.min[0] && p[0] <= self.max[0] && p[1] >= self.min[1] && p[1] <= self.max[1]
    }
}

/// Clips a segment to `bounds` (Liang-Barsky).
///
/// Endpoints may be infinite; segments with a NaN coordinate, or lying
/// entirely outside, yield `None`.
pub fn clip_segment(a: Point, b: Point, bounds: &Bounds) -> Option<(Point, Point)> {
    if a.iter().chain(b.iter()).any(|c| c.is_nan()) {
        return None;
    }

    // An infinite endpoint leaves only the direction of the ray usable
    let (a, b) = match (is_finite(a), is_finite(b)) {
        (true, true) => (a, b),
        (true, false) => (a, far_point(a, b, bounds)?),
        (false, true) => (far_point(b, a, bounds)?, b),
        (false, false) => return None,
    };

    let d = sub(b, a);
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    let edges = [
        (-d[0], a[0] - bounds.min[0]),
        (d[0], bounds.max[0] - a[0]),
        (-d[1], a[1] - bounds.min[1]),
        (d[1], bounds.max[1] - a[1]),
    ];

    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((add(a, scale(d, t0)), add(a, scale(d, t1))))
}

/// Replaces the infinite endpoint `toward` with a finite point beyond `bounds`
fn far_point(from: Point, toward: Point, bounds: &Bounds) -> Option<Point> {
    // Only the infinite components decide which way the ray heads
    let dir = normalize(toward.map(|c| if c.is_infinite() { c.signum() } else { 0.0 }));
    if dir == [0.0, 0.0] {
        return None;
    }
    let span = length(sub(bounds.max, bounds.min)) + length(from);
    Some(add(from, scale(dir, span)))
}
