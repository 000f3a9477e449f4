use crate::geometry::Segment;
use crate::math::{add, is_finite, length, midpoint, normalize, scale, sub, Point};

/// Gap between a line and its brace
pub const BRACE_BUFF: f64 = 0.2;
/// Gap between a brace tip and its label
pub const LABEL_BUFF: f64 = 0.25;
/// Largest half-depth of a brace; the tip sticks out twice this far
const BRACE_HALF_DEPTH: f64 = 0.12;

/// 24-bit colour
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#RRGGBB` form used in SVG attributes
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
pub const LOGO_WHITE: Rgb = Rgb(0xEC, 0xE7, 0xE2);
pub const LOGO_RED: Rgb = Rgb(0xE0, 0x7A, 0x5F);
pub const LOGO_GREEN: Rgb = Rgb(0x87, 0xC2, 0xA5);
pub const LOGO_BLUE: Rgb = Rgb(0x52, 0x58, 0x93);
pub const ORANGE: Rgb = Rgb(0xFF, 0x86, 0x2F);
pub const BLUE: Rgb = Rgb(0x58, 0xC4, 0xDD);
pub const PINK: Rgb = Rgb(0xD1, 0x47, 0xBD);
pub const GREEN: Rgb = Rgb(0x83, 0xC1, 0x67);
pub const YELLOW: Rgb = Rgb(0xFF, 0xFF, 0x00);
pub const PURPLE: Rgb = Rgb(0x9A, 0x72, 0xAC);

/// Bracket drawn beside a segment, on the side given by the unit vector `direction`
#[derive(Clone, Debug, PartialEq)]
pub struct Brace {
    pub segment: Segment,
    pub direction: Point,
    pub color: Rgb,
}

impl Brace {
    pub fn new(segment: Segment, direction: Point, color: Rgb) -> Self {
        Brace {
            segment,
            direction,
            color,
        }
    }

    fn half_depth(&self) -> f64 {
        BRACE_HALF_DEPTH.min(length(sub(self.segment.1, self.segment.0)) / 4.0)
    }

    /// Point of the brace's middle cusp
    pub fn tip(&self) -> Point {
        let (a, b) = self.segment;
        let offset = BRACE_BUFF + 2.0 * self.half_depth();
        add(midpoint(a, b), scale(self.direction, offset))
    }

    /// Where the label belonging to this brace is anchored
    pub fn label_anchor(&self) -> Point {
        add(self.tip(), scale(self.direction, LABEL_BUFF))
    }

    /// Seven-point outline: end, shoulder, inner shoulder, tip, and back out
    pub fn outline(&self) -> [Point; 7] {
        let (a, b) = self.segment;
        let h = self.half_depth();
        let along = normalize(sub(b, a));
        let d = self.direction;
        let m = midpoint(a, b);
        let near = |p: Point| add(p, scale(d, BRACE_BUFF));
        let far = |p: Point| add(p, scale(d, BRACE_BUFF + h));

        [
            near(a),
            far(add(a, scale(along, h))),
            far(sub(m, scale(along, h))),
            self.tip(),
            far(add(m, scale(along, h))),
            far(sub(b, scale(along, h))),
            near(b),
        ]
    }

    /// A brace is drawable once its line and side are both known
    pub fn is_drawable(&self) -> bool {
        is_finite(self.segment.0)
            && is_finite(self.segment.1)
            && self.direction != [0.0, 0.0]
            && is_finite(self.direction)
    }

    /// Label for this brace, placed at its tip
    pub fn label(&self, text: &str) -> Label {
        Label {
            text: text.to_string(),
            at: self.label_anchor(),
            direction: self.direction,
            color: self.color,
        }
    }
}

/// Text placed next to a brace. `direction` points away from the brace.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub at: Point,
    pub direction: Point,
    pub color: Rgb,
}

/// Horizontal alignment of a label relative to its anchor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Start,
    Middle,
    End,
}

impl Label {
    /// Labels grow away from their brace
    pub fn align(&self) -> Align {
        if self.direction[0] > 0.5 {
            Align::Start
        } else if self.direction[0] < -0.5 {
            Align::End
        } else {
            Align::Middle
        }
    }
}

/// One drawable primitive, in scene units
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Circle {
        center: Point,
        radius: f64,
        color: Rgb,
    },
    Dot {
        at: Point,
        color: Rgb,
    },
    Line {
        segment: Segment,
        color: Rgb,
    },
    Brace(Brace),
    Label(Label),
}
