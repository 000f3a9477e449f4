use crate::error::Result;
use crate::geometry::{
    circle_point, cos_line, cosecant_point, cot_line, csc_line, fixed_radius, hypotenuse,
    secant_point, sec_line, sin_line, tan_line, Segment, ORIGIN, RADIUS,
};
use crate::math::{brace_direction, csc_brace_direction, Point};
use crate::render::{Frame, Renderer};
use crate::shapes::{
    Brace, Rgb, Shape, BLUE, GREEN, LOGO_BLUE, LOGO_GREEN, LOGO_RED, LOGO_WHITE, ORANGE, PINK,
    PURPLE, WHITE, YELLOW,
};
use crate::state::{Animation, ValueTracker};
use log::{debug, info};
use std::f64::consts::TAU;
use std::time::Duration;

/// How long one full turn of the point takes
pub const RUN_TIME: Duration = Duration::from_secs(5);

type SegmentFn = fn(f64, f64) -> Segment;
type DirectionFn = fn(Segment, f64) -> Point;

/// Label, segment, segment the brace side is taken from, side selector and
/// colour of each trig line, in draw order.
///
/// The cot brace takes its side from the tan line, which runs the opposite
/// way along the same tangent; this keeps it outside the circle next to the
/// tan brace.
const TRIG_LINES: [(&str, SegmentFn, SegmentFn, DirectionFn, Rgb); 6] = [
    ("sin(θ)", sin_line, sin_line, brace_direction, ORANGE),
    ("cos(θ)", cos_line, cos_line, brace_direction, BLUE),
    ("csc(θ)", csc_line, csc_line, csc_brace_direction, PINK),
    ("sec(θ)", sec_line, sec_line, brace_direction, GREEN),
    ("tan(θ)", tan_line, tan_line, brace_direction, YELLOW),
    ("cot(θ)", cot_line, tan_line, brace_direction, PURPLE),
];

/// A scene object, either fixed or rebuilt from the angle on every frame
pub enum Mobject {
    Static(Shape),
    Redraw(Box<dyn Fn(f64) -> Shape>),
}

impl Mobject {
    pub fn evaluate(&self, theta: f64) -> Shape {
        match self {
            Mobject::Static(shape) => shape.clone(),
            Mobject::Redraw(build) => build(theta),
        }
    }
}

/// Wraps a shape builder so it is re-evaluated every frame
pub fn always_redraw<F>(build: F) -> Mobject
where
    F: Fn(f64) -> Shape + 'static,
{
    Mobject::Redraw(Box::new(build))
}

#[derive(Default)]
pub struct Scene {
    mobjects: Vec<Mobject>,
}

impl Scene {
    pub fn new() -> Self {
        Scene::default()
    }

    pub fn add(&mut self, mobject: Mobject) {
        self.mobjects.push(mobject);
    }

    /// The rotating point with its six trig lines, braces and labels
    pub fn unit_circle() -> Self {
        let r = RADIUS;
        let mut scene = Scene::new();

        scene.add(Mobject::Static(Shape::Circle {
            center: ORIGIN,
            radius: r,
            color: WHITE,
        }));

        scene.add(Mobject::Static(Shape::Line {
            segment: fixed_radius(r),
            color: WHITE,
        }));
        scene.add(always_redraw(move |theta| Shape::Line {
            segment: hypotenuse(r, theta),
            color: WHITE,
        }));
        for (_, segment, .., color) in TRIG_LINES {
            scene.add(always_redraw(move |theta| Shape::Line {
                segment: segment(r, theta),
                color,
            }));
        }

        scene.add(Mobject::Static(Shape::Dot {
            at: ORIGIN,
            color: LOGO_WHITE,
        }));
        let moving_dots: [(fn(f64, f64) -> Point, Rgb); 3] = [
            (circle_point, LOGO_RED),
            (secant_point, LOGO_GREEN),
            (cosecant_point, LOGO_BLUE),
        ];
        for (point, color) in moving_dots {
            scene.add(always_redraw(move |theta| Shape::Dot {
                at: point(r, theta),
                color,
            }));
        }

        for index in 0..TRIG_LINES.len() {
            scene.add(always_redraw(move |theta| {
                Shape::Brace(trig_brace(index, r, theta))
            }));
        }
        for (index, (text, ..)) in TRIG_LINES.into_iter().enumerate() {
            scene.add(always_redraw(move |theta| {
                Shape::Label(trig_brace(index, r, theta).label(text))
            }));
        }

        scene
    }

    /// Evaluates every mobject at `theta`, in the order they were added
    pub fn snapshot(&self, theta: f64) -> Vec<Shape> {
        self.mobjects.iter().map(|m| m.evaluate(theta)).collect()
    }

    /// Drives `tracker` through `animation`, rendering each frame
    pub fn play<R: Renderer + ?Sized>(
        &self,
        tracker: &mut ValueTracker,
        animation: &Animation,
        renderer: &mut R,
    ) -> Result<()> {
        info!(
            "Playing {} frames from {:.3} to {:.3} at {} fps",
            animation.frame_count() + 1,
            animation.start,
            animation.end,
            animation.fps
        );

        for (index, alpha) in animation.frames().enumerate() {
            tracker.set_value(animation.value_at(alpha));
            let theta = tracker.get_value();
            debug!("Frame {index}: theta = {theta:.4}");

            let frame = Frame {
                index,
                theta,
                shapes: self.snapshot(theta),
            };
            renderer.render_frame(&frame)?;
        }

        renderer.finish()
    }
}

/// The full turn played by the unit circle scene
pub fn full_turn(fps: u32) -> Animation {
    Animation::linear(0.0, TAU, RUN_TIME, fps)
}

fn trig_brace(index: usize, r: f64, theta: f64) -> Brace {
    let (_, segment, side_source, direction, color) = TRIG_LINES[index];
    Brace::new(
        segment(r, theta),
        direction(side_source(r, theta), theta),
        color,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::QuarterTurn;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    #[derive(Default)]
    struct Recorder {
        frames: Vec<Frame>,
        finished: bool,
    }

    impl Renderer for Recorder {
        fn render_frame(&mut self, frame: &Frame) -> Result<()> {
            self.frames.push(frame.clone());
            Ok(())
        }

        fn finish(&mut self) -> Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    fn braces(shapes: &[Shape]) -> Vec<&Brace> {
        shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Brace(b) => Some(b),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn unit_circle_registers_every_object() {
        let shapes = Scene::unit_circle().snapshot(FRAC_PI_4);
        // circle, 8 lines, 4 dots, 6 braces, 6 labels
        assert_eq!(shapes.len(), 25);

        assert!(matches!(shapes[0], Shape::Circle { radius, .. } if radius == RADIUS));
        assert!(shapes[1..9].iter().all(|s| matches!(s, Shape::Line { .. })));
        assert!(shapes[9..13].iter().all(|s| matches!(s, Shape::Dot { .. })));
        assert!(shapes[13..19].iter().all(|s| matches!(s, Shape::Brace(_))));
        assert!(shapes[19..].iter().all(|s| matches!(s, Shape::Label(_))));
    }

    #[test]
    fn circle_dot_follows_angle() {
        let shapes = Scene::unit_circle().snapshot(FRAC_PI_4);
        let Shape::Dot { at, color } = &shapes[10] else {
            panic!("expected the circle dot");
        };
        assert_eq!(*color, LOGO_RED);
        assert_eq!(*at, circle_point(RADIUS, FRAC_PI_4));
    }

    #[test]
    fn static_objects_do_not_move() {
        let scene = Scene::unit_circle();
        let a = scene.snapshot(0.3);
        let b = scene.snapshot(2.9);
        assert_eq!(a[0], b[0]);
        assert_eq!(a[1], b[1]);
        assert_ne!(a[2], b[2]);
    }

    #[test]
    fn labels_match_braces() {
        let shapes = Scene::unit_circle().snapshot(1.0);
        let texts: Vec<&str> = shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Label(l) => Some(l.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, ["sin(θ)", "cos(θ)", "csc(θ)", "sec(θ)", "tan(θ)", "cot(θ)"]);

        for (brace, label) in braces(&shapes).iter().zip(&shapes[19..]) {
            let Shape::Label(label) = label else { unreachable!() };
            assert_eq!(label.at, brace.label_anchor());
            assert_eq!(label.color, brace.color);
        }
    }

    #[test]
    fn csc_brace_uses_its_own_side() {
        let theta = 0.6;
        let shapes = Scene::unit_circle().snapshot(theta);
        let braces = braces(&shapes);
        let sin = sin_line(RADIUS, theta);
        let csc = csc_line(RADIUS, theta);
        let unit = |s: Segment| crate::math::normalize(crate::math::sub(s.1, s.0));

        assert_eq!(braces[0].direction, QuarterTurn::Ccw270.rotate(unit(sin)));
        assert_eq!(braces[2].direction, QuarterTurn::Ccw90.rotate(unit(csc)));
    }

    #[test]
    fn cot_brace_shares_the_tan_side() {
        for theta in [FRAC_PI_4, 2.0, 4.0, 5.5] {
            let shapes = Scene::unit_circle().snapshot(theta);
            let braces = braces(&shapes);
            let tan = tan_line(RADIUS, theta);

            assert_eq!(braces[5].segment, cot_line(RADIUS, theta));
            assert_eq!(braces[5].direction, brace_direction(tan, theta));
            assert_eq!(braces[5].direction, braces[4].direction);
        }
    }

    #[test]
    fn cot_label_stays_outside_the_circle() {
        let shapes = Scene::unit_circle().snapshot(FRAC_PI_4);
        let Shape::Label(cot) = &shapes[24] else {
            panic!("expected the cot label");
        };
        assert_eq!(cot.text, "cot(θ)");
        assert!(crate::math::length(cot.at) > RADIUS);
    }

    #[test]
    fn quarter_turn_snapshot_has_runaway_secant() {
        let shapes = Scene::unit_circle().snapshot(FRAC_PI_2);
        let Shape::Dot { at, .. } = &shapes[11] else {
            panic!("expected the secant dot");
        };
        assert!(at[0].abs() > 1e15);
    }

    #[test]
    fn play_renders_every_frame_then_finishes() {
        let scene = Scene::unit_circle();
        let mut tracker = ValueTracker::new(0.0);
        let mut recorder = Recorder::default();
        scene.play(&mut tracker, &full_turn(10), &mut recorder).unwrap();

        assert!(recorder.finished);
        assert_eq!(recorder.frames.len(), 51);
        assert_eq!(recorder.frames[0].theta, 0.0);
        assert_eq!(recorder.frames[50].theta, TAU);
        assert_eq!(tracker.get_value(), TAU);
        assert!(recorder
            .frames
            .iter()
            .enumerate()
            .all(|(i, f)| f.index == i && f.shapes.len() == 25));
    }
}
