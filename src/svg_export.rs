use crate::error::{AnimationError, Result};
use crate::graphics::Viewport;
use crate::math::{is_finite, Point};
use crate::render::{Frame, Renderer};
use crate::shapes::{Align, Brace, Label, Rgb, Shape};
use log::{debug, info};
use std::path::{Path, PathBuf};
use svg::node::element::{Circle, Line, Polyline, Rectangle, Text};
use svg::Document;

pub const WIDTH: usize = 1920;
pub const HEIGHT: usize = 1080;

const STROKE_WIDTH: f64 = 4.0;
const DOT_RADIUS: f64 = 0.08;
const FONT_SIZE: f64 = 0.4;

/// Writes every frame as `frame_NNNN.svg` into a directory
pub struct SvgRenderer {
    out_dir: PathBuf,
    viewport: Viewport,
    written: usize,
}

impl SvgRenderer {
    pub fn new(out_dir: impl AsRef<Path>) -> Result<Self> {
        let out_dir = out_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&out_dir).map_err(|source| AnimationError::OutputDir {
            path: out_dir.clone(),
            source,
        })?;

        Ok(SvgRenderer {
            out_dir,
            viewport: Viewport::fit(WIDTH, HEIGHT, 1.0),
            written: 0,
        })
    }

    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.out_dir.join(format!("frame_{index:04}.svg"))
    }

    /// Builds the SVG document for one frame
    pub fn document(&self, frame: &Frame) -> Document {
        let (width, height) = (WIDTH as f64, HEIGHT as f64);
        let background = Rectangle::new()
            .set("width", width)
            .set("height", height)
            .set("fill", "black");

        frame.shapes.iter().fold(
            Document::new()
                .set("viewBox", (0.0, 0.0, width, height))
                .set("width", width)
                .set("height", height)
                .add(background),
            |document, shape| self.add_shape(document, shape),
        )
    }

    fn add_shape(&self, document: Document, shape: &Shape) -> Document {
        match shape {
            Shape::Circle {
                center,
                radius,
                color,
            } => {
                if !is_finite(*center) {
                    return document;
                }
                let [cx, cy] = self.viewport.to_device(*center);
                document.add(
                    Circle::new()
                        .set("cx", cx)
                        .set("cy", cy)
                        .set("r", radius * self.viewport.scale_x)
                        .set("fill", "none")
                        .set("stroke", color.to_hex())
                        .set("stroke-width", STROKE_WIDTH),
                )
            }
            Shape::Dot { at, color } => {
                if !is_finite(*at) {
                    return document;
                }
                let [cx, cy] = self.viewport.to_device(*at);
                document.add(
                    Circle::new()
                        .set("cx", cx)
                        .set("cy", cy)
                        .set("r", DOT_RADIUS * self.viewport.scale_x)
                        .set("fill", color.to_hex()),
                )
            }
            Shape::Line { segment, color } => match self.viewport.project_segment(*segment) {
                Some((a, b)) => document.add(line(a, b, *color)),
                None => document,
            },
            Shape::Brace(brace) => self.add_brace(document, brace),
            Shape::Label(label) => self.add_label(document, label),
        }
    }

    fn add_brace(&self, document: Document, brace: &Brace) -> Document {
        if !brace.is_drawable() {
            return document;
        }
        let outline = brace.outline();
        if !outline.iter().all(|p| is_finite(*p)) {
            return document;
        }
        document.add(
            Polyline::new()
                .set("points", self.points_attribute(&outline))
                .set("fill", "none")
                .set("stroke", brace.color.to_hex())
                .set("stroke-width", STROKE_WIDTH)
                .set("stroke-linejoin", "round"),
        )
    }

    fn add_label(&self, document: Document, label: &Label) -> Document {
        if !is_finite(label.at) {
            return document;
        }
        let [x, y] = self.viewport.to_device(label.at);
        let anchor = match label.align() {
            Align::Start => "start",
            Align::Middle => "middle",
            Align::End => "end",
        };
        document.add(
            Text::new(label.text.as_str())
                .set("x", x)
                .set("y", y)
                .set("fill", label.color.to_hex())
                .set("font-family", "serif")
                .set("font-size", FONT_SIZE * self.viewport.scale_y)
                .set("text-anchor", anchor)
                .set("dominant-baseline", "middle"),
        )
    }

    fn points_attribute(&self, points: &[Point]) -> String {
        points
            .iter()
            .map(|p| {
                let [x, y] = self.viewport.to_device(*p);
                format!("{x:.2},{y:.2}")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn line(a: Point, b: Point, color: Rgb) -> Line {
    Line::new()
        .set("x1", a[0])
        .set("y1", a[1])
        .set("x2", b[0])
        .set("y2", b[1])
        .set("stroke", color.to_hex())
        .set("stroke-width", STROKE_WIDTH)
        .set("stroke-linecap", "round")
}

impl Renderer for SvgRenderer {
    fn render_frame(&mut self, frame: &Frame) -> Result<()> {
        let path = self.frame_path(frame.index);
        svg::save(&path, &self.document(frame))?;
        debug!("Wrote {}", path.display());
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        info!("Wrote {} frames to {}", self.written, self.out_dir.display());
        Ok(())
    }
}
