use crate::geometry::Segment;
use crate::math::{clip_segment, is_finite, Bounds, Point};
use crate::shapes::{Align, Label, Rgb, Shape};
use std::f64::consts::TAU;

/// Height of the visible frame in scene units
pub const FRAME_HEIGHT: f64 = 8.0;
/// Width of the visible frame in scene units (16:9)
pub const FRAME_WIDTH: f64 = FRAME_HEIGHT * 16.0 / 9.0;

const CIRCLE_SEGMENTS: usize = 96;

/// Maps scene units onto device units (pixels or terminal cells)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Viewport {
    /// Fits the whole frame into `width` x `height` device units, where each
    /// unit is `cell_aspect` times taller than it is wide
    pub fn fit(width: usize, height: usize, cell_aspect: f64) -> Self {
        let scale = (width as f64 / FRAME_WIDTH).min(height as f64 * cell_aspect / FRAME_HEIGHT);
        Viewport {
            width,
            height,
            scale_x: scale,
            scale_y: scale / cell_aspect,
        }
    }

    /// Device position of a scene point; device y grows downwards
    pub fn to_device(&self, p: Point) -> Point {
        [
            self.width as f64 / 2.0 + p[0] * self.scale_x,
            self.height as f64 / 2.0 - p[1] * self.scale_y,
        ]
    }

    /// The part of the scene that lands on the device
    pub fn world_bounds(&self) -> Bounds {
        let half_w = self.width as f64 / (2.0 * self.scale_x);
        let half_h = self.height as f64 / (2.0 * self.scale_y);
        Bounds {
            min: [-half_w, -half_h],
            max: [half_w, half_h],
        }
    }

    /// Clips a scene segment to the visible area and maps it to device units
    pub fn project_segment(&self, segment: Segment) -> Option<(Point, Point)> {
        let (a, b) = clip_segment(segment.0, segment.1, &self.world_bounds())?;
        Some((self.to_device(a), self.to_device(b)))
    }
}

/// Points approximating a circle, closed (first point repeated at the end)
pub fn circle_points(center: Point, radius: f64) -> Vec<Point> {
    (0..=CIRCLE_SEGMENTS)
        .map(|i| {
            let (sin, cos) = (TAU * i as f64 / CIRCLE_SEGMENTS as f64).sin_cos();
            [center[0] + radius * cos, center[1] + radius * sin]
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub color: Option<Rgb>,
}

const BLANK: Cell = Cell {
    glyph: ' ',
    color: None,
};

/// Character grid the terminal renderer paints
pub struct Canvas {
    viewport: Viewport,
    cell_aspect: f64,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, cell_aspect: f64) -> Self {
        Canvas {
            viewport: Viewport::fit(width, height, cell_aspect),
            cell_aspect,
            cells: vec![BLANK; width * height],
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    #[cfg(test)]
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.viewport.width && y < self.viewport.height {
            Some(self.cells[y * self.viewport.width + x])
        } else {
            None
        }
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.viewport.width.max(1))
    }

    fn put(&mut self, x: isize, y: isize, glyph: char, color: Rgb) {
        let (width, height) = (self.viewport.width as isize, self.viewport.height as isize);
        if x >= 0 && x < width && y >= 0 && y < height {
            self.cells[(y * width + x) as usize] = Cell {
                glyph,
                color: Some(color),
            };
        }
    }

    pub fn draw_shape(&mut self, shape: &Shape) {
        match shape {
            Shape::Circle {
                center,
                radius,
                color,
            } => self.draw_polyline(&circle_points(*center, *radius), *color),
            Shape::Dot { at, color } => self.draw_dot(*at, *color),
            Shape::Line { segment, color } => self.draw_line(*segment, *color),
            Shape::Brace(brace) => {
                if brace.is_drawable() {
                    self.draw_polyline(&brace.outline(), brace.color);
                }
            }
            Shape::Label(label) => self.draw_label(label),
        }
    }

    /// Draws a scene segment with Bresenham's algorithm, clipped to the canvas
    pub fn draw_line(&mut self, segment: Segment, color: Rgb) {
        let Some((start, end)) = self.viewport.project_segment(segment) else {
            return;
        };
        let glyph = self.slope_glyph(start, end);

        let (mut x0, mut y0, x1, y1) = (
            start[0].floor() as isize,
            start[1].floor() as isize,
            end[0].floor() as isize,
            end[1].floor() as isize,
        );
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy; // error value e_xy

        loop {
            self.put(x0, y0, glyph, color);

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    pub fn draw_polyline(&mut self, points: &[Point], color: Rgb) {
        for pair in points.windows(2) {
            self.draw_line((pair[0], pair[1]), color);
        }
    }

    pub fn draw_dot(&mut self, at: Point, color: Rgb) {
        if !is_finite(at) || !self.viewport.world_bounds().contains(at) {
            return;
        }
        let [x, y] = self.viewport.to_device(at);
        self.put(x.floor() as isize, y.floor() as isize, '●', color);
    }

    pub fn draw_label(&mut self, label: &Label) {
        if !is_finite(label.at) || !self.viewport.world_bounds().contains(label.at) {
            return;
        }
        let [x, y] = self.viewport.to_device(label.at);
        let len = label.text.chars().count() as isize;
        let x = x.floor() as isize;
        let start = match label.align() {
            Align::Start => x,
            Align::Middle => x - len / 2,
            Align::End => x - len + 1,
        };
        self.draw_text(start, y.floor() as isize, &label.text, label.color);
    }

    /// Writes text starting at a cell; characters off the canvas are dropped
    pub fn draw_text(&mut self, x: isize, y: isize, text: &str, color: Rgb) {
        for (i, glyph) in text.chars().enumerate() {
            self.put(x + i as isize, y, glyph, color);
        }
    }

    /// Picks a line glyph from the on-screen angle of a device segment
    fn slope_glyph(&self, start: Point, end: Point) -> char {
        let dx = end[0] - start[0];
        let dy = (start[1] - end[1]) * self.cell_aspect;
        let angle = dy.atan2(dx).to_degrees().rem_euclid(180.0);
        match angle {
            a if !(22.5..157.5).contains(&a) => '-',
            a if a < 67.5 => '/',
            a if a < 112.5 => '|',
            _ => '\\',
        }
    }
}
