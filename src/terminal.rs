use crate::error::{AnimationError, Result};
use crate::graphics::Canvas;
use crate::render::{Frame, Renderer};
use crate::shapes::{Rgb, WHITE};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::{debug, warn};
use std::io::{self, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;
const FALLBACK_SIZE: (usize, usize) = (80, 24);

/// Waits up to the given time, returning true if playback should stop
type WaitFn = fn(Duration) -> io::Result<bool>;

/// Ctrl-C, q and Esc stop playback. Raw mode swallows SIGINT, so Ctrl-C
/// arrives here as a key press.
fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Esc => true,
        _ => false,
    }
}

/// Waits on terminal input instead of sleeping
fn wait_for_quit_key(timeout: Duration) -> io::Result<bool> {
    let deadline = Instant::now() + timeout;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if !event::poll(remaining)? {
            return Ok(false);
        }
        if let Event::Key(key) = event::read()? {
            if is_quit_key(&key) {
                return Ok(true);
            }
        }
        if remaining.is_zero() {
            return Ok(false);
        }
    }
}

fn sleep(timeout: Duration) -> io::Result<bool> {
    thread::sleep(timeout);
    Ok(false)
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb {
            r: rgb.0,
            g: rgb.1,
            b: rgb.2,
        }
    }
}

/// Plays frames live on an alternate terminal screen
pub struct TerminalRenderer<W: Write = Stdout> {
    out: W,
    canvas: Canvas,
    frame_interval: Duration,
    last_frame: Option<Instant>,
    wait: WaitFn,
    raw_mode: bool,
    /// Enable debug overlay
    debug: bool,
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl TerminalRenderer<Stdout> {
    /// Renderer sized to the current terminal
    pub fn stdout(frame_interval: Duration, debug: bool) -> Result<Self> {
        let (width, height) = match termsize::get() {
            Some(size) => (size.cols as usize, size.rows as usize),
            None => {
                warn!(
                    "Cannot read terminal size, assuming {}x{}",
                    FALLBACK_SIZE.0, FALLBACK_SIZE.1
                );
                FALLBACK_SIZE
            }
        };
        // Keep the last row free so printing never scrolls the screen
        let mut renderer = TerminalRenderer::new(
            io::stdout(),
            width,
            height.saturating_sub(1),
            frame_interval,
            debug,
        )?;
        enable_raw_mode()?;
        renderer.raw_mode = true;
        renderer.wait = wait_for_quit_key;
        Ok(renderer)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(
        mut out: W,
        width: usize,
        height: usize,
        frame_interval: Duration,
        debug: bool,
    ) -> Result<Self> {
        let canvas = Canvas::new(width.max(1), height.max(1), CELL_ASPECT);
        let viewport = canvas.viewport();
        debug!(
            "Terminal canvas is {}x{} cells, {:.2} cells per unit",
            viewport.width, viewport.height, viewport.scale_x
        );
        execute!(out, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;

        Ok(TerminalRenderer {
            out,
            canvas,
            frame_interval,
            last_frame: None,
            wait: sleep,
            raw_mode: false,
            debug,
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
        })
    }

    fn update_fps(&mut self) {
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }
    }

    fn draw_overlay(&mut self, frame: &Frame) {
        let lines = [
            format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            format!("Angle: {:.2}", frame.theta),
            format!("Frame: {}", frame.index),
            format!("FPS: {:.2}", self.fps),
        ];
        for (row, text) in lines.iter().enumerate() {
            self.canvas.draw_text(1, row as isize, text, WHITE);
        }
    }

    /// Writes the canvas out, switching colour only where it changes
    fn paint(&mut self) -> io::Result<()> {
        let mut current: Option<Rgb> = None;
        for (y, row) in self.canvas.rows().enumerate() {
            queue!(self.out, cursor::MoveTo(0, y as u16))?;
            for cell in row {
                if cell.color.is_some() && cell.color != current {
                    current = cell.color;
                    if let Some(color) = current {
                        queue!(self.out, SetForegroundColor(color.into()))?;
                    }
                }
                queue!(self.out, Print(cell.glyph))?;
            }
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }

    /// Waits out whatever is left of the current frame interval. Returns
    /// true if a quit key arrived meanwhile.
    fn wait_for_next_frame(&mut self) -> io::Result<bool> {
        let remaining = match self.last_frame {
            Some(last) => self.frame_interval.saturating_sub(last.elapsed()),
            None => Duration::ZERO,
        };
        let stop = (self.wait)(remaining)?;
        self.last_frame = Some(Instant::now());
        Ok(stop)
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render_frame(&mut self, frame: &Frame) -> Result<()> {
        self.update_fps();

        self.canvas.clear();
        for shape in &frame.shapes {
            self.canvas.draw_shape(shape);
        }
        if self.debug {
            self.draw_overlay(frame);
        }

        if self.wait_for_next_frame()? {
            debug!("Quit key pressed at frame {}", frame.index);
            return Err(AnimationError::Interrupted);
        }
        self.paint()?;
        Ok(())
    }
}

impl<W: Write> Drop for TerminalRenderer<W> {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, cursor::Show, LeaveAlternateScreen);
        if self.raw_mode {
            let _ = disable_raw_mode();
        }
    }
}
