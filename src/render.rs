use crate::error::Result;
use crate::shapes::Shape;

/// One evaluated snapshot of the scene
#[derive(Clone, Debug)]
pub struct Frame {
    pub index: usize,
    pub theta: f64,
    pub shapes: Vec<Shape>,
}

/// Output backend that receives frames in order
pub trait Renderer {
    fn render_frame(&mut self, frame: &Frame) -> Result<()>;

    /// Called once after the last frame
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}
