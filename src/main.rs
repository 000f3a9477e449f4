mod error;
mod geometry;
mod graphics;
mod math;
mod render;
mod scene;
mod shapes;
mod state;
mod svg_export;
mod terminal;

use clap::Parser;
use error::AnimationError;
use log::info;
use scene::{full_turn, Scene};
use state::ValueTracker;
use std::path::PathBuf;
use svg_export::SvgRenderer;
use terminal::TerminalRenderer;

/// Animates a point around a circle with its six trig lines, braces and labels
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Write SVG frames into DIR instead of playing in the terminal
    #[arg(long, value_name = "DIR")]
    svg: Option<PathBuf>,

    /// Frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Show the debug overlay while playing in the terminal
    #[arg(short, long)]
    debug: bool,
}

/// Main function
pub fn main() -> Result<(), AnimationError> {
    // Initialize logging from environment variables
    env_logger::init();

    let args = Args::parse();
    if args.fps == 0 {
        return Err(AnimationError::InvalidFrameRate(args.fps));
    }

    let scene = Scene::unit_circle();
    let animation = full_turn(args.fps);
    let mut theta = ValueTracker::new(0.0);

    match args.svg {
        Some(dir) => {
            info!("Rendering SVG frames into {}", dir.display());
            let mut renderer = SvgRenderer::new(dir)?;
            scene.play(&mut theta, &animation, &mut renderer)
        }
        None => {
            info!("Playing in the terminal");
            let mut renderer = TerminalRenderer::stdout(animation.frame_interval(), args.debug)?;
            match scene.play(&mut theta, &animation, &mut renderer) {
                Err(AnimationError::Interrupted) => {
                    info!("Stopped at θ = {:.2}", theta.get_value());
                    Ok(())
                }
                result => result,
            }
        }
    }
}
