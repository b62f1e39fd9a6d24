#![deny(unsafe_code)]
//! Headless renderer for the flow-field animation.
//!
//! Subcommands:
//! - `render`: run the render loop for N frames on a CPU surface, write PNG
//! - `info`: print the fixed simulation constants

mod error;
mod snapshot;

use clap::{Parser, Subcommand};
use error::CliError;
use flow_field_core::{
    Animation, Bounds, Frame, PointerState, RasterSurface, Seed, Srgb, Xorshift64,
};
use flow_field_particles::params::PARTICLE_COUNT;
use flow_field_particles::{ParticleField, RenderLoop};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "flow-field", about = "Headless flow-field renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the animation for N frames and write a PNG of the last one.
    Render {
        /// Surface width in pixels.
        #[arg(short = 'W', long, default_value_t = 800)]
        width: usize,

        /// Surface height in pixels.
        #[arg(short = 'H', long, default_value_t = 600)]
        height: usize,

        /// Number of frames to render.
        #[arg(short, long, default_value_t = 300)]
        frames: usize,

        /// PRNG seed for particle placement.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Number of particles.
        #[arg(short = 'n', long, default_value_t = PARTICLE_COUNT)]
        particles: usize,

        /// Fixed pointer position as "X,Y". Without it the pointer stays at
        /// the origin, unmoved.
        #[arg(long)]
        pointer: Option<String>,

        /// Output file path.
        #[arg(short, long, default_value = "flow-field.png")]
        output: PathBuf,
    },
    /// Print the fixed simulation constants.
    Info,
}

/// Parses `"x,y"` into a pointer position.
fn parse_pointer(s: &str) -> Result<[f64; 2], CliError> {
    let invalid = || CliError::Input(format!("invalid --pointer {s:?}: expected X,Y"));
    let (x, y) = s.split_once(',').ok_or_else(invalid)?;
    let x: f64 = x.trim().parse().map_err(|_| invalid())?;
    let y: f64 = y.trim().parse().map_err(|_| invalid())?;
    if !(x.is_finite() && y.is_finite()) {
        return Err(invalid());
    }
    Ok([x, y])
}

/// Renders `seed.frames` frames and returns the final surface.
fn render(seed: &Seed) -> Result<RasterSurface, CliError> {
    seed.validate()?;
    let bounds = Bounds::new(seed.width as f64, seed.height as f64)?;
    let mut rng = Xorshift64::new(seed.seed);
    let field = ParticleField::initialize(seed.particles, &bounds, &mut rng);

    let pointer = match seed.pointer {
        Some([x, y]) => PointerState::at(x, y),
        None => PointerState::new(),
    };
    let frame = Frame::new(bounds).with_pointer(pointer);
    let mut surface = RasterSurface::new(seed.width, seed.height, Srgb::BLACK)?;

    let mut render_loop = RenderLoop::new(field);
    render_loop.start();
    let rendered = render_loop.run(seed.frames, &frame, &mut surface)?;
    render_loop.stop();
    log::debug!("rendered {rendered} frames");
    Ok(surface)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Info => {
            let params = ParticleField::from_particles(Vec::new()).params();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&params)?);
            } else if let Some(map) = params.as_object() {
                for (key, value) in map.iter().filter(|(k, _)| k.as_str() != "particles") {
                    println!("{key:>16}  {value}");
                }
                println!("{:>16}  {PARTICLE_COUNT}", "default_count");
            }
        }
        Command::Render {
            width,
            height,
            frames,
            seed,
            particles,
            pointer,
            output,
        } => {
            let mut job = Seed::new(width, height, seed, particles);
            job.frames = frames;
            job.pointer = pointer.as_deref().map(parse_pointer).transpose()?;

            let surface = render(&job)?;
            snapshot::write_png(&surface, &output)?;

            if cli.json {
                let mut info = serde_json::to_value(&job)?;
                info["output"] = serde_json::json!(output.display().to_string());
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {particles} particles ({width}x{height}, {frames} frames, seed {seed}) -> {}",
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        log::error!("{e}");
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
