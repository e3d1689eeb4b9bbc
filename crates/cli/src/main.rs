#![deny(unsafe_code)]
//! CLI binary for the procart procedural art renderer.
//!
//! Subcommands:
//! - `render`: one frame to PNG (or SVG by extension)
//! - `animate`: a looping GIF, or a numbered PNG sequence for video
//! - `live`: real-time playback for a fixed duration
//! - `shuffle`: print a random parameter set
//! - `list`: print patterns, fractals, palettes and backgrounds
//! - `schema`: print the parameter schema

mod error;
mod input;

use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use std::{process, thread};

use clap::{Args, Parser, Subcommand};
use error::CliError;
use procart_core::{randomize, ArtParameters, AudioData, RecordingSurface, Renderer, Xorshift64};
use procart_render::raster::RasterSurface;
use procart_render::snapshot::{self, FrameSequence, GifRecorder};
use procart_render::{AnimationDriver, FixedRateClock, RealtimeClock, RendererKind};
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

#[derive(Parser)]
#[command(name = "procart", about = "Procedural 2-D art renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Canvas size and parameter source shared by the drawing commands.
#[derive(Args)]
struct Canvas {
    /// Canvas width in pixels.
    #[arg(short = 'W', long, default_value_t = 800)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(short = 'H', long, default_value_t = 600)]
    height: u32,

    /// Art parameters as a JSON object (camelCase keys).
    #[arg(long)]
    params: Option<String>,

    /// Read art parameters from a JSON file.
    #[arg(long, value_name = "FILE")]
    params_file: Option<PathBuf>,
}

impl Canvas {
    fn load(&self) -> Result<ArtParameters, CliError> {
        input::load_params(self.params.as_deref(), self.params_file.as_deref())
    }
}

#[derive(Subcommand)]
enum Command {
    /// Render a single frame to PNG, or to SVG when the output ends in `.svg`.
    Render {
        #[command(flatten)]
        canvas: Canvas,

        /// Timeline position in milliseconds.
        #[arg(short, long, default_value_t = 0.0)]
        time: f64,

        /// Pixel density multiplier for high-resolution PNG output.
        #[arg(long, default_value_t = 1)]
        scale: u32,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,
    },
    /// Render an animation as a looping GIF or a PNG frame sequence.
    Animate {
        #[command(flatten)]
        canvas: Canvas,

        /// Number of frames [default: 60 for a GIF, 150 for a frame sequence].
        #[arg(short, long)]
        frames: Option<u32>,

        /// Start time in milliseconds.
        #[arg(long, default_value_t = 0.0)]
        start: f64,

        /// GIF output path.
        #[arg(
            short,
            long,
            default_value = "output.gif",
            conflicts_with = "frames_dir"
        )]
        output: PathBuf,

        /// Write numbered PNG frames at a fixed video frame rate instead of a GIF.
        #[arg(long, value_name = "DIR")]
        frames_dir: Option<PathBuf>,
    },
    /// Play the animation in real time and report the achieved frame rate.
    Live {
        #[command(flatten)]
        canvas: Canvas,

        /// Target frames per second.
        #[arg(long, default_value_t = 60)]
        fps: u32,

        /// How long to play, in seconds.
        #[arg(long, default_value_t = 5.0)]
        seconds: f64,

        /// Save the last frame as PNG.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a random parameter set as JSON.
    Shuffle {
        /// PRNG seed; taken from the clock when omitted.
        #[arg(long)]
        seed: Option<u64>,

        /// JSON file mapping custom palette names to hex color lists.
        #[arg(long, value_name = "FILE")]
        palettes: Option<PathBuf>,
    },
    /// List patterns, fractals, palettes and backgrounds.
    List,
    /// Print the parameter schema as JSON.
    Schema,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .init();
}

fn silent(_: f64) -> AudioData {
    AudioData::neutral()
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

fn report(json_mode: bool, info: serde_json::Value, line: String) -> Result<(), CliError> {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        eprintln!("{line}");
    }
    Ok(())
}

fn render(
    canvas: &Canvas,
    time: f64,
    scale: u32,
    output: &Path,
    json_mode: bool,
) -> Result<(), CliError> {
    let params = canvas.load()?;
    let (width, height) = (canvas.width, canvas.height);

    if is_svg(output) {
        if width == 0 || height == 0 {
            return Err(procart_core::EngineError::InvalidDimensions.into());
        }
        let mut surface = RecordingSurface::new(width, height);
        procart_render::render_frame(&mut surface, time, &params, AudioData::neutral());
        let svg = procart_render::svg::to_svg(&surface)?;
        std::fs::write(output, svg)
            .map_err(|e| CliError::Io(format!("cannot write {}: {e}", output.display())))?;
    } else {
        let mut surface = RasterSurface::with_scale(width, height, scale)?;
        procart_render::render_frame(&mut surface, time, &params, AudioData::neutral());
        snapshot::write_png(&surface, output)?;
    }

    let name = RendererKind::from_pattern(params.pattern).name();
    report(
        json_mode,
        json!({
            "pattern": name,
            "width": width,
            "height": height,
            "scale": scale,
            "time": time,
            "output": output.display().to_string(),
        }),
        format!(
            "rendered {name} ({width}x{height}, t={time}ms) -> {}",
            output.display()
        ),
    )
}

/// Frame count for `animate`, defaulting per output kind.
fn frame_count(frames: Option<u32>, sequence: bool) -> u32 {
    match (frames, sequence) {
        (Some(n), _) => n,
        (None, true) => snapshot::SEQUENCE_FRAMES,
        (None, false) => snapshot::GIF_FRAMES,
    }
}

fn animate(
    canvas: &Canvas,
    frames: Option<u32>,
    start: f64,
    output: &Path,
    frames_dir: Option<&Path>,
    json_mode: bool,
) -> Result<(), CliError> {
    let params = canvas.load()?;
    let mut surface = RasterSurface::new(canvas.width, canvas.height)?;
    let frames = frame_count(frames, frames_dir.is_some());
    let mut failure = None;

    let (written, target) = match frames_dir {
        Some(dir) => {
            let mut sequence = FrameSequence::create(dir)?;
            let interval = 1000.0 / snapshot::SEQUENCE_FPS as f64;
            let clock = FixedRateClock::from_interval(start, interval, frames.into());
            AnimationDriver::new(clock).run(&mut surface, &params, &mut silent, |s, _| {
                match sequence.write(s) {
                    Ok(_) => ControlFlow::Continue(()),
                    Err(e) => {
                        failure = Some(e);
                        ControlFlow::Break(())
                    }
                }
            });
            (sequence.len(), dir)
        }
        None => {
            let mut recorder = GifRecorder::create(output, snapshot::GIF_DELAY_MS)?;
            let clock =
                FixedRateClock::from_interval(start, snapshot::GIF_DELAY_MS as f64, frames.into());
            AnimationDriver::new(clock).run(&mut surface, &params, &mut silent, |s, _| {
                match recorder.add_frame(s) {
                    Ok(()) => ControlFlow::Continue(()),
                    Err(e) => {
                        failure = Some(e);
                        ControlFlow::Break(())
                    }
                }
            });
            if let Some(e) = failure.take() {
                return Err(e.into());
            }
            (recorder.finish()?, output)
        }
    };
    if let Some(e) = failure {
        return Err(e.into());
    }

    report(
        json_mode,
        json!({
            "frames": written,
            "output": target.display().to_string(),
        }),
        format!("wrote {written} frames -> {}", target.display()),
    )
}

fn live(
    canvas: &Canvas,
    fps: u32,
    seconds: f64,
    output: Option<&Path>,
    json_mode: bool,
) -> Result<(), CliError> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(CliError::Input("--seconds must be a non-negative number".into()));
    }
    let params = canvas.load()?;
    let mut surface = RasterSurface::new(canvas.width, canvas.height)?;
    let mut driver = AnimationDriver::new(RealtimeClock::new(fps));

    // Static parameters render a single frame, so there is nothing to stop.
    let timer = params.is_animated.then(|| {
        let token = driver.cancel_token();
        let duration = Duration::from_secs_f64(seconds);
        thread::spawn(move || {
            thread::sleep(duration);
            token.cancel();
        })
    });

    let started = Instant::now();
    let frames = driver.run(&mut surface, &params, &mut silent, |_, info| {
        debug!(index = info.index, time = info.time, "live frame");
        ControlFlow::Continue(())
    });
    let elapsed = started.elapsed().as_secs_f64();
    if timer.is_some_and(|t| t.join().is_err()) {
        return Err(CliError::Io("timer thread panicked".into()));
    }

    if let Some(path) = output {
        snapshot::write_png(&surface, path)?;
    }
    let achieved = if elapsed > 0.0 { frames as f64 / elapsed } else { 0.0 };
    info!(frames, achieved, "live playback finished");
    report(
        json_mode,
        json!({
            "frames": frames,
            "seconds": elapsed,
            "fps": achieved,
        }),
        format!("played {frames} frames in {elapsed:.2}s ({achieved:.1} fps)"),
    )
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let catalog = RendererKind::catalog();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            } else {
                for (heading, key) in [
                    ("Patterns", "patterns"),
                    ("Fractals", "fractals"),
                    ("Palettes", "palettes"),
                    ("Backgrounds", "backgrounds"),
                ] {
                    let names: Vec<&str> = catalog[key]
                        .as_array()
                        .map(|a| a.iter().filter_map(|v| v.as_str()).collect())
                        .unwrap_or_default();
                    println!("{heading}:");
                    println!("  {}", names.join(", "));
                }
            }
        }
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&RendererKind::param_schema())?);
        }
        Command::Shuffle { seed, palettes } => {
            let custom = input::load_custom_palettes(palettes.as_deref())?;
            let mut rng = match seed {
                Some(seed) => Xorshift64::new(seed),
                None => Xorshift64::from_clock(),
            };
            let params = randomize(&mut rng, &custom);
            println!("{}", serde_json::to_string_pretty(&params)?);
        }
        Command::Render {
            canvas,
            time,
            scale,
            output,
        } => render(&canvas, time, scale, &output, cli.json)?,
        Command::Animate {
            canvas,
            frames,
            start,
            output,
            frames_dir,
        } => animate(&canvas, frames, start, &output, frames_dir.as_deref(), cli.json)?,
        Command::Live {
            canvas,
            fps,
            seconds,
            output,
        } => live(&canvas, fps, seconds, output.as_deref(), cli.json)?,
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
