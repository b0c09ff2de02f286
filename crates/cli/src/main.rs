#![deny(unsafe_code)]
//! CLI binary for the sketchbook animation engine.
//!
//! Subcommands:
//! - `list`: print available sketches
//! - `schema <sketch>`: print a sketch's parameter table
//! - `run <sketch>`: drive a sketch for N frames and write a JSON-lines frame log

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use glam::DVec2;
use sketchbook_core::{InputState, RunSpec, Sketch, Viewport};
use sketchbook_engines::{Animator, FrameLog, SketchKind};
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Radians the orbiting pointer travels per frame.
const ORBIT_SPEED: f64 = 0.05;

#[derive(Parser)]
#[command(name = "sketchbook", about = "Procedural animation sketch CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a sketch for N frames and log every frame as a JSON line.
    Run {
        /// Sketch name (e.g. "spiral"). Optional when --spec names one.
        #[arg(required_unless_present = "spec")]
        sketch: Option<String>,

        /// Viewport width in pixels.
        #[arg(short = 'W', long, default_value_t = sketchbook_core::viewport::DEFAULT_WIDTH)]
        width: usize,

        /// Viewport height in pixels.
        #[arg(short = 'H', long, default_value_t = sketchbook_core::viewport::DEFAULT_HEIGHT)]
        height: usize,

        /// Number of frames.
        #[arg(short, long, default_value_t = 60)]
        frames: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Sketch parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Fixed pointer position as "X,Y". Defaults to the viewport center.
        #[arg(long, value_parser = parse_point, conflicts_with = "orbit")]
        pointer: Option<DVec2>,

        /// Move the pointer on a circle of this radius around the center.
        #[arg(long)]
        orbit: Option<f64>,

        /// Frame log path. Frames go to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON run spec; replaces sketch, size, seed, params, and frames
        /// when it sets them.
        #[arg(long)]
        spec: Option<PathBuf>,
    },
    /// Print a sketch's recognized parameters.
    Schema {
        /// Sketch name.
        sketch: String,
    },
    /// List available sketches.
    List,
}

/// Where the pointer is on each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PointerPath {
    Fixed(DVec2),
    Orbit { center: DVec2, radius: f64 },
}

impl PointerPath {
    fn at(&self, tick: u64) -> InputState {
        match *self {
            PointerPath::Fixed(p) => InputState { pointer: p },
            PointerPath::Orbit { center, radius } => InputState {
                pointer: center + DVec2::from_angle(tick as f64 * ORBIT_SPEED) * radius,
            },
        }
    }
}

fn parse_point(s: &str) -> Result<DVec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    if !x.is_finite() || !y.is_finite() {
        return Err(format!("coordinates must be finite, got '{s}'"));
    }
    Ok(DVec2::new(x, y))
}

/// Merges `--spec` with the command-line flags. Spec fields win.
fn resolve_spec(
    sketch: Option<String>,
    spec_path: Option<PathBuf>,
    cli: RunSpec,
) -> Result<RunSpec, CliError> {
    let Some(path) = spec_path else {
        return Ok(RunSpec {
            sketch: sketch.unwrap_or_default(),
            ..cli
        });
    };
    let text = std::fs::read_to_string(&path)
        .map_err(|source| CliError::SpecFile {
            path: path.clone(),
            source,
        })?;
    let mut spec = RunSpec::from_json_str(&text).map_err(|e| CliError::Input(e.to_string()))?;
    if spec.frames == 0 {
        spec.frames = cli.frames;
    }
    Ok(spec)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let sketches = SketchKind::list_sketches();
            if cli.json {
                let info = serde_json::json!({ "sketches": sketches });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Sketches:");
                for name in sketches {
                    println!("  {name}");
                }
            }
        }
        Command::Schema { sketch } => {
            let s = SketchKind::from_name(&sketch, Viewport::default(), 0, &serde_json::json!({}))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&s.param_schema())?);
            } else {
                println!("{sketch}:");
                for spec in s.params().specs() {
                    println!(
                        "  {:<20} {:<8} default {:<8} [{}, {}]  {}",
                        spec.name,
                        spec.kind.type_name(),
                        spec.default,
                        spec.min,
                        spec.max,
                        spec.description
                    );
                }
            }
        }
        Command::Run {
            sketch,
            width,
            height,
            frames,
            seed,
            params,
            pointer,
            orbit,
            output,
            spec,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            let spec = resolve_spec(
                sketch,
                spec,
                RunSpec {
                    sketch: String::new(),
                    width,
                    height,
                    params,
                    seed,
                    frames,
                },
            )?;

            let viewport = spec.viewport()?;
            debug!(
                sketch = %spec.sketch,
                width = spec.width,
                height = spec.height,
                frames = spec.frames,
                seed = spec.seed,
                "starting run"
            );
            let path = match (pointer, orbit) {
                (Some(p), _) => PointerPath::Fixed(p),
                (None, Some(radius)) => PointerPath::Orbit {
                    center: viewport.center(),
                    radius,
                },
                (None, None) => PointerPath::Fixed(viewport.center()),
            };

            let sketch = SketchKind::from_name(&spec.sketch, viewport, spec.seed, &spec.params)?;
            let mut animator = Animator::new(sketch);

            let written = match &output {
                Some(file) => {
                    let mut log = FrameLog::create(file)?;
                    animator.run(spec.frames, &mut log, |tick| path.at(tick))?;
                    log.flush()?;
                    log.frames()
                }
                None => {
                    let stdout = io::stdout();
                    let mut log = FrameLog::new(io::BufWriter::new(stdout.lock()));
                    animator.run(spec.frames, &mut log, |tick| path.at(tick))?;
                    let frames = log.frames();
                    log.into_inner()?;
                    frames
                }
            };

            let population = animator.sketch().population();
            match (&output, cli.json) {
                (Some(file), true) => {
                    let info = serde_json::json!({
                        "sketch": spec.sketch,
                        "width": spec.width,
                        "height": spec.height,
                        "frames": written,
                        "seed": spec.seed,
                        "population": population,
                        "output": file.display().to_string(),
                    });
                    println!("{}", serde_json::to_string_pretty(&info)?);
                }
                (Some(file), false) => eprintln!(
                    "ran {} ({}x{}, {written} frames, seed {}) -> {}",
                    spec.sketch,
                    spec.width,
                    spec.height,
                    spec.seed,
                    file.display()
                ),
                // stdout carries the frames; keep it clean.
                (None, _) => {}
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_point_accepts_pairs() {
        assert_eq!(parse_point("10,20.5").unwrap(), DVec2::new(10.0, 20.5));
        assert_eq!(parse_point(" 3 , -4 ").unwrap(), DVec2::new(3.0, -4.0));
    }

    #[test]
    fn parse_point_rejects_garbage() {
        assert!(parse_point("10").is_err());
        assert!(parse_point("a,1").is_err());
        assert!(parse_point("1,inf").is_err());
    }

    #[test]
    fn orbit_starts_right_of_center() {
        let path = PointerPath::Orbit {
            center: DVec2::new(400.0, 300.0),
            radius: 100.0,
        };
        assert_eq!(path.at(0).pointer, DVec2::new(500.0, 300.0));
        let later = path.at(10).pointer;
        assert!(((later - DVec2::new(400.0, 300.0)).length() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn run_requires_sketch_or_spec() {
        assert!(Cli::try_parse_from(["sketchbook", "run"]).is_err());
        assert!(Cli::try_parse_from(["sketchbook", "run", "spiral"]).is_ok());
        assert!(Cli::try_parse_from(["sketchbook", "run", "--spec", "x.json"]).is_ok());
    }

    #[test]
    fn pointer_conflicts_with_orbit() {
        let r = Cli::try_parse_from([
            "sketchbook", "run", "trail", "--pointer", "1,2", "--orbit", "50",
        ]);
        assert!(r.is_err());
    }

    #[test]
    fn resolve_spec_without_file_uses_flags() {
        let mut flags = RunSpec::new("", 9);
        flags.frames = 12;
        let spec = resolve_spec(Some("grid".into()), None, flags).unwrap();
        assert_eq!(spec.sketch, "grid");
        assert_eq!(spec.seed, 9);
        assert_eq!(spec.frames, 12);
    }

    #[test]
    fn resolve_spec_reads_file_and_keeps_flag_frames_when_unset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spec.json");
        std::fs::write(&path, r#"{"sketch": "spiral", "seed": 5, "params": {"max_points": 9}}"#)
            .unwrap();
        let mut flags = RunSpec::new("", 1);
        flags.frames = 30;
        let spec = resolve_spec(None, Some(path), flags).unwrap();
        assert_eq!(spec.sketch, "spiral");
        assert_eq!(spec.seed, 5);
        assert_eq!(spec.frames, 30);
        assert_eq!(spec.params["max_points"], 9);
    }

    #[test]
    fn resolve_spec_bad_json_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spec.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = resolve_spec(None, Some(path), RunSpec::new("", 1)).unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn missing_spec_file_is_io_error() {
        let err = resolve_spec(None, Some(PathBuf::from("/nonexistent/spec.json")), RunSpec::new("", 1))
            .unwrap_err();
        assert!(matches!(err, CliError::SpecFile { .. }));
        assert_eq!(err.exit_code(), 11);
        assert!(err.to_string().contains("/nonexistent/spec.json"));
    }
}
