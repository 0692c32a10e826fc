use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use prism_common::{DemoKind, PrismConfig};
use prism_input::{HeldKeys, Key};
use prism_render::{DebugTextRenderer, Renderer};
use prism_scene::{Demo, Frame};
use prism_tools::FrameInspector;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prism-cli", about = "Headless tools for the prism demos")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the effective configuration as YAML
    Config,
    /// Fly the camera demo with held keys and print the final frame
    Simulate {
        /// Number of frames to step
        #[arg(short, long, default_value = "60")]
        frames: u32,
        /// Seconds per frame
        #[arg(long, default_value = "0.016666668")]
        dt: f32,
        /// Keys held for the whole flight, e.g. `w,d,up`
        #[arg(long, value_delimiter = ',', value_parser = parse_key)]
        hold: Vec<Key>,
        /// Viewport width / height
        #[arg(long, default_value = "1.7777778")]
        aspect: f32,
        /// Print every matrix
        #[arg(long)]
        full: bool,
    },
    /// Build one frame of a demo and print it
    Dump {
        /// Demo to dump
        #[arg(long, default_value = "camera")]
        demo: DemoKind,
        /// Pyramid rotation in degrees (lighting demo)
        #[arg(long)]
        rotation: Option<f32>,
        /// Viewport width / height
        #[arg(long, default_value = "1.7777778")]
        aspect: f32,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn parse_key(name: &str) -> Result<Key, String> {
    Key::from_name(name).ok_or_else(|| format!("unknown key `{name}`"))
}

fn check_aspect(aspect: f32) -> anyhow::Result<()> {
    if !aspect.is_finite() || aspect <= 0.0 {
        bail!("--aspect must be positive, got {aspect}");
    }
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<PrismConfig> {
    match path {
        Some(path) => {
            tracing::info!("loading config from {}", path.display());
            PrismConfig::load(path).with_context(|| format!("loading {}", path.display()))
        }
        None => {
            tracing::debug!("using default config");
            Ok(PrismConfig::default())
        }
    }
}

/// Step the camera demo `frames` times with `held` keys down.
fn simulate(config: &PrismConfig, held: &[Key], frames: u32, dt: f32) -> Demo {
    let mut keys = HeldKeys::new();
    for &key in held {
        keys.set(key, true);
    }
    let axes = keys.motion_axes();
    let mut demo = Demo::new(DemoKind::Camera, config);
    for _ in 0..frames {
        demo.advance(axes, dt);
    }
    demo
}

/// Text printed by `info`.
fn info_text(config: &PrismConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!("prism-cli v{}\n", env!("CARGO_PKG_VERSION")));
    out.push_str(&format!("render: {}\n", prism_render::crate_info()));
    out.push_str(&format!("tools: {}\n", prism_tools::crate_info()));
    out.push_str(&format!(
        "cube grid: {} cubes\n",
        prism_scene::CubeGrid::from_config(&config.camera_demo).len()
    ));
    out
}

fn print_frame(frame: &Frame, renderer: &DebugTextRenderer) {
    print!("{}", renderer.render(frame));
    println!("{}", FrameInspector::summary(frame));
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Info => {
            print!("{}", info_text(&config));
        }
        Commands::Config => {
            print!("{}", config.to_yaml()?);
        }
        Commands::Simulate {
            frames,
            dt,
            hold,
            aspect,
            full,
        } => {
            if !dt.is_finite() || dt < 0.0 {
                bail!("--dt must be a non-negative number, got {dt}");
            }
            check_aspect(aspect)?;
            println!(
                "Simulating {frames} frames at dt={dt} holding [{}]",
                hold.iter()
                    .map(|k| format!("{k:?}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            let demo = simulate(&config, &hold, frames, dt);
            let renderer = DebugTextRenderer {
                verbose: full,
                max_draws: Some(if full { usize::MAX } else { 8 }),
            };
            print_frame(&demo.frame(aspect), &renderer);
        }
        Commands::Dump {
            demo,
            rotation,
            aspect,
            json,
        } => {
            check_aspect(aspect)?;
            let mut scene = Demo::new(demo, &config);
            if let Some(degrees) = rotation {
                if !scene.set_rotation_degrees(degrees) {
                    tracing::warn!("--rotation only applies to the lighting demo, ignoring");
                }
            }
            let frame = scene.frame(aspect);
            if json {
                println!("{}", serde_json::to_string_pretty(&frame)?);
            } else {
                print_frame(&frame, &DebugTextRenderer::new());
            }
        }
    }

    Ok(())
}
