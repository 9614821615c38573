use anyhow::Context;
use bouquet_assets::{AssetRequest, ModelData};
use bouquet_common::Aabb;
use bouquet_render::{DebugTextRenderer, Renderer};
use bouquet_scene::{Viewer, ViewerConfig, auto_frame};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bouquet-cli", about = "Headless tools for bouquet models")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// Import a model and report its bounds and camera framing
    Inspect {
        /// Model file (.glb or .gltf)
        path: PathBuf,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run the frame loop without a GPU and print the final frame
    Simulate {
        /// Model file (.glb or .gltf)
        #[arg(default_value = "lily.glb")]
        path: PathBuf,
        /// Number of frames to advance
        #[arg(short, long, default_value = "60")]
        frames: u64,
        /// Skip the glow billboard
        #[arg(long)]
        no_glow: bool,
        /// Give up on the model after this many seconds
        #[arg(long)]
        load_timeout_secs: Option<u64>,
    },
}

/// Summary printed by `inspect`.
#[derive(Debug, Serialize)]
struct ModelReport {
    path: String,
    name: Option<String>,
    primitives: usize,
    vertices: usize,
    triangles: usize,
    bounds: Aabb,
    size: [f32; 3],
    center: [f32; 3],
    max_dimension: f32,
    camera_position: Option<[f32; 3]>,
}

impl ModelReport {
    fn new(path: &Path, model: &ModelData, config: &ViewerConfig) -> Self {
        let framing = auto_frame(
            &model.bounds,
            config.camera_height_factor,
            config.camera_distance_factor,
        );
        Self {
            path: path.display().to_string(),
            name: model.name.clone(),
            primitives: model.primitives.len(),
            vertices: model.vertex_count(),
            triangles: model.triangle_count(),
            bounds: model.bounds,
            size: model.bounds.size().to_array(),
            center: model.bounds.center().to_array(),
            max_dimension: model.bounds.max_dimension(),
            camera_position: framing.map(|f| f.camera_position.to_array()),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("bouquet-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("assets: {}", bouquet_assets::crate_info());
            println!("scene: {}", bouquet_scene::crate_info());
            println!("render: {}", bouquet_render::crate_info());
        }
        Commands::Inspect { path, json } => {
            let model = bouquet_assets::import_model(&path)
                .with_context(|| format!("failed to import {}", path.display()))?;
            let report = ModelReport::new(&path, &model, &ViewerConfig::default());

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Model: {} ({})", report.path, report.name.as_deref().unwrap_or("unnamed"));
                println!(
                    "Geometry: primitives={} vertices={} triangles={}",
                    report.primitives, report.vertices, report.triangles
                );
                println!(
                    "Size: ({:.4}, {:.4}, {:.4})  max={:.4}",
                    report.size[0], report.size[1], report.size[2], report.max_dimension
                );
                println!(
                    "Center: ({:.4}, {:.4}, {:.4})",
                    report.center[0], report.center[1], report.center[2]
                );
                match report.camera_position {
                    Some(c) => println!("Camera: ({:.4}, {:.4}, {:.4})", c[0], c[1], c[2]),
                    None => println!("Camera: default (model has no extent)"),
                }
            }
        }
        Commands::Simulate {
            path,
            frames,
            no_glow,
            load_timeout_secs,
        } => {
            let config = ViewerConfig {
                glow: !no_glow,
                ..ViewerConfig::default()
            };
            let mut viewer = Viewer::new(config, 1280.0, 720.0, 1.0);

            let outcome = AssetRequest::new(path)
                .with_timeout(load_timeout_secs.map(Duration::from_secs))
                .load_blocking();
            viewer.on_load(outcome);

            for _ in 0..frames {
                viewer.tick();
            }
            tracing::debug!(frames, "simulation finished");
            print!("{}", DebugTextRenderer::new().render(&viewer));
        }
    }

    Ok(())
}
