use anyhow::Context;
use clap::{ArgAction, Parser};
use sketchpad::image::ImageSource;
use sketchpad::script::Script;
use sketchpad::tools::ToolRegistry;
use sketchpad::{Config, PaintSurface, Toolbar};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sketchpad")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SKETCHPAD_GIT_HASH"), ")"),
    about = "Raster paint surface driven by gesture scripts"
)]
struct Cli {
    /// Gesture script to replay
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Image to start from instead of a blank canvas (path, file/http(s)/data URL)
    #[arg(long, short = 'i', value_name = "IMAGE")]
    open: Option<String>,

    /// Where to write the result (default: a generated name in the configured save directory)
    #[arg(long, short = 'o', value_name = "PNG")]
    output: Option<PathBuf>,

    /// Config file to use instead of ~/.config/sketchpad/config.toml
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for the spray pattern
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// List the available tools and exit
    #[arg(long, action = ArgAction::SetTrue)]
    list_tools: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(seed) = cli.seed {
        config.spray.seed = Some(seed);
    }

    let tools = ToolRegistry::with_defaults();
    if cli.list_tools {
        for name in tools.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let Some(script_path) = &cli.script else {
        println!("sketchpad: raster paint surface driven by gesture scripts");
        println!();
        println!("Usage:");
        println!("  sketchpad --script FILE [--open IMAGE] [--output PNG]");
        println!("  sketchpad --list-tools");
        println!("  sketchpad --help");
        return Ok(());
    };

    let mut surface = PaintSurface::new(&config, tools).context("Failed to create canvas")?;
    let mut toolbar = Toolbar::with_defaults(&surface, config.save_config());

    if let Some(open) = &cli.open {
        let source = ImageSource::parse(open)?;
        surface
            .load_image(&source)
            .with_context(|| format!("Failed to open {source}"))?;
    }

    let script = Script::load(script_path)
        .with_context(|| format!("Failed to load script {}", script_path.display()))?;
    log::info!(
        "Replaying {} commands from {}",
        script.len(),
        script_path.display()
    );
    let stats = script
        .run(&mut surface, &mut toolbar)
        .with_context(|| format!("Script {} failed", script_path.display()))?;
    log::info!(
        "Replay done: {} tools started, {} events ignored, {} timer ticks",
        stats.dispatched,
        stats.ignored,
        stats.ticks
    );

    let written = match &cli.output {
        Some(path) => {
            surface.save_png(path)?;
            path.clone()
        }
        None => surface.save_image(&config.save_config())?,
    };
    println!("Saved {}", written.display());

    Ok(())
}
