use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};

use ghostdraw::input::{Tool, ToolPalette};
use ghostdraw::script::{FrameRecorder, GestureScript};
use ghostdraw::util::color_to_name;
use ghostdraw::{Config, GhostCanvas};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GHOSTDRAW_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "ghostdraw")]
#[command(version = VERSION, about = "Delayed-replay ghost drawing canvas")]
struct Cli {
    /// Gesture script to play back (TOML)
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Where to write the final canvas
    #[arg(long, short = 'o', value_name = "PNG", default_value = "ghostdraw.png")]
    output: PathBuf,

    /// Config file to use instead of ~/.config/ghostdraw/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Logical canvas width
    #[arg(long, value_name = "N")]
    width: Option<f64>,

    /// Logical canvas height
    #[arg(long, value_name = "N")]
    height: Option<f64>,

    /// Device pixels per logical unit
    #[arg(long, value_name = "S")]
    scale: Option<f64>,

    /// Also write every published snapshot into this directory
    #[arg(long, value_name = "DIR")]
    frames_dir: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long, action = ArgAction::SetTrue)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(width) = cli.width {
        config.canvas.width = width;
    }
    if let Some(height) = cli.height {
        config.canvas.height = height;
    }
    if let Some(scale) = cli.scale {
        config.canvas.display_scale = scale;
    }
    config.validate_and_clamp();

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let Some(script_path) = cli.script.as_deref() else {
        println!("ghostdraw: Delayed-replay ghost drawing canvas");
        println!();
        println!("Usage:");
        println!("  ghostdraw --script <FILE> [--output <PNG>]   Play a gesture script");
        println!("  ghostdraw --print-config                    Show effective config");
        println!("  ghostdraw --help                            Show help");
        println!();
        println!("Tools and their lead-in delays:");
        let palette = ToolPalette::from_config(&config.tools);
        for tool in Tool::ALL {
            let spec = palette.spec(tool);
            println!(
                "  {:<7} {:<10} {:.1}s",
                tool.name(),
                color_to_name(&spec.color),
                spec.initial_delay.as_secs_f64()
            );
        }
        return Ok(());
    };

    let script = GestureScript::load(script_path)
        .with_context(|| format!("Invalid gesture script {}", script_path.display()))?;
    log::info!(
        "Loaded {} gestures ({} to replay) and {} clears from {}",
        script.gestures.len(),
        script.completed_gestures(),
        script.clears.len(),
        script_path.display()
    );

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(run(&cli, &config, &script, runtime.handle()))?;

    log::info!("Canvas written to {}", cli.output.display());
    Ok(())
}

async fn run(
    cli: &Cli,
    config: &Config,
    script: &GestureScript,
    runtime_handle: &tokio::runtime::Handle,
) -> anyhow::Result<()> {
    let mut ghost =
        GhostCanvas::new(runtime_handle, config).context("Failed to start canvas thread")?;
    ghost
        .resize(
            config.canvas.width,
            config.canvas.height,
            config.canvas.display_scale,
        )
        .await
        .context("Failed to create canvas")?;

    let recorder = match &cli.frames_dir {
        Some(dir) => Some(
            FrameRecorder::start(ghost.subscribe(), dir)
                .with_context(|| format!("Failed to prepare frames directory {}", dir.display()))?,
        ),
        None => None,
    };

    let summary = ghostdraw::script::play(script, &mut ghost).await;
    log::debug!("Playback summary: {:?}", summary);

    let snapshot = ghost
        .snapshot()
        .await
        .context("Canvas thread stopped unexpectedly")?
        .context("Canvas was never initialized")?;

    if let Some(recorder) = recorder {
        let frames = recorder.finish().await.context("Failed to write frames")?;
        log::info!("Wrote {} frames", frames);
    }

    snapshot
        .write_png(&cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    ghost.shutdown();
    Ok(())
}
