/// msgbg preview: headless host for speaker-keyed message backgrounds
///
/// Loads the plugin configuration, reads picture sizes from an image
/// directory, then drives one message window through open → text layout →
/// close and reports what the window framework would draw.
///
/// Architecture:
///   images : picture provider over `img/system`
///   window : stand-in for the host message window
mod images;
mod window;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use msgbg_common::PluginConfig;
use msgbg_core::{AssetProvider, BackgroundMode, MessageBackground, MessageState, Settings};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Background {
    Window,
    Dim,
    Transparent,
}

impl From<Background> for BackgroundMode {
    fn from(b: Background) -> Self {
        match b {
            Background::Window => BackgroundMode::Window,
            Background::Dim => BackgroundMode::Dim,
            Background::Transparent => BackgroundMode::Transparent,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "msgbg", version, about = "Preview speaker-keyed message box backgrounds")]
struct Args {
    /// Plugin configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Plugin parameters exported from the host engine (JSON)
    #[arg(long, conflicts_with = "config")]
    parameters: Option<PathBuf>,

    /// Directory holding the background pictures
    #[arg(long, default_value = "img/system")]
    images: PathBuf,

    /// Speaker name shown in the name box (may be empty)
    #[arg(long)]
    speaker: String,

    /// Message background mode
    #[arg(long, value_enum, default_value_t = Background::Transparent)]
    background: Background,

    /// Stop the open animation after this many frames
    #[arg(long)]
    frames: Option<u32>,

    /// Message text, one argument per line
    text: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("msgbg=debug".parse()?))
        .init();

    tracing::info!("msgbg preview v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = load_config(&args)?;

    let mut assets = images::SystemImages::new(&args.images);
    tracing::info!("Pictures: {}", assets.dir().display());
    let settings = Settings::boot(&config, &mut assets);
    tracing::info!(
        "{} speakers registered, {} pictures loaded",
        settings.registry.len(),
        assets.loaded()
    );

    let mut message = settings.new_message();
    message.set_speaker_name(&args.speaker);
    message.set_background(args.background.into());

    let mut window = window::PreviewWindow::new(MessageBackground::new(Arc::clone(&settings)));
    window.start_message(&message, &mut assets);

    let frame = open_window(&mut window, &message, &mut assets, args.frames);

    let lines = if args.text.is_empty() {
        vec![format!("{}: ...", message.speaker_name())]
    } else {
        args.text.clone()
    };
    let origins = window.lay_out_lines(&message, &lines);

    let state = window.render_state();
    println!("speaker:    {:?}", message.speaker_name());
    println!("background: {:?}", message.background());
    println!("custom:     {}", message.uses_custom_background());
    println!(
        "bounds:     x={} y={} w={} h={}",
        state.bounds.x, state.bounds.y, state.bounds.width, state.bounds.height
    );
    match state.background.image() {
        Some(image) if image.is_ready() => {
            println!("picture:    {} ({}x{})", image.id, image.width, image.height)
        }
        Some(image) => println!("picture:    {} (not loaded)", image.id),
        None => println!("picture:    none"),
    }
    println!("pause sign: ({}, {})", state.pause_sign.x, state.pause_sign.y);
    for (line, origin) in lines.iter().zip(&origins) {
        println!("  ({:>4}, {:>4}) {}", origin.x, origin.y, line);
    }

    window.close();
    while window.update() {}
    tracing::info!(
        "Closed after {} frames open, picture opacity {}",
        frame,
        window.render_state().background.opacity()
    );
    Ok(())
}

/// Run the open animation for at most `limit` frames. Placement is redone
/// each frame while the picture is still loading. Returns frames run.
fn open_window(
    window: &mut window::PreviewWindow,
    message: &MessageState,
    assets: &mut dyn AssetProvider,
    limit: Option<u32>,
) -> u32 {
    let mut frame = 0u32;
    while limit.map_or(true, |limit| frame < limit) && window.update() {
        frame += 1;
        if window.awaiting_picture() {
            window.refresh_placement(message, assets);
        }
        tracing::debug!(
            "frame {}: openness {} / picture opacity {}",
            frame,
            window.openness(),
            window.render_state().background.opacity()
        );
    }
    frame
}

fn load_config(args: &Args) -> Result<PluginConfig> {
    if let Some(path) = &args.config {
        return PluginConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }
    if let Some(path) = &args.parameters {
        return PluginConfig::load_plugin_parameters(path)
            .with_context(|| format!("Failed to load plugin parameters {}", path.display()));
    }
    tracing::warn!("No configuration given, using defaults (no speaker pictures)");
    Ok(PluginConfig::default())
}
