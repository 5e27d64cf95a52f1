mod clock;
mod console;

use clap::Parser;

/// Overlay engine for two independently-sourced caption tracks, with a
/// console stand-in for the renderer and status panel.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL of the primary track's first segment, e.g. .../track-1.vtt
    #[arg(short, long)]
    primary_url: Option<String>,

    /// URL of the secondary track's first segment.
    #[arg(short, long)]
    secondary_url: Option<String>,
}

fn main() {
    simple_logger::SimpleLogger::new()
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .init()
        .expect("failed to build logger instance");

    let args = Args::parse();

    let channels = dualsub_bridge::BridgeChannels::default();
    dualsub_engine::run(
        channels.engine_rx,
        channels.engine_tx,
        clock::WallClock::default(),
    );
    console::run(
        channels.ui_rx,
        channels.ui_tx,
        args.primary_url,
        args.secondary_url,
    )
    .expect("failed to run console panel");
}
