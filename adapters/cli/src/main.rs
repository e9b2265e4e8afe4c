#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that shows or exports the Wave Gauge.

mod export;
mod settings;
mod simulation;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use wave_gauge_rendering::{Presentation, RenderingBackend};
use wave_gauge_rendering_macroquad::MacroquadBackend;

use self::{export::ExportFormat, settings::GaugeSettings, simulation::Simulation};

/// Animated circular liquid-fill progress gauge.
#[derive(Debug, Parser)]
#[command(name = "wave-gauge", version)]
struct Cli {
    /// Log debug diagnostics.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: GaugeCommand,
}

#[derive(Debug, Subcommand)]
enum GaugeCommand {
    /// Open a window showing the animated gauge.
    Run(RunArgs),
    /// Simulate the gauge without a window and print the frames.
    Export(ExportArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// TOML settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Initial percentage, overriding the settings file.
    #[arg(short, long, allow_hyphen_values = true)]
    progress: Option<i32>,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long)]
    vsync: bool,
    /// Log frame timing once per second.
    #[arg(long)]
    show_fps: bool,
}

#[derive(Debug, Args)]
struct ExportArgs {
    /// TOML settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Initial percentage, overriding the settings file.
    #[arg(short, long, allow_hyphen_values = true)]
    progress: Option<i32>,
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 1)]
    frames: u32,
    /// Output format.
    #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
    format: ExportFormat,
}

/// Entry point for the Wave Gauge command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        GaugeCommand::Run(args) => run(args),
        GaugeCommand::Export(args) => export(args),
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install the tracing subscriber")
}

fn run(args: RunArgs) -> Result<()> {
    let settings = GaugeSettings::load(args.config.as_deref())?;
    let mut simulation = Simulation::new(&settings, args.progress)?;
    tracing::info!(
        progress = simulation.progress().get(),
        waving = settings.waving,
        "starting wave gauge"
    );

    let presentation = Presentation::new("Wave Gauge", settings.background(), simulation.scene());
    let backend = MacroquadBackend::new()
        .with_vsync(args.vsync)
        .with_show_fps(args.show_fps);

    backend.run(presentation, move |dt, input, scene| {
        if simulation.step(dt, input) {
            simulation.populate(scene);
        }
    })
}

fn export(args: ExportArgs) -> Result<()> {
    let settings = GaugeSettings::load(args.config.as_deref())?;
    let mut simulation = Simulation::new(&settings, args.progress)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    export::write_frames(&mut simulation, args.frames, args.format, &mut out)
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
    fn export_arguments_parse() {
        let cli = Cli::try_parse_from([
            "wave-gauge",
            "export",
            "--frames",
            "12",
            "--format",
            "svg",
            "--progress",
            "-5",
        ])
        .expect("valid arguments");

        let GaugeCommand::Export(args) = cli.command else {
            panic!("expected export subcommand");
        };
        assert_eq!(args.frames, 12);
        assert_eq!(args.format, ExportFormat::Svg);
        assert_eq!(args.progress, Some(-5));
        assert!(args.config.is_none());
    }

    #[test]
    fn run_arguments_parse() {
        let cli = Cli::try_parse_from(["wave-gauge", "-v", "run", "--vsync", "--show-fps"])
            .expect("valid arguments");

        assert!(cli.verbose);
        let GaugeCommand::Run(args) = cli.command else {
            panic!("expected run subcommand");
        };
        assert!(args.vsync);
        assert!(args.show_fps);
        assert_eq!(args.progress, None);
    }
}
