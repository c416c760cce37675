//! PinSwitch main entry point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Presentation         HttpServer        cli::run        │
//! │  ─────────────────────── PinController ──────────────── │
//! │  Ports                BoundedGpio ─▶ SysfsGpio | HalGpio│
//! │                       LogEventSink                      │
//! └─────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use pinswitch::adapters::bounded::BoundedGpio;
use pinswitch::adapters::cli::{self, OneShot};
use pinswitch::adapters::hal::HalGpio;
use pinswitch::adapters::http::HttpServer;
use pinswitch::adapters::log_sink::LogEventSink;
use pinswitch::adapters::sim::SimPin;
use pinswitch::app::service::PinController;
use pinswitch::config::SystemConfig;

/// Control named GPIO output pins over HTTP or from the command line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file (defaults apply to absent fields)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use in-memory pins instead of real GPIO
    #[arg(long)]
    simulate: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Override the configured listen port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Turn the configured pin's device on
    On,
    /// Turn the configured pin's device off
    Off,
    /// Print the configured pin's level and what it means
    Status {
        /// Report every registered pin instead
        #[arg(long)]
        all: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn build_driver(config: &SystemConfig, simulate: bool) -> Result<BoundedGpio> {
    let timeout = config.hardware_timeout();
    if simulate {
        info!("Using simulated GPIO for {} pin(s)", config.pins.len());
        let gpio = HalGpio::from_pins(config.pins.iter().map(|p| (p.id, SimPin::new())))?;
        return BoundedGpio::spawn(gpio, timeout).context("failed to start GPIO worker");
    }

    #[cfg(feature = "sysfs")]
    {
        let gpio = pinswitch::adapters::sysfs::SysfsGpio::new();
        BoundedGpio::spawn(gpio, timeout).context("failed to start GPIO worker")
    }
    #[cfg(not(feature = "sysfs"))]
    {
        anyhow::bail!("built without the `sysfs` feature; pass --simulate")
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => SystemConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SystemConfig::default(),
    };

    let registry = config.registry()?;
    let gpio = build_driver(&config, args.simulate)?;
    let controller = PinController::new(registry, config.polarity, gpio, LogEventSink::new());

    let one_shot = match args.command {
        Command::Serve { port } => {
            let port = port.unwrap_or(config.http_port);
            info!("PinSwitch v{} serving {} pin(s)", env!("CARGO_PKG_VERSION"), config.pins.len());
            let server = HttpServer::bind((config.http_bind.as_str(), port))
                .with_context(|| format!("failed to bind {}:{}", config.http_bind, port))?;
            return server.serve(Arc::new(controller)).context("HTTP server stopped");
        }
        Command::On => OneShot::On,
        Command::Off => OneShot::Off,
        Command::Status { all: false } => OneShot::Status,
        Command::Status { all: true } => OneShot::StatusAll,
    };

    let stdout = std::io::stdout();
    cli::run(&controller, config.cli_pin, one_shot, &mut stdout.lock())
}
