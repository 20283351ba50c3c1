//! SPI-master transaction verifier CLI.
//!
//! This binary provides a single entry point for verification runs. It performs:
//! 1. **Run:** Build the DUT from a config, run the stock scenarios, print statistics.
//! 2. **Config:** Print the default configuration as JSON, as a starting point for edits.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use spimaster_core::config::{Config, SlaveKind};
use spimaster_core::sim::scenario;

#[derive(Parser, Debug)]
#[command(
    name = "spisim",
    author,
    version,
    about = "SPI-master register interface verifier",
    long_about = "Run the BMM150 SPI-master transaction checks against the cycle-level model.\n\nExamples:\n  spisim run\n  spisim run --slave bmm150 --timeout 500\n  spisim run --config run.json --trace\n  spisim config > run.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the write/read scenarios and print statistics.
    Run {
        /// JSON configuration file (defaults are used for omitted fields).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Slave model on the SPI lines (overrides the config file).
        #[arg(long, value_enum)]
        slave: Option<SlaveArg>,

        /// Cycle budget for each transaction (overrides the config file).
        #[arg(long)]
        timeout: Option<u64>,

        /// Log every clock edge.
        #[arg(long)]
        trace: bool,
    },

    /// Print the default configuration as JSON.
    Config,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SlaveArg {
    /// No slave; `miso` is driven by the verifier stub.
    None,
    /// BMM150 register-file model.
    Bmm150,
}

impl From<SlaveArg> for SlaveKind {
    fn from(arg: SlaveArg) -> Self {
        match arg {
            SlaveArg::None => Self::None,
            SlaveArg::Bmm150 => Self::Bmm150,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            slave,
            timeout,
            trace,
        } => cmd_run(config, slave, timeout, trace),
        Commands::Config => cmd_config(),
    }
}

/// Installs the log subscriber; `RUST_LOG` wins over the default level.
fn init_logging(trace: bool) {
    let default = if trace { "trace" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Loads the configuration, applies CLI overrides, and runs every scenario.
///
/// Exits with 0 when every check passes, 1 on a failed check, and 2 when the
/// configuration cannot be loaded.
fn cmd_run(path: Option<PathBuf>, slave: Option<SlaveArg>, timeout: Option<u64>, trace: bool) {
    init_logging(trace);

    let mut config = match path {
        Some(ref p) => Config::from_file(p).unwrap_or_else(|e| {
            error!("{}: {e}", p.display());
            process::exit(2);
        }),
        None => Config::default(),
    };
    if let Some(kind) = slave {
        config.slave.kind = kind.into();
    }
    if let Some(cycles) = timeout {
        config.verifier.timeout_cycles = cycles;
    }
    config.general.trace_signals |= trace;
    if let Err(e) = config.validate() {
        error!("{e}");
        process::exit(2);
    }

    info!(
        slave = ?config.slave.kind,
        period_ns = config.clock.period_ns,
        sclk_divider = config.spi.sclk_divider,
        timeout_cycles = config.verifier.timeout_cycles,
        "starting verification"
    );

    let (verifier, result) = scenario::run(&config);
    verifier.stats().print();

    match result {
        Ok(report) => {
            println!(
                "\n[*] PASS: wrote {:#04x}, read back {:#04x}",
                report.write.tx_data, report.read_value
            );
            if let Some(id) = report.chip_id {
                println!("[*] Chip ID {id:#04x}");
            }
        }
        Err(e) => {
            println!("\n[!] FAIL: {e}");
            process::exit(1);
        }
    }
}

fn cmd_config() {
    match Config::default().to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    }
}
