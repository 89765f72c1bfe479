//! Operator entry point: thin CLI wrapper over the harness library.
//!
//! Everything interesting lives in the library; this binary only assembles a
//! `HarnessConfig` from flags (optionally layered over a JSON file), runs one
//! exchange with the external compressor, and prints the report and plot.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use wavebench::{harness, plot, HarnessConfig, SignalKind, SubprocessCompressor};

#[derive(Parser, Debug)]
#[command(name = "wavebench", version, about = "Signal-synthesis harness for external frequency-domain compressors")]
struct Cli {
    /// Signal kind: periodic, pulse or fixed_periodic.
    #[arg(short, long)]
    signal: Option<SignalKind>,

    /// Number of frequency components the compressor may retain (>= 1).
    #[arg(short = 'b', long)]
    budget: Option<u32>,

    /// Size exponent: the signal has 2^EXPONENT samples.
    #[arg(short = 'n', long)]
    exponent: Option<u32>,

    /// Path to the external compressor executable.
    #[arg(short = 'x', long)]
    compressor: Option<PathBuf>,

    /// Seed for the signal RNG (omit for a fresh waveform each run).
    #[arg(long)]
    seed: Option<u64>,

    /// Kill the compressor if it runs longer than this many seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// JSON configuration file; flags override its fields.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the terminal plot, print only the fidelity report.
    #[arg(long)]
    no_plot: bool,
}

impl Cli {
    fn into_config(self) -> Result<HarnessConfig, wavebench::WavebenchError> {
        let mut config = match &self.config {
            Some(path) => HarnessConfig::from_json_file(path)?,
            None => HarnessConfig::default(),
        };
        if let Some(signal) = self.signal {
            config.signal = signal;
        }
        if let Some(budget) = self.budget {
            config.frequency_budget = budget;
        }
        if let Some(exponent) = self.exponent {
            config.size_exponent = exponent;
        }
        if let Some(compressor) = self.compressor {
            config.executable = compressor;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.timeout_secs.is_some() {
            config.timeout_secs = self.timeout_secs;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), wavebench::WavebenchError> {
    let no_plot = cli.no_plot;
    let config = cli.into_config()?;

    let compressor =
        SubprocessCompressor::new(&config.executable).with_timeout(config.timeout());
    let outcome = harness::run(&config, &compressor)?;

    println!("{}", "Fidelity report".bold());
    println!(
        "  Mean Absolute Error:     {}",
        format!("{:.3}", outcome.report.mean_absolute_error).green()
    );
    println!(
        "  Mean Root Squared Error: {}",
        format!("{:.3}", outcome.report.mean_root_squared_error).green()
    );

    if !no_plot {
        println!();
        print!("{}", plot::render_outcome(&outcome, config.plot_width, config.plot_height));
    }
    Ok(())
}
