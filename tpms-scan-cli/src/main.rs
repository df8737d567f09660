//! TPMS Scan CLI Application
//!
//! Command-line interface for the tire-pressure sensor scan tool. It uses the
//! tpms-scan-core library and adds:
//! - The rtl_433 radio-capture subprocess boundary
//! - Operator prompting per wheel position
//! - Sequential five-wheel orchestration with per-wheel failure isolation
//! - Report generation (text/JSON)

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tpms_scan_core::WheelPosition;

mod capture;
mod config;
mod prompt;
mod report;
mod scan;

use config::OutputFormat;

/// TPMS Scan - locate and read tire-pressure sensors wheel by wheel
#[derive(Parser, Debug)]
#[command(name = "tpms-scan-cli")]
#[command(about = "Guided per-wheel RF scan of tire-pressure sensors", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Listen duration per wheel in seconds (overrides config)
    #[arg(short, long, value_name = "SECS")]
    window_secs: Option<u64>,

    /// Tuner frequency in Hz (overrides config)
    #[arg(short, long, value_name = "HZ")]
    frequency: Option<u64>,

    /// Path to the rtl_433 binary (overrides config)
    #[arg(long, value_name = "PATH")]
    rtl433: Option<String>,

    /// Emit the report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Skip the spare wheel position
    #[arg(long)]
    skip_spare: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors and the report
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("TPMS Scan CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using scan library v{}", tpms_scan_core::VERSION);

    // Load config file (if any) and apply CLI overrides
    let mut config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::AppConfig::default(),
    };
    config.apply_overrides(&config::Overrides {
        window_secs: args.window_secs,
        frequency_hz: args.frequency,
        rtl433_bin: args.rtl433.clone(),
        skip_spare: args.skip_spare,
        json: args.json,
    });

    let wheels: Vec<WheelPosition> = WheelPosition::ALL
        .into_iter()
        .filter(|w| config.scan.include_spare || *w != WheelPosition::Spare)
        .collect();

    log::info!(
        "Scanning {} positions, {}s window, {} Hz",
        wheels.len(),
        config.scan.window_secs,
        config.radio.frequency_hz
    );

    let window_secs = config.scan.window_secs;
    let mut source = capture::Rtl433Capture::new(config.radio.clone(), &config.scan);
    let report = scan::run_scan(&mut source, &wheels, |wheel| {
        prompt::wait_for_operator(wheel, window_secs)
    });

    match config.output.format {
        OutputFormat::Text => print!("{}", report::render_text(&report)),
        OutputFormat::Json => println!("{}", report::render_json(&report)?),
    }

    if report.any_collision() {
        log::warn!("At least one position heard multiple sensors");
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
