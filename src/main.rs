use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use site_estimator::logging::{FileSink, StderrSink};
use site_estimator::{
    ArtifactStore, CliDriver, EstimatorConfig, Estimator, Logger, OutputFormat, SocketDriver,
};

#[derive(Debug, Parser)]
#[command(name = "site-estimator", about = "Construction resource estimator")]
struct Cli {
    /// JSON file overriding the reference constants.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Append JSON-lines logs here instead of stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate one project and print the result.
    Estimate {
        #[arg(long)]
        area: String,
        /// Floor spec such as `G+2`, `G` or a level count.
        #[arg(long)]
        floors: String,
        #[arg(long)]
        wage: String,
        #[arg(long)]
        cost: String,
        /// Print the full bundle as JSON.
        #[arg(long)]
        json: bool,
        /// Directory the floor-plan SVG is written to.
        #[arg(long, default_value = "static")]
        static_dir: PathBuf,
        /// Skip writing the floor-plan SVG.
        #[arg(long)]
        no_artifact: bool,
    },
    /// Serve JSON-lines estimate requests over TCP.
    Serve {
        #[arg(long, default_value = "127.0.0.1:7878")]
        addr: String,
        #[arg(long, default_value = "static")]
        static_dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => EstimatorConfig::from_path(path)?,
        None => EstimatorConfig::default(),
    };
    let logger = match &cli.log_file {
        Some(path) => Logger::new(FileSink::new(path, 10 * 1024 * 1024)?),
        None => Logger::new(StderrSink),
    };
    let mut estimator = Estimator::new(config)?.with_logger(logger.clone());
    estimator.enable_metrics();

    match cli.command {
        Command::Estimate {
            area,
            floors,
            wage,
            cost,
            json,
            static_dir,
            no_artifact,
        } => {
            if !no_artifact {
                estimator = estimator.with_artifacts(ArtifactStore::new(".", static_dir));
            }
            let format = if json {
                OutputFormat::Json
            } else {
                OutputFormat::Report
            };
            let driver = CliDriver::new(estimator, format).fit_to_terminal();
            driver.run(&mut io::stdout().lock(), &area, &floors, &wage, &cost)?;
        }
        Command::Serve { addr, static_dir } => {
            let estimator = estimator.with_artifacts(ArtifactStore::new(".", static_dir));
            let driver = SocketDriver::bind(addr.as_str(), estimator)?.with_logger(logger);
            eprintln!("listening on {}", driver.local_addr()?);
            driver.run()?;
        }
    }
    Ok(())
}
