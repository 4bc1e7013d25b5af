/*!
 * Command-line interface for copycode
 */

use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::ThreadPoolBuilder;
use tracing::{debug, warn};

use copycode::config::{Args, Config};
use copycode::logger::init_logger;
use copycode::report::{CopyReport, Reporter};
use copycode::scanner::Scanner;
use copycode::writer::DocumentWriter;
use copycode::CONFIRMATION;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "copycode", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    init_logger(args.verbose);

    match run(Config::from_args(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> copycode::Result<()> {
    config.validate()?;
    debug!("Configuration: {:?}", config);

    // Configure thread pool
    if let Err(e) = ThreadPoolBuilder::new()
        .num_threads(config.num_threads)
        .build_global()
    {
        warn!("Failed to set thread pool size: {}", e);
    }

    let progress = ProgressBar::new(0);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} {wide_msg:.dim} {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.set_style(style);
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_message(format!("Scanning {}", config.target.display()));

    let scanner = Scanner::new(config.clone(), Arc::new(progress.clone()));
    let writer = DocumentWriter::new(config.clone());

    let start_time = Instant::now();

    let result = scanner
        .scan()
        .and_then(|document| writer.write(&document).map(|bytes| (document, bytes)));
    progress.finish_and_clear();
    let (document, bytes) = result?;

    let duration = start_time.elapsed();

    eprintln!("{}", CONFIRMATION);

    if config.report {
        let report = CopyReport::from_document(
            &document,
            config.target.display().to_string(),
            config.destination.to_string(),
            duration,
            bytes as u64,
        );
        Reporter::new().print_report(&report);
    }

    Ok(())
}
