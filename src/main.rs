use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

use track_organizer::cli::commands::{Cli, Commands};
use track_organizer::organizer::discovery;
use track_organizer::utils::reporting::Reporter;
use track_organizer::TrackOrganizer;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let config = cli.command.config();

    match cli.command {
        Commands::Organize { report, .. } => {
            info!("=== Organizing {} into {} ===", config.source.display(), config.destination.display());
            if config.dry_run {
                info!("Dry run mode: no tags or files will be written");
            }

            let mut organizer = TrackOrganizer::new(config);
            organizer.index();
            let summary = organizer.organize();

            if let Some(report_path) = report {
                if let Err(e) = Reporter::new().write_summary(&summary, &report_path) {
                    error!("Error generating report: {}", e);
                    return ExitCode::FAILURE;
                }
            }

            info!("=== Organizing Complete ===");
        }

        Commands::Scan { .. } => {
            let found = discovery::discover(&config.source, &config.allowed_extensions, config.follow_links);
            for path in &found {
                println!("{}", path.display());
            }
            info!("Found {} audio files", found.len());
        }
    }

    ExitCode::SUCCESS
}
