use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::organizer::config::{OrganizerConfig, RetryPolicy};
use crate::organizer::naming::TitleCaseLocale;

#[derive(Parser)]
#[command(name = "track-organizer")]
#[command(version = "1.0")]
#[command(about = "Files audio tracks into Artist/Album/NN - Title folders based on their tags", long_about = None)]
pub struct Cli {
    /// Log debug output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize tags and place every matching track in the destination tree
    Organize {
        /// Directory to scan for audio files
        #[arg(short = 'i', long = "input")]
        input: PathBuf,

        /// Root of the organized tree
        #[arg(short = 'o', long = "output")]
        output: PathBuf,

        /// Extensions to pick up, case-sensitive (repeatable)
        #[arg(short = 'e', long = "extension", default_values_t = [String::from(".mp3")])]
        extensions: Vec<String>,

        /// Keep the source files instead of deleting them after copying
        #[arg(long)]
        copy_only: bool,

        /// Word-casing rules for folder and file names
        #[arg(long, value_enum, default_value_t = TitleCaseLocale::Dutch)]
        locale: TitleCaseLocale,

        /// Copy attempts per track before giving up
        #[arg(long, default_value_t = 5)]
        retries: u32,

        /// Pause between copy attempts, in milliseconds
        #[arg(long, default_value_t = 500)]
        retry_delay_ms: u64,

        /// Only report what would happen
        #[arg(short = 'd', long)]
        dry_run: bool,

        /// Do not descend into symlinked directories
        #[arg(long)]
        no_follow_links: bool,

        /// Write a CSV summary of the run
        #[arg(short = 'r', long)]
        report: Option<PathBuf>,
    },

    /// List the files a run would pick up
    Scan {
        /// Directory to scan for audio files
        #[arg(short = 'i', long = "input")]
        input: PathBuf,

        /// Extensions to pick up, case-sensitive (repeatable)
        #[arg(short = 'e', long = "extension", default_values_t = [String::from(".mp3")])]
        extensions: Vec<String>,
    },
}

impl Commands {
    /// Builds the organizer configuration for this command. `Scan` has no
    /// destination and gets an empty one.
    pub fn config(&self) -> OrganizerConfig {
        match self {
            Commands::Organize {
                input,
                output,
                extensions,
                copy_only,
                locale,
                retries,
                retry_delay_ms,
                dry_run,
                no_follow_links,
                ..
            } => OrganizerConfig::new(input, output)
                .with_extensions(extensions)
                .with_move_files(!copy_only)
                .with_locale(*locale)
                .with_retry(RetryPolicy::new(*retries, Duration::from_millis(*retry_delay_ms)))
                .with_dry_run(*dry_run)
                .with_follow_links(!no_follow_links),
            Commands::Scan { input, extensions } => {
                OrganizerConfig::new(input, PathBuf::new()).with_extensions(extensions)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organize_flags_map_onto_the_config() {
        let cli = Cli::parse_from([
            "track-organizer",
            "organize",
            "-i",
            "music",
            "-o",
            "sorted",
            "-e",
            ".flac",
            "-e",
            "mp3",
            "--copy-only",
            "--locale",
            "invariant",
            "--retries",
            "2",
            "--retry-delay-ms",
            "10",
        ]);
        let config = cli.command.config();

        assert_eq!(config.source, PathBuf::from("music"));
        assert_eq!(config.destination, PathBuf::from("sorted"));
        assert!(config.allowed_extensions.contains(".flac"));
        assert!(config.allowed_extensions.contains(".mp3"));
        assert!(!config.move_files);
        assert_eq!(config.locale, TitleCaseLocale::Invariant);
        assert_eq!(config.retry, RetryPolicy::new(2, Duration::from_millis(10)));
        assert!(!config.dry_run);
        assert!(config.follow_links);
    }

    #[test]
    fn organize_defaults() {
        let cli = Cli::parse_from(["track-organizer", "organize", "-i", "a", "-o", "b"]);
        let config = cli.command.config();

        assert!(config.move_files);
        assert_eq!(config.allowed_extensions.len(), 1);
        assert!(config.allowed_extensions.contains(".mp3"));
        assert_eq!(config.retry, RetryPolicy::default());
    }
}
