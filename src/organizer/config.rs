use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use crate::organizer::naming::TitleCaseLocale;

pub const DEFAULT_EXTENSIONS: [&str; 1] = [".mp3"];

/// How often a failing copy is attempted, and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

/// Everything a single organizer run needs to know.
#[derive(Debug, Clone)]
pub struct OrganizerConfig {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Matched case-sensitively, leading dot included.
    pub allowed_extensions: HashSet<String>,
    /// Delete the source after a successful copy.
    pub move_files: bool,
    pub locale: TitleCaseLocale,
    pub retry: RetryPolicy,
    pub dry_run: bool,
    pub follow_links: bool,
}

impl OrganizerConfig {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            allowed_extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            move_files: true,
            locale: TitleCaseLocale::default(),
            retry: RetryPolicy::default(),
            dry_run: false,
            follow_links: true,
        }
    }

    /// Replaces the allow-list. Entries without a leading dot get one.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_extensions = extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.as_ref();
                if ext.starts_with('.') {
                    ext.to_string()
                } else {
                    format!(".{ext}")
                }
            })
            .collect();
        self
    }

    pub fn with_move_files(mut self, move_files: bool) -> Self {
        self.move_files = move_files;
        self
    }

    pub fn with_locale(mut self, locale: TitleCaseLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }
}
