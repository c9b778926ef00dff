use std::fmt;
use std::path::PathBuf;

pub mod audio;
pub mod cli;
pub mod organizer;
pub mod utils;

/// Tag fields the organizer reads, normalizes and writes back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    pub performers: Vec<String>,
    pub album_artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
    /// 0 when the tag carries no track number.
    pub track_number: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Tag,
    Artist,
    Album,
    Title,
}

impl MetadataField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataField::Tag => "tag",
            MetadataField::Artist => "artist",
            MetadataField::Album => "album",
            MetadataField::Title => "title",
        }
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OrganizeError {
    #[error("Unable to read tags from {}: {message}", .path.display())]
    TagRead { path: PathBuf, message: String },
    #[error("Unable to write tags to {}: {message}", .path.display())]
    TagWrite { path: PathBuf, message: String },
    #[error("This track contains no {field} information ({})", .path.display())]
    MissingMetadata { field: MetadataField, path: PathBuf },
    #[error("Copying {} failed after {attempts} attempts: {source}", .path.display())]
    TransientIo {
        path: PathBuf,
        attempts: u32,
        #[source]
        source: std::io::Error,
    },
    #[error("Filesystem error at {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl OrganizeError {
    /// Short machine-friendly name used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            OrganizeError::TagRead { .. } => "tag_read",
            OrganizeError::TagWrite { .. } => "tag_write",
            OrganizeError::MissingMetadata { .. } => "missing_metadata",
            OrganizeError::TransientIo { .. } => "transient_io",
            OrganizeError::Filesystem { .. } => "filesystem",
            OrganizeError::Io(_) => "io",
            OrganizeError::Csv(_) => "csv",
        }
    }
}

pub type Result<T> = std::result::Result<T, OrganizeError>;

// Re-exports for convenience
pub use audio::metadata::{LoftyCodec, TagCodec};
pub use audio::normalize::MetadataNormalizer;
pub use organizer::config::{OrganizerConfig, RetryPolicy};
pub use organizer::naming::{PathBuilder, TitleCaseLocale, TrackDestination};
pub use organizer::summary::{RunSummary, TrackOutcome, TrackReport};
pub use organizer::TrackOrganizer;
pub use utils::file_ops::{FileManager, FileSystem, LocalFileSystem, Placement};
