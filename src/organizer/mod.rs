pub mod config;
pub mod discovery;
pub mod naming;
pub mod summary;

use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::audio::metadata::{LoftyCodec, TagCodec};
use crate::audio::normalize::MetadataNormalizer;
use crate::utils::file_ops::{FileManager, FileSystem, LocalFileSystem, Placement};
use crate::Result;

use config::OrganizerConfig;
use naming::PathBuilder;
use summary::{RunSummary, TrackOutcome};

/// Indexes a source tree, then files every discovered track under
/// `destination/Artist/Album/NN - Title.ext`.
pub struct TrackOrganizer<C = LoftyCodec, F = LocalFileSystem> {
    config: OrganizerConfig,
    codec: C,
    files: FileManager<F>,
    normalizer: MetadataNormalizer,
    paths: PathBuilder,
    inventory: Vec<PathBuf>,
}

impl TrackOrganizer<LoftyCodec, LocalFileSystem> {
    pub fn new(config: OrganizerConfig) -> Self {
        Self::with_parts(config, LoftyCodec::new(), LocalFileSystem)
    }
}

impl<C: TagCodec, F: FileSystem> TrackOrganizer<C, F> {
    pub fn with_parts(config: OrganizerConfig, codec: C, fs: F) -> Self {
        let files = FileManager::new(fs, config.retry, config.move_files);
        let paths = PathBuilder::new(config.locale);
        Self {
            config,
            codec,
            files,
            normalizer: MetadataNormalizer::new(),
            paths,
            inventory: Vec::new(),
        }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn inventory(&self) -> &[PathBuf] {
        &self.inventory
    }

    /// Scans the source tree and appends every match to the inventory.
    /// Returns the number of files found by this scan.
    pub fn index(&mut self) -> usize {
        info!("Scanning directory structure: {}", self.config.source.display());
        let found = discovery::discover(
            &self.config.source,
            &self.config.allowed_extensions,
            self.config.follow_links,
        );
        info!("Found {} audio files", found.len());
        let count = found.len();
        self.inventory.extend(found);
        count
    }

    /// Organizes and drains the inventory. A failing track is logged and
    /// recorded; the run always moves on to the next one.
    pub fn organize(&mut self) -> RunSummary {
        let mut summary = RunSummary::new();

        if self.inventory.is_empty() {
            warn!("Nothing to organize, run index() first");
            return summary;
        }

        for track in std::mem::take(&mut self.inventory) {
            let result = self.organize_track(&track);
            if let Err(e) = &result {
                error!("Failed to organize {}: {}", track.display(), e);
            }
            summary.push(&track, result);
        }

        summary.log_totals();
        summary
    }

    fn organize_track(&self, track: &Path) -> Result<TrackOutcome> {
        let mut metadata = self.codec.read(track)?;

        let metadata_updated = self.normalizer.normalize(&mut metadata);
        if metadata_updated {
            if self.config.dry_run {
                info!("Would update metadata: {}", track.display());
            } else {
                self.codec.write(track, &metadata)?;
                info!("Updated metadata: {}", track.display());
            }
        }

        let target = self.paths.derive(track, &metadata)?;
        let directory = self.config.destination.join(&target.directory);
        let destination = target.full_path(&self.config.destination);
        info!("{}", destination.display());

        let placement = if self.config.dry_run {
            Placement::Planned
        } else {
            self.files.ensure_directory(&directory)?;
            self.files.place(track, &destination)?
        };

        Ok(TrackOutcome {
            destination,
            metadata_updated,
            placement,
        })
    }
}
