use std::path::{Path, PathBuf};

use log::info;

use crate::utils::file_ops::Placement;
use crate::OrganizeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackOutcome {
    pub destination: PathBuf,
    pub metadata_updated: bool,
    pub placement: Placement,
}

/// Result of organizing one inventory entry.
#[derive(Debug)]
pub struct TrackReport {
    pub source: PathBuf,
    pub result: Result<TrackOutcome, OrganizeError>,
}

impl TrackReport {
    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }

    pub fn placement(&self) -> Option<Placement> {
        self.result.as_ref().ok().map(|outcome| outcome.placement)
    }
}

#[derive(Debug, Default)]
pub struct RunSummary {
    reports: Vec<TrackReport>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source: impl AsRef<Path>, result: Result<TrackOutcome, OrganizeError>) {
        self.reports.push(TrackReport {
            source: source.as_ref().to_path_buf(),
            result,
        });
    }

    pub fn reports(&self) -> &[TrackReport] {
        &self.reports
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// Tracks copied or moved into the destination tree.
    pub fn placed(&self) -> usize {
        self.count(|p| matches!(p, Placement::Copied | Placement::Moved))
    }

    pub fn skipped(&self) -> usize {
        self.count(|p| p == Placement::AlreadyExists)
    }

    pub fn planned(&self) -> usize {
        self.count(|p| p == Placement::Planned)
    }

    pub fn metadata_updates(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(&r.result, Ok(outcome) if outcome.metadata_updated))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.reports.iter().filter(|r| r.is_failure()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &OrganizeError)> {
        self.reports
            .iter()
            .filter_map(|r| r.result.as_ref().err().map(|e| (r.source.as_path(), e)))
    }

    pub fn log_totals(&self) {
        info!(
            "Processed {} tracks: {} placed, {} already present, {} planned, {} failed, {} tag updates",
            self.len(),
            self.placed(),
            self.skipped(),
            self.planned(),
            self.failed(),
            self.metadata_updates()
        );
    }

    fn count(&self, pred: impl Fn(Placement) -> bool) -> usize {
        self.reports
            .iter()
            .filter_map(TrackReport::placement)
            .filter(|p| pred(*p))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MetadataField;

    fn outcome(placement: Placement, metadata_updated: bool) -> TrackOutcome {
        TrackOutcome {
            destination: PathBuf::from("out/a.mp3"),
            metadata_updated,
            placement,
        }
    }

    #[test]
    fn counts_by_placement() {
        let mut summary = RunSummary::new();
        summary.push("a.mp3", Ok(outcome(Placement::Moved, true)));
        summary.push("b.mp3", Ok(outcome(Placement::Copied, false)));
        summary.push("c.mp3", Ok(outcome(Placement::AlreadyExists, false)));
        summary.push(
            "d.mp3",
            Err(OrganizeError::MissingMetadata {
                field: MetadataField::Title,
                path: PathBuf::from("d.mp3"),
            }),
        );

        assert_eq!(summary.len(), 4);
        assert_eq!(summary.placed(), 2);
        assert_eq!(summary.skipped(), 1);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.metadata_updates(), 1);

        let failures: Vec<_> = summary.failures().map(|(path, _)| path.to_path_buf()).collect();
        assert_eq!(failures, vec![PathBuf::from("d.mp3")]);
    }
}
