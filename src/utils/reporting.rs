use std::path::Path;

use csv::Writer;
use log::info;
use serde::Serialize;

use crate::organizer::summary::{RunSummary, TrackReport};
use crate::Result;

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    source: String,
    destination: String,
    status: &'a str,
    metadata_updated: bool,
    error: String,
}

impl<'a> From<&'a TrackReport> for ReportRow<'a> {
    fn from(report: &'a TrackReport) -> Self {
        let source = report.source.display().to_string();
        match &report.result {
            Ok(outcome) => ReportRow {
                source,
                destination: outcome.destination.display().to_string(),
                status: outcome.placement.as_str(),
                metadata_updated: outcome.metadata_updated,
                error: String::new(),
            },
            Err(e) => ReportRow {
                source,
                destination: String::new(),
                status: e.kind(),
                metadata_updated: false,
                error: e.to_string(),
            },
        }
    }
}

pub struct Reporter;

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter {
    pub fn new() -> Self {
        Self
    }

    /// One CSV row per track: where it went, or why it didn't.
    pub fn write_summary(&self, summary: &RunSummary, output_path: impl AsRef<Path>) -> Result<()> {
        let output_path = output_path.as_ref();
        let mut writer = Writer::from_path(output_path)?;

        for report in summary.reports() {
            writer.serialize(ReportRow::from(report))?;
        }

        writer.flush()?;
        info!("Report generated: {}", output_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organizer::summary::TrackOutcome;
    use crate::utils::file_ops::Placement;
    use crate::{MetadataField, OrganizeError};
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn one_row_per_track() {
        let dir = TempDir::new().unwrap();
        let report_path = dir.path().join("report.csv");

        let mut summary = RunSummary::new();
        summary.push(
            "in/a.mp3",
            Ok(TrackOutcome {
                destination: PathBuf::from("out/A/B/01 - A.mp3"),
                metadata_updated: true,
                placement: Placement::Moved,
            }),
        );
        summary.push(
            "in/b.mp3",
            Err(OrganizeError::MissingMetadata {
                field: MetadataField::Album,
                path: PathBuf::from("in/b.mp3"),
            }),
        );

        Reporter::new().write_summary(&summary, &report_path).unwrap();

        let contents = fs::read_to_string(&report_path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines[0], "source,destination,status,metadata_updated,error");
        assert_eq!(lines[1], "in/a.mp3,out/A/B/01 - A.mp3,moved,true,");
        assert_eq!(
            lines[2],
            "in/b.mp3,,missing_metadata,false,This track contains no album information (in/b.mp3)"
        );
        assert_eq!(lines.len(), 3);
    }
}
