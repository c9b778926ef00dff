use regex::Regex;

use crate::TrackMetadata;

/// Rewrites multi-valued tag fields to a single canonical form:
/// segments separated by `,` or `;` are trimmed and rejoined with `"; "`.
pub struct MetadataNormalizer {
    separator: Regex,
}

impl Default for MetadataNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataNormalizer {
    pub fn new() -> Self {
        Self {
            // A literal character class; it always compiles.
            separator: Regex::new(r"[;,]").expect("separator pattern"),
        }
    }

    /// Splits on `,` and `;`, trims each segment and rejoins with `"; "`.
    /// Segments left empty after trimming are dropped, so `"A;;B"` becomes
    /// `"A; B"`.
    pub fn canonicalize(&self, value: &str) -> String {
        self.separator
            .split(value)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Normalizes performers and album artist in place. Album and title are
    /// left as they are.
    ///
    /// Returns `true` when at least one field value changed.
    pub fn normalize(&self, metadata: &mut TrackMetadata) -> bool {
        let mut changed = false;

        for performer in metadata.performers.iter_mut() {
            let canonical = self.canonicalize(performer);
            if canonical != *performer {
                *performer = canonical;
                changed = true;
            }
        }

        if let Some(album_artist) = metadata.album_artist.as_mut() {
            let canonical = self.canonicalize(album_artist);
            if canonical != *album_artist {
                *album_artist = canonical;
                changed = true;
            }
        }

        changed
    }
}

/// First non-empty segment of a canonical multi-valued string.
pub fn first_segment(value: &str) -> Option<&str> {
    value
        .split(';')
        .map(str::trim)
        .find(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn metadata(performers: &[&str], album_artist: Option<&str>) -> TrackMetadata {
        TrackMetadata {
            performers: performers.iter().map(|p| p.to_string()).collect(),
            album_artist: album_artist.map(str::to_string),
            album: Some("Abbey Road, Remastered".into()),
            title: Some("Come Together".into()),
            track_number: 1,
        }
    }

    #[test]
    fn commas_become_semicolons() {
        let normalizer = MetadataNormalizer::new();
        assert_eq!(normalizer.canonicalize("Simon,Garfunkel"), "Simon; Garfunkel");
        assert_eq!(
            normalizer.canonicalize("  Daft Punk ;Pharrell Williams, Nile Rodgers "),
            "Daft Punk; Pharrell Williams; Nile Rodgers"
        );
    }

    #[test]
    fn empty_segments_are_dropped() {
        let normalizer = MetadataNormalizer::new();
        assert_eq!(normalizer.canonicalize("A;;B; ,"), "A; B");
        assert_eq!(normalizer.canonicalize("Solo Artist"), "Solo Artist");
    }

    #[test]
    fn normalize_rewrites_performers_and_album_artist_only() {
        let normalizer = MetadataNormalizer::new();
        let mut track = metadata(&["Queen,David Bowie", "Freddie Mercury"], Some("Queen ;  Bowie"));

        assert!(normalizer.normalize(&mut track));
        assert_eq!(
            track.performers,
            vec!["Queen; David Bowie".to_string(), "Freddie Mercury".to_string()]
        );
        assert_eq!(track.album_artist.as_deref(), Some("Queen; Bowie"));
        assert_eq!(track.album.as_deref(), Some("Abbey Road, Remastered"));
    }

    #[test]
    fn normalize_is_idempotent() {
        let normalizer = MetadataNormalizer::new();
        let mut track = metadata(&["A , B", "C;D"], Some("X,Y"));

        assert!(normalizer.normalize(&mut track));
        let once = track.clone();
        assert!(!normalizer.normalize(&mut track));
        assert_eq!(track, once);
    }

    #[test]
    fn clean_metadata_reports_no_change() {
        let normalizer = MetadataNormalizer::new();
        let mut track = metadata(&["The Beatles"], None);
        assert!(!normalizer.normalize(&mut track));

        let mut empty = TrackMetadata::default();
        assert!(!normalizer.normalize(&mut empty));
    }

    #[test]
    fn first_segment_skips_blanks() {
        assert_eq!(first_segment("Queen; Bowie"), Some("Queen"));
        assert_eq!(first_segment(" ; Bowie"), Some("Bowie"));
        assert_eq!(first_segment(""), None);
    }
}
