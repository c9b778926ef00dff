use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::audio::normalize::first_segment;
use crate::{MetadataField, OrganizeError, Result, TrackMetadata};

/// Characters every destination component loses, on top of the platform set.
const STRIPPED: [char; 3] = ['/', '?', ':'];

#[cfg(windows)]
fn is_invalid_path_char(c: char) -> bool {
    matches!(c, '"' | '<' | '>' | '|') || c <= '\u{1f}'
}

#[cfg(not(windows))]
fn is_invalid_path_char(c: char) -> bool {
    c == '\0'
}

#[cfg(windows)]
fn is_invalid_file_name_char(c: char) -> bool {
    matches!(c, '"' | '<' | '>' | '|' | ':' | '*' | '?' | '\\' | '/') || c <= '\u{1f}'
}

#[cfg(not(windows))]
fn is_invalid_file_name_char(c: char) -> bool {
    c == '\0' || c == '/'
}

/// Word-casing rules used when building folder and file names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TitleCaseLocale {
    /// Capitalizes the `ij` digraph as a single letter (`IJsselmeer`).
    #[default]
    Dutch,
    Invariant,
}

impl TitleCaseLocale {
    /// Lower-cases `value`, then upper-cases the first letter of every word.
    /// Letters, digits and apostrophes form words; anything else separates
    /// them.
    pub fn title_case(&self, value: &str) -> String {
        let lower = value.to_lowercase();
        let mut output = String::with_capacity(lower.len());
        let mut chars = lower.chars().peekable();
        let mut word_start = true;

        while let Some(c) = chars.next() {
            if c.is_alphabetic() {
                if word_start {
                    if *self == TitleCaseLocale::Dutch && c == 'i' && chars.peek() == Some(&'j') {
                        chars.next();
                        output.push_str("IJ");
                    } else {
                        output.extend(c.to_uppercase());
                    }
                } else {
                    output.push(c);
                }
                word_start = false;
            } else {
                word_start = !(c.is_numeric() || c == '\'' || c == '\u{2019}');
                output.push(c);
            }
        }

        output
    }
}

impl fmt::Display for TitleCaseLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TitleCaseLocale::Dutch => write!(f, "dutch"),
            TitleCaseLocale::Invariant => write!(f, "invariant"),
        }
    }
}

/// Where a track lands, relative to the destination root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDestination {
    /// `artist/album`
    pub directory: PathBuf,
    /// `NN - Title.ext`
    pub file_name: String,
}

impl TrackDestination {
    pub fn full_path(&self, root: &Path) -> PathBuf {
        root.join(&self.directory).join(&self.file_name)
    }
}

/// Derives destination folders and file names from track metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathBuilder {
    locale: TitleCaseLocale,
}

impl PathBuilder {
    pub fn new(locale: TitleCaseLocale) -> Self {
        Self { locale }
    }

    pub fn derive(&self, track: &Path, metadata: &TrackMetadata) -> Result<TrackDestination> {
        Ok(TrackDestination {
            directory: self.directory(track, metadata)?,
            file_name: self.file_name(track, metadata)?,
        })
    }

    /// `artist/album`. The artist is the album artist when one is tagged,
    /// otherwise the first performer.
    pub fn directory(&self, track: &Path, metadata: &TrackMetadata) -> Result<PathBuf> {
        let artist = metadata
            .album_artist
            .as_deref()
            .and_then(first_segment)
            .or_else(|| metadata.performers.first().and_then(|p| first_segment(p)))
            .ok_or_else(|| missing(MetadataField::Artist, track))?;
        let album = metadata
            .album
            .as_deref()
            .ok_or_else(|| missing(MetadataField::Album, track))?;

        let artist = self.component(artist, is_invalid_path_char);
        let album = self.component(album, is_invalid_path_char);

        if !is_single_folder(&artist) {
            return Err(missing(MetadataField::Artist, track));
        }
        if !is_single_folder(&album) {
            return Err(missing(MetadataField::Album, track));
        }

        let directory = PathBuf::from(artist).join(album);
        debug_assert!(directory.components().all(|c| matches!(c, Component::Normal(_))));
        Ok(directory)
    }

    /// `NN - Title.ext`, keeping the source extension as-is.
    pub fn file_name(&self, track: &Path, metadata: &TrackMetadata) -> Result<String> {
        let title = metadata
            .title
            .as_deref()
            .map(|title| self.component(title, is_invalid_file_name_char))
            .filter(|title| !title.is_empty())
            .ok_or_else(|| missing(MetadataField::Title, track))?;

        let extension = track
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        Ok(format!("{:02} - {}{}", metadata.track_number, title, extension))
    }

    fn component(&self, raw: &str, invalid: fn(char) -> bool) -> String {
        let stripped: String = raw
            .chars()
            .filter(|c| !invalid(*c) && !STRIPPED.contains(c))
            .collect();
        self.locale.title_case(stripped.trim())
    }
}

/// A non-empty name that stays exactly one level below its parent: not `.`,
/// `..`, made only of dots, or split by a platform separator.
fn is_single_folder(name: &str) -> bool {
    if name.chars().all(|c| c == '.' || c.is_whitespace()) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn missing(field: MetadataField, track: &Path) -> OrganizeError {
    OrganizeError::MissingMetadata {
        field,
        path: track.to_path_buf(),
    }
}
