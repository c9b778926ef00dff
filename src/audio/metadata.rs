use std::path::Path;

use lofty::config::WriteOptions;
use lofty::error::LoftyError;
use lofty::prelude::*;
use lofty::file::TaggedFile;
use lofty::tag::{ItemKey, ItemValue, Tag, TagItem};

use crate::{MetadataField, OrganizeError, Result, TrackMetadata};

/// Reads and writes the tag fields the organizer cares about.
///
/// Implementations open the file's tag container for the duration of a
/// single call and release it before returning, on success and on error.
pub trait TagCodec {
    fn read(&self, path: &Path) -> Result<TrackMetadata>;

    fn write(&self, path: &Path, metadata: &TrackMetadata) -> Result<()>;
}

/// [`TagCodec`] backed by lofty. Uses the file's primary tag, falling back
/// to the first tag present.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyCodec;

impl LoftyCodec {
    pub fn new() -> Self {
        Self
    }

    fn open(path: &Path) -> std::result::Result<TaggedFile, LoftyError> {
        lofty::read_from_path(path)
    }

    fn tag_of(tagged: &TaggedFile) -> Option<&Tag> {
        tagged.primary_tag().or_else(|| tagged.first_tag())
    }
}

impl TagCodec for LoftyCodec {
    fn read(&self, path: &Path) -> Result<TrackMetadata> {
        let tagged = Self::open(path).map_err(|e| OrganizeError::TagRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let tag = Self::tag_of(&tagged).ok_or_else(|| OrganizeError::MissingMetadata {
            field: MetadataField::Tag,
            path: path.to_path_buf(),
        })?;

        Ok(TrackMetadata {
            performers: tag
                .get_strings(&ItemKey::TrackArtist)
                .map(str::to_string)
                .collect(),
            album_artist: tag.get_string(&ItemKey::AlbumArtist).map(str::to_string),
            album: tag.album().map(|album| album.into_owned()),
            title: tag.title().map(|title| title.into_owned()),
            track_number: tag.track().unwrap_or(0),
        })
    }

    fn write(&self, path: &Path, metadata: &TrackMetadata) -> Result<()> {
        let write_error = |message: String| OrganizeError::TagWrite {
            path: path.to_path_buf(),
            message,
        };

        let mut tagged = Self::open(path).map_err(|e| write_error(e.to_string()))?;

        // Resolve the type first; the mutable lookup can't fall back on its own.
        let tag_type = Self::tag_of(&tagged)
            .map(Tag::tag_type)
            .ok_or_else(|| OrganizeError::MissingMetadata {
                field: MetadataField::Tag,
                path: path.to_path_buf(),
            })?;
        let tag = tagged
            .tag_mut(tag_type)
            .ok_or_else(|| write_error(format!("{tag_type:?} tag disappeared")))?;

        tag.remove_key(&ItemKey::TrackArtist);
        for performer in &metadata.performers {
            tag.push(TagItem::new(
                ItemKey::TrackArtist,
                ItemValue::Text(performer.clone()),
            ));
        }

        match &metadata.album_artist {
            Some(album_artist) => {
                tag.insert_text(ItemKey::AlbumArtist, album_artist.clone());
            }
            None => {
                tag.remove_key(&ItemKey::AlbumArtist);
            }
        }

        match &metadata.album {
            Some(album) => tag.set_album(album.clone()),
            None => tag.remove_album(),
        }

        match &metadata.title {
            Some(title) => tag.set_title(title.clone()),
            None => tag.remove_title(),
        }

        if metadata.track_number > 0 {
            tag.set_track(metadata.track_number);
        }

        tag.save_to_path(path, WriteOptions::default())
            .map_err(|e| write_error(e.to_string()))
    }
}
