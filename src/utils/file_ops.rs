use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;

use log::{debug, warn};

use crate::organizer::config::RetryPolicy;
use crate::{OrganizeError, Result};

/// The filesystem calls placement relies on.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64>;
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        fs::copy(from, to)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

/// What happened to a track's file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Copied,
    Moved,
    /// The destination was already there; nothing was touched.
    AlreadyExists,
    /// Dry run: the destination was computed but nothing was written.
    Planned,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Copied => "copied",
            Placement::Moved => "moved",
            Placement::AlreadyExists => "skipped",
            Placement::Planned => "planned",
        }
    }
}

pub struct FileManager<F = LocalFileSystem> {
    fs: F,
    retry: RetryPolicy,
    move_files: bool,
}

impl FileManager<LocalFileSystem> {
    pub fn local(retry: RetryPolicy, move_files: bool) -> Self {
        Self::new(LocalFileSystem, retry, move_files)
    }
}

impl<F: FileSystem> FileManager<F> {
    pub fn new(fs: F, retry: RetryPolicy, move_files: bool) -> Self {
        Self {
            fs,
            retry,
            move_files,
        }
    }

    #[cfg(test)]
    fn filesystem(&self) -> &F {
        &self.fs
    }

    pub fn ensure_directory(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if self.fs.exists(path) {
            return Ok(());
        }
        self.fs
            .create_dir_all(path)
            .map_err(|source| OrganizeError::Filesystem {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Places `source` at `destination` unless something already lives there.
    ///
    /// The bytes go to a staging file next to the destination first and are
    /// renamed into place once complete, so `destination` never holds a
    /// partial copy.
    pub fn place(&self, source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<Placement> {
        let source = source.as_ref();
        let destination = destination.as_ref();

        if self.fs.exists(destination) {
            debug!("Already in place: {}", destination.display());
            return Ok(Placement::AlreadyExists);
        }

        let staging = staging_path(destination);
        self.copy_with_retry(source, &staging)?;

        if let Err(source_err) = self.fs.rename(&staging, destination) {
            let _ = self.fs.remove_file(&staging);
            return Err(OrganizeError::Filesystem {
                path: destination.to_path_buf(),
                source: source_err,
            });
        }

        if !self.move_files {
            return Ok(Placement::Copied);
        }

        self.fs
            .remove_file(source)
            .map_err(|source_err| OrganizeError::Filesystem {
                path: source.to_path_buf(),
                source: source_err,
            })?;
        Ok(Placement::Moved)
    }

    fn copy_with_retry(&self, source: &Path, staging: &Path) -> Result<()> {
        let mut attempt = 1;
        loop {
            match self.fs.copy(source, staging) {
                Ok(bytes) => {
                    debug!("Copied {} bytes from {}", bytes, source.display());
                    return Ok(());
                }
                Err(err) => {
                    if self.fs.exists(staging) {
                        let _ = self.fs.remove_file(staging);
                    }
                    if attempt >= self.retry.max_attempts {
                        return Err(OrganizeError::TransientIo {
                            path: source.to_path_buf(),
                            attempts: attempt,
                            source: err,
                        });
                    }
                    warn!(
                        "Copy attempt {}/{} for {} failed: {}",
                        attempt,
                        self.retry.max_attempts,
                        source.display(),
                        err
                    );
                    thread::sleep(self.retry.delay);
                    attempt += 1;
                }
            }
        }
    }
}

fn staging_path(destination: &Path) -> PathBuf {
    let name = destination
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    destination.with_file_name(format!(".{name}.partial"))
}
