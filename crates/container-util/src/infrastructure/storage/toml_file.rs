//! File-system backed document store.
//!
//! Documents are read whole into memory and written back whole.  Writes go
//! through a sibling temporary file that is synced and then renamed over the
//! target, so an interrupted write never leaves a half-written config:
//!
//! ```text
//! /etc/containerd/config.toml
//! /etc/containerd/.config.toml.tmp-<uuid>   ← written, fsynced, renamed
//! ```
//!
//! A symlinked config is followed: the temporary file is created next to the
//! link's destination and renamed over it, leaving the link itself alone.
//! The temporary file carries the target's permissions before any content is
//! written.
//!
//! There is no file locking; two processes editing the same file race and
//! the last rename wins.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use containerd_config_core::DocumentTree;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::{DocumentStore, StoreError};

/// A [`DocumentStore`] reading and writing TOML files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlFileStore;

impl TomlFileStore {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentStore for TomlFileStore {
    fn exists(&self, path: &Path) -> bool {
        !path.as_os_str().is_empty() && path.exists()
    }

    fn load(&self, path: &Path) -> Result<DocumentTree, StoreError> {
        let bytes = fs::read(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound {
                path: path.to_path_buf(),
            },
            _ => StoreError::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "config file read");

        DocumentTree::load_bytes(&bytes).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn persist(&self, path: &Path, tree: &DocumentTree) -> Result<(), StoreError> {
        // Render first so a serialization failure never touches the file.
        let text = tree.to_toml_string().map_err(|source| StoreError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;

        write_atomically(path, text.as_bytes()).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "updates written to file successfully");
        Ok(())
    }
}

/// Replaces `path` with `contents` via a synced temporary file and a rename.
///
/// A symlinked `path` is followed, so the link stays in place and the file it
/// points at is replaced.
fn write_atomically(path: &Path, contents: &[u8]) -> io::Result<()> {
    let target = resolve_target(path)?;
    let tmp = temp_path_for(&target)?;
    let result = write_and_rename(&tmp, &target, contents);
    if result.is_err() {
        if let Err(e) = fs::remove_file(&tmp) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(tmp = %tmp.display(), "failed to remove temporary file: {e}");
            }
        }
    }
    result
}

/// The file a write to `path` must replace: the symlink's destination, or
/// `path` itself.
fn resolve_target(path: &Path) -> io::Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            let target = fs::canonicalize(path)?;
            debug!(link = %path.display(), target = %target.display(), "following symlinked config");
            Ok(target)
        }
        _ => Ok(path.to_path_buf()),
    }
}

fn write_and_rename(tmp: &Path, target: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = create_temp_file(tmp, target)?;
    file.write_all(contents)?;
    file.sync_all()?;
    drop(file);

    fs::rename(tmp, target)
}

/// Creates `tmp` with the permissions of `target` (when it exists) before any
/// content is written to it.
fn create_temp_file(tmp: &Path, target: &Path) -> io::Result<File> {
    let file = File::create(tmp)?;
    if let Ok(metadata) = fs::metadata(target) {
        file.set_permissions(metadata.permissions())?;
    }
    Ok(file)
}

/// `dir/.name.tmp-<uuid>` next to `path`, so the rename stays on one file system.
fn temp_path_for(path: &Path) -> io::Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("config path {} has no file name", path.display()),
        )
    })?;
    let tmp_name = format!(".{}.tmp-{}", name.to_string_lossy(), Uuid::new_v4().simple());
    Ok(path.with_file_name(tmp_name))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
