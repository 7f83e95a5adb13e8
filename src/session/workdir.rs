//! session::workdir
//!
//! Working-tree helpers. These are the only session operations that touch
//! the filesystem directly instead of going through the backend.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::Session;
use crate::git::{Backend, GitError, Repository};

/// `rm -f`: a missing file is not an error.
fn remove_file_force(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// `rm -rf`: a missing directory is not an error.
fn remove_dir_force(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

impl<B: Backend> Session<B> {
    /// Whether `path` carries a `.git` marker.
    pub fn can_cover(path: &Path) -> bool {
        path.join(".git").exists()
    }

    /// Root of the covered working tree.
    pub fn directory(&self) -> Result<PathBuf, GitError> {
        Ok(self.layer()?.work_dir().to_path_buf())
    }

    pub fn full_path(&self, path: &str) -> Result<PathBuf, GitError> {
        Ok(self.directory()?.join(path))
    }

    /// Tracked paths, relative to [`Session::directory`].
    pub fn files_paths(&self) -> Result<Vec<String>, GitError> {
        self.layer()?.tracked_files()
    }

    /// Delete one file from the working tree, if present.
    pub fn wipe_file(&self, path: &str) -> Result<(), GitError> {
        remove_file_force(&self.full_path(path)?)?;
        Ok(())
    }

    /// Remove the directory containing each tracked file. Files sitting at
    /// the root are removed one by one; the root itself always survives.
    pub fn wipe_directory(&self) -> Result<(), GitError> {
        let root = self.directory()?;

        for file in self.files_paths()? {
            let full = root.join(&file);
            match full.parent() {
                Some(parent) if parent != root && parent.starts_with(&root) => {
                    debug!(dir = %parent.display(), "wiping");
                    remove_dir_force(parent)?;
                }
                _ => remove_file_force(&full)?,
            }
        }
        Ok(())
    }

    /// True when every remote url points at an existing local path.
    pub fn local_remotes_only(&self) -> Result<bool, GitError> {
        Ok(self.remotes()?.iter().all(|remote| {
            let url = remote.url.strip_prefix("file://").unwrap_or(&remote.url);
            Path::new(url).exists()
        }))
    }

    /// Whether any commit reachable from HEAD contains `path`.
    pub fn file_was_ever_known(&self, path: &str) -> Result<bool, GitError> {
        Ok(!self.layer()?.log_path(path)?.is_empty())
    }
}
