//! Filesystem infrastructure: implements `ArtifactStore` and `ArtifactReader`.
//!
//! Writes go through a temp file in the destination directory, are fsync'd,
//! renamed into place, and the directory entry is fsync'd as well.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::{ArtifactReader, ArtifactStore};

/// Mode for artifacts that health checks and support tooling read.
const ARTIFACT_MODE: u32 = 0o644;

/// Production filesystem implementation of the artifact ports.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl ArtifactStore for LocalFs {
    async fn write_durable(&self, path: &Path, contents: Vec<u8>) -> Result<()> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || write_durable(&path, &contents))
            .await
            .context("spawn_blocking for write_durable")?
    }

    async fn create_marker(&self, path: &Path) -> Result<()> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || create_marker(&path))
            .await
            .context("spawn_blocking for create_marker")?
    }
}

impl ArtifactReader for LocalFs {
    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn read_to_string(&self, path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading file {}", path.display()))
    }

    async fn size(&self, path: &Path) -> u64 {
        tokio::fs::metadata(path).await.map_or(0, |m| m.len())
    }

    async fn read_from(&self, path: &Path, offset: u64) -> Result<String> {
        use tokio::io::{AsyncReadExt, AsyncSeekExt};

        let mut file = match tokio::fs::File::open(path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(String::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("opening file {}", path.display()));
            }
        };
        file.seek(std::io::SeekFrom::Start(offset))
            .await
            .with_context(|| format!("seeking {} to {offset}", path.display()))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .await
            .with_context(|| format!("reading file {}", path.display()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Atomically replace `path` with `contents` and flush it to disk.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or any write, sync,
/// or rename step fails. On error `path` is left untouched.
pub fn write_durable(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = parent_dir(path)?;
    std::fs::create_dir_all(&parent)
        .with_context(|| format!("creating directory {}", parent.display()))?;

    let mut temp = tempfile::NamedTempFile::new_in(&parent)
        .with_context(|| format!("creating temp file in {}", parent.display()))?;
    temp.write_all(contents)
        .with_context(|| format!("writing temp file for {}", path.display()))?;
    set_mode(temp.path(), ARTIFACT_MODE)?;
    temp.as_file()
        .sync_all()
        .with_context(|| format!("syncing temp file for {}", path.display()))?;
    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("finalizing {}", path.display()))?;

    sync_dir(&parent)
}

/// Create (or truncate) an empty file at `path` and flush it to disk.
///
/// # Errors
///
/// Returns an error if the file or its directory cannot be created or synced.
pub fn create_marker(path: &Path) -> Result<()> {
    let parent = parent_dir(path)?;
    std::fs::create_dir_all(&parent)
        .with_context(|| format!("creating directory {}", parent.display()))?;

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("creating marker {}", path.display()))?;
    file.sync_all()
        .with_context(|| format!("syncing marker {}", path.display()))?;
    set_mode(path, ARTIFACT_MODE)?;

    sync_dir(&parent)
}

fn parent_dir(path: &Path) -> Result<PathBuf> {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow::anyhow!("{} has no parent directory", path.display()))
}

fn set_mode(path: &Path, mode: u32) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
            .with_context(|| format!("setting permissions on {}", path.display()))?;
    }
    #[cfg(not(unix))]
    let _ = (path, mode);
    Ok(())
}

fn sync_dir(dir: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        std::fs::File::open(dir)
            .and_then(|d| d.sync_all())
            .with_context(|| format!("syncing directory {}", dir.display()))?;
    }
    #[cfg(not(unix))]
    let _ = dir;
    Ok(())
}
