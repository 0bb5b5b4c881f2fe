//! File locking and atomic writes for the tdl store.
//!
//! Store files are shared between concurrently running tdl processes, so
//! every write goes through two layers: an exclusive flock (via fs2) on a
//! sidecar lock file, and the write-temp-then-rename pattern so readers
//! never observe partial data.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use fs2::FileExt;

use crate::error::{Error, Result};

/// Default lock timeout in milliseconds
pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 5000;

/// Retry interval when waiting for a contended lock
const LOCK_RETRY_INTERVAL_MS: u64 = 50;

fn is_lock_contended(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::WouldBlock {
        return true;
    }

    // Windows reports lock/sharing violations as "Other"
    #[cfg(windows)]
    {
        matches!(err.raw_os_error(), Some(32) | Some(33))
    }
    #[cfg(not(windows))]
    {
        false
    }
}

/// Open (creating if needed) the file a lock is taken on
fn open_lock_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?;
    Ok(file)
}

/// An exclusive file lock released when dropped
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Acquire an exclusive lock, retrying until `timeout_ms` elapses.
    ///
    /// Returns `Error::LockFailed` when another process still holds the
    /// lock at the deadline.
    pub fn acquire(path: impl AsRef<Path>, timeout_ms: u64) -> Result<Self> {
        let path = path.as_ref();
        let file = open_lock_file(path)?;

        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            match file.try_lock_exclusive() {
                Ok(()) => {
                    return Ok(FileLock {
                        file,
                        path: path.to_path_buf(),
                    });
                }
                Err(e) if is_lock_contended(&e) => {
                    if Instant::now() >= deadline {
                        return Err(Error::LockFailed(path.to_path_buf()));
                    }
                    std::thread::sleep(Duration::from_millis(LOCK_RETRY_INTERVAL_MS));
                }
                Err(e) => return Err(Error::Io(e)),
            }
        }
    }

    /// Try to acquire a lock without waiting; `Ok(None)` when held elsewhere
    pub fn try_acquire(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        let file = open_lock_file(path)?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(FileLock {
                file,
                path: path.to_path_buf(),
            })),
            Err(e) if is_lock_contended(&e) => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Path to the locked file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Atomically replace the contents of `path`.
///
/// Writes to a temp file in the same directory, syncs, then renames over
/// the target, so the file is either fully written or untouched. Does not
/// lock; callers coordinating across processes hold a `FileLock` first.
pub fn write_atomic(path: impl AsRef<Path>, data: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Same directory as the target, or the rename is not atomic
    let temp_path = path.with_extension(format!(
        "{}.tmp.{}",
        path.extension().and_then(|e| e.to_str()).unwrap_or(""),
        std::process::id()
    ));

    let mut temp_file = File::create(&temp_path)?;
    temp_file.write_all(data)?;
    temp_file.sync_all()?;
    drop(temp_file);

    fs::rename(&temp_path, path)?;
    Ok(())
}

/// Atomically replace the contents of `path` with string data
pub fn write_atomic_str(path: impl AsRef<Path>, data: &str) -> Result<()> {
    write_atomic(path, data.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tempfile::TempDir;

    #[test]
    fn lock_excludes_second_acquirer() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = temp_dir.path().join("store.lock");

        let lock = FileLock::acquire(&lock_path, 1000).unwrap();
        assert!(lock_path.exists());
        assert_eq!(lock.path(), lock_path);

        assert!(FileLock::try_acquire(&lock_path).unwrap().is_none());

        drop(lock);

        assert!(FileLock::try_acquire(&lock_path).unwrap().is_some());
    }

    #[test]
    fn lock_timeout_returns_lock_failed() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = temp_dir.path().join("store.lock");

        let _lock = FileLock::acquire(&lock_path, 1000).unwrap();
        let result = FileLock::acquire(&lock_path, 50);
        assert!(matches!(result, Err(Error::LockFailed(_))));
    }

    #[test]
    fn lock_released_on_drop_across_threads() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = temp_dir.path().join("store.lock");

        let lock = FileLock::acquire(&lock_path, 1000).unwrap();

        let contended_path = lock_path.clone();
        let blocked = thread::spawn(move || {
            FileLock::try_acquire(&contended_path).unwrap().is_none()
        })
        .join()
        .unwrap();
        assert!(blocked);

        drop(lock);

        let free_path = lock_path.clone();
        let acquired = thread::spawn(move || FileLock::acquire(&free_path, 1000).is_ok())
            .join()
            .unwrap();
        assert!(acquired);
    }

    #[test]
    fn atomic_write_replaces_contents() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("items.json");

        write_atomic_str(&file_path, "[]").unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "[]");

        write_atomic_str(&file_path, "[1]").unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "[1]");
    }
}
