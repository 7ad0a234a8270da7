//! Single-writer lock for a table directory.
//!
//! The lock is an advisory exclusive lock on `.scan.lock`, held for the
//! duration of a closure. The operating system drops it when the holder
//! exits, so a crashed scan never leaves the table locked. The file itself
//! is never removed; it carries the holder's pid for diagnostics only.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Seek, SeekFrom, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use fd_lock::RwLock;

use crate::error::ReportError;

const LOCK_RETRY_DELAY: Duration = Duration::from_millis(50);

/// Run `f` while holding the exclusive lock at `lock_path`, waiting up to
/// `timeout` for another holder to finish.
///
/// Blocks the calling thread; call it from the blocking pool.
///
/// # Errors
///
/// Returns [`ReportError::LockHeld`] when another writer keeps the lock past
/// the timeout, [`ReportError::LockUnavailable`] when the lock file cannot be
/// opened or locked, or whatever `f` returns.
pub fn with_lock<T>(
    lock_path: &Path,
    timeout: Duration,
    f: impl FnOnce() -> Result<T, ReportError>,
) -> Result<T, ReportError> {
    let mut lock = RwLock::new(open_lock_file(lock_path)?);
    let started = Instant::now();

    loop {
        match lock.try_write() {
            Ok(mut guard) => {
                record_owner(&mut guard);
                return f();
            }
            Err(err) if err.kind() == ErrorKind::WouldBlock => {
                if started.elapsed() >= timeout {
                    return Err(ReportError::LockHeld {
                        path: lock_path.to_path_buf(),
                        pid: read_owner(lock_path),
                        waited_secs: started.elapsed().as_secs(),
                    });
                }
                tracing::debug!(path = %lock_path.display(), "waiting for scan lock");
                std::thread::sleep(LOCK_RETRY_DELAY);
            }
            Err(err) => {
                tracing::warn!(path = %lock_path.display(), error = %err, "cannot lock");
                return Err(ReportError::LockUnavailable {
                    path: lock_path.to_path_buf(),
                });
            }
        }
    }
}

fn open_lock_file(lock_path: &Path) -> Result<File, ReportError> {
    if let Some(parent) = lock_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
    }
    // Never truncate before the lock is held: the current owner's pid lives here.
    OpenOptions::new()
        .create(true)
        .truncate(false)
        .read(true)
        .write(true)
        .open(lock_path)
        .map_err(|e| ReportError::io(lock_path, e))
}

fn record_owner(file: &mut File) {
    let written = file
        .set_len(0)
        .and_then(|()| file.seek(SeekFrom::Start(0)))
        .and_then(|_| writeln!(file, "{}", std::process::id()));
    if let Err(e) = written {
        tracing::debug!(error = %e, "could not record lock owner");
    }
}

fn read_owner(lock_path: &Path) -> Option<u32> {
    std::fs::read_to_string(lock_path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
}
