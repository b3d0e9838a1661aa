//! Applying a calendar timestamp to a file's metadata.
//!
//! Filename dates carry no zone, so they are read as local wall-clock time.
//! Access and modification times go through `filetime`. Creation time is
//! only settable on Windows and macOS; elsewhere the platform keeps its own
//! birth time and the write covers the two remaining fields.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use filetime::FileTime;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use tracing::debug;

/// A timestamp write that did not complete.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("{0} does not exist in the local time zone")]
    NonexistentLocalTime(NaiveDateTime),

    #[error("Failed to set timestamps on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Sets created/accessed/modified on a file to one instant.
///
/// A failure anywhere is a failure of the whole write; there is no partial
/// success state and no retry.
pub trait TimestampWriter {
    fn apply(&self, path: &Path, timestamp: NaiveDateTime) -> Result<(), WriteError>;
}

/// Writes timestamps to the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsTimestampWriter;

impl TimestampWriter for FsTimestampWriter {
    fn apply(&self, path: &Path, timestamp: NaiveDateTime) -> Result<(), WriteError> {
        let local = to_local(timestamp)?;
        let file_time = FileTime::from_unix_time(local.timestamp(), local.timestamp_subsec_nanos());

        filetime::set_file_times(path, file_time, file_time).map_err(|source| WriteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        set_created(path, SystemTime::from(local)).map_err(|source| WriteError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), %timestamp, "timestamps applied");
        Ok(())
    }
}

/// Resolve a naive timestamp in the local zone.
///
/// On a DST overlap the earlier instant is used. Times inside a DST gap
/// do not exist and cannot be written.
pub fn to_local(timestamp: NaiveDateTime) -> Result<DateTime<Local>, WriteError> {
    Local
        .from_local_datetime(&timestamp)
        .earliest()
        .ok_or(WriteError::NonexistentLocalTime(timestamp))
}

#[cfg(any(windows, target_os = "macos"))]
fn set_created(path: &Path, created: SystemTime) -> io::Result<()> {
    use std::fs::FileTimes;
    #[cfg(target_os = "macos")]
    use std::os::macos::fs::FileTimesExt;
    #[cfg(windows)]
    use std::os::windows::fs::FileTimesExt;

    let file = open_for_attributes(path)?;
    file.set_times(FileTimes::new().set_created(created))
}

#[cfg(not(any(windows, target_os = "macos")))]
fn set_created(_path: &Path, _created: SystemTime) -> io::Result<()> {
    Ok(())
}

#[cfg(windows)]
fn open_for_attributes(path: &Path) -> io::Result<std::fs::File> {
    use std::os::windows::fs::OpenOptionsExt;
    const FILE_WRITE_ATTRIBUTES: u32 = 0x0100;

    std::fs::OpenOptions::new()
        .access_mode(FILE_WRITE_ATTRIBUTES)
        .open(path)
}

#[cfg(target_os = "macos")]
fn open_for_attributes(path: &Path) -> io::Result<std::fs::File> {
    std::fs::File::open(path)
}
