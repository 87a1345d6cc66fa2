//! Rotating file writer with size-based rotation and backup retention.
//!
//! [`RotatingFile`] is an [`io::Write`] sink that moves the current file aside
//! once it would grow past a size limit, keeping a fixed number of numbered
//! backups (`<file>.1` newest … `<file>.N` oldest). This bounds disk usage of
//! the trace log.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default size threshold for rotation (10MB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Default number of rotated backups to keep.
pub const MAX_BACKUP_FILES: usize = 3;

/// Append-only log file that rotates by size.
///
/// The file and its parent directory are created on the first write, so a
/// writer can be built before the filesystem is accessible.
pub struct RotatingFile {
    path: PathBuf,
    file: Option<File>,
    written: u64,
    max_bytes: u64,
    backups: usize,
}

impl RotatingFile {
    /// Creates a writer with the default limits.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    /// Creates a writer rotating past `max_bytes` and keeping `backups` old files.
    #[must_use]
    pub const fn with_limits(path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            path,
            file: None,
            written: 0,
            max_bytes,
            backups,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn open(&mut self) -> io::Result<&mut File> {
        if self.file.is_none() {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
            self.written = file.metadata()?.len();
            self.file = Some(file);
        }

        self.file
            .as_mut()
            .ok_or_else(|| io::Error::other("log file not open"))
    }

    /// Shifts `<file>.k` to `<file>.k+1`, dropping the oldest, then moves the
    /// current file to `<file>.1`.
    fn rotate(&mut self) -> io::Result<()> {
        self.file = None;
        self.written = 0;

        if self.backups == 0 {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
                _ => Ok(()),
            };
        }

        let oldest = self.backup_path(self.backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        if self.path.exists() {
            fs::rename(&self.path, self.backup_path(1))?;
        }
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.open()?;
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }

        let file = self.open()?;
        let n = file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("written", &self.written)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_parent_directory_lazily() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/trace.json");
        let mut writer = RotatingFile::new(path.clone());

        assert!(!path.exists());
        writer.write_all(b"{}\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
    }

    #[test]
    fn rotates_and_keeps_limited_backups() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        let mut writer = RotatingFile::with_limits(path.clone(), 8, 2);

        for line in ["aaaaaa\n", "bbbbbb\n", "cccccc\n", "dddddd\n"] {
            writer.write_all(line.as_bytes()).unwrap();
        }
        writer.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "dddddd\n");
        assert_eq!(fs::read_to_string(writer.backup_path(1)).unwrap(), "cccccc\n");
        assert_eq!(fs::read_to_string(writer.backup_path(2)).unwrap(), "bbbbbb\n");
        assert!(!writer.backup_path(3).exists());
    }

    #[test]
    fn existing_file_size_counts_toward_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        fs::write(&path, b"0123456789").unwrap();

        let mut writer = RotatingFile::with_limits(path.clone(), 12, 1);
        writer.write_all(b"xyz").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "xyz");
        assert_eq!(fs::read_to_string(writer.backup_path(1)).unwrap(), "0123456789");
    }
}
