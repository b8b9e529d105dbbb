use filetime::FileTime;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

use crate::common::errors::{PackError, PackResult};

/// What a copy wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub files: usize,
    pub bytes: u64,
}

impl fmt::Display for CopyStats {
    /// `3 files, 12.4 KB`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

        let noun = if self.files == 1 { "file" } else { "files" };
        write!(f, "{} {}, ", self.files, noun)?;

        if self.bytes < 1024 {
            return write!(f, "{} B", self.bytes);
        }
        let mut size = self.bytes as f64 / 1024.0;
        let mut unit = 0;
        while size >= 1024.0 && unit + 1 < UNITS.len() {
            size /= 1024.0;
            unit += 1;
        }
        write!(f, "{:.1} {}", size, UNITS[unit])
    }
}

/// Move a directory, falling back to copy + delete when rename fails
/// (e.g. across filesystems)
pub fn move_dir(from: &Path, to: &Path) -> PackResult<()> {
    match fs::rename(from, to) {
        Ok(()) => return Ok(()),
        Err(e) => tracing::debug!(
            "rename {} -> {} failed ({}), copying instead",
            from.display(),
            to.display(),
            e
        ),
    }

    copy_dir_recursive(from, to)?;
    fs::remove_dir_all(from).map_err(|e| PackError::io(from, e))
}

/// Recursively copy a directory tree, preserving file metadata.
/// Symlinks are followed, so linked folders arrive as real folders.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> PackResult<CopyStats> {
    let mut stats = CopyStats::default();

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop"));
            PackError::io(path, source)
        })?;

        let relative = entry.path().strip_prefix(src).unwrap_or(Path::new(""));
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| PackError::io(&target, e))?;
        } else {
            stats.bytes += copy_file(entry.path(), &target)?;
            stats.files += 1;
        }
    }

    Ok(stats)
}

/// Copy one file, keeping permissions and modification time.
/// Returns the number of bytes written.
pub fn copy_file(src: &Path, dst: &Path) -> PackResult<u64> {
    let copy_err = |source| PackError::Copy {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source,
    };

    // fs::copy carries the permission bits over
    let bytes = fs::copy(src, dst).map_err(copy_err)?;

    // Set by path, so read-only copies keep their timestamp too
    let stamped = fs::metadata(src).and_then(|meta| {
        filetime::set_file_mtime(dst, FileTime::from_last_modification_time(&meta))
    });
    if let Err(e) = stamped {
        tracing::debug!("Kept default mtime on {}: {}", dst.display(), e);
    }

    Ok(bytes)
}

/// Delete a file or directory tree permanently
pub fn remove_path(path: &Path) -> PackResult<()> {
    let meta = fs::symlink_metadata(path).map_err(|e| PackError::io(path, e))?;
    let result = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| PackError::io(path, e))
}

/// True if anything (including a dangling symlink) sits at `path`
pub fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}
