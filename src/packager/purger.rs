use std::path::{Path, PathBuf};

use super::report::{Step, StepRecord};
use super::transfer;
use crate::common::errors::PackError;
use crate::common::safety;

/// Remove temporary build directories.
///
/// Absent paths are skipped. A failed removal is recorded and the
/// remaining paths are still processed. Neither the project root nor the
/// app folder itself is ever removed here.
pub fn purge_temporaries(
    paths: &[PathBuf],
    project_root: &Path,
    app_dir: &Path,
    mut emit: impl FnMut(StepRecord),
) {
    for path in paths {
        emit(purge_one(path, project_root, app_dir));
    }
}

fn purge_one(path: &Path, project_root: &Path, app_dir: &Path) -> StepRecord {
    if !transfer::exists(path) {
        return StepRecord::skipped(
            Step::Purge,
            path,
            format!("{} not present", path.display()),
        );
    }

    if safety::is_protected(path, project_root) || safety::same_path(path, app_dir) {
        let err = PackError::Protected {
            path: path.to_path_buf(),
        };
        tracing::warn!("{}", err);
        return StepRecord::failed(Step::Purge, path, err.to_string());
    }

    match transfer::remove_path(path) {
        Ok(()) => {
            tracing::debug!("Purged {}", path.display());
            StepRecord::ok(Step::Purge, path, format!("Removed {}", path.display()))
        }
        Err(e) => {
            tracing::warn!("Purge failed for {}: {}", path.display(), e);
            StepRecord::failed(
                Step::Purge,
                path,
                format!("Failed to remove {}: {}", path.display(), e),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_purges_present_and_skips_absent() {
        let tmp = TempDir::new().unwrap();
        let build = tmp.path().join("build");
        let cache = tmp.path().join("__pycache__");
        std::fs::create_dir_all(build.join("obj")).unwrap();
        std::fs::write(build.join("obj/x.o"), "x").unwrap();

        let mut records = Vec::new();
        purge_temporaries(
            &[build.clone(), cache.clone()],
            tmp.path(),
            &tmp.path().join("App"),
            |r| records.push(r),
        );

        assert!(!build.exists());
        assert!(!cache.exists());
        assert!(records[0].is_ok());
        assert!(records[1].is_skipped());
    }

    #[test]
    fn test_refuses_project_root() {
        let tmp = TempDir::new().unwrap();
        let marker = tmp.path().join("keep.txt");
        std::fs::write(&marker, "x").unwrap();

        let mut records = Vec::new();
        purge_temporaries(
            &[tmp.path().join(".")],
            tmp.path(),
            &tmp.path().join("App"),
            |r| records.push(r),
        );

        assert!(marker.exists());
        assert!(records[0].is_failed());
        assert!(records[0].message().contains("protected"));
    }

    #[test]
    fn test_refuses_app_dir_itself() {
        let tmp = TempDir::new().unwrap();
        let app = tmp.path().join("App");
        std::fs::create_dir_all(&app).unwrap();
        std::fs::write(app.join("App.exe"), "MZ").unwrap();

        let mut records = Vec::new();
        // An empty app purge entry resolves to the app folder
        purge_temporaries(&[app.join("")], tmp.path(), &app, |r| records.push(r));

        assert!(app.join("App.exe").exists());
        assert!(records[0].is_failed());
        assert!(records[0].message().contains("protected"));
    }

    #[test]
    fn test_failure_does_not_stop_later_paths() {
        let tmp = TempDir::new().unwrap();
        let failing = tmp.path().join(".");
        let absent = tmp.path().join("build");
        let present = tmp.path().join("__pycache__");
        std::fs::create_dir_all(&present).unwrap();
        std::fs::write(present.join("m.pyc"), "c").unwrap();

        let mut records = Vec::new();
        purge_temporaries(
            &[failing, absent, present.clone()],
            tmp.path(),
            &tmp.path().join("App"),
            |r| records.push(r),
        );

        let tags: Vec<&str> = records.iter().map(|r| r.tag()).collect();
        assert_eq!(tags, vec!["ERROR", "SKIP", "OK"]);
        assert!(!present.exists());
        assert!(tmp.path().exists());
    }
}
