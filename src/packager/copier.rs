use std::path::Path;

use super::report::{Step, StepRecord};
use super::transfer::{self, CopyStats};
use crate::common::config::CopyEntry;
use crate::common::errors::{PackError, PackResult};
use crate::common::safety;

/// Copy every manifest entry into the app folder.
///
/// Sources resolve against `root`, destinations against `app_dir`.
/// A destination must land strictly inside `app_dir`; anything else is
/// refused before a single byte is deleted. Missing sources are skipped
/// and leave the destination untouched; a failing entry never stops the
/// ones after it.
pub fn copy_manifest(
    entries: &[CopyEntry],
    root: &Path,
    app_dir: &Path,
    mut emit: impl FnMut(StepRecord),
) {
    for entry in entries {
        emit(copy_entry(entry, root, app_dir));
    }
}

fn copy_entry(entry: &CopyEntry, root: &Path, app_dir: &Path) -> StepRecord {
    let label = entry.source.display().to_string();
    let src = root.join(&entry.source);
    let dst = app_dir.join(&entry.dest);

    if !safety::is_strictly_inside(&dst, app_dir) || safety::is_protected(&dst, root) {
        let err = PackError::Protected { path: dst.clone() };
        tracing::warn!("{}", err);
        return StepRecord::failed(Step::Copy, &dst, format!("Failed to copy {}: {}", label, err));
    }

    if !src.exists() {
        tracing::debug!("Manifest source missing: {}", src.display());
        return StepRecord::skipped(
            Step::Copy,
            &dst,
            format!("{} not found at {}", label, src.display()),
        );
    }

    let result = if src.is_dir() {
        copy_tree(&src, &dst)
    } else {
        copy_single(&src, &dst)
    };

    match result {
        Ok(stats) => StepRecord::ok(Step::Copy, &dst, format!("Copied {} ({})", label, stats)),
        Err(e) => {
            tracing::warn!("Copy failed for {}: {}", label, e);
            StepRecord::failed(Step::Copy, &dst, format!("Failed to copy {}: {}", label, e))
        }
    }
}

/// Replace `dst` wholesale with a copy of the `src` directory
fn copy_tree(src: &Path, dst: &Path) -> PackResult<CopyStats> {
    if transfer::exists(dst) {
        transfer::remove_path(dst)?;
    }
    transfer::copy_dir_recursive(src, dst)
}

fn copy_single(src: &Path, dst: &Path) -> PackResult<CopyStats> {
    if let Some(parent) = dst.parent() {
        std::fs::create_dir_all(parent).map_err(|e| PackError::io(parent, e))?;
    }
    let bytes = transfer::copy_file(src, dst)?;
    Ok(CopyStats { files: 1, bytes })
}
