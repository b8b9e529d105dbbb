use std::path::Path;

use super::report::{Step, StepRecord};
use super::transfer;
use crate::common::config::Layout;
use crate::common::errors::{PackError, PackResult};
use crate::common::safety;

/// Move the fresh build output into its final folder.
///
/// Any existing final folder is removed first so the result is never a merge
/// of old and new files. Every error here is fatal to the run: the caller
/// must stop when this returns `Err`.
pub fn relocate_build(
    layout: &Layout,
    app_name: &str,
    mut emit: impl FnMut(StepRecord),
) -> PackResult<()> {
    let source = &layout.dist_app_dir;
    let dest = &layout.final_app_dir;

    if !source.is_dir() {
        return Err(PackError::MissingBuildOutput {
            path: display_relative(source, &layout.workspace).to_path_buf(),
        });
    }

    if transfer::exists(dest) {
        if safety::is_protected(dest, &layout.root) {
            return Err(PackError::Protected { path: dest.clone() });
        }
        transfer::remove_path(dest)?;
        tracing::debug!("Removed previous app folder {}", dest.display());
        emit(StepRecord::ok(
            Step::Relocate,
            dest,
            format!("Removed old {}/", app_name),
        ));
    }

    transfer::move_dir(source, dest)?;
    tracing::debug!("Moved {} -> {}", source.display(), dest.display());
    emit(StepRecord::ok(
        Step::Relocate,
        dest,
        format!("Moved to: {}", dest.display()),
    ));

    Ok(())
}

/// `dist/<App>` reads better than the absolute path in the fatal message
fn display_relative<'a>(path: &'a Path, base: &Path) -> &'a Path {
    path.strip_prefix(base).unwrap_or(path)
}
