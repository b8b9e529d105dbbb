use std::path::Path;

use super::report::{Step, StepRecord};
use crate::common::errors::PackError;

/// Starts a packaged executable
pub trait Launcher {
    fn launch(&self, program: &Path) -> std::io::Result<()>;
}

/// Opens the program with the host's default handler, detached from this process
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, program: &Path) -> std::io::Result<()> {
        open::that_detached(program)
    }
}

/// Launcher that does nothing; used with `--no-launch`
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLauncher;

impl Launcher for NoopLauncher {
    fn launch(&self, _program: &Path) -> std::io::Result<()> {
        Ok(())
    }
}

/// Launch `<app_dir>/<executable>` if it exists. Errors become a record.
pub fn launch_app(
    app_dir: &Path,
    executable: &str,
    enabled: bool,
    launcher: &dyn Launcher,
) -> StepRecord {
    let exe_path = app_dir.join(executable);

    if !enabled {
        return StepRecord::skipped(
            Step::Launch,
            &exe_path,
            format!("Launch disabled for {}", exe_path.display()),
        );
    }

    if !exe_path.is_file() {
        return StepRecord::failed(
            Step::Launch,
            &exe_path,
            format!("Executable not found: {}", exe_path.display()),
        );
    }

    match launcher.launch(&exe_path) {
        Ok(()) => {
            tracing::debug!("Launched {}", exe_path.display());
            StepRecord::ok(
                Step::Launch,
                &exe_path,
                format!("Launching {}...", exe_path.display()),
            )
        }
        Err(source) => {
            let err = PackError::Launch {
                path: exe_path.clone(),
                source,
            };
            tracing::warn!("{}", err);
            StepRecord::failed(Step::Launch, &exe_path, err.to_string())
        }
    }
}
