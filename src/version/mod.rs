pub mod resolver;

pub use resolver::{
    RunMode, VersionResolver, DEFAULT_VERSION, FROZEN_ENV, FROZEN_VERSION, VERSION_FILE_NAME,
};

use std::sync::OnceLock;

static CURRENT: OnceLock<String> = OnceLock::new();

/// Application version for this process, resolved once.
///
/// Source runs read `VERSION` next to the running executable.
pub fn current() -> &'static str {
    CURRENT.get_or_init(|| {
        let dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
            .unwrap_or_default();
        VersionResolver::in_dir(&dir).resolve(RunMode::detect())
    })
}
