use std::path::{Component, Path};

/// Paths that must NEVER be deleted under any circumstances.
/// Catches a misconfigured purge list or an empty app name.
const PROTECTED_PATHS: &[&str] = &["/", "/usr", "/bin", "/etc", "/var", "/opt", "/home", "/Users"];

/// Check if a path is protected and should never be deleted.
///
/// `project_root` is protected too: purge entries such as `.` or `..`
/// would otherwise wipe the whole project.
pub fn is_protected(path: &Path, project_root: &Path) -> bool {
    let normalized = normalize(path);

    if normalized.parent().is_none() {
        // Filesystem or drive root
        return true;
    }

    let path_str = normalized.to_string_lossy();
    if PROTECTED_PATHS.iter().any(|p| path_str == *p) {
        return true;
    }

    if let Some(home) = dirs::home_dir() {
        if normalized == normalize(&home) {
            return true;
        }
    }

    let root = normalize(project_root);
    // The project root and anything above it
    root.starts_with(&normalized)
}

/// True if `path` sits strictly below `base` once `.` and `..` are resolved
pub fn is_strictly_inside(path: &Path, base: &Path) -> bool {
    let path = normalize(path);
    let base = normalize(base);
    path != base && path.starts_with(&base)
}

/// Same location after lexical normalization
pub fn same_path(a: &Path, b: &Path) -> bool {
    normalize(a) == normalize(b)
}

/// A non-empty relative path made only of plain names: no root, no drive,
/// no `.` or `..`. Config entries naming something inside a folder must be this.
pub fn is_plain_relative(path: &Path) -> bool {
    let mut has_name = false;
    for component in path.components() {
        match component {
            Component::Normal(_) => has_name = true,
            _ => return false,
        }
    }
    has_name
}

/// Lexically resolve `.` and `..` so `root/dist/..` compares equal to `root`
fn normalize(path: &Path) -> std::path::PathBuf {
    let absolute = if path.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    } else {
        path.to_path_buf()
    };

    let mut out = std::path::PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_protected() {
        assert!(is_protected(Path::new("/"), Path::new("/proj")));
    }

    #[test]
    fn test_system_dirs_are_protected() {
        assert!(is_protected(Path::new("/usr"), Path::new("/proj")));
        assert!(is_protected(Path::new("/etc"), Path::new("/proj")));
    }

    #[test]
    fn test_home_is_protected() {
        if let Some(home) = dirs::home_dir() {
            assert!(is_protected(&home, Path::new("/proj")));
        }
    }

    #[test]
    fn test_project_root_is_protected() {
        let root = Path::new("/work/proj");
        assert!(is_protected(root, root));
        assert!(is_protected(&root.join("."), root));
        assert!(is_protected(&root.join("dist/.."), root));
        assert!(is_protected(Path::new("/work"), root));
    }

    #[test]
    fn test_relative_parent_of_root_is_protected() {
        assert!(is_protected(Path::new("./.."), Path::new(".")));
        assert!(is_protected(Path::new("."), Path::new(".")));
        assert!(!is_protected(Path::new("./build"), Path::new(".")));
    }

    #[test]
    fn test_strictly_inside() {
        let app = Path::new("/work/proj/App");
        assert!(is_strictly_inside(&app.join("logo.ico"), app));
        assert!(is_strictly_inside(&app.join("a/../b"), app));
        assert!(!is_strictly_inside(app, app));
        assert!(!is_strictly_inside(&app.join("."), app));
        assert!(!is_strictly_inside(&app.join(".."), app));
        assert!(!is_strictly_inside(&app.join("../App2/x"), app));
    }

    #[test]
    fn test_plain_relative() {
        assert!(is_plain_relative(Path::new("logo.ico")));
        assert!(is_plain_relative(Path::new("sounds/beep.mp3")));
        assert!(!is_plain_relative(Path::new("")));
        assert!(!is_plain_relative(Path::new(".")));
        assert!(!is_plain_relative(Path::new("..")));
        assert!(!is_plain_relative(Path::new("a/../b")));
        assert!(!is_plain_relative(Path::new("/etc")));
    }

    #[test]
    fn test_build_dirs_are_not_protected() {
        let root = Path::new("/work/proj");
        assert!(!is_protected(&root.join("build"), root));
        assert!(!is_protected(&root.join("Build_Tools/dist"), root));
        assert!(!is_protected(&root.join("Stopwatch/__pycache__"), root));
    }
}
