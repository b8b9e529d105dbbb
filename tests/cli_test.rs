use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn postbuild() -> Command {
    let mut cmd = Command::cargo_bin("postbuild").unwrap();
    cmd.env_remove("POSTBUILD_FROZEN");
    cmd
}

/// Minimal project whose build finished: dist/App with an executable
fn built_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let dist = tmp.path().join("Build_Tools/dist/Stopwatch");
    std::fs::create_dir_all(&dist).unwrap();
    std::fs::write(dist.join("Stopwatch.exe"), "MZ").unwrap();
    std::fs::write(tmp.path().join("logo.ico"), "icon").unwrap();
    tmp
}

// ─── Help & version ──────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    postbuild()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("version"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_flag() {
    postbuild()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("postbuild"));
}

#[test]
fn test_no_subcommand_shows_help() {
    postbuild()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// ─── Run command ─────────────────────────────────────────────────────────────

#[test]
fn test_run_without_build_reports_one_error() {
    let tmp = TempDir::new().unwrap();
    postbuild()
        .args(["run", "--no-launch", "--no-color", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("POST-BUILD CLEANUP: Stopwatch"))
        .stdout(predicate::str::contains("[ERROR]").count(1))
        .stdout(predicate::str::contains("Build might have failed"))
        .stdout(predicate::str::contains("DONE!").not());
}

#[test]
fn test_run_strict_fails_when_aborted() {
    let tmp = TempDir::new().unwrap();
    postbuild()
        .args(["run", "--no-launch", "--strict", "--root"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("aborted"));
}

#[test]
fn test_run_packages_project() {
    let tmp = built_project();
    postbuild()
        .args(["run", "--no-launch", "--no-color", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[OK] Moved to:"))
        .stdout(predicate::str::contains("[CLEANUP]"))
        .stdout(predicate::str::contains("[OK] Copied logo.ico"))
        .stdout(predicate::str::contains("[SKIP] settings.json not found at"))
        .stdout(predicate::str::contains("DONE! App location:"));

    assert!(tmp.path().join("Stopwatch/Stopwatch.exe").exists());
    assert!(tmp.path().join("Stopwatch/logo.ico").exists());
    assert!(!tmp.path().join("Build_Tools/dist").exists());
}

#[test]
fn test_run_prints_done_before_launch_line() {
    let tmp = built_project();
    let out = postbuild()
        .args(["run", "--no-launch", "--no-color", "--root"])
        .arg(tmp.path())
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&out.stdout);

    let done = stdout.find("DONE! App location:").unwrap();
    let launch = stdout.find("[SKIP] Launch disabled").unwrap();
    let counts = stdout.find(" ok  •  ").unwrap();
    assert!(done < launch, "{}", stdout);
    assert!(launch < counts, "{}", stdout);
}

#[test]
fn test_run_json_output() {
    let tmp = built_project();
    postbuild()
        .args(["run", "--no-launch", "--format", "json", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"completed\""))
        .stdout(predicate::str::contains("\"records\""));
}

#[test]
fn test_run_uses_config_file() {
    let tmp = TempDir::new().unwrap();
    let dist = tmp.path().join("tools/out/Timer");
    std::fs::create_dir_all(&dist).unwrap();
    std::fs::write(dist.join("Timer.exe"), "MZ").unwrap();
    std::fs::write(
        tmp.path().join("postbuild.toml"),
        "app_name = \"Timer\"\nworkspace = \"tools\"\ndist_dir = \"out\"\nlaunch = false\nfiles = []\n",
    )
    .unwrap();

    postbuild()
        .args(["run", "--quiet", "--format", "quiet", "--root"])
        .arg(tmp.path())
        .assert()
        .success();

    assert!(tmp.path().join("Timer/Timer.exe").exists());
}

// ─── Version command ─────────────────────────────────────────────────────────

#[test]
fn test_version_reads_file() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("VERSION"), "2.3.4\n").unwrap();
    postbuild()
        .args(["version", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout("2.3.4\n");
}

#[test]
fn test_version_missing_file_is_default() {
    let tmp = TempDir::new().unwrap();
    postbuild()
        .args(["version", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout("0.0.0\n");
}

#[test]
fn test_version_frozen_ignores_file() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("VERSION"), "2.3.4\n").unwrap();
    postbuild()
        .args(["version", "--frozen", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout("1.0.1\n");
}

#[test]
fn test_version_frozen_from_env() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("VERSION"), "2.3.4\n").unwrap();
    postbuild()
        .env("POSTBUILD_FROZEN", "true")
        .args(["version", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout("1.0.1\n");
}

// ─── Config command ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_defaults() {
    let tmp = TempDir::new().unwrap();
    postbuild()
        .args(["config", "show", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("app_name = \"Stopwatch\""))
        .stdout(predicate::str::contains("get_coords.exe"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let tmp = TempDir::new().unwrap();
    postbuild()
        .args(["config", "init", "--root"])
        .arg(tmp.path())
        .assert()
        .success();
    assert!(tmp.path().join("postbuild.toml").exists());

    postbuild()
        .args(["config", "init", "--root"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    postbuild()
        .args(["config", "init", "--force", "--root"])
        .arg(tmp.path())
        .assert()
        .success();
}
