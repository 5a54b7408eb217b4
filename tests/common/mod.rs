// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// The fake interpreter: `sh <test file> [args...]` runs each fixture as a shell script.
pub const SHELL: &str = "/bin/sh";

pub fn setup_test_dir() -> TempDir {
    tempdir().expect("Failed to create temporary directory")
}

/// Writes a fixture whose body is a shell script.
pub fn write_fixture(dir: &Path, name: &str, script: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    fs::write(&path, script).expect("Failed to write fixture");
    path
}

/// A script that records how many sibling invocations are alive at once.
///
/// Each process creates a marker while running, counts the markers present and
/// writes the count to `counts_dir`. Markers only exist for live processes, so
/// the largest count is at most the number of concurrently alive invocations.
pub fn concurrency_probe_script(markers_dir: &Path, counts_dir: &Path) -> String {
    format!(
        r#"marker="{markers}/active.$$"
touch "$marker"
n=$(ls "{markers}" | grep -c '^active\.')
echo "$n" > "{counts}/count.$$"
sleep 0.3
rm -f "$marker"
exit 0
"#,
        markers = markers_dir.display(),
        counts = counts_dir.display()
    )
}

/// Reads every count written by [`concurrency_probe_script`].
pub fn read_counts(counts_dir: &Path) -> Vec<usize> {
    fs::read_dir(counts_dir)
        .expect("Failed to read counts directory")
        .map(|entry| {
            let content = fs::read_to_string(entry.unwrap().path()).unwrap();
            content.trim().parse::<usize>().unwrap()
        })
        .collect()
}

/// Whether a process with this pid is still alive.
pub fn process_alive(pid: &str) -> bool {
    std::process::Command::new("kill")
        .arg("-0")
        .arg(pid)
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Writes a `lox.toml` pointing `root_dir` at `root`.
pub fn write_config(dir: &Path, root: &Path, extra: &str) -> PathBuf {
    let path = dir.join("lox.toml");
    let content = format!(
        "[core]\nroot_dir = \"{}\"\n{}",
        root.display(),
        extra
    );
    fs::write(&path, content).expect("Failed to write lox.toml");
    path
}
