//! Executable discovery on a `PATH`-style search list.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::trace;

/// Find `name` in the directories of `search_path`, in order.
///
/// Returns the first candidate that is a regular file and, on Unix, has an
/// execute bit set. `None` or an empty search path finds nothing.
pub fn find_executable(name: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    let search_path = search_path.filter(|value| !value.is_empty())?;
    for dir in env::split_paths(search_path) {
        if dir.as_os_str().is_empty() {
            continue;
        }
        for candidate in candidates(&dir, name) {
            if is_executable(&candidate) {
                trace!(name, path = %candidate.display(), "found executable");
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(windows)]
fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    vec![dir.join(format!("{name}.exe")), dir.join(name)]
}

#[cfg(not(windows))]
fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    vec![dir.join(name)]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    match path.metadata() {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn write_file(path: &Path, mode: u32) {
        fs::write(path, "#!/bin/sh\n").expect("write");
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).expect("chmod");
    }

    fn join(dirs: &[&Path]) -> OsString {
        env::join_paths(dirs).expect("join paths")
    }

    #[test]
    fn missing_path_finds_nothing() {
        assert_eq!(find_executable("docker", None), None);
        assert_eq!(find_executable("docker", Some(OsStr::new(""))), None);
    }

    #[test]
    fn finds_executable_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let docker = temp.path().join("docker");
        write_file(&docker, 0o755);

        let path = join(&[temp.path()]);
        assert_eq!(find_executable("docker", Some(path.as_os_str())), Some(docker));
        assert_eq!(find_executable("podman", Some(path.as_os_str())), None);
    }

    #[test]
    fn skips_non_executable_files_and_directories() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_file(&temp.path().join("docker"), 0o644);
        fs::create_dir(temp.path().join("podman")).expect("mkdir");

        let path = join(&[temp.path()]);
        assert_eq!(find_executable("docker", Some(path.as_os_str())), None);
        assert_eq!(find_executable("podman", Some(path.as_os_str())), None);
    }

    #[test]
    fn earlier_path_entries_win() {
        let first = tempfile::tempdir().expect("tempdir");
        let second = tempfile::tempdir().expect("tempdir");
        write_file(&first.path().join("podman"), 0o755);
        write_file(&second.path().join("podman"), 0o755);

        let path = join(&[first.path(), second.path()]);
        assert_eq!(
            find_executable("podman", Some(path.as_os_str())),
            Some(first.path().join("podman"))
        );
    }
}
