//! Test-only helpers: a recording command runner and fake engine binaries.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;

use anyhow::{Result, anyhow};

use crate::core::plan::Invocation;
use crate::io::process::CommandRunner;

/// Runner that records invocations and returns scripted exit codes in order.
pub struct RecordingRunner {
    codes: RefCell<VecDeque<i32>>,
    calls: RefCell<Vec<Invocation>>,
}

impl RecordingRunner {
    pub fn new(codes: Vec<i32>) -> Self {
        Self {
            codes: RefCell::new(codes.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Invocations seen so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation, _workdir: &Path) -> Result<i32> {
        self.calls.borrow_mut().push(invocation.clone());
        self.codes
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("unexpected invocation: {invocation}"))
    }
}

#[cfg(unix)]
pub use fake::FakeEngines;

#[cfg(unix)]
mod fake {
    use std::ffi::OsString;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result};
    use tempfile::TempDir;

    /// A temp directory holding fake `docker`/`podman` scripts, a call log,
    /// and a working directory to launch from.
    ///
    /// Each script appends `<name> <args...>` to the log, then exits with the
    /// configured code for `build` or `run`.
    pub struct FakeEngines {
        _temp: TempDir,
        bin_dir: PathBuf,
        workdir: PathBuf,
        log_path: PathBuf,
    }

    impl FakeEngines {
        /// Install fakes for `names` that succeed on every call.
        pub fn new(names: &[&str]) -> Result<Self> {
            Self::with_exit_codes(names, 0, 0)
        }

        pub fn with_exit_codes(names: &[&str], build_exit: i32, run_exit: i32) -> Result<Self> {
            let temp = tempfile::tempdir().context("create tempdir")?;
            let bin_dir = temp.path().join("bin");
            let workdir = temp.path().join("work");
            let log_path = temp.path().join("calls.log");
            fs::create_dir_all(&bin_dir).context("create bin dir")?;
            fs::create_dir_all(&workdir).context("create work dir")?;
            let engines = Self {
                _temp: temp,
                bin_dir,
                workdir,
                log_path,
            };
            for name in names {
                engines.install(name, build_exit, run_exit)?;
            }
            Ok(engines)
        }

        fn install(&self, name: &str, build_exit: i32, run_exit: i32) -> Result<()> {
            let script = format!(
                "#!/bin/sh\n\
                 echo \"{name} $*\" >> '{log}'\n\
                 case \"$1\" in\n\
                 \x20 build) exit {build_exit} ;;\n\
                 \x20 run) exit {run_exit} ;;\n\
                 esac\n\
                 exit 0\n",
                log = self.log_path.display(),
            );
            let path = self.bin_dir.join(name);
            fs::write(&path, script).with_context(|| format!("write {}", path.display()))?;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                .with_context(|| format!("chmod {}", path.display()))?;
            Ok(())
        }

        pub fn bin_dir(&self) -> &Path {
            &self.bin_dir
        }

        pub fn workdir(&self) -> &Path {
            &self.workdir
        }

        /// `PATH` value containing only the fake engines.
        pub fn search_path(&self) -> OsString {
            self.bin_dir.clone().into_os_string()
        }

        /// Lines appended by the fake engines, in call order.
        pub fn calls(&self) -> Vec<String> {
            fs::read_to_string(&self.log_path)
                .map(|log| log.lines().map(str::to_string).collect())
                .unwrap_or_default()
        }
    }
}
