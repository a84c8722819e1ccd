//! Pure construction of the build and run invocations.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use serde::Serialize;

use super::engine::SelectedEngine;

/// Build file name used when none is configured.
pub const DEFAULT_DOCKERFILE: &str = "Dockerfile";
/// In-container path the working directory is mounted at.
pub const DEFAULT_MOUNT_TARGET: &str = "/workspace";
/// Image reference used when neither `IMAGE_URI` nor the config sets one.
pub const DEFAULT_IMAGE: &str = "pinocchio-slides";

/// Knobs that shape the two invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOptions {
    pub dockerfile: String,
    pub context: String,
    pub mount_target: String,
    pub interactive: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            dockerfile: DEFAULT_DOCKERFILE.to_string(),
            context: ".".to_string(),
            mount_target: DEFAULT_MOUNT_TARGET.to_string(),
            interactive: true,
        }
    }
}

/// One external command: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// The full build-then-run sequence for one launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    pub engine: SelectedEngine,
    pub image: String,
    pub build: Invocation,
    pub run: Invocation,
}

impl LaunchPlan {
    pub fn new(
        engine: SelectedEngine,
        image: &str,
        workdir: &Path,
        options: &PlanOptions,
        command: &[String],
    ) -> Result<Self> {
        let build = build_invocation(&engine, image, options);
        let run = run_invocation(&engine, image, workdir, options, command)?;
        Ok(Self {
            engine,
            image: image.to_string(),
            build,
            run,
        })
    }
}

/// `<engine> build -t <image> [-f <dockerfile>] <context>`
///
/// The build file path is relative to the launch directory, so `-f` is
/// passed whenever the engine would otherwise look in a different place.
pub fn build_invocation(engine: &SelectedEngine, image: &str, options: &PlanOptions) -> Invocation {
    let mut args = vec!["build".to_string(), "-t".to_string(), image.to_string()];
    if options.dockerfile != DEFAULT_DOCKERFILE || options.context != "." {
        args.push("-f".to_string());
        args.push(options.dockerfile.clone());
    }
    args.push(options.context.clone());
    Invocation {
        program: engine.path.clone(),
        args,
    }
}

/// `<engine> run [-it] --rm -v <workdir>:<mount> <image> [command...]`
///
/// Fails when `workdir` is not valid UTF-8: the mount argument must name the
/// host directory exactly.
pub fn run_invocation(
    engine: &SelectedEngine,
    image: &str,
    workdir: &Path,
    options: &PlanOptions,
    command: &[String],
) -> Result<Invocation> {
    let host = workdir.to_str().ok_or_else(|| {
        anyhow!(
            "working directory {} is not valid UTF-8 and cannot be bind-mounted",
            workdir.display()
        )
    })?;
    let mut args = vec!["run".to_string()];
    if options.interactive {
        args.push("-it".to_string());
    }
    args.push("--rm".to_string());
    args.push("-v".to_string());
    args.push(format!("{host}:{}", options.mount_target));
    args.push(image.to_string());
    args.extend(command.iter().cloned());
    Ok(Invocation {
        program: engine.path.clone(),
        args,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::Engine;

    fn podman() -> SelectedEngine {
        SelectedEngine::new(Engine::Podman, "/usr/bin/podman")
    }

    #[test]
    fn build_uses_image_and_context() {
        let inv = build_invocation(&podman(), "deck:latest", &PlanOptions::default());
        assert_eq!(inv.program, Path::new("/usr/bin/podman"));
        assert_eq!(inv.args, vec!["build", "-t", "deck:latest", "."]);
    }

    #[test]
    fn build_passes_custom_dockerfile() {
        let options = PlanOptions {
            dockerfile: "docker/Slides.Dockerfile".to_string(),
            ..PlanOptions::default()
        };
        let inv = build_invocation(&podman(), "deck", &options);
        assert_eq!(
            inv.args,
            vec!["build", "-t", "deck", "-f", "docker/Slides.Dockerfile", "."]
        );
    }

    #[test]
    fn build_names_dockerfile_when_context_moves() {
        let options = PlanOptions {
            context: "programs".to_string(),
            ..PlanOptions::default()
        };
        let inv = build_invocation(&podman(), "deck", &options);
        assert_eq!(
            inv.args,
            vec!["build", "-t", "deck", "-f", "Dockerfile", "programs"]
        );
    }

    #[test]
    fn run_mounts_workdir_and_removes_container() {
        let inv = run_invocation(
            &podman(),
            "deck",
            Path::new("/home/me/deck"),
            &PlanOptions::default(),
            &[],
        )
        .expect("run invocation");
        assert_eq!(
            inv.args,
            vec!["run", "-it", "--rm", "-v", "/home/me/deck:/workspace", "deck"]
        );
    }

    #[test]
    fn run_without_tty_and_with_command() {
        let options = PlanOptions {
            interactive: false,
            ..PlanOptions::default()
        };
        let command = vec!["cargo".to_string(), "build-sbf".to_string()];
        let inv = run_invocation(&podman(), "deck", Path::new("/src"), &options, &command)
            .expect("run invocation");
        assert_eq!(
            inv.args,
            vec!["run", "--rm", "-v", "/src:/workspace", "deck", "cargo", "build-sbf"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn run_rejects_non_utf8_workdir() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let workdir = Path::new(OsStr::from_bytes(b"/home/me/deck\xff"));
        let err = run_invocation(&podman(), "deck", workdir, &PlanOptions::default(), &[])
            .expect_err("should fail");
        assert!(err.to_string().contains("not valid UTF-8"));
    }

    #[test]
    fn plan_uses_same_engine_and_image_for_both_steps() {
        let plan = LaunchPlan::new(
            podman(),
            "deck",
            Path::new("/src"),
            &PlanOptions::default(),
            &[],
        )
        .expect("plan");
        for step in [&plan.build, &plan.run] {
            assert_eq!(step.program, Path::new("/usr/bin/podman"));
            assert!(step.args.iter().any(|arg| arg == "deck"));
        }
        assert_eq!(plan.build.args[0], "build");
        assert_eq!(plan.run.args[0], "run");
    }

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let inv = Invocation {
            program: PathBuf::from("docker"),
            args: vec!["run".to_string(), "-v".to_string(), "/my dir:/workspace".to_string()],
        };
        assert_eq!(inv.to_string(), "docker run -v \"/my dir:/workspace\"");
    }
}
