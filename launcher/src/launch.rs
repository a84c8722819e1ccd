//! Build-then-run orchestration for `launcher run`.

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

use crate::core::plan::LaunchPlan;
use crate::io::config::LauncherConfig;
use crate::io::env::LaunchEnv;
use crate::io::process::CommandRunner;

/// Structured launch outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// Neither candidate engine is on `PATH`. Nothing was invoked.
    NoEngine,
    /// Both invocations ran.
    Finished(LaunchReport),
}

/// Exit codes of the two invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    pub plan: LaunchPlan,
    pub build_exit: i32,
    pub run_exit: i32,
}

impl LaunchOutcome {
    /// Process exit code for this outcome. A finished launch exits with the
    /// run step's code.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchOutcome::NoEngine => crate::exit_codes::NO_ENGINE,
            LaunchOutcome::Finished(report) => report.run_exit,
        }
    }
}

/// Resolve engine and image into a plan without running anything.
///
/// `Ok(None)` means no candidate engine is on `PATH`.
pub fn plan_launch(
    env: &LaunchEnv,
    cfg: &LauncherConfig,
    command: &[String],
) -> Result<Option<LaunchPlan>> {
    let Some(engine) = env.detect_engine() else {
        return Ok(None);
    };
    let image = cfg.resolve_image(env.image_override.as_deref());
    let plan = LaunchPlan::new(
        engine,
        &image,
        &env.workdir,
        &cfg.plan_options(),
        command,
    )
    .context("plan container launch")?;
    Ok(Some(plan))
}

/// Select an engine, build the image, then run the container.
///
/// A failing build is reported but does not stop the run step; the outcome
/// carries the run step's exit code.
#[instrument(skip_all)]
pub fn launch<R: CommandRunner>(
    env: &LaunchEnv,
    cfg: &LauncherConfig,
    command: &[String],
    runner: &R,
) -> Result<LaunchOutcome> {
    // Reported to the user by the CLI.
    let Some(plan) = plan_launch(env, cfg, command)? else {
        debug!("no container engine found on PATH");
        return Ok(LaunchOutcome::NoEngine);
    };
    info!(
        engine = %plan.engine.engine,
        path = %plan.engine.path.display(),
        image = %plan.image,
        "engine selected"
    );

    info!(command = %plan.build, "building image");
    let build_exit = runner
        .run(&plan.build, &env.workdir)
        .context("run image build")?;
    if build_exit != 0 {
        warn!(exit_code = build_exit, "image build failed, running anyway");
    }

    info!(command = %plan.run, "running container");
    let run_exit = runner
        .run(&plan.run, &env.workdir)
        .context("run container")?;
    info!(exit_code = run_exit, "container exited");

    Ok(LaunchOutcome::Finished(LaunchReport {
        plan,
        build_exit,
        run_exit,
    }))
}
