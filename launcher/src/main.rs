//! `launcher`: build the workspace image and open a container in it.
//!
//! With no subcommand it behaves like `launcher run`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use launcher::core::engine::no_engine_message;
use launcher::engines::{engine_statuses, format_statuses};
use launcher::exit_codes;
use launcher::io::config::{CONFIG_FILE, LauncherConfig, load_config};
use launcher::io::env::LaunchEnv;
use launcher::io::init::{InitOptions, init_workspace};
use launcher::io::process::SystemRunner;
use launcher::launch::{LaunchOutcome, launch, plan_launch};
use launcher::logging;

#[derive(Parser)]
#[command(
    name = "launcher",
    version,
    about = "Build the workspace image with docker or podman and run it"
)]
struct Cli {
    /// Config file, relative to the current directory.
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Build the image, then run an interactive container (default).
    Run {
        /// Command to run in the container instead of the image default.
        #[arg(last = true)]
        command: Vec<String>,
    },
    /// Print the build and run invocations without executing them.
    Plan {
        /// Emit the plan as JSON.
        #[arg(long)]
        json: bool,
        #[arg(last = true)]
        command: Vec<String>,
    },
    /// Show which container engines are on PATH and which one is used.
    Engines,
    /// Write the Dockerfile and the config file (see --config) if missing.
    Init {
        /// Overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let env = LaunchEnv::from_process()?;
    let config_path = env.workdir.join(&cli.config);
    match cli.command.unwrap_or(Command::Run {
        command: Vec::new(),
    }) {
        Command::Run { command } => cmd_run(&env, &config_path, &command),
        Command::Plan { json, command } => cmd_plan(&env, &config_path, json, &command),
        Command::Engines => cmd_engines(&env),
        Command::Init { force } => cmd_init(&env, &config_path, force),
    }
}

fn cmd_run(env: &LaunchEnv, config_path: &Path, command: &[String]) -> Result<i32> {
    let cfg = load_config(config_path)?;
    let outcome = launch(env, &cfg, command, &SystemRunner)?;
    if outcome == LaunchOutcome::NoEngine {
        eprintln!("{}", no_engine_message());
    }
    Ok(outcome.exit_code())
}

fn cmd_plan(env: &LaunchEnv, config_path: &Path, json: bool, command: &[String]) -> Result<i32> {
    let cfg = load_config(config_path)?;
    let Some(plan) = plan_launch(env, &cfg, command)? else {
        eprintln!("{}", no_engine_message());
        return Ok(exit_codes::NO_ENGINE);
    };
    if json {
        let payload = serde_json::to_string_pretty(&plan).context("serialize plan json")?;
        println!("{payload}");
    } else {
        println!("engine: {} ({})", plan.engine.engine, plan.engine.path.display());
        println!("image: {}", plan.image);
        println!("build: {}", plan.build);
        println!("run: {}", plan.run);
    }
    Ok(exit_codes::OK)
}

fn cmd_engines(env: &LaunchEnv) -> Result<i32> {
    let statuses = engine_statuses(env);
    print!("{}", format_statuses(&statuses));
    if statuses.iter().any(|status| status.selected) {
        Ok(exit_codes::OK)
    } else {
        eprintln!("{}", no_engine_message());
        Ok(exit_codes::NO_ENGINE)
    }
}

fn cmd_init(env: &LaunchEnv, config_path: &Path, force: bool) -> Result<i32> {
    // A fresh workspace has no config yet; scaffold from defaults.
    let cfg = if config_path.exists() {
        load_config(config_path)?
    } else {
        LauncherConfig::default()
    };
    let report = init_workspace(&env.workdir, config_path, &cfg, &InitOptions { force })?;
    for path in &report.written {
        println!("wrote {}", path.display());
    }
    for path in &report.skipped {
        println!("kept {} (use --force to overwrite)", path.display());
    }
    Ok(exit_codes::OK)
}
