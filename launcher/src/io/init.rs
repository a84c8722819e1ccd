//! Scaffolding for the build environment definition and config file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use minijinja::{Environment, context};
use tracing::{debug, info};

use crate::io::config::{LauncherConfig, render_config};

const DOCKERFILE_TEMPLATE: &str = include_str!("templates/Dockerfile.j2");

/// Options for `init_workspace`.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// If true, overwrite existing files.
    pub force: bool,
}

/// What `init_workspace` did with each file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Render the build file for `cfg`.
///
/// The container's working directory is the mount target, so programs built
/// inside it land in the bind-mounted host directory.
pub fn render_dockerfile(cfg: &LauncherConfig) -> Result<String> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.add_template("dockerfile", DOCKERFILE_TEMPLATE)
        .context("load dockerfile template")?;
    let template = env.get_template("dockerfile")?;
    let rendered = template
        .render(context! {
            base_image => cfg.build.base_image,
            rust_toolchain => cfg.build.rust_toolchain,
            solana_release => cfg.build.solana_release,
            workdir => cfg.mount_target,
        })
        .context("render dockerfile template")?;
    Ok(rendered)
}

/// Write the build file into `root` and the config to `config_path`.
///
/// Existing files are skipped unless `options.force` is set. The build file
/// lands at `cfg.dockerfile`, relative to `root`.
pub fn init_workspace(
    root: &Path,
    config_path: &Path,
    cfg: &LauncherConfig,
    options: &InitOptions,
) -> Result<InitReport> {
    cfg.validate()?;
    let mut report = InitReport {
        written: Vec::new(),
        skipped: Vec::new(),
    };

    let dockerfile_path = root.join(&cfg.dockerfile);
    let dockerfile = render_dockerfile(cfg)?;
    write_if_missing_or_force(&dockerfile_path, &dockerfile, options.force, &mut report)?;

    let config = render_config(cfg)?;
    write_if_missing_or_force(config_path, &config, options.force, &mut report)?;

    info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        "workspace initialized"
    );
    Ok(report)
}

fn write_if_missing_or_force(
    path: &Path,
    contents: &str,
    force: bool,
    report: &mut InitReport,
) -> Result<()> {
    if !force && path.exists() {
        debug!(path = %path.display(), "exists, skipping");
        report.skipped.push(path.to_path_buf());
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))?;
    report.written.push(path.to_path_buf());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::config::{CONFIG_FILE, load_config};

    fn init(root: &Path, cfg: &LauncherConfig, force: bool) -> InitReport {
        init_workspace(root, &root.join(CONFIG_FILE), cfg, &InitOptions { force })
            .expect("init")
    }

    #[test]
    fn dockerfile_uses_build_settings() {
        let mut cfg = LauncherConfig::default();
        cfg.build.base_image = "debian:12".to_string();
        cfg.build.rust_toolchain = "1.84.0".to_string();
        cfg.mount_target = "/deck".to_string();

        let rendered = render_dockerfile(&cfg).expect("render");
        assert!(rendered.starts_with("FROM debian:12\n"));
        assert!(rendered.contains("--default-toolchain 1.84.0"));
        assert!(rendered.contains("release.anza.xyz/stable/install"));
        assert!(rendered.contains("ENV PATH=\"/root/.cargo/bin:"));
        assert!(rendered.contains("${PATH}"));
        assert!(rendered.trim_end().ends_with("WORKDIR /deck"));
    }

    #[test]
    fn init_writes_dockerfile_and_config() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = LauncherConfig::default();

        let report = init(temp.path(), &cfg, false);
        assert_eq!(report.written.len(), 2);
        assert!(report.skipped.is_empty());

        let dockerfile = fs::read_to_string(temp.path().join("Dockerfile")).expect("read");
        assert!(dockerfile.contains("WORKDIR /workspace"));
        let loaded = load_config(&temp.path().join(CONFIG_FILE)).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn init_keeps_existing_files_without_force() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dockerfile = temp.path().join("Dockerfile");
        fs::write(&dockerfile, "FROM scratch\n").expect("write");

        let report = init(temp.path(), &LauncherConfig::default(), false);
        assert_eq!(report.skipped, vec![dockerfile.clone()]);
        assert_eq!(
            fs::read_to_string(&dockerfile).expect("read"),
            "FROM scratch\n"
        );
    }

    #[test]
    fn init_force_overwrites() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dockerfile = temp.path().join("Dockerfile");
        fs::write(&dockerfile, "FROM scratch\n").expect("write");

        let report = init(temp.path(), &LauncherConfig::default(), true);
        assert!(report.skipped.is_empty());
        assert!(
            fs::read_to_string(&dockerfile)
                .expect("read")
                .starts_with("FROM ubuntu:24.04")
        );
    }

    #[test]
    fn init_creates_nested_dockerfile_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = LauncherConfig {
            dockerfile: "docker/Dockerfile".to_string(),
            ..LauncherConfig::default()
        };
        init(temp.path(), &cfg, false);
        assert!(temp.path().join("docker/Dockerfile").is_file());
    }

    #[test]
    fn init_writes_config_to_given_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config_path = temp.path().join("conf/alt.toml");

        let report = init_workspace(
            temp.path(),
            &config_path,
            &LauncherConfig::default(),
            &InitOptions { force: false },
        )
        .expect("init");
        assert!(report.written.contains(&config_path));
        assert!(!temp.path().join(CONFIG_FILE).exists());
        assert_eq!(
            load_config(&config_path).expect("load"),
            LauncherConfig::default()
        );
    }
}
