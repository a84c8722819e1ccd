//! Launcher configuration stored in `launcher.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::plan::{DEFAULT_DOCKERFILE, DEFAULT_IMAGE, DEFAULT_MOUNT_TARGET, PlanOptions};

/// Config file name looked up in the working directory.
pub const CONFIG_FILE: &str = "launcher.toml";

/// Launcher configuration (TOML).
///
/// Every field is optional in the file; missing fields fall back to the
/// defaults below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LauncherConfig {
    /// Image reference used when `IMAGE_URI` is unset.
    pub image: String,

    /// Absolute in-container path the working directory is mounted at.
    pub mount_target: String,

    /// Build file passed to `<engine> build`.
    pub dockerfile: String,

    /// Build context directory.
    pub context: String,

    /// Allocate a TTY and keep stdin open (`-it`).
    pub interactive: bool,

    pub build: BuildConfig,
}

/// Inputs for rendering the build environment definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BuildConfig {
    pub base_image: String,
    pub rust_toolchain: String,
    pub solana_release: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            base_image: "ubuntu:24.04".to_string(),
            rust_toolchain: "stable".to_string(),
            solana_release: "stable".to_string(),
        }
    }
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            image: DEFAULT_IMAGE.to_string(),
            mount_target: DEFAULT_MOUNT_TARGET.to_string(),
            dockerfile: DEFAULT_DOCKERFILE.to_string(),
            context: ".".to_string(),
            interactive: true,
            build: BuildConfig::default(),
        }
    }
}

impl LauncherConfig {
    pub fn validate(&self) -> Result<()> {
        if self.image.trim().is_empty() {
            return Err(anyhow!("image must be non-empty"));
        }
        if !self.mount_target.starts_with('/') {
            return Err(anyhow!(
                "mount_target must be an absolute path, got {:?}",
                self.mount_target
            ));
        }
        if self.dockerfile.trim().is_empty() {
            return Err(anyhow!("dockerfile must be non-empty"));
        }
        if self.context.trim().is_empty() {
            return Err(anyhow!("context must be non-empty"));
        }
        if self.build.base_image.trim().is_empty() {
            return Err(anyhow!("build.base_image must be non-empty"));
        }
        if self.build.rust_toolchain.trim().is_empty() {
            return Err(anyhow!("build.rust_toolchain must be non-empty"));
        }
        if self.build.solana_release.trim().is_empty() {
            return Err(anyhow!("build.solana_release must be non-empty"));
        }
        Ok(())
    }

    /// Resolve the image reference: `IMAGE_URI` verbatim when set and
    /// non-empty, else the configured image.
    pub fn resolve_image(&self, image_override: Option<&str>) -> String {
        match image_override {
            Some(image) if !image.is_empty() => image.to_string(),
            _ => self.image.clone(),
        }
    }

    pub fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            dockerfile: self.dockerfile.clone(),
            context: self.context.clone(),
            mount_target: self.mount_target.clone(),
            interactive: self.interactive,
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `LauncherConfig::default()`.
pub fn load_config(path: &Path) -> Result<LauncherConfig> {
    if !path.exists() {
        return Ok(LauncherConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: LauncherConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Serialize config to pretty TOML with a trailing newline.
pub fn render_config(cfg: &LauncherConfig) -> Result<String> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    if !buf.ends_with('\n') {
        buf.push('\n');
    }
    Ok(buf)
}
