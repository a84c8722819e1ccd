//! Process environment captured once at startup.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use crate::core::engine::{SelectedEngine, select_engine};
use crate::io::lookup::find_executable;

/// Environment variable that overrides the image reference.
pub const IMAGE_URI_VAR: &str = "IMAGE_URI";

/// Everything the launcher reads from its environment.
#[derive(Debug, Clone, Default)]
pub struct LaunchEnv {
    /// Raw `PATH` value used for engine discovery.
    pub search_path: Option<OsString>,
    /// Value of `IMAGE_URI`, if set.
    pub image_override: Option<String>,
    /// Directory bind-mounted into the container.
    pub workdir: PathBuf,
}

impl LaunchEnv {
    pub fn from_process() -> Result<Self> {
        let workdir = env::current_dir().context("resolve current directory")?;
        Ok(Self {
            search_path: env::var_os("PATH"),
            image_override: image_override(env::var_os(IMAGE_URI_VAR))?,
            workdir,
        })
    }

    /// Resolve an executable name against this environment's `PATH`.
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        find_executable(name, self.search_path.as_deref())
    }

    /// First available engine, in candidate order.
    pub fn detect_engine(&self) -> Option<SelectedEngine> {
        select_engine(|name| self.locate(name))
    }
}

/// Decode a raw `IMAGE_URI` value.
///
/// A value that is not valid UTF-8 is an error: it must never fall back to
/// the configured image.
pub fn image_override(raw: Option<OsString>) -> Result<Option<String>> {
    raw.map(|value| {
        value
            .into_string()
            .map_err(|value| anyhow!("{IMAGE_URI_VAR} is not valid UTF-8: {value:?}"))
    })
    .transpose()
}
