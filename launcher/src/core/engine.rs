//! Container engine candidates and first-match selection.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Supported container engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Docker,
    Podman,
}

/// Candidates in priority order. The first one found on `PATH` wins.
pub const CANDIDATES: [Engine; 2] = [Engine::Docker, Engine::Podman];

impl Engine {
    /// Executable name looked up on `PATH`.
    pub const fn binary(&self) -> &'static str {
        match self {
            Engine::Docker => "docker",
            Engine::Podman => "podman",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

/// An engine together with the executable that will be invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedEngine {
    pub engine: Engine,
    pub path: PathBuf,
}

impl SelectedEngine {
    pub fn new(engine: Engine, path: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            path: path.into(),
        }
    }
}

/// Pick the first candidate `locate` can resolve.
///
/// `locate` maps an executable name to its path, or `None` when absent.
pub fn select_engine<F>(mut locate: F) -> Option<SelectedEngine>
where
    F: FnMut(&str) -> Option<PathBuf>,
{
    CANDIDATES
        .iter()
        .find_map(|engine| locate(engine.binary()).map(|path| SelectedEngine::new(*engine, path)))
}

/// Human-readable message for the case where no candidate was found.
pub fn no_engine_message() -> String {
    let names: Vec<&str> = CANDIDATES.iter().map(Engine::binary).collect();
    format!(
        "no supported container engine found: install {} (searched PATH for: {})",
        names.join(" or "),
        names.join(", ")
    )
}
