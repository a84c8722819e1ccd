//! Candidate engine report for `launcher engines`.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::engine::{CANDIDATES, Engine};
use crate::io::env::LaunchEnv;

/// Lookup result for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineStatus {
    pub engine: Engine,
    pub path: Option<PathBuf>,
    /// True for the candidate `launcher run` would use.
    pub selected: bool,
}

/// Resolve every candidate, in priority order.
pub fn engine_statuses(env: &LaunchEnv) -> Vec<EngineStatus> {
    let mut selected_seen = false;
    CANDIDATES
        .iter()
        .map(|engine| {
            let path = env.locate(engine.binary());
            let selected = path.is_some() && !selected_seen;
            selected_seen |= selected;
            EngineStatus {
                engine: *engine,
                path,
                selected,
            }
        })
        .collect()
}

/// One line per candidate: name, path or `not found`, and a selection marker.
pub fn format_statuses(statuses: &[EngineStatus]) -> String {
    let mut out = String::new();
    for status in statuses {
        let marker = if status.selected { "*" } else { " " };
        let location = match &status.path {
            Some(path) => path.display().to_string(),
            None => "not found".to_string(),
        };
        out.push_str(&format!("{marker} {:<6} {location}\n", status.engine.binary()));
    }
    out
}
