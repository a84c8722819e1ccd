//! Container engine selector and runner for the slide deck workspace.
//!
//! Picks `docker` or `podman` (first match on `PATH`), builds the workspace
//! image from its build file, then runs an interactive, auto-removing
//! container with the current directory bind-mounted. The layout follows a
//! strict split:
//!
//! - **[`core`]**: Pure logic (engine priority, invocation planning).
//! - **[`io`]**: Environment, config, filesystem and process side effects.
//!
//! [`launch`] and [`engines`] combine the two to implement CLI commands.

pub mod core;
pub mod engines;
pub mod exit_codes;
pub mod io;
pub mod launch;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
