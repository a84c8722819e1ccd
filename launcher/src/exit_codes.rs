//! Stable exit codes for launcher CLI commands.
//!
//! `launcher run` exits with the container's own status on success, so
//! these only cover outcomes the launcher decides itself.

/// Command succeeded.
pub const OK: i32 = 0;
/// Neither `docker` nor `podman` was found on `PATH`.
pub const NO_ENGINE: i32 = 1;
/// Invalid config, unwritable files, spawn failures or other errors.
pub const INVALID: i32 = 1;
/// Offset added to a signal number when the child was killed by a signal.
pub const SIGNAL_BASE: i32 = 128;
