//! I/O helpers for launcher commands.

pub mod config;
pub mod env;
pub mod init;
pub mod lookup;
pub mod process;
