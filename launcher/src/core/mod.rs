//! Pure, deterministic logic: engine selection and invocation planning.
//!
//! Nothing in here touches the filesystem, the environment, or spawns
//! processes.

pub mod engine;
pub mod plan;
