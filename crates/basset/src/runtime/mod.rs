//! Runtime module — process lifecycle: logging, input, run.

pub mod boot;
pub mod input;
pub mod run;
