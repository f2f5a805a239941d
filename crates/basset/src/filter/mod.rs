//! Filter — policy and heuristic classification of raw access-log lines.
//!
//! All filters borrow from the input batch and return matching lines in
//! their original order.

pub mod engine;
pub mod paths;

pub use engine::{filter_by_method, filter_by_status, FilterMode, Policy, PolicyField, PolicyFilter};
pub use paths::{classify_path, find_suspicious_paths, is_suspicious_path, PathVerdict};
