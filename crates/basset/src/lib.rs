// Module structure for the Basset access-log analyzer.

// Core
pub mod parser;
pub mod filter;

// Surfaces
pub mod report;
pub mod conf;
pub mod cli;
pub mod runtime;
