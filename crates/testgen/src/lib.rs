//! Random schedule generation for exercising `sercheck_core`.

pub mod generator;
