//! Small helpers shared by the runner.

pub mod json_path;
