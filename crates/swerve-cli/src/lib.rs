//! CLI library components for the swerve drive configuration editor.

pub mod logging;
pub mod workflow;
