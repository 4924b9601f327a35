//! Command-line front-end for `scene-validator`.

pub mod cli;
pub mod logging;
