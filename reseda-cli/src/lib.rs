//! CLI library for testing purposes

pub mod convert;
pub mod debug;
pub mod validation;

pub use convert::{ConvertArgs, run_convert_command};
pub use debug::{DebugSource, run_debug_command};
