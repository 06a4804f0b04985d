//! CLI module - argument parsing and interactive prompts

mod args;
mod prompts;

pub use args::{derive_output_path, Cli};
pub use prompts::*;
