//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod example;
mod inspect;
mod prompt;
mod repair;
mod utils;
mod validate;

pub use completions::handle_completions;
pub use example::handle_example;
pub use inspect::handle_inspect;
pub use prompt::handle_prompt;
pub use repair::handle_repair;
pub use validate::handle_validate;
