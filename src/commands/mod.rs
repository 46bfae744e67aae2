//! CLI command handlers.

mod config;
mod history;
mod summarize;
mod theme;

pub use config::run_config_show_command;
pub use history::run_history_command;
pub use summarize::{run_local_command, run_summarize_command};
pub use theme::run_theme_command;
