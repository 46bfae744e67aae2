//! Config command handlers: show effective configuration.

use anyhow::Result;

use crate::app_config::{EffectiveConfig, LoadedConfig};

pub fn run_config_show_command(loaded: &LoadedConfig, effective: &EffectiveConfig) -> Result<()> {
    let resolved_path = loaded.path.as_ref().map_or_else(
        || "<unresolved>".to_string(),
        |path| path.display().to_string(),
    );
    println!("config_path = {resolved_path}");
    println!(
        "config_file = {}",
        if loaded.loaded_from_file {
            "loaded"
        } else {
            "not found (using defaults)"
        }
    );
    println!("default_mode = {}", effective.mode);
    println!("default_level = {}", effective.level);
    println!(
        "ai_endpoint = {}",
        effective
            .ai_endpoint
            .as_deref()
            .unwrap_or("<none> (local summarizer only)")
    );
    println!("ai_model = {}", effective.ai_model);
    println!("ai_timeout_secs = {}", effective.ai_timeout_secs);
    println!("ai_max_retries = {}", effective.ai_max_retries);
    println!("local_only = {}", effective.local_only);
    println!("history_db = {}", effective.history_db.display());
    println!("verbosity = {}", effective.verbosity.as_str());

    Ok(())
}
