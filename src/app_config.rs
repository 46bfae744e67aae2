//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clarity_core::{AcademicLevel, SummaryMode};

/// Upper bound for `ai_max_retries`.
const MAX_AI_RETRIES: u32 = 5;

/// `key = value` file configuration for clarity defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Default summary mode.
    pub default_mode: Option<SummaryMode>,
    /// Default academic level.
    pub default_level: Option<AcademicLevel>,
    /// Base URL of the generative model server; unset means local only.
    pub ai_endpoint: Option<String>,
    /// Model name sent to the model server.
    pub ai_model: Option<String>,
    /// Per-request AI timeout in seconds (1..=600).
    pub ai_timeout_secs: Option<u64>,
    /// Retries after the first AI attempt (0..=5).
    pub ai_max_retries: Option<u32>,
    /// Never call the AI endpoint.
    pub local_only: Option<bool>,
    /// Path of the history database.
    pub history_db: Option<PathBuf>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Validates config values against runtime constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.ai_timeout_secs
            && !(1..=600).contains(&timeout)
        {
            bail!("Invalid config value for `ai_timeout_secs`: {timeout}. Expected range: 1..=600");
        }

        if let Some(retries) = self.ai_max_retries
            && retries > MAX_AI_RETRIES
        {
            bail!(
                "Invalid config value for `ai_max_retries`: {retries}. Expected range: 0..={MAX_AI_RETRIES}"
            );
        }

        if let Some(endpoint) = self.ai_endpoint.as_deref()
            && url::Url::parse(endpoint).is_err()
        {
            bail!("Invalid config value for `ai_endpoint`: '{endpoint}' is not a valid URL");
        }

        Ok(())
    }
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Returns the stable string label for display output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Verbose => "verbose",
            Self::Quiet => "quiet",
            Self::Debug => "debug",
        }
    }

    /// Tracing filter directive for this setting.
    #[must_use]
    pub fn filter(self) -> &'static str {
        match self {
            Self::Default => "info",
            Self::Verbose => "debug",
            Self::Quiet => "error",
            Self::Debug => "trace",
        }
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
    /// Indicates whether configuration was loaded from disk.
    pub loaded_from_file: bool,
}

impl LoadedConfig {
    /// The parsed config, or an empty one when no file was loaded.
    #[must_use]
    pub fn file_config(&self) -> FileConfig {
        self.config.clone().unwrap_or_default()
    }
}

/// Config values after applying built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub mode: SummaryMode,
    pub level: AcademicLevel,
    pub ai_endpoint: Option<String>,
    pub ai_model: String,
    pub ai_timeout_secs: u64,
    pub ai_max_retries: u32,
    pub local_only: bool,
    pub history_db: PathBuf,
    pub verbosity: VerbositySetting,
}

impl EffectiveConfig {
    /// Fills every unset value from built-in defaults.
    #[must_use]
    pub fn from_file(file: &FileConfig) -> Self {
        Self {
            mode: file.default_mode.unwrap_or_default(),
            level: file.default_level.unwrap_or_default(),
            ai_endpoint: file.ai_endpoint.clone(),
            ai_model: file
                .ai_model
                .clone()
                .unwrap_or_else(|| clarity_core::ai::DEFAULT_MODEL.to_string()),
            ai_timeout_secs: file
                .ai_timeout_secs
                .unwrap_or(clarity_core::ai::DEFAULT_TIMEOUT_SECS),
            ai_max_retries: file
                .ai_max_retries
                .unwrap_or(clarity_core::ai::DEFAULT_MAX_RETRIES),
            local_only: file.local_only.unwrap_or(false),
            history_db: file
                .history_db
                .clone()
                .unwrap_or_else(resolve_default_history_db_path),
            verbosity: file.verbosity.unwrap_or(VerbositySetting::Default),
        }
    }
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/clarity/config.toml`
/// 2. `$HOME/.config/clarity/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("clarity")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("clarity")
            .join("config.toml"),
    )
}

/// Resolves default history database path.
///
/// Priority:
/// 1. `$XDG_DATA_HOME/clarity/history.db`
/// 2. `$HOME/.local/share/clarity/history.db`
/// 3. `./clarity-history.db`
#[must_use]
pub fn resolve_default_history_db_path() -> PathBuf {
    if let Some(xdg_data_home) = env_var_non_empty_os("XDG_DATA_HOME") {
        return PathBuf::from(xdg_data_home)
            .join("clarity")
            .join("history.db");
    }
    match env_var_non_empty_os("HOME") {
        Some(home) => PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("clarity")
            .join("history.db"),
        None => PathBuf::from("clarity-history.db"),
    }
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from `explicit` when given (must exist), else from the default path if present.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let config = load_file_config(path)?;
        return Ok(LoadedConfig {
            path: Some(path.to_path_buf()),
            config: Some(config),
            loaded_from_file: true,
        });
    }

    let path = resolve_default_config_path();
    let Some(path_ref) = path.as_deref() else {
        return Ok(LoadedConfig {
            path,
            config: None,
            loaded_from_file: false,
        });
    };

    if !path_ref.exists() {
        return Ok(LoadedConfig {
            path,
            config: None,
            loaded_from_file: false,
        });
    }

    let config = load_file_config(path_ref)?;
    Ok(LoadedConfig {
        path,
        config: Some(config),
        loaded_from_file: true,
    })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_no = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_no}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let context = || format!("Invalid `{key}` value on line {line_no}");

        match key {
            "default_mode" => {
                let parsed = parse_string_literal(value).with_context(context)?;
                let mode = parsed
                    .parse::<SummaryMode>()
                    .map_err(anyhow::Error::msg)
                    .with_context(context)?;
                cfg.default_mode = Some(mode);
            }
            "default_level" => {
                let parsed = parse_string_literal(value).with_context(context)?;
                let level = parsed
                    .parse::<AcademicLevel>()
                    .map_err(anyhow::Error::msg)
                    .with_context(context)?;
                cfg.default_level = Some(level);
            }
            "ai_endpoint" => {
                cfg.ai_endpoint = Some(parse_string_literal(value).with_context(context)?);
            }
            "ai_model" => {
                let parsed = parse_string_literal(value).with_context(context)?;
                if parsed.trim().is_empty() {
                    bail!("Invalid `ai_model` value on line {line_no}: must not be empty");
                }
                cfg.ai_model = Some(parsed);
            }
            "ai_timeout_secs" => {
                cfg.ai_timeout_secs = Some(parse_integer_u64(value).with_context(context)?);
            }
            "ai_max_retries" => {
                let parsed = parse_integer_u64(value).with_context(context)?;
                let retries = u32::try_from(parsed)
                    .map_err(|_| anyhow::anyhow!("ai_max_retries out of range for u32"))?;
                cfg.ai_max_retries = Some(retries);
            }
            "local_only" => {
                cfg.local_only = Some(parse_boolean(value).with_context(context)?);
            }
            "history_db" => {
                let parsed = parse_string_literal(value).with_context(context)?;
                cfg.history_db = Some(PathBuf::from(parsed));
            }
            "verbosity" => {
                let parsed = parse_string_literal(value).with_context(context)?;
                cfg.verbosity = Some(parse_verbosity(&parsed).with_context(|| {
                    format!("Invalid `verbosity` value '{parsed}' on line {line_no}")
                })?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_no}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "quiet" => Ok(VerbositySetting::Quiet),
        "debug" => Ok(VerbositySetting::Debug),
        _ => bail!("Expected one of: default, verbose, quiet, debug"),
    }
}

fn parse_boolean(raw_value: &str) -> Result<bool> {
    match raw_value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => bail!("Expected 'true' or 'false'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_partial_fields() {
        let cfg = parse_config_str(
            r#"
default_mode = "exam"
verbosity = "verbose"
"#,
        )
        .expect("partial config should parse");
        assert_eq!(cfg.default_mode, Some(SummaryMode::Exam));
        assert_eq!(cfg.verbosity, Some(VerbositySetting::Verbose));
        assert!(cfg.ai_endpoint.is_none());
    }

    #[test]
    fn test_parse_config_all_fields() {
        let cfg = parse_config_str(
            r#"
default_mode = "quick"
default_level = "high-school"
ai_endpoint = "http://localhost:11434"
ai_model = "llama3.2"
ai_timeout_secs = 90
ai_max_retries = 0
local_only = false
history_db = "/tmp/clarity/history.db"
"#,
        )
        .expect("full config should parse");
        assert_eq!(cfg.default_level, Some(AcademicLevel::HighSchool));
        assert_eq!(cfg.ai_endpoint.as_deref(), Some("http://localhost:11434"));
        assert_eq!(cfg.ai_model.as_deref(), Some("llama3.2"));
        assert_eq!(cfg.ai_timeout_secs, Some(90));
        assert_eq!(cfg.ai_max_retries, Some(0));
        assert_eq!(cfg.local_only, Some(false));
        assert_eq!(
            cfg.history_db,
            Some(PathBuf::from("/tmp/clarity/history.db"))
        );
    }

    #[test]
    fn test_parse_config_rejects_unknown_mode() {
        let err = parse_config_str(r#"default_mode = "poem""#).expect_err("invalid mode expected");
        assert!(format!("{err:#}").contains("default_mode"));
    }

    #[test]
    fn test_parse_config_rejects_out_of_range_timeout() {
        let err = parse_config_str("ai_timeout_secs = 0").expect_err("invalid timeout expected");
        assert!(err.to_string().contains("ai_timeout_secs"));
        let err = parse_config_str("ai_timeout_secs = 601").expect_err("invalid timeout expected");
        assert!(err.to_string().contains("ai_timeout_secs"));
    }

    #[test]
    fn test_parse_config_rejects_too_many_retries() {
        let err = parse_config_str("ai_max_retries = 6").expect_err("invalid retries expected");
        assert!(err.to_string().contains("ai_max_retries"));
    }

    #[test]
    fn test_parse_config_rejects_invalid_endpoint() {
        let err =
            parse_config_str(r#"ai_endpoint = "not a url""#).expect_err("invalid url expected");
        assert!(err.to_string().contains("ai_endpoint"));
    }

    #[test]
    fn test_parse_config_rejects_invalid_boolean() {
        let err = parse_config_str("local_only = yes").expect_err("invalid boolean expected");
        assert!(err.to_string().contains("local_only"));
    }

    #[test]
    fn test_parse_config_supports_inline_comments() {
        let cfg = parse_config_str(
            r#"
ai_max_retries = 3 # be patient
ai_model = "phi#3" # hash inside quotes is kept
"#,
        )
        .expect("config with comments should parse");
        assert_eq!(cfg.ai_max_retries, Some(3));
        assert_eq!(cfg.ai_model.as_deref(), Some("phi#3"));
    }

    #[test]
    fn test_parse_config_rejects_unknown_keys() {
        let err = parse_config_str("concurrency = 4").expect_err("unknown key error expected");
        assert!(err.to_string().contains("Unknown configuration key"));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_parse_config_rejects_missing_equals() {
        let err = parse_config_str("\nlocal_only true").expect_err("syntax error expected");
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_effective_config_defaults() {
        let effective = EffectiveConfig::from_file(&FileConfig::default());
        assert_eq!(effective.mode, SummaryMode::Study);
        assert_eq!(effective.level, AcademicLevel::Undergraduate);
        assert!(effective.ai_endpoint.is_none());
        assert_eq!(effective.ai_max_retries, 2);
        assert!(!effective.local_only);
        assert_eq!(
            effective.history_db.extension().and_then(|ext| ext.to_str()),
            Some("db")
        );
    }

    #[test]
    fn test_effective_config_uses_file_values() {
        let file = parse_config_str("default_level = \"graduate\"\nlocal_only = true")
            .expect("config should parse");
        let effective = EffectiveConfig::from_file(&file);
        assert_eq!(effective.level, AcademicLevel::Graduate);
        assert!(effective.local_only);
    }

    #[test]
    fn test_verbosity_filters() {
        assert_eq!(VerbositySetting::Default.filter(), "info");
        assert_eq!(VerbositySetting::Quiet.filter(), "error");
        assert_eq!(VerbositySetting::Debug.as_str(), "debug");
    }

    #[test]
    fn test_load_config_explicit_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "local_only = true\n").expect("write config");
        let loaded = load_config(Some(&path)).expect("config should load");
        assert!(loaded.loaded_from_file);
        assert_eq!(loaded.file_config().local_only, Some(true));
    }

    #[test]
    fn test_load_config_explicit_missing_path_errors() {
        let err = load_config(Some(Path::new("/nonexistent/clarity.toml")))
            .expect_err("missing explicit config should fail");
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
