//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory,
//! then applies `FRIDAY_WORK_DIR` and `FRIDAY_LOG_LEVEL` env overrides.
//! API keys come from the environment only (`WEATHER_API_KEY`,
//! `NEWS_API_KEY`), never from TOML.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::AppError;

const MEMORY_FILENAME: &str = "memory.json";
const PERSONALITY_FILENAME: &str = "personality.json";

/// External completion process settings (`[model.process]`).
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    /// Executable to spawn, e.g. `ollama`.
    pub command: String,
    pub args: Vec<String>,
    /// Upper bound on a single completion, in seconds.
    pub timeout_seconds: u64,
}

/// Canned-reply provider settings (`[model.dummy]`).
#[derive(Debug, Clone)]
pub struct DummyConfig {
    pub reply: String,
}

/// Model gateway configuration.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Which provider is active (`"process"` or `"dummy"`).
    /// Maps to `default` in `[model]`.
    pub provider: String,
    pub process: ProcessConfig,
    pub dummy: DummyConfig,
}

/// Weather lookup configuration.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// City used when the utterance does not name one.
    pub city: String,
    pub api_base_url: String,
    pub timeout_seconds: u64,
}

/// Headline lookup configuration.
#[derive(Debug, Clone)]
pub struct NewsConfig {
    /// Base URL of the NewsAPI v2 endpoints (no trailing slash).
    pub api_base_url: String,
    pub country: String,
    pub page_size: usize,
    pub timeout_seconds: u64,
}

/// Fully-resolved assistant configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub name: String,
    /// Directory holding `memory.json` and `personality.json` (no `~`).
    pub work_dir: PathBuf,
    pub log_level: String,
    /// Optional log file; relative paths resolve against `work_dir`.
    pub log_file: Option<PathBuf>,
    /// Base instruction template containing a `{humor_level}` placeholder.
    pub prompt_file: PathBuf,
    pub model: ModelConfig,
    pub weather: WeatherConfig,
    pub news: NewsConfig,
    /// From `WEATHER_API_KEY`; weather lookups are unavailable without it.
    pub weather_api_key: Option<String>,
    /// From `NEWS_API_KEY`; news lookups report "not configured" without it.
    pub news_api_key: Option<String>,
}

impl Config {
    pub fn memory_path(&self) -> PathBuf {
        self.work_dir.join(MEMORY_FILENAME)
    }

    pub fn personality_path(&self) -> PathBuf {
        self.work_dir.join(PERSONALITY_FILENAME)
    }
}

/// Raw TOML shape — `serde` target before resolution.
#[derive(Deserialize)]
struct RawConfig {
    assistant: RawAssistant,
    #[serde(default)]
    model: RawModel,
    #[serde(default)]
    weather: RawWeather,
    #[serde(default)]
    news: RawNews,
}

#[derive(Deserialize)]
struct RawAssistant {
    #[serde(default = "default_name")]
    name: String,
    work_dir: String,
    log_level: String,
    #[serde(default)]
    log_file: Option<String>,
    #[serde(default = "default_prompt_file")]
    prompt_file: String,
}

#[derive(Deserialize)]
struct RawModel {
    #[serde(rename = "default", default = "default_model_provider")]
    provider: String,
    #[serde(default)]
    process: RawProcess,
    #[serde(default)]
    dummy: RawDummy,
}

impl Default for RawModel {
    fn default() -> Self {
        Self {
            provider: default_model_provider(),
            process: RawProcess::default(),
            dummy: RawDummy::default(),
        }
    }
}

#[derive(Deserialize)]
struct RawProcess {
    #[serde(default = "default_process_command")]
    command: String,
    #[serde(default = "default_process_args")]
    args: Vec<String>,
    #[serde(default = "default_process_timeout_seconds")]
    timeout_seconds: u64,
}

impl Default for RawProcess {
    fn default() -> Self {
        Self {
            command: default_process_command(),
            args: default_process_args(),
            timeout_seconds: default_process_timeout_seconds(),
        }
    }
}

#[derive(Deserialize)]
struct RawDummy {
    #[serde(default = "default_dummy_reply")]
    reply: String,
}

impl Default for RawDummy {
    fn default() -> Self {
        Self { reply: default_dummy_reply() }
    }
}

#[derive(Deserialize)]
struct RawWeather {
    #[serde(default = "default_weather_city")]
    city: String,
    #[serde(default = "default_weather_api_base_url")]
    api_base_url: String,
    #[serde(default = "default_provider_timeout_seconds")]
    timeout_seconds: u64,
}

impl Default for RawWeather {
    fn default() -> Self {
        Self {
            city: default_weather_city(),
            api_base_url: default_weather_api_base_url(),
            timeout_seconds: default_provider_timeout_seconds(),
        }
    }
}

#[derive(Deserialize)]
struct RawNews {
    #[serde(default = "default_news_api_base_url")]
    api_base_url: String,
    #[serde(default = "default_news_country")]
    country: String,
    #[serde(default = "default_news_page_size")]
    page_size: usize,
    #[serde(default = "default_provider_timeout_seconds")]
    timeout_seconds: u64,
}

impl Default for RawNews {
    fn default() -> Self {
        Self {
            api_base_url: default_news_api_base_url(),
            country: default_news_country(),
            page_size: default_news_page_size(),
            timeout_seconds: default_provider_timeout_seconds(),
        }
    }
}

fn default_name() -> String { "FRIDAY".to_string() }
fn default_prompt_file() -> String { "config/prompts/friday.md".to_string() }
fn default_model_provider() -> String { "process".to_string() }
fn default_process_command() -> String { "ollama".to_string() }
fn default_process_args() -> Vec<String> { vec!["run".to_string(), "mistral".to_string()] }
fn default_process_timeout_seconds() -> u64 { 300 }
fn default_dummy_reply() -> String { "Running offline, Boss. No model is attached.".to_string() }
fn default_weather_city() -> String { "London".to_string() }
fn default_weather_api_base_url() -> String {
    "https://api.openweathermap.org/data/2.5/weather".to_string()
}
fn default_news_api_base_url() -> String { "https://newsapi.org/v2".to_string() }
fn default_news_country() -> String { "us".to_string() }
fn default_news_page_size() -> usize { 5 }
fn default_provider_timeout_seconds() -> u64 { 5 }

/// Load config from `config/default.toml`, then apply env-var overrides.
pub fn load() -> Result<Config, AppError> {
    let work_dir_override = env::var("FRIDAY_WORK_DIR").ok();
    let log_level_override = env::var("FRIDAY_LOG_LEVEL").ok();
    let mut config = load_from(
        Path::new("config/default.toml"),
        work_dir_override.as_deref(),
        log_level_override.as_deref(),
    )?;
    config.weather_api_key = non_empty_env("WEATHER_API_KEY");
    config.news_api_key = non_empty_env("NEWS_API_KEY");
    Ok(config)
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Internal loader — accepts an explicit path and optional overrides.
/// Tests pass overrides directly instead of mutating env vars. API keys are
/// left unset here; [`load`] fills them from the environment.
pub fn load_from(
    path: &Path,
    work_dir_override: Option<&str>,
    log_level_override: Option<&str>,
) -> Result<Config, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let parsed: RawConfig = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    let a = parsed.assistant;

    let work_dir = expand_home(work_dir_override.unwrap_or(&a.work_dir));
    let log_level = log_level_override.unwrap_or(&a.log_level).to_string();
    let log_file = a.log_file.map(|f| {
        let path = expand_home(&f);
        if path.is_absolute() { path } else { work_dir.join(path) }
    });

    if parsed.news.page_size == 0 {
        return Err(AppError::Config("news.page_size must be at least 1".into()));
    }

    Ok(Config {
        name: a.name,
        work_dir,
        log_level,
        log_file,
        prompt_file: expand_home(&a.prompt_file),
        model: ModelConfig {
            provider: parsed.model.provider,
            process: ProcessConfig {
                command: parsed.model.process.command,
                args: parsed.model.process.args,
                timeout_seconds: parsed.model.process.timeout_seconds,
            },
            dummy: DummyConfig { reply: parsed.model.dummy.reply },
        },
        weather: WeatherConfig {
            city: parsed.weather.city,
            api_base_url: parsed.weather.api_base_url,
            timeout_seconds: parsed.weather.timeout_seconds,
        },
        news: NewsConfig {
            api_base_url: parsed.news.api_base_url.trim_end_matches('/').to_string(),
            country: parsed.news.country,
            page_size: parsed.news.page_size,
            timeout_seconds: parsed.news.timeout_seconds,
        },
        weather_api_key: None,
        news_api_key: None,
    })
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

// ── test helpers ──────────────────────────────────────────────────────────────

impl Config {
    /// Offline `Config` rooted at `work_dir` — dummy model, no API keys,
    /// unroutable provider URLs.
    pub fn test_default(work_dir: &Path) -> Self {
        Self {
            name: "FRIDAY".into(),
            work_dir: work_dir.to_path_buf(),
            log_level: "info".into(),
            log_file: None,
            prompt_file: work_dir.join("friday.md"),
            model: ModelConfig {
                provider: "dummy".into(),
                process: ProcessConfig {
                    command: default_process_command(),
                    args: default_process_args(),
                    timeout_seconds: 1,
                },
                dummy: DummyConfig { reply: default_dummy_reply() },
            },
            weather: WeatherConfig {
                city: "London".into(),
                api_base_url: "http://127.0.0.1:9/weather".into(),
                timeout_seconds: 1,
            },
            news: NewsConfig {
                api_base_url: "http://127.0.0.1:9".into(),
                country: "us".into(),
                page_size: 5,
                timeout_seconds: 1,
            },
            weather_api_key: None,
            news_api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL_TOML: &str = r#"
[assistant]
work_dir = "~/.friday"
log_level = "warn"
"#;

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn parse_minimal_config_uses_defaults() {
        let f = write_toml(MINIMAL_TOML);
        let cfg = load_from(f.path(), None, None).unwrap();
        assert_eq!(cfg.name, "FRIDAY");
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.model.provider, "process");
        assert_eq!(cfg.model.process.command, "ollama");
        assert_eq!(cfg.model.process.args, vec!["run", "mistral"]);
        assert_eq!(cfg.weather.timeout_seconds, 5);
        assert_eq!(cfg.news.page_size, 5);
        assert!(cfg.weather_api_key.is_none());
    }

    #[test]
    fn parse_full_config() {
        let f = write_toml(
            r#"
[assistant]
name = "F"
work_dir = "/srv/friday"
log_level = "debug"
log_file = "friday.log"

[model]
default = "dummy"
[model.process]
command = "llama"
args = ["--prompt-stdin"]
timeout_seconds = 30
[model.dummy]
reply = "canned"

[weather]
city = "Oslo"

[news]
api_base_url = "http://news.local/v2/"
country = "gb"
page_size = 3
"#,
        );
        let cfg = load_from(f.path(), None, None).unwrap();
        assert_eq!(cfg.name, "F");
        assert_eq!(cfg.log_file, Some(PathBuf::from("/srv/friday/friday.log")));
        assert_eq!(cfg.model.provider, "dummy");
        assert_eq!(cfg.model.process.command, "llama");
        assert_eq!(cfg.model.process.timeout_seconds, 30);
        assert_eq!(cfg.model.dummy.reply, "canned");
        assert_eq!(cfg.weather.city, "Oslo");
        assert_eq!(cfg.news.api_base_url, "http://news.local/v2");
        assert_eq!(cfg.news.country, "gb");
        assert_eq!(cfg.news.page_size, 3);
        assert_eq!(cfg.memory_path(), PathBuf::from("/srv/friday/memory.json"));
        assert_eq!(cfg.personality_path(), PathBuf::from("/srv/friday/personality.json"));
    }

    #[test]
    fn zero_page_size_rejected() {
        let f = write_toml(&format!("{MINIMAL_TOML}\n[news]\npage_size = 0\n"));
        let err = load_from(f.path(), None, None).unwrap_err();
        assert!(err.to_string().contains("page_size"));
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = dirs::home_dir().expect("home dir must exist in test env");
        let expanded = expand_home("~/.friday");
        assert!(expanded.starts_with(&home));
        assert!(expanded.ends_with(".friday"));
    }

    #[test]
    fn absolute_path_unchanged() {
        assert_eq!(expand_home("/absolute/path"), PathBuf::from("/absolute/path"));
    }

    #[test]
    fn missing_file_errors() {
        let result = load_from(Path::new("/nonexistent/config.toml"), None, None);
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("config error"));
    }

    #[test]
    fn missing_assistant_section_errors() {
        let f = write_toml("[weather]\ncity = \"Oslo\"\n");
        assert!(load_from(f.path(), None, None).is_err());
    }

    #[test]
    fn env_overrides_apply() {
        let f = write_toml(MINIMAL_TOML);
        let cfg = load_from(f.path(), Some("/tmp/friday-override"), Some("debug")).unwrap();
        assert_eq!(cfg.work_dir, PathBuf::from("/tmp/friday-override"));
        assert_eq!(cfg.log_level, "debug");
    }
}
