//! Tests for the shipped prompt template and config files.

use std::fs;
use std::path::{Path, PathBuf};

use friday::config;
use friday::subsystems::agents::friday::extractor::MEMORY_MARKER;
use friday::subsystems::agents::friday::prompt::{HUMOR_PLACEHOLDER, PromptAssembler};

fn repo_path(rel: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(rel)
}

#[test]
fn test_friday_prompt_file_exists() {
    assert!(repo_path("config/prompts/friday.md").exists(), "friday.md prompt file missing");
}

#[test]
fn test_friday_prompt_template_vars() {
    let text = fs::read_to_string(repo_path("config/prompts/friday.md")).unwrap();
    assert!(text.contains(HUMOR_PLACEHOLDER), "friday.md should contain {{humor_level}}");
}

#[test]
fn test_friday_prompt_teaches_memory_directive() {
    let text = fs::read_to_string(repo_path("config/prompts/friday.md")).unwrap();
    assert!(text.contains(MEMORY_MARKER), "friday.md should explain the MEMORY_SAVE directive");
}

#[test]
fn test_shipped_template_loads() {
    let assembler = PromptAssembler::from_file(&repo_path("config/prompts/friday.md"));
    assert!(assembler.template().contains(HUMOR_PLACEHOLDER));
}

#[test]
fn test_default_config_parses() {
    let cfg = config::load_from(&repo_path("config/default.toml"), Some("/tmp/friday-test"), None).unwrap();
    assert_eq!(cfg.name, "FRIDAY");
    assert_eq!(cfg.model.provider, "process");
    assert_eq!(cfg.weather.timeout_seconds, 5);
}

#[test]
fn test_memory_sample_is_loadable() {
    let store = friday::subsystems::memory::MemoryStore::new(repo_path("config/memory.sample.json"));
    let memory = store.load().unwrap();
    assert!(memory.long_term.facts.is_empty());
    assert!(memory.short_term.is_empty());
}
