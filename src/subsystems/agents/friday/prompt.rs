//! Prompt assembler for the model path.
//!
//! The assembled text is a contract with the model, not a display format:
//!
//! ```text
//! <base template, {humor_level} substituted>
//!
//! CURRENT CONTEXT:            time, date, day, weather (or "unavailable")
//!
//! PROFILE / LONG TERM MEMORY / SHORT TERM MEMORY
//!
//! User: <input>
//! FRIDAY:                     reply cue; the model continues from here
//! ```
//!
//! Section order and the literal markers must not change.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::subsystems::context::ContextSnapshot;
use crate::subsystems::memory::{Memory, Personality};

const SEPARATOR: &str = "\n\n";

/// Placeholder in the base template replaced by the humor level.
pub const HUMOR_PLACEHOLDER: &str = "{humor_level}";

/// Marks where the model's reply begins.
pub const REPLY_CUE: &str = "FRIDAY:";

/// Used when the configured template file cannot be read.
pub const DEFAULT_TEMPLATE: &str = "\
You are FRIDAY, a calm and capable personal assistant. Address the user as \"Boss\".
Humor level: {humor_level}/100. At 0 be strictly professional; near 100 be playful and witty, never at the expense of accuracy.
Keep replies short and conversational.
Use CURRENT CONTEXT for anything about the time, date or weather. Do not invent facts about the user beyond PROFILE and the MEMORY sections.
When the user shares a durable fact about themselves (a preference, a name, a routine), end your reply with one extra line:
MEMORY_SAVE: <the fact in one short sentence>
Never emit MEMORY_SAVE for small talk.";

#[derive(Debug, Clone)]
pub struct PromptAssembler {
    template: String,
}

impl PromptAssembler {
    pub fn new(template: impl Into<String>) -> Self {
        Self { template: template.into() }
    }

    /// Load the base template from `path`, falling back to
    /// [`DEFAULT_TEMPLATE`] when the file is missing or blank.
    pub fn from_file(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) if !text.trim().is_empty() => {
                debug!(path = %path.display(), "prompt template loaded");
                Self::new(text.trim())
            }
            Ok(_) => {
                warn!(path = %path.display(), "prompt template is empty, using built-in");
                Self::new(DEFAULT_TEMPLATE)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "prompt template unreadable, using built-in");
                Self::new(DEFAULT_TEMPLATE)
            }
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Pure: identical inputs give byte-identical output.
    pub fn build(
        &self,
        user_input: &str,
        memory: &Memory,
        personality: &Personality,
        context: &ContextSnapshot,
    ) -> String {
        let system = self
            .template
            .replace(HUMOR_PLACEHOLDER, &personality.humor_level.to_string());

        let parts = [
            system,
            context_block(context),
            memory_block(memory),
            format!("User: {user_input}\n{REPLY_CUE}"),
        ];
        parts.join(SEPARATOR)
    }
}

fn context_block(context: &ContextSnapshot) -> String {
    let t = &context.time;
    let weather = match &context.weather {
        Some(w) => format!("Weather: {}°C, {} in {}", w.temp_celsius, w.condition, w.city),
        None => "Weather: unavailable".to_string(),
    };
    format!(
        "CURRENT CONTEXT:\nTime: {}\nDate: {}\nDay: {}\n{weather}",
        t.time, t.date, t.day_of_week
    )
}

fn memory_block(memory: &Memory) -> String {
    // Facts and turns are rendered as their JSON form, as persisted.
    let facts = serde_json::to_string(&memory.long_term.facts).unwrap_or_else(|_| "[]".into());
    let turns = serde_json::to_string(&memory.short_term).unwrap_or_else(|_| "[]".into());
    format!(
        "PROFILE: {}\nLONG TERM MEMORY: {facts}\nSHORT TERM MEMORY: {turns}",
        memory.profile_text()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subsystems::context::{TimeContext, WeatherSnapshot};

    fn context(weather: Option<WeatherSnapshot>) -> ContextSnapshot {
        ContextSnapshot {
            time: TimeContext {
                time: "09:05 PM".into(),
                date: "October 19, 2026".into(),
                day_of_week: "Monday".into(),
                hour: 21,
            },
            weather,
        }
    }

    fn memory() -> Memory {
        let mut m = Memory::default();
        m.profile = serde_json::Value::String("Tony, engineer".into());
        m.append_fact("likes black coffee");
        m.append_turn("hi", "Hello, Boss.");
        m
    }

    #[test]
    fn sections_in_fixed_order() {
        let a = PromptAssembler::new("Humor {humor_level}.");
        let p = a.build("what's up", &memory(), &Personality { humor_level: 40 }, &context(None));
        let expected = "Humor 40.\n\n\
CURRENT CONTEXT:\nTime: 09:05 PM\nDate: October 19, 2026\nDay: Monday\nWeather: unavailable\n\n\
PROFILE: Tony, engineer\n\
LONG TERM MEMORY: [\"likes black coffee\"]\n\
SHORT TERM MEMORY: [{\"user\":\"hi\",\"assistant\":\"Hello, Boss.\"}]\n\n\
User: what's up\nFRIDAY:";
        assert_eq!(p, expected);
    }

    #[test]
    fn weather_line_when_available() {
        let a = PromptAssembler::new("x");
        let w = WeatherSnapshot { city: "London".into(), temp_celsius: 15, condition: "light rain".into() };
        let p = a.build("hi", &Memory::default(), &Personality::default(), &context(Some(w)));
        assert!(p.contains("Weather: 15°C, light rain in London"));
        assert!(!p.contains("Weather: unavailable"));
    }

    #[test]
    fn build_is_deterministic() {
        let a = PromptAssembler::new(DEFAULT_TEMPLATE);
        let m = memory();
        let per = Personality { humor_level: 75 };
        let ctx = context(None);
        assert_eq!(a.build("tell me a joke", &m, &per, &ctx), a.build("tell me a joke", &m, &per, &ctx));
    }

    #[test]
    fn humor_substituted_and_cue_last() {
        let a = PromptAssembler::new(DEFAULT_TEMPLATE);
        let p = a.build("hi", &Memory::default(), &Personality { humor_level: 85 }, &context(None));
        assert!(p.contains("Humor level: 85/100"));
        assert!(!p.contains(HUMOR_PLACEHOLDER));
        assert!(p.ends_with("User: hi\nFRIDAY:"));
    }

    #[test]
    fn missing_template_file_uses_builtin() {
        let a = PromptAssembler::from_file(Path::new("/nonexistent/friday.md"));
        assert_eq!(a.template(), DEFAULT_TEMPLATE);
    }
}
