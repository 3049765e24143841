//! FRIDAY — routes one utterance to a local handler or to the model.
//!
//! A turn is handled start to finish before the next one is read. Local
//! handlers (wake, humor, time, date, weather, news) never consult the
//! model; everything else is answered through the prompt → model →
//! memory-extraction path.

pub mod extractor;
pub mod intent;
pub mod prompt;

use std::fmt::Write as _;

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::llm::{self, LlmProvider, ProviderError};
use crate::subsystems::context::{
    self, ContextSnapshot, NewsCategory, NewsLookup, NewsProvider, TimeContext, WeatherProvider,
    weather::city_from_utterance,
};
use crate::subsystems::memory::{MemoryStore, Personality, PersonalityStore};

use intent::Intent;
use prompt::PromptAssembler;

pub const GREETING_MSG: &str = "At your service. What do you need?";
pub const LISTENING_MSG: &str = "I'm listening, Boss.";
pub const HUMOR_PROMPT_MSG: &str = "Please specify a humor level between 0 and 100, Boss.";
pub const HUMOR_SAVE_FAILED_MSG: &str = "I couldn't save that humor setting, Boss.";
pub const WEATHER_UNAVAILABLE_MSG: &str = "I couldn't reach the weather service right now, Boss.";
pub const NEWS_EMPTY_MSG: &str = "I reached the news service, but there are no headlines right now, Boss.";
pub const NEWS_UNAVAILABLE_MSG: &str = "The news service isn't available right now, Boss.";
pub const MODEL_UNAVAILABLE_MSG: &str = "I got no response from the model, Boss.";
pub const MEMORY_OFFLINE_MSG: &str = "My memory banks are offline, Boss. I can't think this one through without them.";

/// Owns every collaborator a turn needs.
#[derive(Debug, Clone)]
pub struct Friday {
    memory: MemoryStore,
    personality: PersonalityStore,
    weather: WeatherProvider,
    news: NewsProvider,
    llm: LlmProvider,
    prompt: PromptAssembler,
}

impl Friday {
    pub fn new(
        memory: MemoryStore,
        personality: PersonalityStore,
        weather: WeatherProvider,
        news: NewsProvider,
        llm: LlmProvider,
        prompt: PromptAssembler,
    ) -> Self {
        Self { memory, personality, weather, news, llm, prompt }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let llm = llm::providers::build(&config.model)
            .map_err(|e| AppError::Config(format!("model provider: {e}")))?;
        Ok(Self::new(
            MemoryStore::new(config.memory_path()),
            PersonalityStore::new(config.personality_path()),
            WeatherProvider::new(&config.weather, config.weather_api_key.clone())?,
            NewsProvider::new(&config.news, config.news_api_key.clone())?,
            llm,
            PromptAssembler::from_file(&config.prompt_file),
        ))
    }

    pub fn memory_store(&self) -> &MemoryStore {
        &self.memory
    }

    pub fn personality_store(&self) -> &PersonalityStore {
        &self.personality
    }

    /// Produce the reply for one utterance. Never fails: every error is
    /// turned into a sentence for the user.
    pub async fn respond(&self, input: &str) -> String {
        if input.trim().is_empty() {
            return LISTENING_MSG.to_string();
        }
        let intent = intent::classify(input);
        debug!(?intent, "routing turn");
        match intent {
            Intent::Wake => greeting(&context::get_time_context()),
            Intent::SetHumor => self.set_humor(input),
            Intent::Time => {
                let t = context::get_time_context();
                format!("It's {}, Boss.", t.time)
            }
            Intent::Date => {
                let t = context::get_time_context();
                format!("Today is {}, {}, Boss.", t.day_of_week, t.date)
            }
            Intent::Weather => self.weather_report(input).await,
            Intent::News => self.news_report(input).await,
            Intent::Chat => self.chat(input).await,
        }
    }

    fn set_humor(&self, input: &str) -> String {
        let value = match intent::first_integer(input) {
            Ok(v) => v,
            Err(e) => {
                debug!(error = %e, "humor command without a value");
                return HUMOR_PROMPT_MSG.to_string();
            }
        };
        match self.personality.set(value) {
            Ok(level) => format!("Humor level set to {level}/100, Boss."),
            Err(e) => {
                warn!(error = %e, "failed to persist humor level");
                HUMOR_SAVE_FAILED_MSG.to_string()
            }
        }
    }

    async fn weather_report(&self, input: &str) -> String {
        let city = city_from_utterance(&input.to_lowercase())
            .unwrap_or_else(|| self.weather.default_city().to_string());
        match self.weather.get_weather(&city).await {
            Some(w) => format!(
                "It's {}°C with {} in {} right now, Boss.",
                w.temp_celsius, w.condition, w.city
            ),
            None => WEATHER_UNAVAILABLE_MSG.to_string(),
        }
    }

    async fn news_report(&self, input: &str) -> String {
        let category = NewsCategory::from_utterance(&input.to_lowercase());
        match self.news.get_headlines(category).await {
            NewsLookup::Headlines(headlines) => {
                let label = match category {
                    NewsCategory::General => "top".to_string(),
                    other => other.as_str().to_string(),
                };
                let mut out = format!("Here are the latest {label} headlines, Boss:");
                for h in &headlines {
                    let _ = write!(out, "\n• {} ({})", h.title, h.source);
                }
                out
            }
            NewsLookup::Empty => NEWS_EMPTY_MSG.to_string(),
            NewsLookup::NotConfigured => NEWS_UNAVAILABLE_MSG.to_string(),
        }
    }

    async fn chat(&self, input: &str) -> String {
        let mut memory = match self.memory.load() {
            Ok(m) => m,
            Err(e) => {
                warn!(error = %e, "memory unavailable, skipping model path");
                return MEMORY_OFFLINE_MSG.to_string();
            }
        };

        let personality = self.personality.load().unwrap_or_else(|e| {
            warn!(error = %e, "personality unreadable, using defaults");
            Personality::default()
        });

        let context = ContextSnapshot {
            time: context::get_time_context(),
            weather: self.weather.get_weather(self.weather.default_city()).await,
        };

        let prompt = self.prompt.build(input, &memory, &personality, &context);
        debug!(prompt_len = prompt.len(), "prompt assembled");

        let raw = match self.llm.complete(&prompt).await {
            Ok(raw) => raw,
            Err(ProviderError::EmptyCompletion) => {
                warn!("model returned an empty completion");
                return MODEL_UNAVAILABLE_MSG.to_string();
            }
            Err(e) => {
                warn!(error = %e, "model call failed");
                return MODEL_UNAVAILABLE_MSG.to_string();
            }
        };

        extractor::extract_and_commit(&raw, input, &mut memory, &self.memory)
    }
}

/// Wake reply, e.g. `Good evening, Boss. At your service. What do you need?`
pub fn greeting(now: &TimeContext) -> String {
    format!("{}, Boss. {GREETING_MSG}", now.salutation())
}
