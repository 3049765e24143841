//! Persisted memory record.
//!
//! ```text
//! {
//!   "version": 1,
//!   "profile": "Tony, engineer, night owl",
//!   "long_term": { "facts": ["likes black coffee"] },
//!   "short_term": [ { "user": "...", "assistant": "..." } ]
//! }
//! ```
//!
//! Older files stored `long_term` as a bare list of facts. Those still load;
//! the next save writes the versioned shape. Keys this crate does not know
//! about, at the top level or inside `long_term`, are carried through saves.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Current on-disk schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Most recent turns kept in short-term memory.
pub const SHORT_TERM_CAP: usize = 5;

fn schema_version() -> u32 {
    SCHEMA_VERSION
}

/// One user utterance and the reply it got.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub user: String,
    pub assistant: String,
}

/// Durable facts about the user. Semantically a set: no exact duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawLongTerm")]
pub struct LongTerm {
    pub facts: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct NamedLongTerm {
    facts: Vec<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLongTerm {
    List(Vec<String>),
    Named(NamedLongTerm),
}

impl From<RawLongTerm> for LongTerm {
    fn from(raw: RawLongTerm) -> Self {
        match raw {
            RawLongTerm::List(facts) => Self { facts, extra: Map::new() },
            RawLongTerm::Named(NamedLongTerm { facts, extra }) => Self { facts, extra },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    #[serde(default = "schema_version")]
    pub version: u32,
    /// Free-form description of the user, edited outside the assistant.
    pub profile: Value,
    pub long_term: LongTerm,
    pub short_term: Vec<Turn>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            profile: Value::String(String::new()),
            long_term: LongTerm::default(),
            short_term: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl Memory {
    /// Record a turn, keeping only the most recent [`SHORT_TERM_CAP`].
    pub fn append_turn(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.short_term.push(Turn { user: user.into(), assistant: assistant.into() });
        if self.short_term.len() > SHORT_TERM_CAP {
            let excess = self.short_term.len() - SHORT_TERM_CAP;
            self.short_term.drain(..excess);
        }
    }

    /// Add a fact unless the exact string is already known.
    /// Returns `true` when the fact was new.
    pub fn append_fact(&mut self, fact: impl Into<String>) -> bool {
        let fact = fact.into();
        if self.long_term.facts.contains(&fact) {
            return false;
        }
        self.long_term.facts.push(fact);
        true
    }

    /// Profile as prompt text: the bare string, or compact JSON for
    /// structured profiles.
    pub fn profile_text(&self) -> String {
        match &self.profile {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_term_keeps_most_recent_five_in_order() {
        for n in 0..12 {
            let mut m = Memory::default();
            for i in 0..n {
                m.append_turn(format!("u{i}"), format!("a{i}"));
            }
            assert_eq!(m.short_term.len(), n.min(SHORT_TERM_CAP));
            let expected: Vec<String> = (n.saturating_sub(SHORT_TERM_CAP)..n).map(|i| format!("u{i}")).collect();
            let got: Vec<String> = m.short_term.iter().map(|t| t.user.clone()).collect();
            assert_eq!(got, expected, "after {n} appends");
        }
    }

    #[test]
    fn duplicate_fact_stored_once() {
        let mut m = Memory::default();
        assert!(m.append_fact("likes black coffee"));
        assert!(!m.append_fact("likes black coffee"));
        assert_eq!(m.long_term.facts, vec!["likes black coffee"]);
    }

    #[test]
    fn fact_match_is_case_sensitive() {
        let mut m = Memory::default();
        m.append_fact("Likes tea");
        m.append_fact("likes tea");
        assert_eq!(m.long_term.facts.len(), 2);
    }

    #[test]
    fn legacy_list_long_term_loads() {
        let m: Memory = serde_json::from_str(
            r#"{"profile": "Tony", "long_term": ["a", "b"], "short_term": []}"#,
        )
        .unwrap();
        assert_eq!(m.version, SCHEMA_VERSION);
        assert_eq!(m.long_term.facts, vec!["a", "b"]);
    }

    #[test]
    fn versioned_record_round_trips() {
        let text = r#"{"version":1,"profile":{"name":"Tony"},"long_term":{"facts":["x"]},"short_term":[{"user":"hi","assistant":"hello"}]}"#;
        let m: Memory = serde_json::from_str(text).unwrap();
        assert_eq!(serde_json::to_string(&m).unwrap(), text);
    }

    #[test]
    fn unknown_keys_survive_a_fact_save() {
        let text = r#"{"version":1,"profile":"p","long_term":{"facts":["a"],"notes":"keep"},"short_term":[],"owner":"me"}"#;
        let mut m: Memory = serde_json::from_str(text).unwrap();
        m.append_fact("b");
        let saved: Value = serde_json::to_value(&m).unwrap();
        assert_eq!(saved["owner"], "me");
        assert_eq!(saved["long_term"]["notes"], "keep");
        assert_eq!(saved["long_term"]["facts"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn missing_fields_rejected() {
        assert!(serde_json::from_str::<Memory>(r#"{"profile": ""}"#).is_err());
    }

    #[test]
    fn profile_text_renders_string_and_structured() {
        let mut m = Memory::default();
        m.profile = Value::String("night owl".into());
        assert_eq!(m.profile_text(), "night owl");
        m.profile = serde_json::json!({"name": "Tony"});
        assert_eq!(m.profile_text(), r#"{"name":"Tony"}"#);
    }
}
