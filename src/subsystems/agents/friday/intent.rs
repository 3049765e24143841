//! Intent classification for one utterance.
//!
//! [`ROUTES`] is a priority-ordered table of (intent, predicate) pairs tested
//! against the lower-cased input; the first predicate that matches decides.
//! Predicates use plain substring tests, so keywords also match inside other
//! words ("update" contains "date", "overtime" contains "time"). That
//! imprecision is kept on purpose; a word-boundary matcher can replace
//! [`mentions`] without touching dispatch.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Wake,
    SetHumor,
    Time,
    Date,
    Weather,
    News,
    /// Nothing matched: ask the model.
    Chat,
}

pub type Predicate = fn(&str) -> bool;

pub const WAKE_PHRASES: &[&str] = &[
    "hey friday",
    "hello friday",
    "hi friday",
    "wake up friday",
    "friday are you there",
];

/// Checked top to bottom.
pub const ROUTES: &[(Intent, Predicate)] = &[
    (Intent::Wake, is_wake),
    (Intent::SetHumor, is_set_humor),
    (Intent::Time, is_time),
    (Intent::Date, is_date),
    (Intent::Weather, is_weather),
    (Intent::News, is_news),
];

/// Keyword test used by every route.
pub fn mentions(lowered: &str, keyword: &str) -> bool {
    lowered.contains(keyword)
}

fn is_wake(lowered: &str) -> bool {
    WAKE_PHRASES.iter().any(|p| mentions(lowered, p))
}

fn is_set_humor(lowered: &str) -> bool {
    mentions(lowered, "set humor")
}

fn is_time(lowered: &str) -> bool {
    mentions(lowered, "time")
}

fn is_date(lowered: &str) -> bool {
    mentions(lowered, "date")
}

fn is_weather(lowered: &str) -> bool {
    mentions(lowered, "weather")
}

fn is_news(lowered: &str) -> bool {
    mentions(lowered, "news")
}

pub fn classify(input: &str) -> Intent {
    let lowered = input.to_lowercase();
    ROUTES
        .iter()
        .find(|(_, matches)| matches(&lowered))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Chat)
}

static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-?[0-9]+").expect("static regex"));

/// First integer literal in `text`. Literals too large for `i64` saturate.
pub fn first_integer(text: &str) -> Result<i64, AppError> {
    let m = INTEGER
        .find(text)
        .ok_or_else(|| AppError::InvalidCommandArgument(format!("no number in '{text}'")))?;
    let digits = m.as_str();
    Ok(digits.parse::<i64>().unwrap_or(if digits.starts_with('-') { i64::MIN } else { i64::MAX }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wake_phrases_win_over_everything() {
        assert_eq!(classify("Hey FRIDAY, what time is it?"), Intent::Wake);
        assert_eq!(classify("friday are you there"), Intent::Wake);
    }

    #[test]
    fn humor_before_time() {
        assert_eq!(classify("set humor to 60 this time"), Intent::SetHumor);
        assert_eq!(classify("SET HUMOR 10"), Intent::SetHumor);
    }

    #[test]
    fn time_before_weather() {
        assert_eq!(classify("what time does the weather change?"), Intent::Time);
    }

    #[test]
    fn date_before_weather_and_news() {
        assert_eq!(classify("what's the date"), Intent::Date);
        assert_eq!(classify("any weather news"), Intent::Weather);
        assert_eq!(classify("news please"), Intent::News);
    }

    #[test]
    fn substring_semantics_preserved() {
        // "update" contains "date", "overtime" contains "time".
        assert_eq!(classify("give me an update"), Intent::Date);
        assert_eq!(classify("I worked overtime"), Intent::Time);
        assert_eq!(classify("newsletter ideas"), Intent::News);
    }

    #[test]
    fn unmatched_goes_to_chat() {
        assert_eq!(classify("tell me a joke"), Intent::Chat);
        assert_eq!(classify(""), Intent::Chat);
    }

    #[test]
    fn exactly_one_route_decides() {
        // Several predicates match, classification still yields the earliest.
        let lowered = "time date weather news";
        let matching: Vec<Intent> = ROUTES.iter().filter(|(_, p)| p(lowered)).map(|(i, _)| *i).collect();
        assert_eq!(matching, vec![Intent::Time, Intent::Date, Intent::Weather, Intent::News]);
        assert_eq!(classify(lowered), Intent::Time);
    }

    #[test]
    fn first_integer_extraction() {
        assert_eq!(first_integer("set humor to 75").unwrap(), 75);
        assert_eq!(first_integer("set humor 30 or 40").unwrap(), 30);
        assert_eq!(first_integer("set humor -5").unwrap(), -5);
        assert_eq!(first_integer("set humor 99999999999999999999999").unwrap(), i64::MAX);
        assert!(matches!(first_integer("set humor high"), Err(AppError::InvalidCommandArgument(_))));
    }
}
