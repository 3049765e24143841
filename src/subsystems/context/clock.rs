//! Wall-clock context.

use chrono::{DateTime, Local, TimeZone, Timelike};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeContext {
    /// e.g. `09:05 PM`
    pub time: String,
    /// e.g. `October 19, 2026`
    pub date: String,
    /// e.g. `Monday`
    pub day_of_week: String,
    /// 0–23
    pub hour: u32,
}

impl TimeContext {
    /// `Good morning` (5–11), `Good afternoon` (12–16), else `Good evening`.
    pub fn salutation(&self) -> &'static str {
        match self.hour {
            5..=11 => "Good morning",
            12..=16 => "Good afternoon",
            _ => "Good evening",
        }
    }
}

pub fn get_time_context() -> TimeContext {
    time_context_at(&Local::now())
}

pub fn time_context_at<Tz: TimeZone>(now: &DateTime<Tz>) -> TimeContext
where
    Tz::Offset: std::fmt::Display,
{
    TimeContext {
        time: now.format("%I:%M %p").to_string(),
        date: now.format("%B %d, %Y").to_string(),
        day_of_week: now.format("%A").to_string(),
        hour: now.hour(),
    }
}
