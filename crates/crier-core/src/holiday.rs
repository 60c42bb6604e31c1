//! Holiday calendar resolution
//!
//! Evaluates configured holiday rules (fixed dates and Nth/last weekday
//! patterns) against a calendar date. Rules are checked in configuration
//! order and the first match wins.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Tone tag that steers the prompt wording for a holiday post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GreetingTone {
    /// Festive occasions (New Year's, Christmas, Thanksgiving)
    #[default]
    Celebratory,
    /// Days of remembrance and recognition (Memorial Day, Veterans Day)
    Commemorative,
}

impl GreetingTone {
    /// Verb used when framing the holiday in a generation prompt
    pub fn verb(&self) -> &'static str {
        match self {
            GreetingTone::Celebratory => "celebrates",
            GreetingTone::Commemorative => "honors",
        }
    }
}

/// The recurrence pattern of a holiday rule
///
/// Each variant carries exactly the fields it needs, so a rule can never
/// hold both a fixed day and a weekday/ordinal pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleKind {
    /// Same month and day every year (e.g. December 25)
    FixedDate { month: u32, day: u32 },
    /// The Nth occurrence of a weekday in a month (e.g. 4th Thursday of November)
    NthWeekday {
        month: u32,
        weekday: Weekday,
        ordinal: u32,
    },
    /// The final occurrence of a weekday in a month (e.g. last Monday of May)
    LastWeekday { month: u32, weekday: Weekday },
}

impl RuleKind {
    /// Computes the date this rule falls on in the given year
    ///
    /// Returns `None` when the rule has no occurrence that year: a fixed
    /// February 29 in a non-leap year, or an ordinal beyond the number of
    /// occurrences of the weekday in the month. Evaluation never looks at
    /// adjacent years.
    pub fn date_in_year(&self, year: i32) -> Option<NaiveDate> {
        match *self {
            RuleKind::FixedDate { month, day } => NaiveDate::from_ymd_opt(year, month, day),
            RuleKind::NthWeekday {
                month,
                weekday,
                ordinal,
            } => {
                let first = first_weekday_of_month(year, month, weekday)?;
                let candidate = first + Duration::days(7 * (ordinal as i64 - 1));
                (candidate.month() == month).then_some(candidate)
            }
            RuleKind::LastWeekday { month, weekday } => {
                let mut day = last_day_of_month(year, month)?;
                while day.weekday() != weekday {
                    day = day.pred_opt()?;
                }
                Some(day)
            }
        }
    }

    /// Checks field ranges; the recurrence math itself tolerates anything
    /// this accepts.
    pub fn validate(&self) -> Result<(), String> {
        let month = match *self {
            RuleKind::FixedDate { month, day } => {
                if !(1..=31).contains(&day) {
                    return Err(format!("day {} out of range 1-31", day));
                }
                month
            }
            RuleKind::NthWeekday { month, ordinal, .. } => {
                // Ordinal 5 is legal; months without a 5th occurrence simply
                // produce no match that year.
                if !(1..=5).contains(&ordinal) {
                    return Err(format!("ordinal {} out of range 1-5", ordinal));
                }
                month
            }
            RuleKind::LastWeekday { month, .. } => month,
        };
        if !(1..=12).contains(&month) {
            return Err(format!("month {} out of range 1-12", month));
        }
        Ok(())
    }
}

/// A named holiday with its recurrence rule and themed content hints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRule {
    /// Display name, also used in generated hashtags
    pub name: String,
    /// Recurrence pattern
    #[serde(flatten)]
    pub rule: RuleKind,
    /// Hashtags specific to this holiday
    #[serde(default)]
    pub hashtags: Vec<String>,
    /// Tone tag for prompt construction
    #[serde(default)]
    pub tone: GreetingTone,
}

/// The outcome of resolving a date against the calendar: one matched rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHoliday {
    /// The date that matched
    pub date: NaiveDate,
    /// Holiday name from the matching rule
    pub name: String,
    /// Tone tag from the matching rule
    pub tone: GreetingTone,
    /// Hashtags from the matching rule (may be empty for a matched holiday)
    pub hashtags: Vec<String>,
}

/// Ordered set of holiday rules
///
/// Order matters: when two rules land on the same calendar date, the rule
/// listed first wins.
#[derive(Debug, Clone)]
pub struct HolidayCalendar {
    rules: Vec<HolidayRule>,
}

impl HolidayCalendar {
    /// Creates a calendar from rules in priority order
    pub fn new(rules: Vec<HolidayRule>) -> Self {
        Self { rules }
    }

    /// Returns the configured rules in priority order
    pub fn rules(&self) -> &[HolidayRule] {
        &self.rules
    }

    /// Resolves a date to at most one holiday
    ///
    /// Returns `None` for an ordinary day. A matched rule with an empty
    /// hashtag list still yields `Some`, so callers can distinguish
    /// "no holiday" from "holiday without tags".
    pub fn resolve(&self, date: NaiveDate) -> Option<ResolvedHoliday> {
        self.rules
            .iter()
            .find(|rule| rule.rule.date_in_year(date.year()) == Some(date))
            .map(|rule| ResolvedHoliday {
                date,
                name: rule.name.clone(),
                tone: rule.tone,
                hashtags: rule.hashtags.clone(),
            })
    }
}

/// First occurrence of `weekday` within days 1..=7 of the month
fn first_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = (7 + weekday.num_days_from_monday() as i64
        - first.weekday().num_days_from_monday() as i64)
        % 7;
    Some(first + Duration::days(offset))
}

/// Last calendar day of the month
fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    next_month_first.pred_opt()
}
