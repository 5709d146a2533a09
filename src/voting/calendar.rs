use crate::{util::settings::Settings, Status};
use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Office calendar deciding on which weekdays entries are accepted.
#[derive(Clone, Debug)]
pub struct VotingCalendar {
    timezone: Tz,
    voting_days: HashSet<Weekday>,
}

impl VotingCalendar {
    pub fn new(timezone: Tz, voting_days: impl IntoIterator<Item = Weekday>) -> Self {
        VotingCalendar {
            timezone,
            voting_days: voting_days.into_iter().collect(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, Status> {
        Ok(VotingCalendar::new(
            settings.timezone()?,
            settings.weekdays()?,
        ))
    }

    /// Returns true if `now` falls on a voting weekday in the office
    /// timezone. The conversion applies the zone's DST rules at `now`.
    pub fn is_voting_day(&self, now: DateTime<Utc>) -> bool {
        let office_time = now.with_timezone(&self.timezone);
        self.voting_days.contains(&office_time.weekday())
    }

    pub fn eligibility(&self, now: DateTime<Utc>, last_entry: DateTime<Utc>) -> Eligibility {
        Eligibility {
            voting_day: self.is_voting_day(now),
            can_enter: can_enter_today(now, last_entry),
        }
    }
}

/// Returns true if the last entry happened on an earlier UTC calendar date
/// than `now`.
pub fn can_enter_today(now: DateTime<Utc>, last_entry: DateTime<Utc>) -> bool {
    last_entry.date_naive() <= (now - Duration::days(1)).date_naive()
}

/// Last entry assumed for clients that carry no entry record.
pub fn default_last_entry(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(1)
}

/// Outcome of both entry checks. Each check is kept separately so callers
/// can report every reason an entry is refused.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Eligibility {
    pub voting_day: bool,
    pub can_enter: bool,
}

impl Eligibility {
    pub fn is_allowed(&self) -> bool {
        self.voting_day && self.can_enter
    }

    /// The single reason shown to the user. Not being a voting day takes
    /// precedence over the per-client throttle.
    pub fn denial(&self) -> Option<Denial> {
        self.denials().into_iter().next()
    }

    pub fn denials(&self) -> Vec<Denial> {
        let mut denials = vec![];
        if !self.voting_day {
            denials.push(Denial::NotVotingDay);
        }
        if !self.can_enter {
            denials.push(Denial::AlreadyEntered);
        }
        denials
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Denial {
    NotVotingDay,
    AlreadyEntered,
}

impl Denial {
    pub fn message(&self) -> &'static str {
        match self {
            Denial::NotVotingDay => "No voting or new entries are allowed today!",
            Denial::AlreadyEntered => "You have already submitted a title or cast a vote for the day! Come back the next working day!",
        }
    }
}
