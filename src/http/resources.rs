use crate::voting::VotingManager;
use chrono::{DateTime, SecondsFormat, Utc};
use std::{convert::Infallible, sync::Arc};
use warp::{self, Filter};

/// Cookie holding the UTC time of the client's last vote or new title.
pub const LAST_ENTRY_COOKIE: &str = "last_entry_utc";

const LAST_ENTRY_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

pub fn with_manager(
    manager: Arc<VotingManager>,
) -> impl Filter<Extract = (Arc<VotingManager>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&manager))
}

/// Extracts the client's last entry time. A missing or unreadable cookie
/// yields `None`.
pub fn with_last_entry(
) -> impl Filter<Extract = (Option<DateTime<Utc>>,), Error = Infallible> + Clone {
    warp::cookie::optional::<String>(LAST_ENTRY_COOKIE)
        .map(|cookie: Option<String>| cookie.as_deref().and_then(parse_last_entry))
}

pub fn parse_last_entry(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|time| time.with_timezone(&Utc))
}

/// `Set-Cookie` value recording an entry made at `now`.
pub fn last_entry_cookie(now: DateTime<Utc>) -> String {
    format!(
        "{LAST_ENTRY_COOKIE}={}; Max-Age={LAST_ENTRY_MAX_AGE_SECS}; HttpOnly; Path=/",
        now.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn cookie_round_trips_entry_time() {
        let now = Utc.with_ymd_and_hms(2024, 6, 11, 12, 30, 5).unwrap();
        let cookie = last_entry_cookie(now);

        assert_eq!(
            cookie,
            "last_entry_utc=2024-06-11T12:30:05Z; Max-Age=604800; HttpOnly; Path=/"
        );
        let value = cookie
            .split(';')
            .next()
            .and_then(|pair| pair.split_once('='))
            .map(|(_, value)| value)
            .unwrap();
        assert_eq!(parse_last_entry(value), Some(now));
    }

    #[test]
    fn offset_times_normalized_to_utc() {
        assert_eq!(
            parse_last_entry("2024-06-11T07:00:00-05:00"),
            Some(Utc.with_ymd_and_hms(2024, 6, 11, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn garbage_is_ignored() {
        assert_eq!(parse_last_entry("yesterday"), None);
        assert_eq!(parse_last_entry(""), None);
    }
}
