use std::{fmt::Display, str::FromStr, time::Duration};

use anyhow::{bail, Context};
use chrono::{DateTime, FixedOffset, NaiveTime, TimeZone};
use match_posts_utils::regex;

/// Kick-off time as written in a live post, e.g. `21:45` or `9:45 PM`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct KickoffTime(NaiveTime);

impl KickoffTime {
    pub fn get(self) -> NaiveTime {
        self.0
    }
}

impl FromStr for KickoffTime {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let captures = regex!(r"(\d{1,2}):(\d{2})")
            .captures(s)
            .with_context(|| format!("No hh:mm in {s:?}"))?;
        let mut hour: u32 = captures[1].parse()?;
        let minute: u32 = captures[2].parse()?;
        let lower = s.to_lowercase();
        if lower.contains("pm") && hour != 12 {
            hour += 12;
        } else if lower.contains("am") && hour == 12 {
            hour = 0;
        }
        match NaiveTime::from_hms_opt(hour, minute, 0) {
            Some(time) => Ok(Self(time)),
            None => bail!("Time out of range: {s:?}"),
        }
    }
}

impl Display for KickoffTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// Whether a match announced with `time_text` has ended by `now`.
///
/// Placeholders (`TBD`, `انتهت`) and unreadable times count as finished.
/// Otherwise the kick-off is placed on the day the post was published and the
/// match is over once `duration` has passed.
pub fn is_match_finished<Tz: TimeZone>(
    time_text: &str,
    published: &DateTime<Tz>,
    now: &DateTime<FixedOffset>,
    duration: Duration,
) -> bool {
    let time_text = time_text.trim();
    if time_text.is_empty() || time_text == "TBD" || time_text == "انتهت" {
        return true;
    }
    let Ok(kickoff) = time_text.parse::<KickoffTime>() else {
        return true;
    };
    let day = published.with_timezone(&now.timezone()).date_naive();
    let Some(kickoff) = now
        .timezone()
        .from_local_datetime(&day.and_time(kickoff.get()))
        .single()
    else {
        return true;
    };
    let Some(end) = chrono::Duration::from_std(duration)
        .ok()
        .and_then(|duration| kickoff.checked_add_signed(duration))
    else {
        return true;
    };
    *now > end
}
