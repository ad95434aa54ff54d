use chrono::{DateTime, Days, FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};

/// Where a post's publish date falls relative to the current calendar day.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Debug,
    strum::Display,
    strum::EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DateCategory {
    Today,
    Yesterday,
    Older,
    Future,
}

/// Buckets `published` by calendar day, using the offset carried by `now`.
///
/// Older means two or more days before today.
pub fn classify<Tz: TimeZone>(published: &DateTime<Tz>, now: &DateTime<FixedOffset>) -> DateCategory {
    let today = now.date_naive();
    let day = published.with_timezone(&now.timezone()).date_naive();
    let yesterday = today.checked_sub_days(Days::new(1));
    if day == today {
        DateCategory::Today
    } else if Some(day) == yesterday {
        DateCategory::Yesterday
    } else if day < today {
        DateCategory::Older
    } else {
        DateCategory::Future
    }
}

/// Hours elapsed since `published`; negative for posts scheduled in the future.
pub fn age_hours<Tz: TimeZone>(published: &DateTime<Tz>, now: &DateTime<FixedOffset>) -> f64 {
    let elapsed = now.signed_duration_since(published.with_timezone(&now.timezone()));
    elapsed.num_milliseconds() as f64 / 3_600_000.
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset};

    use super::{age_hours, classify, DateCategory::*};

    fn t(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn day_boundaries() {
        let now = t("2026-10-19T10:00:00+03:00");
        assert_eq!(classify(&t("2026-10-19T00:00:00+03:00"), &now), Today);
        assert_eq!(classify(&t("2026-10-19T23:59:59+03:00"), &now), Today);
        assert_eq!(classify(&t("2026-10-18T23:59:59+03:00"), &now), Yesterday);
        assert_eq!(classify(&t("2026-10-18T00:00:00+03:00"), &now), Yesterday);
        assert_eq!(classify(&t("2026-10-17T23:59:59+03:00"), &now), Older);
        assert_eq!(classify(&t("2025-01-01T12:00:00+03:00"), &now), Older);
        assert_eq!(classify(&t("2026-10-20T00:00:00+03:00"), &now), Future);
    }

    #[test]
    fn converts_into_the_current_offset() {
        let now = t("2026-10-19T01:00:00+03:00");
        // 22:30 UTC on the 18th is 01:30 on the 19th at +03:00
        assert_eq!(classify(&t("2026-10-18T22:30:00Z"), &now), Today);
        // 20:59 UTC on the 18th is still the 18th at +03:00
        assert_eq!(classify(&t("2026-10-18T20:59:00Z"), &now), Yesterday);
        assert_eq!(classify(&t("2026-10-16T21:00:00-08:00"), &now), Older);
    }

    #[test]
    fn month_and_year_rollover() {
        let now = t("2026-01-01T08:00:00+00:00");
        assert_eq!(classify(&t("2025-12-31T08:00:00+00:00"), &now), Yesterday);
        assert_eq!(classify(&t("2025-12-30T23:00:00+00:00"), &now), Older);
        let now = t("2024-03-01T08:00:00+00:00");
        assert_eq!(classify(&t("2024-02-29T08:00:00+00:00"), &now), Yesterday);
    }

    #[test]
    fn display_names() {
        assert_eq!(Today.to_string(), "today");
        assert_eq!("older".parse(), Ok(Older));
    }

    #[test]
    fn ages() {
        let now = t("2026-10-19T10:00:00+03:00");
        assert_eq!(age_hours(&t("2026-10-19T05:30:00+03:00"), &now), 4.5);
        assert_eq!(age_hours(&t("2026-10-19T07:00:00Z"), &now), 0.);
        assert!(age_hours(&t("2026-10-19T11:00:00+03:00"), &now) < 0.);
    }
}
