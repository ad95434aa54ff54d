use anyhow::Context;
use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, Timelike, Utc};

/// Current time in the configured offset, or in the machine's local offset.
pub fn now_in(offset_minutes: Option<i32>) -> anyhow::Result<DateTime<FixedOffset>> {
    match offset_minutes {
        Some(minutes) => {
            let offset = FixedOffset::east_opt(minutes * 60)
                .with_context(|| format!("UTC offset out of range: {minutes} minutes"))?;
            Ok(Utc::now().with_timezone(&offset))
        }
        None => Ok(Local::now().fixed_offset()),
    }
}

const ARABIC_MONTHS: [&str; 12] = [
    "يناير",
    "فبراير",
    "مارس",
    "أبريل",
    "مايو",
    "يونيو",
    "يوليو",
    "أغسطس",
    "سبتمبر",
    "أكتوبر",
    "نوفمبر",
    "ديسمبر",
];

/// Replaces ASCII digits with Arabic-Indic ones.
pub fn arabic_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

/// `19 October 2026` rendered the way Egyptian Arabic locales print a long date.
pub fn arabic_long_date(date: NaiveDate) -> String {
    let month = ARABIC_MONTHS[date.month0() as usize];
    arabic_digits(&format!("{} {month} {}", date.day(), date.year()))
}

/// Numeric `d/m/yyyy`.
pub fn arabic_short_date(date: NaiveDate) -> String {
    arabic_digits(&format!("{}/{}/{}", date.day(), date.month(), date.year()))
}

/// 12-hour clock with the Arabic AM/PM markers (`ص` / `م`).
pub fn arabic_time<T: Timelike>(time: &T) -> String {
    let (pm, hour) = time.hour12();
    let marker = if pm { "م" } else { "ص" };
    arabic_digits(&format!(
        "{hour}:{:02}:{:02} {marker}",
        time.minute(),
        time.second()
    ))
}
