//! Locale-aware date and time formatting.
//!
//! Mirrors the long forms browsers produce for `en-US`, `fr-FR` and
//! `ar-MA` (Latin digits, Moroccan month names).

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};

use super::Locale;

const EN_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const FR_MONTHS: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
    "octobre", "novembre", "décembre",
];

const AR_MONTHS: [&str; 12] = [
    "يناير", "فبراير", "مارس", "أبريل", "ماي", "يونيو", "يوليوز", "غشت", "شتنبر", "أكتوبر",
    "نونبر", "دجنبر",
];

fn month_name(locale: Locale, month0: u32) -> &'static str {
    let idx = (month0 as usize).min(11);
    match locale {
        Locale::En => EN_MONTHS[idx],
        Locale::Fr => FR_MONTHS[idx],
        Locale::Ar => AR_MONTHS[idx],
    }
}

fn weekday_name(locale: Locale, weekday: Weekday) -> &'static str {
    match (locale, weekday) {
        (Locale::En, Weekday::Mon) => "Monday",
        (Locale::En, Weekday::Tue) => "Tuesday",
        (Locale::En, Weekday::Wed) => "Wednesday",
        (Locale::En, Weekday::Thu) => "Thursday",
        (Locale::En, Weekday::Fri) => "Friday",
        (Locale::En, Weekday::Sat) => "Saturday",
        (Locale::En, Weekday::Sun) => "Sunday",
        (Locale::Fr, Weekday::Mon) => "lundi",
        (Locale::Fr, Weekday::Tue) => "mardi",
        (Locale::Fr, Weekday::Wed) => "mercredi",
        (Locale::Fr, Weekday::Thu) => "jeudi",
        (Locale::Fr, Weekday::Fri) => "vendredi",
        (Locale::Fr, Weekday::Sat) => "samedi",
        (Locale::Fr, Weekday::Sun) => "dimanche",
        (Locale::Ar, Weekday::Mon) => "الاثنين",
        (Locale::Ar, Weekday::Tue) => "الثلاثاء",
        (Locale::Ar, Weekday::Wed) => "الأربعاء",
        (Locale::Ar, Weekday::Thu) => "الخميس",
        (Locale::Ar, Weekday::Fri) => "الجمعة",
        (Locale::Ar, Weekday::Sat) => "السبت",
        (Locale::Ar, Weekday::Sun) => "الأحد",
    }
}

/// Long date: "March 15, 2025", "15 mars 2025", "15 مارس 2025".
pub fn long_date(date: &DateTime<Utc>, locale: Locale) -> String {
    let month = month_name(locale, date.month0());
    match locale {
        Locale::En => format!("{month} {}, {}", date.day(), date.year()),
        Locale::Fr | Locale::Ar => format!("{} {month} {}", date.day(), date.year()),
    }
}

/// Long date with weekday: "Saturday, March 15, 2025", "samedi 15 mars 2025".
pub fn long_date_with_weekday(date: &DateTime<Utc>, locale: Locale) -> String {
    let weekday = weekday_name(locale, date.weekday());
    let day = long_date(date, locale);
    match locale {
        Locale::En => format!("{weekday}, {day}"),
        Locale::Fr => format!("{weekday} {day}"),
        Locale::Ar => format!("{weekday}، {day}"),
    }
}

/// Two-digit time: "06:00 PM" for English, "18:00" otherwise.
pub fn short_time(date: &DateTime<Utc>, locale: Locale) -> String {
    match locale {
        Locale::En => {
            let (pm, hour) = date.hour12();
            let suffix = if pm { "PM" } else { "AM" };
            format!("{hour:02}:{:02} {suffix}", date.minute())
        }
        Locale::Fr | Locale::Ar => format!("{:02}:{:02}", date.hour(), date.minute()),
    }
}
