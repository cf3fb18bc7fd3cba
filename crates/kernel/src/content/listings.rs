//! Events and initiatives.
//!
//! These listings are not yet modelled in the content store, so the site
//! ships a fixed set. Titles and excerpts are not localized.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::Slug;

const EVENT_PLACEHOLDER: &str = "/static/images/placeholder-event.svg";
const INITIATIVE_PLACEHOLDER: &str = "/static/images/placeholder-initiative.svg";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLocation {
    pub name: String,
    pub address: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub slug: Slug,
    /// Site-relative image path.
    pub image: String,
    pub excerpt: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub location: EventLocation,
}

impl Event {
    /// An event is upcoming until it has ended.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.end >= now
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitiativeStatus {
    Planned,
    InProgress,
    Completed,
    Ongoing,
}

impl InitiativeStatus {
    /// Key under `initiatives.status` in the translation tables.
    pub fn translation_key(self) -> &'static str {
        match self {
            Self::Planned => "initiatives.status.planned",
            Self::InProgress => "initiatives.status.in_progress",
            Self::Completed => "initiatives.status.completed",
            Self::Ongoing => "initiatives.status.ongoing",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Planned => "status-planned",
            Self::InProgress => "status-in-progress",
            Self::Completed => "status-completed",
            Self::Ongoing => "status-ongoing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initiative {
    pub id: String,
    pub title: String,
    pub slug: Slug,
    pub image: String,
    pub excerpt: String,
    pub status: InitiativeStatus,
}

fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap_or_default()
}

fn event(
    id: &str,
    title: &str,
    slug: &str,
    excerpt: &str,
    (start, end): (DateTime<Utc>, DateTime<Utc>),
    (name, address): (&str, &str),
) -> Event {
    Event {
        id: id.to_string(),
        title: title.to_string(),
        slug: Slug::new(slug),
        image: EVENT_PLACEHOLDER.to_string(),
        excerpt: excerpt.to_string(),
        start,
        end,
        location: EventLocation {
            name: name.to_string(),
            address: address.to_string(),
            city: "El Attaouia".to_string(),
        },
    }
}

/// The association's event calendar, in start order.
pub fn events() -> Vec<Event> {
    vec![
        event(
            "1",
            "Annual Charity Gala",
            "annual-charity-gala",
            "Join us for an evening of celebration and fundraising to support our community initiatives.",
            (utc(2025, 3, 15, 18), utc(2025, 3, 15, 22)),
            ("Grand Hall", "123 Main Street"),
        ),
        event(
            "2",
            "Community Clean-up Day",
            "community-cleanup-day",
            "Help beautify our town by participating in our quarterly clean-up event.",
            (utc(2025, 3, 22, 9), utc(2025, 3, 22, 13)),
            ("Town Center", "Central Plaza"),
        ),
        event(
            "3",
            "Youth Leadership Workshop",
            "youth-leadership-workshop",
            "A workshop designed to develop leadership skills in young people aged 15-21.",
            (utc(2025, 4, 5, 10), utc(2025, 4, 5, 16)),
            ("Community Center", "45 Education Ave"),
        ),
    ]
}

/// Split events into (upcoming, past) relative to `now`.
///
/// Upcoming events keep start order; past events are most recent first.
pub fn split_events(events: Vec<Event>, now: DateTime<Utc>) -> (Vec<Event>, Vec<Event>) {
    let (mut upcoming, mut past): (Vec<_>, Vec<_>) =
        events.into_iter().partition(|e| e.is_upcoming(now));
    upcoming.sort_by_key(|e| e.start);
    past.sort_by_key(|e| std::cmp::Reverse(e.start));
    (upcoming, past)
}

pub fn initiatives() -> Vec<Initiative> {
    let initiative = |id: &str, title: &str, slug: &str, excerpt: &str, status| Initiative {
        id: id.to_string(),
        title: title.to_string(),
        slug: Slug::new(slug),
        image: INITIATIVE_PLACEHOLDER.to_string(),
        excerpt: excerpt.to_string(),
        status,
    };

    vec![
        initiative(
            "1",
            "Community Garden Project",
            "community-garden-project",
            "Creating sustainable urban gardens to promote healthy eating and community engagement.",
            InitiativeStatus::InProgress,
        ),
        initiative(
            "2",
            "Youth Skills Workshop",
            "youth-skills-workshop",
            "Training workshops teaching practical skills to young people to enhance employability.",
            InitiativeStatus::Ongoing,
        ),
        initiative(
            "3",
            "Clean Water Initiative",
            "clean-water-initiative",
            "Improving access to clean drinking water in underserved areas of our community.",
            InitiativeStatus::Completed,
        ),
        initiative(
            "4",
            "Digital Literacy Program",
            "digital-literacy-program",
            "Teaching essential computer skills to help bridge the digital divide.",
            InitiativeStatus::Planned,
        ),
    ]
}
