/// Domain models for the application
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

/// Shown when the catalog flags an unknown identifier without a message.
pub const NOT_FOUND_FALLBACK: &str = "Asteroid not found";

/// Decorative image used when no picture of the day can be resolved.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://source.unsplash.com/featured/?asteroid,space";

/// How many identifiers the recent-search strip retains.
pub const RECENT_SEARCH_LIMIT: usize = 5;

/// A near-earth object record from the NeoWs lookup endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Asteroid {
    pub id: String,
    pub name: String,
    pub nasa_jpl_url: String,
    pub is_potentially_hazardous_asteroid: bool,
    pub estimated_diameter: Option<EstimatedDiameter>,
    #[serde(default)]
    pub close_approach_data: Vec<CloseApproach>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EstimatedDiameter {
    pub kilometers: DiameterRange,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

/// One close-approach event. Distances and velocities arrive as decimal
/// strings on the wire and are kept that way until display time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CloseApproach {
    pub close_approach_date: NaiveDate,
    pub relative_velocity: RelativeVelocity,
    pub miss_distance: MissDistance,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelativeVelocity {
    pub kilometers_per_hour: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MissDistance {
    pub kilometers: String,
}

impl CloseApproach {
    /// The approach date pinned to midnight UTC, the precision the feed gives us.
    pub fn instant(&self) -> DateTime<Utc> {
        self.close_approach_date.and_time(NaiveTime::MIN).and_utc()
    }
}

/// Lookup responses are either a full record or an error envelope with an
/// application-level code, both delivered on a successful transport.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NeoLookupResponse {
    Error(ErrorEnvelope),
    Record(Box<Asteroid>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    #[allow(dead_code)]
    pub code: serde_json::Value,
    pub error_message: Option<String>,
}

impl ErrorEnvelope {
    /// The server-supplied message, or a generic fallback when absent.
    pub fn message(&self) -> String {
        self.error_message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| NOT_FOUND_FALLBACK.to_string())
    }
}

/// First page of the NeoWs browse endpoint.
#[derive(Debug, Deserialize)]
pub struct BrowsePage {
    pub near_earth_objects: Vec<BrowseEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrowseEntry {
    pub id: String,
    pub name: String,
}

/// APOD media descriptor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApodMedia {
    pub media_type: String,
    pub url: Option<String>,
    pub title: Option<String>,
    pub explanation: Option<String>,
    pub date: Option<String>,
    pub copyright: Option<String>,
}

/// Metadata shown next to a resolved picture of the day.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDetails {
    pub title: String,
    pub explanation: String,
    pub date: String,
    pub copyright: String,
}

/// The decorative image attached to a record: either a resolved APOD
/// picture or the static placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayImage {
    Resolved { url: String, details: ImageDetails },
    Fallback,
}

impl DisplayImage {
    /// Classify an APOD response. Anything that is not an image with a URL
    /// falls back to the placeholder.
    pub fn from_apod(media: ApodMedia) -> Self {
        match (media.media_type.as_str(), media.url) {
            ("image", Some(url)) => DisplayImage::Resolved {
                url,
                details: ImageDetails {
                    title: media.title.unwrap_or_default(),
                    explanation: media.explanation.unwrap_or_default(),
                    date: media.date.unwrap_or_default(),
                    copyright: media.copyright.unwrap_or_else(|| "NASA".to_string()),
                },
            },
            _ => DisplayImage::Fallback,
        }
    }

    pub fn fallback() -> Self {
        DisplayImage::Fallback
    }

    pub fn url(&self) -> &str {
        match self {
            DisplayImage::Resolved { url, .. } => url,
            DisplayImage::Fallback => PLACEHOLDER_IMAGE_URL,
        }
    }
}

/// The approach event worth showing for a record, relative to `now`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApproachView<'a> {
    Upcoming {
        approach: &'a CloseApproach,
        days_until: i64,
    },
    Historical {
        approach: &'a CloseApproach,
    },
}

/// Pick the first approach strictly after `now`, or the final recorded one
/// when every event is in the past.
pub fn next_or_last_approach(
    approaches: &[CloseApproach],
    now: DateTime<Utc>,
) -> Option<ApproachView<'_>> {
    if let Some(next) = approaches.iter().find(|a| a.instant() > now) {
        let millis = (next.instant() - now).num_milliseconds();
        let days_until = (millis as f64 / 86_400_000.0).ceil() as i64;
        return Some(ApproachView::Upcoming {
            approach: next,
            days_until,
        });
    }
    approaches
        .last()
        .map(|approach| ApproachView::Historical { approach })
}

/// Session-scoped list of recently looked-up identifiers, most recent first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecentSearches {
    items: Vec<String>,
}

impl RecentSearches {
    /// Move `id` to the front, dropping any older occurrence and anything
    /// beyond the retention limit.
    pub fn record(&mut self, id: &str) {
        self.items.retain(|existing| existing != id);
        self.items.insert(0, id.to_string());
        self.items.truncate(RECENT_SEARCH_LIMIT);
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }
}
