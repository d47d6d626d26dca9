use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::models::MovieSummary;

/// Detail payload for a series: the show itself plus related titles,
/// both normalized into the movie record shape
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesDetail {
    pub details: MovieSummary,
    #[serde(default)]
    pub recommendations: Vec<MovieSummary>,
}

/// One episode from the season listing endpoint.
///
/// Unlike catalog records, episode fields come over the wire in snake_case.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Episode {
    pub episode_number: u32,
    pub name: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub still_path: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub air_date: Option<NaiveDate>,
}

/// Accepts an ISO date, an empty string, or null
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()))
}
