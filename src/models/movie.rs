use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::MovieId;

/// Distinguishes movie records from series normalized into the movie shape
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Movie,
    Tv,
}

/// A catalog item as returned by the listing, search, trending, detail and
/// recommendation endpoints. Series results reuse this shape with
/// `kind == Some(ContentKind::Tv)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    pub movie_id: MovieId,
    #[serde(default)]
    pub tmdb_id: Option<u64>,
    pub title: String,
    /// The server emits numeric years for movies and string years (possibly
    /// empty) for series; both decode to a non-empty string here.
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Relevance score attached by the recommendation endpoint
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, rename = "type")]
    pub kind: Option<ContentKind>,
}

impl MovieSummary {
    pub fn is_series(&self) -> bool {
        self.kind == Some(ContentKind::Tv)
    }
}

/// One page of the movie listing endpoint, with pagination metadata flattened
/// alongside the envelope
#[derive(Debug, Clone, Deserialize)]
pub struct MoviePage {
    pub status: String,
    #[serde(default)]
    pub data: Vec<MovieSummary>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub pages: u32,
}

fn default_page() -> u32 {
    1
}

/// Sort orders accepted by the movie listing endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Popularity,
    Latest,
    Rating,
    Votes,
}

impl Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortBy::Popularity => write!(f, "popularity"),
            SortBy::Latest => write!(f, "latest"),
            SortBy::Rating => write!(f, "rating"),
            SortBy::Votes => write!(f, "votes"),
        }
    }
}

/// Query parameters for paginated movie browsing
#[derive(Debug, Clone, Default)]
pub struct MovieFilters {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub min_rating: Option<f64>,
    pub sort_by: Option<SortBy>,
    /// Maximum runtime in minutes; items with unknown runtime are kept
    pub max_duration: Option<u32>,
}

impl MovieFilters {
    /// Renders the filters as query pairs, omitting unset fields
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(genre) = &self.genre {
            pairs.push(("genre", genre.clone()));
        }
        if let Some(year) = self.year {
            pairs.push(("year", year.to_string()));
        }
        if let Some(rating) = self.min_rating {
            pairs.push(("rating", rating.to_string()));
        }
        if let Some(sort_by) = self.sort_by {
            pairs.push(("sortBy", sort_by.to_string()));
        }
        if let Some(duration) = self.max_duration {
            pairs.push(("duration", duration.to_string()));
        }
        pairs
    }
}

/// Accepts a year encoded as a number, a string, or an empty string
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawYear {
        Number(f64),
        Text(String),
        Missing(Option<()>),
    }

    match RawYear::deserialize(deserializer)? {
        RawYear::Number(n) => Ok(Some(format!("{}", n as i64))),
        RawYear::Text(s) if !s.trim().is_empty() => Ok(Some(s.trim().to_string())),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_summary_numeric_year() {
        let movie: MovieSummary = serde_json::from_str(
            r#"{
                "movieId": 862,
                "tmdbId": 862,
                "title": "Toy Story",
                "year": 1995,
                "posterPath": "https://image.tmdb.org/t/p/w500/toy.jpg",
                "rating": 8.3,
                "genres": ["Animation", "Comedy"],
                "runtime": 81
            }"#,
        )
        .unwrap();

        assert_eq!(movie.movie_id, 862);
        assert_eq!(movie.year.as_deref(), Some("1995"));
        assert_eq!(movie.genres.len(), 2);
        assert_eq!(movie.kind, None);
        assert!(!movie.is_series());
    }

    #[test]
    fn test_series_summary_string_year_and_type() {
        let series: MovieSummary = serde_json::from_str(
            r#"{
                "movieId": 1399,
                "title": "Game of Thrones",
                "year": "2011",
                "rating": 8.4,
                "type": "tv"
            }"#,
        )
        .unwrap();

        assert_eq!(series.year.as_deref(), Some("2011"));
        assert!(series.is_series());
    }

    #[test]
    fn test_empty_year_decodes_to_none() {
        let series: MovieSummary =
            serde_json::from_str(r#"{"movieId": 7, "title": "Unknown", "year": ""}"#).unwrap();
        assert_eq!(series.year, None);
    }

    #[test]
    fn test_sparse_record_uses_defaults() {
        let movie: MovieSummary =
            serde_json::from_str(r#"{"movieId": 1, "title": "Bare"}"#).unwrap();
        assert_eq!(movie.rating, None);
        assert_eq!(movie.poster_path, None);
        assert!(movie.genres.is_empty());
        assert_eq!(movie.score, None);
    }

    #[test]
    fn test_movie_page_deserialization() {
        let page: MoviePage = serde_json::from_str(
            r#"{
                "status": "success",
                "data": [{"movieId": 1, "title": "One"}, {"movieId": 2, "title": "Two"}],
                "total": 41,
                "page": 2,
                "pages": 3
            }"#,
        )
        .unwrap();

        assert_eq!(page.data.len(), 2);
        assert_eq!(page.total, 41);
        assert_eq!(page.page, 2);
        assert_eq!(page.pages, 3);
    }

    #[test]
    fn test_filters_to_query_omits_unset() {
        let filters = MovieFilters {
            page: Some(3),
            genre: Some("Horror".to_string()),
            sort_by: Some(SortBy::Rating),
            ..Default::default()
        };

        let pairs = filters.to_query();
        assert_eq!(
            pairs,
            vec![
                ("page", "3".to_string()),
                ("genre", "Horror".to_string()),
                ("sortBy", "rating".to_string()),
            ]
        );
    }

    #[test]
    fn test_sort_by_display() {
        assert_eq!(SortBy::Popularity.to_string(), "popularity");
        assert_eq!(SortBy::Votes.to_string(), "votes");
    }
}
