use serde::{Deserialize, Serialize};

/// A search hit from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// Opaque catalog key (an IMDb id for OMDb, `fallback*` for synthesized rows).
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: Option<String>,
    /// Comma-separated genre list as delivered upstream.
    pub genre: Option<String>,
    pub runtime: Option<String>,
    pub rating: Option<String>,
    pub media_type: String,
}

/// Full record for the detail panel. Fetched per view, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub summary: MovieSummary,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub language: Option<String>,
    pub plot: Option<String>,
    pub director: Option<String>,
    pub writers: Vec<String>,
    pub actors: Vec<String>,
    pub country: Option<String>,
    pub awards: Option<String>,
    pub box_office: Option<String>,
    pub website: Option<String>,
    pub ratings: Vec<Rating>,
}

/// One review aggregator score, e.g. `("Rotten Tomatoes", "85%")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub source: String,
    pub value: String,
}

impl Rating {
    pub fn new(source: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            value: value.into(),
        }
    }
}

/// Split an upstream comma list ("A, B,C") into trimmed, non-empty items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_trims_and_drops_empty() {
        assert_eq!(
            split_list("Chris Pratt, Zoe Saldaña,Dave Bautista, "),
            vec!["Chris Pratt", "Zoe Saldaña", "Dave Bautista"]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_detail_serializes_flat() {
        let detail = MovieDetail {
            summary: MovieSummary {
                id: "tt1".into(),
                title: "T".into(),
                year: "2020".into(),
                poster_url: None,
                genre: None,
                runtime: None,
                rating: None,
                media_type: "movie".into(),
            },
            rated: None,
            released: None,
            language: None,
            plot: None,
            director: None,
            writers: vec![],
            actors: vec![],
            country: None,
            awards: None,
            box_office: None,
            website: None,
            ratings: vec![Rating::new("Rotten Tomatoes", "85%")],
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["id"], "tt1");
        assert_eq!(json["ratings"][0]["source"], "Rotten Tomatoes");
    }
}
