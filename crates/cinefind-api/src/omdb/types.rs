use serde::{Deserialize, Deserializer};

use cinefind_core::models::{split_list, MovieDetail, MovieSummary, Rating};

/// OMDb's placeholder for "no value".
const NA: &str = "N/A";

/// Map `"N/A"`, empty strings and `null` to `None`.
fn na_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != NA))
}

fn default_media_type() -> String {
    "movie".to_string()
}

// ── Envelope ────────────────────────────────────────────────────

/// Every OMDb body carries `Response: "True" | "False"`.
#[derive(Debug, Deserialize)]
pub struct OmdbEnvelope {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl OmdbEnvelope {
    pub fn is_success(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }
}

// ── Search (`?s=`) ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    pub search: Vec<OmdbSearchItem>,
    #[serde(rename = "totalResults", default, deserialize_with = "na_as_none")]
    pub total_results: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OmdbSearchItem {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type", default = "default_media_type")]
    pub media_type: String,
    #[serde(rename = "Poster", default, deserialize_with = "na_as_none")]
    pub poster: Option<String>,
}

// ── Detail (`?i=`) ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OmdbTitle {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type", default = "default_media_type")]
    pub media_type: String,
    #[serde(rename = "Poster", default, deserialize_with = "na_as_none")]
    pub poster: Option<String>,
    #[serde(rename = "Rated", default, deserialize_with = "na_as_none")]
    pub rated: Option<String>,
    #[serde(rename = "Released", default, deserialize_with = "na_as_none")]
    pub released: Option<String>,
    #[serde(rename = "Runtime", default, deserialize_with = "na_as_none")]
    pub runtime: Option<String>,
    #[serde(rename = "Genre", default, deserialize_with = "na_as_none")]
    pub genre: Option<String>,
    #[serde(rename = "Director", default, deserialize_with = "na_as_none")]
    pub director: Option<String>,
    #[serde(rename = "Writer", default, deserialize_with = "na_as_none")]
    pub writer: Option<String>,
    #[serde(rename = "Actors", default, deserialize_with = "na_as_none")]
    pub actors: Option<String>,
    #[serde(rename = "Plot", default, deserialize_with = "na_as_none")]
    pub plot: Option<String>,
    #[serde(rename = "Language", default, deserialize_with = "na_as_none")]
    pub language: Option<String>,
    #[serde(rename = "Country", default, deserialize_with = "na_as_none")]
    pub country: Option<String>,
    #[serde(rename = "Awards", default, deserialize_with = "na_as_none")]
    pub awards: Option<String>,
    #[serde(rename = "BoxOffice", default, deserialize_with = "na_as_none")]
    pub box_office: Option<String>,
    #[serde(rename = "Website", default, deserialize_with = "na_as_none")]
    pub website: Option<String>,
    #[serde(rename = "imdbRating", default, deserialize_with = "na_as_none")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Ratings", default)]
    pub ratings: Vec<OmdbRating>,
}

#[derive(Debug, Deserialize)]
pub struct OmdbRating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

// ── Conversions to core models ──────────────────────────────────

impl OmdbSearchItem {
    pub fn into_summary(self) -> MovieSummary {
        MovieSummary {
            id: self.imdb_id,
            title: self.title,
            year: self.year,
            poster_url: self.poster,
            genre: None,
            runtime: None,
            rating: None,
            media_type: self.media_type,
        }
    }
}

impl OmdbTitle {
    pub fn into_detail(self) -> MovieDetail {
        MovieDetail {
            summary: MovieSummary {
                id: self.imdb_id,
                title: self.title,
                year: self.year,
                poster_url: self.poster,
                genre: self.genre,
                runtime: self.runtime,
                rating: self.imdb_rating,
                media_type: self.media_type,
            },
            rated: self.rated,
            released: self.released,
            language: self.language,
            plot: self.plot,
            director: self.director,
            writers: self.writer.as_deref().map(split_list).unwrap_or_default(),
            actors: self.actors.as_deref().map(split_list).unwrap_or_default(),
            country: self.country,
            awards: self.awards,
            box_office: self.box_office,
            website: self.website,
            ratings: self
                .ratings
                .into_iter()
                .filter(|r| r.value.trim() != NA)
                .map(|r| Rating::new(r.source, r.value))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_search_response() {
        let json = r#"{
            "Search": [
                {
                    "Title": "Batman Begins",
                    "Year": "2005",
                    "imdbID": "tt0372784",
                    "Type": "movie",
                    "Poster": "https://m.media-amazon.com/images/M/batman.jpg"
                },
                {
                    "Title": "Batman: The Animated Series",
                    "Year": "1992–1995",
                    "imdbID": "tt0103359",
                    "Type": "series",
                    "Poster": "N/A"
                }
            ],
            "totalResults": "612",
            "Response": "True"
        }"#;

        let envelope: OmdbEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.is_success());

        let resp: OmdbSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.total_results.as_deref(), Some("612"));
        let movies: Vec<_> = resp.search.into_iter().map(|i| i.into_summary()).collect();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].id, "tt0372784");
        assert!(movies[0].poster_url.is_some());
        assert_eq!(movies[1].media_type, "series");
        assert!(movies[1].poster_url.is_none());
        assert!(movies[1].rating.is_none());
    }

    #[test]
    fn test_deserialize_not_found_envelope() {
        let json = r#"{"Response":"False","Error":"Movie not found!"}"#;
        let envelope: OmdbEnvelope = serde_json::from_str(json).unwrap();
        assert!(!envelope.is_success());
        assert_eq!(envelope.error.as_deref(), Some("Movie not found!"));
    }

    #[test]
    fn test_deserialize_title() {
        let json = r#"{
            "Title": "Guardians of the Galaxy Vol. 2",
            "Year": "2017",
            "Rated": "PG-13",
            "Released": "05 May 2017",
            "Runtime": "136 min",
            "Genre": "Action, Adventure, Comedy",
            "Director": "James Gunn",
            "Writer": "James Gunn, Dan Abnett, Andy Lanning, Steve Englehart",
            "Actors": "Chris Pratt, Zoe Saldana, Dave Bautista",
            "Plot": "The Guardians struggle to keep together as a team.",
            "Language": "English",
            "Country": "United States",
            "Awards": "Nominated for 1 Oscar. 15 wins & 60 nominations total",
            "Poster": "https://m.media-amazon.com/images/M/gotg.jpg",
            "Ratings": [
                {"Source": "Internet Movie Database", "Value": "7.6/10"},
                {"Source": "Rotten Tomatoes", "Value": "85%"},
                {"Source": "Metacritic", "Value": "67/100"}
            ],
            "Metascore": "67",
            "imdbRating": "7.6",
            "imdbVotes": "772,784",
            "imdbID": "tt3896198",
            "Type": "movie",
            "DVD": "N/A",
            "BoxOffice": "$389,813,101",
            "Production": "N/A",
            "Website": "N/A",
            "Response": "True"
        }"#;

        let title: OmdbTitle = serde_json::from_str(json).unwrap();
        let detail = title.into_detail();
        assert_eq!(detail.summary.id, "tt3896198");
        assert_eq!(detail.summary.rating.as_deref(), Some("7.6"));
        assert_eq!(detail.writers.len(), 4);
        assert_eq!(detail.writers[1], "Dan Abnett");
        assert_eq!(detail.actors, vec!["Chris Pratt", "Zoe Saldana", "Dave Bautista"]);
        assert_eq!(detail.ratings.len(), 3);
        assert_eq!(detail.box_office.as_deref(), Some("$389,813,101"));
        assert!(detail.website.is_none());
    }

    #[test]
    fn test_deserialize_minimal_title() {
        let json = r#"{ "Title": "Obscure", "imdbID": "tt0000001", "Plot": "N/A", "Writer": "N/A" }"#;
        let detail = serde_json::from_str::<OmdbTitle>(json)
            .unwrap()
            .into_detail();
        assert!(detail.plot.is_none());
        assert!(detail.writers.is_empty());
        assert!(detail.ratings.is_empty());
        assert_eq!(detail.summary.media_type, "movie");
        assert_eq!(detail.summary.year, "");
    }
}
