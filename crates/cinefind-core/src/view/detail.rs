use crate::models::MovieDetail;

use super::NOT_AVAILABLE;

const DETAIL_POSTER_PLACEHOLDER: &str =
    "https://via.placeholder.com/400x600/4361ee/ffffff?text=No+Poster+Available";
const IMDB_SOURCE: &str = "Internet Movie Database";
const ROTTEN_TOMATOES_SOURCE: &str = "Rotten Tomatoes";
const MAX_WRITERS: usize = 3;
const MAX_ACTORS: usize = 5;

/// One line of the ratings section. `suffix` is rendered smaller after `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingRow {
    pub source: String,
    pub value: String,
    pub suffix: Option<&'static str>,
}

impl RatingRow {
    fn from_source(source: &str, value: &str) -> Self {
        let (value, suffix) = match source {
            IMDB_SOURCE => {
                let score = value.split_once('/').map_or(value, |(score, _)| score);
                (score, Some("/10"))
            }
            ROTTEN_TOMATOES_SOURCE => (value.strip_suffix('%').unwrap_or(value), Some("%")),
            _ => (value, None),
        };
        Self {
            source: source.to_string(),
            value: value.to_string(),
            suffix,
        }
    }
}

/// Display-ready fields of the detail panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    pub rated: String,
    pub runtime: String,
    pub language: String,
    pub ratings: Vec<RatingRow>,
    pub plot: String,
    pub director: String,
    pub writers: String,
    pub actors: String,
    pub genre: String,
    pub box_office: Option<String>,
    pub awards: Option<String>,
    pub country: String,
    pub website: Option<String>,
}

impl DetailView {
    pub fn from_detail(detail: &MovieDetail) -> Self {
        let summary = &detail.summary;
        let na = || NOT_AVAILABLE.to_string();

        let ratings = if detail.ratings.is_empty() {
            vec![RatingRow {
                source: "IMDb".into(),
                value: summary.rating.clone().unwrap_or_else(na),
                suffix: Some("/10"),
            }]
        } else {
            detail
                .ratings
                .iter()
                .map(|r| RatingRow::from_source(&r.source, &r.value))
                .collect()
        };

        Self {
            id: summary.id.clone(),
            title: summary.title.clone(),
            year: summary.year.clone(),
            poster_url: summary
                .poster_url
                .clone()
                .unwrap_or_else(|| DETAIL_POSTER_PLACEHOLDER.to_string()),
            rated: detail.rated.clone().unwrap_or_else(|| "Not Rated".into()),
            runtime: summary.runtime.clone().unwrap_or_else(na),
            language: detail.language.clone().unwrap_or_else(na),
            ratings,
            plot: detail
                .plot
                .clone()
                .unwrap_or_else(|| "Plot not available.".into()),
            director: detail.director.clone().unwrap_or_else(na),
            writers: join_first(&detail.writers, MAX_WRITERS),
            actors: join_first(&detail.actors, MAX_ACTORS),
            genre: summary.genre.clone().unwrap_or_else(na),
            box_office: detail.box_office.clone(),
            awards: detail.awards.clone(),
            country: detail.country.clone().unwrap_or_else(na),
            website: detail.website.clone(),
        }
    }
}

fn join_first(items: &[String], n: usize) -> String {
    if items.is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    items
        .iter()
        .take(n)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
