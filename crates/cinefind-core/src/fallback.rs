//! Built-in movie data: the startup "popular" grid and the placeholder
//! rows shown when a catalog search yields nothing.

use crate::models::{MovieDetail, MovieSummary, Rating};

/// Id prefix marking synthesized rows; details for these never hit the catalog.
pub const FALLBACK_ID_PREFIX: &str = "fallback";

pub fn is_fallback_id(id: &str) -> bool {
    id.starts_with(FALLBACK_ID_PREFIX)
}

fn summary(
    id: &str,
    title: &str,
    year: &str,
    poster: &str,
    genre: &str,
    runtime: &str,
    rating: &str,
) -> MovieSummary {
    MovieSummary {
        id: id.into(),
        title: title.into(),
        year: year.into(),
        poster_url: Some(poster.into()),
        genre: Some(genre.into()),
        runtime: Some(runtime.into()),
        rating: Some(rating.into()),
        media_type: "movie".into(),
    }
}

/// The fixed grid shown on startup, no network involved.
pub fn popular_movies() -> Vec<MovieSummary> {
    vec![
        summary(
            "tt3896198",
            "Guardians of the Galaxy Vol. 2",
            "2017",
            "https://m.media-amazon.com/images/M/MV5BNWE5MGI3MDctMmU5Ni00YzI2LWEzMTQtZGIyZDA5MzQzNDBhXkEyXkFqcGc@._V1_SX300.jpg",
            "Action, Adventure, Comedy",
            "136 min",
            "7.6",
        ),
        summary(
            "tt4154796",
            "Avengers: Endgame",
            "2019",
            "https://m.media-amazon.com/images/M/MV5BMTc5MDE2ODcwNV5BMl5BanBnXkFtZTgwMzI2NzQ2NzM@._V1_SX300.jpg",
            "Action, Adventure, Drama",
            "181 min",
            "8.4",
        ),
        summary(
            "tt10872600",
            "Spider-Man: No Way Home",
            "2021",
            "https://m.media-amazon.com/images/M/MV5BZWMyYzFjYTYtNTRjYi00OGExLWE2YzgtOGRmYjAxZTU3NzBiXkEyXkFqcGdeQXVyMzQ0MzA0NTM@._V1_SX300.jpg",
            "Action, Adventure, Fantasy",
            "148 min",
            "8.2",
        ),
        summary(
            "tt1877830",
            "The Batman",
            "2022",
            "https://m.media-amazon.com/images/M/MV5BMDdmMTBiNTYtMDIzNi00NGVlLWIzMDYtZTk3MTQ3NGQxZGEwXkEyXkFqcGdeQXVyMzMwOTU5MDk@._V1_SX300.jpg",
            "Action, Crime, Drama",
            "176 min",
            "7.8",
        ),
        summary(
            "tt1745960",
            "Top Gun: Maverick",
            "2022",
            "https://m.media-amazon.com/images/M/MV5BZWYzOGEwNTgtNWU3NS00ZTQ0LWJkODUtMmVhMjIwMjA1ZmQwXkEyXkFqcGdeQXVyMjkwOTAyMDU@._V1_SX300.jpg",
            "Action, Drama",
            "130 min",
            "8.2",
        ),
        summary(
            "tt9114286",
            "Black Panther: Wakanda Forever",
            "2022",
            "https://m.media-amazon.com/images/M/MV5BNTM4NjIxNmEtYWE5NS00NDczLTkyNWQtYThhNmQyZGQzMjM0XkEyXkFqcGdeQXVyODk4OTc3MTY@._V1_SX300.jpg",
            "Action, Adventure, Drama",
            "161 min",
            "6.7",
        ),
    ]
}

/// Two placeholder rows labelled with the query.
pub fn fallback_results(query: &str) -> Vec<MovieSummary> {
    vec![
        summary(
            "fallback1",
            &format!("Hasil untuk \"{query}\""),
            "2023",
            &format!(
                "https://via.placeholder.com/300x450/4361ee/ffffff?text={}",
                urlencoding::encode(query)
            ),
            "Action, Adventure",
            "120 min",
            "7.5",
        ),
        summary(
            "fallback2",
            &format!("Film terkait \"{query}\""),
            "2023",
            "https://via.placeholder.com/300x450/3a0ca3/ffffff?text=Movie+2",
            "Drama",
            "95 min",
            "8.0",
        ),
    ]
}

/// Canned detail record for any fallback id.
pub fn fallback_detail(id: &str) -> MovieDetail {
    MovieDetail {
        summary: MovieSummary {
            id: id.into(),
            title: "Sample Movie Details".into(),
            year: "2023".into(),
            poster_url: Some(
                "https://via.placeholder.com/400x600/4361ee/ffffff?text=Movie+Poster".into(),
            ),
            genre: Some("Action, Adventure".into()),
            runtime: Some("120 min".into()),
            rating: Some("7.5".into()),
            media_type: "movie".into(),
        },
        rated: Some("PG-13".into()),
        released: Some("01 Jan 2023".into()),
        language: Some("English".into()),
        plot: Some(
            "This is a sample plot for demonstration purposes. In a real application, \
             this would be fetched from the OMDb API."
                .into(),
        ),
        director: Some("John Director".into()),
        writers: vec!["Jane Writer".into()],
        actors: vec!["Actor One".into(), "Actor Two".into(), "Actor Three".into()],
        country: Some("USA".into()),
        awards: Some("Nominated for 1 award".into()),
        box_office: Some("$100,000,000".into()),
        website: None,
        ratings: vec![
            Rating::new("Internet Movie Database", "7.5/10"),
            Rating::new("Rotten Tomatoes", "85%"),
        ],
    }
}
