use crate::models::MovieSummary;

use super::{first_tokens, NOT_AVAILABLE};

const PLACEHOLDER_COLORS: [&str; 4] = ["4361ee", "3a0ca3", "f72585", "4cc9f0"];
const PLACEHOLDER_TITLE_CHARS: usize = 20;
const GENRE_TOKENS: usize = 2;

/// Corner badge of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatingBadge {
    /// `"7.6/10"`
    Score(String),
    /// No rating known; shows the media type instead.
    MediaType(String),
}

impl RatingBadge {
    pub fn text(&self) -> &str {
        match self {
            Self::Score(s) | Self::MediaType(s) => s,
        }
    }
}

/// Display-ready fields of one grid card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub poster_url: String,
    pub year: String,
    pub runtime: String,
    pub genre: String,
    pub badge: RatingBadge,
}

impl CardView {
    pub fn from_summary(movie: &MovieSummary) -> Self {
        let poster_url = movie
            .poster_url
            .clone()
            .unwrap_or_else(|| placeholder_poster(&movie.title));

        let year: String = movie.year.chars().take(4).collect();
        let year = if year.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            year
        };

        let badge = match &movie.rating {
            Some(rating) => RatingBadge::Score(format!("{rating}/10")),
            None => RatingBadge::MediaType(movie.media_type.clone()),
        };

        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            poster_url,
            year,
            runtime: movie
                .runtime
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            genre: movie
                .genre
                .as_deref()
                .map(|g| first_tokens(g, GENRE_TOKENS))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            badge,
        }
    }
}

/// Placeholder image URL carrying the first 20 characters of `title`.
///
/// The background colour is picked from a stable hash of the title, so a
/// given title always gets the same colour.
pub fn placeholder_poster(title: &str) -> String {
    let color = PLACEHOLDER_COLORS[(fnv1a(title) % PLACEHOLDER_COLORS.len() as u64) as usize];
    let prefix: String = title.chars().take(PLACEHOLDER_TITLE_CHARS).collect();
    format!(
        "https://via.placeholder.com/300x450/{color}/ffffff?text={}",
        urlencoding::encode(&prefix)
    )
}

fn fnv1a(s: &str) -> u64 {
    s.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie() -> MovieSummary {
        MovieSummary {
            id: "tt4154796".into(),
            title: "Avengers: Endgame".into(),
            year: "2019".into(),
            poster_url: Some("https://example.com/p.jpg".into()),
            genre: Some("Action, Adventure, Drama".into()),
            runtime: Some("181 min".into()),
            rating: Some("8.4".into()),
            media_type: "movie".into(),
        }
    }

    #[test]
    fn test_card_fields() {
        let card = CardView::from_summary(&movie());
        assert_eq!(card.genre, "Action, Adventure");
        assert_eq!(card.year, "2019");
        assert_eq!(card.runtime, "181 min");
        assert_eq!(card.badge, RatingBadge::Score("8.4/10".into()));
        assert_eq!(card.poster_url, "https://example.com/p.jpg");
    }

    #[test]
    fn test_series_year_range_is_cut() {
        let mut m = movie();
        m.year = "2008–2013".into();
        assert_eq!(CardView::from_summary(&m).year, "2008");
        m.year = String::new();
        assert_eq!(CardView::from_summary(&m).year, "N/A");
    }

    #[test]
    fn test_missing_fields() {
        let mut m = movie();
        m.rating = None;
        m.genre = None;
        m.runtime = None;
        m.media_type = "series".into();
        let card = CardView::from_summary(&m);
        assert_eq!(card.badge, RatingBadge::MediaType("series".into()));
        assert_eq!(card.badge.text(), "series");
        assert_eq!(card.genre, "N/A");
        assert_eq!(card.runtime, "N/A");
    }

    #[test]
    fn test_placeholder_is_stable_and_truncated() {
        let mut m = movie();
        m.poster_url = None;
        m.title = "The Lord of the Rings: The Return of the King".into();
        let a = CardView::from_summary(&m).poster_url;
        let b = CardView::from_summary(&m).poster_url;
        assert_eq!(a, b);
        assert!(a.starts_with("https://via.placeholder.com/300x450/"));
        assert!(a.ends_with("?text=The%20Lord%20of%20the%20Ring"));
        assert!(PLACEHOLDER_COLORS.iter().any(|c| a.contains(&format!("/{c}/"))));
    }

    #[test]
    fn test_placeholder_escapes_title() {
        let url = placeholder_poster("Tom & Jerry?");
        assert!(url.ends_with("?text=Tom%20%26%20Jerry%3F"));
    }
}
