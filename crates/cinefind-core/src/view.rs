//! Projection of app state onto the screen.
//!
//! [`CardView`] and [`DetailView`] hold every formatting decision so front
//! ends only place strings. [`Renderer`] is the seam the controller drives.

mod card;
mod detail;
mod html;

pub use card::{placeholder_poster, CardView, RatingBadge};
pub use detail::{DetailView, RatingRow};
pub use html::{escape_html, HtmlRenderer};

use crate::models::{MovieDetail, MovieSummary, Theme};

/// Shown wherever an upstream field is absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// What the results grid is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsLabel {
    Popular,
    Query(String),
}

impl ResultsLabel {
    pub fn heading(&self) -> String {
        match self {
            Self::Popular => "Film Populer".to_string(),
            Self::Query(q) => format!("Hasil untuk \"{q}\""),
        }
    }
}

/// Everything the controller can ask of a front end.
pub trait Renderer {
    /// Show the spinner; hides grid, empty state and error panel.
    fn show_loading(&mut self);

    fn hide_loading(&mut self);

    fn show_error(&mut self, title: &str, message: &str);

    fn hide_error(&mut self);

    /// Replace the grid. An empty slice shows the empty-state panel.
    fn render_results(&mut self, movies: &[MovieSummary], label: &ResultsLabel);

    /// Open the detail panel.
    fn render_detail(&mut self, detail: &MovieDetail);

    fn close_detail(&mut self);

    /// Rebuild the clickable history list (newest first).
    fn update_history_list(&mut self, history: &[String]);

    fn update_search_count(&mut self, count: u64);

    /// Mirror a query into the search input.
    fn set_query(&mut self, query: &str);

    fn apply_theme(&mut self, theme: Theme);

    /// One-off confirmation message.
    fn notify(&mut self, message: &str);
}

/// First `n` comma-separated tokens, trimmed and re-joined.
pub(crate) fn first_tokens(raw: &str, n: usize) -> String {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(n)
        .collect::<Vec<_>>()
        .join(", ")
}
