use std::fmt;
use std::io::Write;

use cinefind_core::models::{MovieDetail, MovieSummary, Theme};
use cinefind_core::view::{CardView, DetailView, Renderer, ResultsLabel};

const EMPTY_RESULTS: &str = "Tidak ada film ditemukan.";

/// Plain-text renderer for the terminal.
///
/// History, counter and theme are only remembered here; the commands that
/// care about them print them explicitly. While muted, nothing is written.
pub struct TextRenderer<W> {
    out: W,
    muted: bool,
    history: Vec<String>,
    search_count: u64,
    theme: Theme,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            muted: false,
            history: Vec::new(),
            search_count: 0,
            theme: Theme::default(),
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn print_history(&mut self) {
        let count = self.search_count;
        if self.history.is_empty() {
            self.line(format_args!("Belum ada riwayat pencarian."));
        } else {
            let history = std::mem::take(&mut self.history);
            for (i, query) in history.iter().enumerate() {
                self.line(format_args!("{:>2}. {query}", i + 1));
            }
            self.history = history;
        }
        self.line(format_args!("Total pencarian: {count}"));
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if self.muted {
            return;
        }
        if let Err(e) = writeln!(self.out, "{args}") {
            tracing::warn!("Failed to write output: {e}");
        }
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn show_loading(&mut self) {
        tracing::debug!("Loading");
    }

    fn hide_loading(&mut self) {}

    fn show_error(&mut self, title: &str, message: &str) {
        self.line(format_args!("! {title}: {message}"));
    }

    fn hide_error(&mut self) {}

    fn render_results(&mut self, movies: &[MovieSummary], label: &ResultsLabel) {
        self.line(format_args!("{} ({})", label.heading(), movies.len()));
        if movies.is_empty() {
            self.line(format_args!("  {EMPTY_RESULTS}"));
            return;
        }
        for movie in movies {
            let card = CardView::from_summary(movie);
            self.line(format_args!(
                "  {:<11} {} ({}) | {} | {} | {}",
                card.id,
                card.title,
                card.year,
                card.runtime,
                card.genre,
                card.badge.text()
            ));
        }
    }

    fn render_detail(&mut self, detail: &MovieDetail) {
        let view = DetailView::from_detail(detail);
        self.line(format_args!("{} ({})", view.title, view.year));
        self.line(format_args!(
            "{} | {} | {}",
            view.rated, view.runtime, view.language
        ));
        for row in &view.ratings {
            self.line(format_args!(
                "  {}: {}{}",
                row.source,
                row.value,
                row.suffix.unwrap_or("")
            ));
        }
        self.line(format_args!(""));
        self.line(format_args!("{}", view.plot));
        self.line(format_args!(""));
        self.line(format_args!("Director: {}", view.director));
        self.line(format_args!("Writers:  {}", view.writers));
        self.line(format_args!("Actors:   {}", view.actors));
        self.line(format_args!("Genre:    {}", view.genre));
        if let Some(box_office) = &view.box_office {
            self.line(format_args!("Box Office: {box_office}"));
        }
        if let Some(awards) = &view.awards {
            self.line(format_args!("Awards:   {awards}"));
        }
        self.line(format_args!("Country:  {}", view.country));
        self.line(format_args!(
            "Website:  {}",
            view.website.as_deref().unwrap_or("N/A")
        ));
    }

    fn close_detail(&mut self) {}

    fn update_history_list(&mut self, history: &[String]) {
        self.history = history.to_vec();
    }

    fn update_search_count(&mut self, count: u64) {
        self.search_count = count;
    }

    fn set_query(&mut self, _query: &str) {}

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn notify(&mut self, message: &str) {
        self.line(format_args!("{message}"));
    }
}
