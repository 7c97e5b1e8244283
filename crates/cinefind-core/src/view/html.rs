use std::fmt::Write as _;

use crate::models::{MovieDetail, MovieSummary, Theme};

use super::{CardView, DetailView, RatingBadge, Renderer, ResultsLabel};

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Renderer that keeps each page region as an HTML fragment.
///
/// Used for static export and as the reference projection in tests.
/// Cards carry `data-id` and history entries `data-query`, which is what
/// a click on them would dispatch.
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    loading: bool,
    error: Option<(String, String)>,
    results_title: String,
    results_count: usize,
    grid_html: String,
    empty_state: bool,
    modal: Option<(String, String)>,
    history: Vec<String>,
    search_count: u64,
    query: String,
    theme: Theme,
    notices: Vec<String>,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// `(title, message)` of the visible error panel.
    pub fn error(&self) -> Option<(&str, &str)> {
        self.error.as_ref().map(|(t, m)| (t.as_str(), m.as_str()))
    }

    pub fn results_title(&self) -> &str {
        &self.results_title
    }

    pub fn results_count(&self) -> usize {
        self.results_count
    }

    pub fn empty_state_visible(&self) -> bool {
        self.empty_state && !self.loading && self.error.is_none()
    }

    /// Grid markup, empty while the spinner is up.
    pub fn grid_html(&self) -> &str {
        if self.loading {
            ""
        } else {
            &self.grid_html
        }
    }

    /// `(title, body)` of the open detail modal.
    pub fn modal(&self) -> Option<(&str, &str)> {
        self.modal.as_ref().map(|(t, b)| (t.as_str(), b.as_str()))
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn history_html(&self) -> String {
        let mut out = String::from("<ul id=\"searchHistory\">");
        for item in &self.history {
            let item = escape_html(item);
            let _ = write!(out, "<li data-query=\"{item}\">{item}</li>");
        }
        out.push_str("</ul>");
        out
    }

    pub fn search_count_text(&self) -> String {
        self.search_count.to_string()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// A standalone page with every region in its current state.
    pub fn document(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "<!DOCTYPE html>\n<html lang=\"id\" data-theme=\"{}\">\n<head>\n\
             <meta charset=\"utf-8\">\n<title>Cinefind</title>\n</head>\n<body>\n",
            self.theme
        );
        let _ = write!(
            out,
            "<header><input id=\"searchInput\" value=\"{}\">\
             <span id=\"totalSearches\">{}</span></header>\n",
            escape_html(&self.query),
            self.search_count
        );
        out.push_str(&self.history_html());
        out.push('\n');
        if self.loading {
            out.push_str("<div id=\"loadingIndicator\">Loading...</div>\n");
        }
        if let Some((title, message)) = &self.error {
            let _ = write!(
                out,
                "<div id=\"errorContainer\"><h3 id=\"errorTitle\">{}</h3>\
                 <p id=\"errorMessage\">{}</p></div>\n",
                escape_html(title),
                escape_html(message)
            );
        }
        let _ = write!(
            out,
            "<section><h2 id=\"resultsTitle\">{}</h2><span id=\"resultsCount\">{}</span>\n",
            escape_html(&self.results_title),
            self.results_count
        );
        if self.empty_state_visible() {
            out.push_str("<div id=\"noResults\">Tidak ada film ditemukan.</div>\n");
        }
        let _ = write!(
            out,
            "<div id=\"moviesGrid\">{}</div>\n</section>\n",
            self.grid_html()
        );
        if let Some((title, body)) = &self.modal {
            let _ = write!(
                out,
                "<div id=\"movieModal\"><h2 id=\"modalTitle\">{}</h2>\
                 <div id=\"modalBody\">{body}</div></div>\n",
                escape_html(title)
            );
        }
        out.push_str("</body>\n</html>\n");
        out
    }
}

fn card_html(card: &CardView) -> String {
    let badge = match &card.badge {
        RatingBadge::Score(s) => format!("<i class=\"fas fa-star\"></i><span>{}</span>", escape_html(s)),
        RatingBadge::MediaType(t) => {
            format!("<i class=\"fas fa-film\"></i><span>{}</span>", escape_html(t))
        }
    };
    let title = escape_html(&card.title);
    format!(
        "<div class=\"movie-card\" data-id=\"{id}\">\
         <div class=\"poster-container\"><img src=\"{poster}\" alt=\"{title}\" class=\"movie-poster\"></div>\
         <div class=\"movie-info\">\
         <h3 class=\"movie-title\" title=\"{title}\">{title}</h3>\
         <div class=\"movie-meta\"><span class=\"movie-year\">{year}</span>\
         <span class=\"movie-runtime\">{runtime}</span></div>\
         <span class=\"movie-genre\">{genre}</span>\
         <div class=\"movie-rating\">{badge}</div>\
         </div></div>",
        id = escape_html(&card.id),
        poster = escape_html(&card.poster_url),
        year = escape_html(&card.year),
        runtime = escape_html(&card.runtime),
        genre = escape_html(&card.genre),
    )
}

fn detail_html(view: &DetailView) -> String {
    let e = escape_html;
    let mut ratings = String::new();
    for row in &view.ratings {
        let suffix = row
            .suffix
            .map(|s| format!("<small>{s}</small>"))
            .unwrap_or_default();
        let _ = write!(
            ratings,
            "<div class=\"rating-item\"><div class=\"rating-source\">{}</div>\
             <div class=\"rating-value\">{}{suffix}</div></div>",
            e(&row.source),
            e(&row.value)
        );
    }

    let mut info = String::new();
    if let Some(box_office) = &view.box_office {
        let _ = write!(
            info,
            "<span class=\"detail-item\"><strong>Box Office:</strong> {}</span>",
            e(box_office)
        );
    }
    if let Some(awards) = &view.awards {
        let _ = write!(
            info,
            "<span class=\"detail-item\"><strong>Awards:</strong> {}</span>",
            e(awards)
        );
    }
    let _ = write!(
        info,
        "<span class=\"detail-item\"><strong>Country:</strong> {}</span>",
        e(&view.country)
    );
    let website = match &view.website {
        Some(url) => format!("<a href=\"{}\" target=\"_blank\">Official Site</a>", e(url)),
        None => "N/A".to_string(),
    };
    let _ = write!(
        info,
        "<span class=\"detail-item\"><strong>Website:</strong> {website}</span>"
    );

    format!(
        "<div class=\"movie-details\" data-id=\"{id}\">\
         <div class=\"detail-poster-container\"><img src=\"{poster}\" alt=\"{title}\" class=\"detail-poster\"></div>\
         <div class=\"detail-info\">\
         <div class=\"detail-header\"><h2>{title} <span class=\"year\">({year})</span></h2>\
         <div class=\"detail-subtitle\"><span class=\"rated\">{rated}</span>\
         <span class=\"runtime\">{runtime}</span><span class=\"language\">{language}</span></div></div>\
         <div class=\"ratings-section\"><h3>Ratings</h3><div class=\"ratings\">{ratings}</div></div>\
         <div class=\"plot-section\"><h3>Plot</h3><p class=\"detail-plot\">{plot}</p></div>\
         <div class=\"details-grid\">\
         <div class=\"detail-group\"><h4>Director</h4><p>{director}</p></div>\
         <div class=\"detail-group\"><h4>Writers</h4><p>{writers}</p></div>\
         <div class=\"detail-group\"><h4>Actors</h4><p>{actors}</p></div>\
         <div class=\"detail-group\"><h4>Genre</h4><p>{genre}</p></div>\
         </div>\
         <div class=\"additional-info\"><h3>Additional Information</h3><div class=\"info-items\">{info}</div></div>\
         </div></div>",
        id = e(&view.id),
        poster = e(&view.poster_url),
        title = e(&view.title),
        year = e(&view.year),
        rated = e(&view.rated),
        runtime = e(&view.runtime),
        language = e(&view.language),
        plot = e(&view.plot),
        director = e(&view.director),
        writers = e(&view.writers),
        actors = e(&view.actors),
        genre = e(&view.genre),
    )
}

impl Renderer for HtmlRenderer {
    fn show_loading(&mut self) {
        self.loading = true;
        self.empty_state = false;
        self.error = None;
    }

    fn hide_loading(&mut self) {
        self.loading = false;
    }

    fn show_error(&mut self, title: &str, message: &str) {
        self.error = Some((title.to_string(), message.to_string()));
    }

    fn hide_error(&mut self) {
        self.error = None;
    }

    fn render_results(&mut self, movies: &[MovieSummary], label: &ResultsLabel) {
        self.results_title = label.heading();
        self.results_count = movies.len();
        self.empty_state = movies.is_empty();
        self.grid_html = movies
            .iter()
            .map(|m| card_html(&CardView::from_summary(m)))
            .collect();
    }

    fn render_detail(&mut self, detail: &MovieDetail) {
        let view = DetailView::from_detail(detail);
        self.modal = Some((view.title.clone(), detail_html(&view)));
    }

    fn close_detail(&mut self) {
        self.modal = None;
    }

    fn update_history_list(&mut self, history: &[String]) {
        self.history = history.to_vec();
    }

    fn update_search_count(&mut self, count: u64) {
        self.search_count = count;
    }

    fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
