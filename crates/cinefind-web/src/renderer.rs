use leptos::prelude::*;

use cinefind_core::models::{MovieDetail, MovieSummary, Theme};
use cinefind_core::view::{CardView, DetailView, Renderer, ResultsLabel};

/// Reactive state of every page region. The view reads it, [`DomRenderer`]
/// writes it.
#[derive(Clone, Copy)]
pub struct Page {
    pub loading: RwSignal<bool>,
    /// `(title, message)`
    pub error: RwSignal<Option<(String, String)>>,
    pub heading: RwSignal<String>,
    pub cards: RwSignal<Vec<CardView>>,
    pub detail: RwSignal<Option<DetailView>>,
    pub history: RwSignal<Vec<String>>,
    pub search_count: RwSignal<u64>,
    /// Bound to the search input in both directions.
    pub query: RwSignal<String>,
    pub theme: RwSignal<Theme>,
}

impl Page {
    pub fn new() -> Self {
        Self {
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            heading: RwSignal::new(String::new()),
            cards: RwSignal::new(Vec::new()),
            detail: RwSignal::new(None),
            history: RwSignal::new(Vec::new()),
            search_count: RwSignal::new(0),
            query: RwSignal::new(String::new()),
            theme: RwSignal::new(Theme::default()),
        }
    }

    /// The "no results" panel: an empty grid with nothing else in the way.
    pub fn empty_state_visible(&self) -> bool {
        self.cards.with(Vec::is_empty) && !self.loading.get() && self.error.with(Option::is_none)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

pub struct DomRenderer {
    page: Page,
}

impl DomRenderer {
    pub fn new(page: Page) -> Self {
        Self { page }
    }
}

impl Renderer for DomRenderer {
    fn show_loading(&mut self) {
        self.page.loading.set(true);
        self.page.error.set(None);
    }

    fn hide_loading(&mut self) {
        self.page.loading.set(false);
    }

    fn show_error(&mut self, title: &str, message: &str) {
        self.page
            .error
            .set(Some((title.to_string(), message.to_string())));
    }

    fn hide_error(&mut self) {
        self.page.error.set(None);
    }

    fn render_results(&mut self, movies: &[MovieSummary], label: &ResultsLabel) {
        self.page.heading.set(label.heading());
        self.page
            .cards
            .set(movies.iter().map(CardView::from_summary).collect());
    }

    fn render_detail(&mut self, detail: &MovieDetail) {
        self.page.detail.set(Some(DetailView::from_detail(detail)));
    }

    fn close_detail(&mut self) {
        self.page.detail.set(None);
    }

    fn update_history_list(&mut self, history: &[String]) {
        self.page.history.set(history.to_vec());
    }

    fn update_search_count(&mut self, count: u64) {
        self.page.search_count.set(count);
    }

    fn set_query(&mut self, query: &str) {
        self.page.query.set(query.to_string());
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.page.theme.set(theme);
        let root = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element());
        match root {
            Some(root) => {
                if let Err(e) = root.set_attribute("data-theme", theme.as_str()) {
                    tracing::warn!("Failed to apply theme: {e:?}");
                }
            }
            None => tracing::warn!("No document element to theme"),
        }
    }

    fn notify(&mut self, message: &str) {
        let shown = web_sys::window().map(|w| w.alert_with_message(message));
        if !matches!(shown, Some(Ok(()))) {
            tracing::info!("{message}");
        }
    }
}
