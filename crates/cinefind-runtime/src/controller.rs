//! The search/detail state machine.
//!
//! Idle → Loading → ShowingResults | ShowingError. Searches never end in an
//! error: an empty or failed lookup degrades to two synthesized rows. Detail
//! lookups that fail show a fixed error panel.
//!
//! Catalog calls are split into `begin_*` / `finish_*` so a front end that
//! shares the controller (browser event handlers) never holds it across an
//! await. `submit` and `select_detail` compose the two halves.

use std::fmt::Display;

use tracing::{debug, info, warn};

use cinefind_api::CatalogService;
use cinefind_core::config::AppConfig;
use cinefind_core::fallback::{fallback_detail, fallback_results, is_fallback_id, popular_movies};
use cinefind_core::models::{MovieDetail, MovieSummary, Theme};
use cinefind_core::persistence::{PersistenceStore, LAST_QUERY_KEY};
use cinefind_core::view::{Renderer, ResultsLabel};

use crate::state::{DetailTicket, ErrorNotice, Phase, SearchTicket, UiSignal, ViewState};

pub const DETAIL_ERROR_TITLE: &str = "Detail Tidak Tersedia";
pub const DETAIL_ERROR_MESSAGE: &str = "Tidak dapat memuat detail film. Silakan coba lagi.";
pub const HISTORY_CLEARED_MESSAGE: &str = "Riwayat pencarian telah dihapus!";

/// Behaviour switches, normally taken from [`AppConfig`].
#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    /// Drop responses from superseded requests instead of rendering them.
    pub discard_stale_results: bool,
    /// Theme applied when none has been persisted.
    pub default_theme: Theme,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            discard_stale_results: true,
            default_theme: Theme::Light,
        }
    }
}

impl ControllerOptions {
    /// `System` theme preference maps to light here; front ends that can
    /// query the OS override `default_theme`.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            discard_stale_results: config.search.discard_stale_results,
            default_theme: config.ui.default_theme.fixed().unwrap_or_default(),
        }
    }
}

/// Owns view state and wires signals to the catalog, the store and the renderer.
pub struct Controller<C, R> {
    catalog: C,
    store: PersistenceStore,
    renderer: R,
    options: ControllerOptions,
    state: ViewState,
    search_generation: u64,
    detail_generation: u64,
}

impl<C, R: Renderer> Controller<C, R> {
    pub fn new(catalog: C, store: PersistenceStore, renderer: R, options: ControllerOptions) -> Self {
        Self {
            catalog,
            store,
            renderer,
            options,
            state: ViewState::default(),
            search_generation: 0,
            detail_generation: 0,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn store(&self) -> &PersistenceStore {
        &self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Initial paint: theme, the built-in popular grid, history and counter.
    /// No network.
    pub fn start(&mut self) {
        let theme = self.store.theme(self.options.default_theme);
        self.renderer.apply_theme(theme);

        let popular = popular_movies();
        self.renderer.render_results(&popular, &ResultsLabel::Popular);
        info!(count = popular.len(), "Loaded popular movies");
        self.state.current_results = popular;
        self.state.showing_fallback = false;
        self.state.phase = Phase::ShowingResults;

        self.refresh_history();
        self.refresh_count();

        if let Some(query) = self.store.get_ephemeral::<String>(LAST_QUERY_KEY) {
            self.renderer.set_query(&query);
            self.state.current_query = query;
        }
    }

    // ── Search ──────────────────────────────────────────────────

    /// Enter Loading for `query` and record it. `None` for blank input.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchTicket> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        self.search_generation += 1;
        debug!(query, generation = self.search_generation, "Search started");

        self.state.current_query = query.to_string();
        self.state.error = None;
        self.enter_loading();
        self.renderer.set_query(query);

        self.store.record_search(query);
        self.store.put_ephemeral(LAST_QUERY_KEY, query);
        self.refresh_history();
        self.refresh_count();

        Some(SearchTicket {
            generation: self.search_generation,
            query: query.to_string(),
        })
    }

    /// Apply a search outcome. Returns `false` if the ticket was superseded
    /// and its result dropped.
    pub fn finish_search<E: Display>(
        &mut self,
        ticket: SearchTicket,
        result: Result<Vec<MovieSummary>, E>,
    ) -> bool {
        if self.options.discard_stale_results && ticket.generation != self.search_generation {
            debug!(
                query = %ticket.query,
                generation = ticket.generation,
                latest = self.search_generation,
                "Dropping stale search result"
            );
            return false;
        }

        let (movies, fallback) = match result {
            Ok(movies) if !movies.is_empty() => (movies, false),
            Ok(_) => {
                info!(query = %ticket.query, "No catalog results, showing fallback");
                (fallback_results(&ticket.query), true)
            }
            Err(e) => {
                warn!(query = %ticket.query, "Search failed, showing fallback: {e}");
                (fallback_results(&ticket.query), true)
            }
        };

        self.renderer
            .render_results(&movies, &ResultsLabel::Query(ticket.query));
        self.state.current_results = movies;
        self.state.showing_fallback = fallback;
        self.state.phase = Phase::ShowingResults;
        self.leave_loading();
        true
    }

    // ── Detail ──────────────────────────────────────────────────

    /// Enter Loading for `id`. Fallback ids are answered immediately and
    /// return `None`; anything else needs a catalog lookup.
    pub fn begin_detail(&mut self, id: &str) -> Option<DetailTicket> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }

        self.detail_generation += 1;
        self.state.selected = Some(id.to_string());
        self.enter_loading();

        if is_fallback_id(id) {
            debug!(id, "Showing synthetic detail");
            self.renderer.render_detail(&fallback_detail(id));
            self.state.phase = Phase::ShowingResults;
            self.leave_loading();
            return None;
        }

        Some(DetailTicket {
            generation: self.detail_generation,
            id: id.to_string(),
        })
    }

    /// Apply a detail outcome. Returns `false` if the ticket was superseded.
    pub fn finish_detail<E: Display>(
        &mut self,
        ticket: DetailTicket,
        result: Result<MovieDetail, E>,
    ) -> bool {
        if self.options.discard_stale_results && ticket.generation != self.detail_generation {
            debug!(id = %ticket.id, "Dropping stale detail result");
            return false;
        }

        match result {
            Ok(detail) => {
                self.renderer.render_detail(&detail);
                self.state.phase = Phase::ShowingResults;
            }
            Err(e) => {
                warn!(id = %ticket.id, "Detail lookup failed: {e}");
                self.state.selected = None;
                self.state.error = Some(ErrorNotice {
                    title: DETAIL_ERROR_TITLE.into(),
                    message: DETAIL_ERROR_MESSAGE.into(),
                });
                self.state.phase = Phase::ShowingError;
                self.renderer
                    .show_error(DETAIL_ERROR_TITLE, DETAIL_ERROR_MESSAGE);
            }
        }
        self.leave_loading();
        true
    }

    // ── Synchronous signals ─────────────────────────────────────

    pub fn clear_history(&mut self) {
        let history = self.store.clear_history();
        self.renderer.update_history_list(&history);
        self.refresh_count();
        self.renderer.notify(HISTORY_CLEARED_MESSAGE);
        info!("Search history cleared");
    }

    /// Flip and persist the theme. Returns the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.store.theme(self.options.default_theme).toggled();
        self.store.set_theme(theme);
        self.renderer.apply_theme(theme);
        theme
    }

    pub fn dismiss_error(&mut self) {
        self.renderer.hide_error();
        self.state.error = None;
        if self.state.phase == Phase::ShowingError {
            self.state.phase = Phase::ShowingResults;
        }
    }

    pub fn close_detail(&mut self) {
        self.renderer.close_detail();
        self.state.selected = None;
    }

    // ── Helpers ─────────────────────────────────────────────────

    fn enter_loading(&mut self) {
        self.state.loading = true;
        self.state.phase = Phase::Loading;
        self.renderer.show_loading();
    }

    fn leave_loading(&mut self) {
        self.state.loading = false;
        self.renderer.hide_loading();
    }

    fn refresh_history(&mut self) {
        let history = self.store.history();
        self.renderer.update_history_list(&history);
    }

    fn refresh_count(&mut self) {
        let count = self.store.search_count();
        self.renderer.update_search_count(count);
    }
}

impl<C: CatalogService, R: Renderer> Controller<C, R> {
    /// Run a whole search: record, look up, render.
    pub async fn submit(&mut self, query: &str) {
        let Some(ticket) = self.begin_search(query) else {
            return;
        };
        let result = self.catalog.search_by_title(ticket.query()).await;
        self.finish_search(ticket, result);
    }

    /// Run a whole detail lookup.
    pub async fn select_detail(&mut self, id: &str) {
        let Some(ticket) = self.begin_detail(id) else {
            return;
        };
        let result = self.catalog.get_by_id(ticket.id()).await;
        self.finish_detail(ticket, result);
    }

    /// Hide the error panel and repeat the current query.
    pub async fn retry(&mut self) {
        self.dismiss_error();
        let query = self.state.current_query.clone();
        self.submit(&query).await;
    }

    /// Single entry point for every front-end signal.
    pub async fn dispatch(&mut self, signal: UiSignal) {
        match signal {
            UiSignal::Search { query } => self.submit(&query).await,
            UiSignal::Detail { id } => self.select_detail(&id).await,
            UiSignal::ClearHistory => self.clear_history(),
            UiSignal::ToggleTheme => {
                self.toggle_theme();
            }
            UiSignal::Retry => self.retry().await,
            UiSignal::DismissError => self.dismiss_error(),
            UiSignal::CloseDetail => self.close_detail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashMap;

    use cinefind_core::persistence::{HISTORY_KEY, TOTAL_SEARCHES_KEY};
    use cinefind_core::storage::{KeyValueStore, MemoryStore};
    use cinefind_core::view::HtmlRenderer;

    use super::*;

    #[derive(Debug, thiserror::Error)]
    enum FakeError {
        #[error("network unreachable")]
        Network,
        #[error("unknown id")]
        NotFound,
    }

    /// Canned catalog. Unknown queries return no hits, queries mapped to
    /// `None` fail with a network error.
    #[derive(Default)]
    struct FakeCatalog {
        searches: HashMap<String, Option<Vec<MovieSummary>>>,
        details: HashMap<String, MovieDetail>,
        calls: Cell<usize>,
    }

    impl CatalogService for FakeCatalog {
        type Error = FakeError;

        async fn search_by_title(&self, query: &str) -> Result<Vec<MovieSummary>, FakeError> {
            self.calls.set(self.calls.get() + 1);
            match self.searches.get(query) {
                Some(Some(movies)) => Ok(movies.clone()),
                Some(None) => Err(FakeError::Network),
                None => Ok(Vec::new()),
            }
        }

        async fn get_by_id(&self, id: &str) -> Result<MovieDetail, FakeError> {
            self.calls.set(self.calls.get() + 1);
            self.details.get(id).cloned().ok_or(FakeError::NotFound)
        }
    }

    fn movie(id: &str, title: &str) -> MovieSummary {
        MovieSummary {
            id: id.into(),
            title: title.into(),
            year: "2005".into(),
            poster_url: None,
            genre: None,
            runtime: None,
            rating: None,
            media_type: "movie".into(),
        }
    }

    fn controller_with(
        catalog: FakeCatalog,
        durable: MemoryStore,
        options: ControllerOptions,
    ) -> Controller<FakeCatalog, HtmlRenderer> {
        let store = PersistenceStore::new(Box::new(durable), Box::new(MemoryStore::new()));
        let mut ctrl = Controller::new(catalog, store, HtmlRenderer::new(), options);
        ctrl.start();
        ctrl
    }

    fn controller(catalog: FakeCatalog) -> Controller<FakeCatalog, HtmlRenderer> {
        controller_with(catalog, MemoryStore::new(), ControllerOptions::default())
    }

    fn batman_catalog() -> FakeCatalog {
        let mut catalog = FakeCatalog::default();
        catalog.searches.insert(
            "batman".into(),
            Some(vec![
                movie("tt0372784", "Batman Begins"),
                movie("tt0468569", "The Dark Knight"),
                movie("tt1877830", "The Batman"),
            ]),
        );
        catalog
    }

    #[test]
    fn test_start_shows_popular_grid() {
        let ctrl = controller(FakeCatalog::default());
        let r = ctrl.renderer();
        assert_eq!(r.results_title(), "Film Populer");
        assert_eq!(r.results_count(), 6);
        assert!(r.history().is_empty());
        assert_eq!(r.search_count_text(), "0");
        assert_eq!(r.theme(), Theme::Light);
        assert_eq!(ctrl.state().phase, Phase::ShowingResults);
        assert_eq!(ctrl.catalog().calls.get(), 0);
    }

    #[test]
    fn test_start_restores_persisted_state() {
        let mut durable = MemoryStore::new();
        durable.set(HISTORY_KEY, r#"["alien","dune"]"#).unwrap();
        durable.set(TOTAL_SEARCHES_KEY, "7").unwrap();
        durable.set("theme", "dark").unwrap();
        let ctrl = controller_with(FakeCatalog::default(), durable, ControllerOptions::default());

        let r = ctrl.renderer();
        assert_eq!(r.history(), ["alien", "dune"]);
        assert_eq!(r.search_count_text(), "7");
        assert_eq!(r.theme(), Theme::Dark);
    }

    #[tokio::test]
    async fn test_search_renders_catalog_results() {
        let mut ctrl = controller(batman_catalog());
        ctrl.submit("batman").await;

        let r = ctrl.renderer();
        assert_eq!(r.results_title(), "Hasil untuk \"batman\"");
        assert_eq!(r.results_count(), 3);
        assert!(!r.is_loading());
        assert_eq!(r.history(), ["batman"]);
        assert_eq!(r.search_count_text(), "1");
        assert_eq!(r.query(), "batman");
        assert!(!ctrl.state().showing_fallback);
        assert_eq!(ctrl.state().phase, Phase::ShowingResults);
    }

    #[tokio::test]
    async fn test_case_variant_replaces_history_entry() {
        let mut ctrl = controller(batman_catalog());
        ctrl.submit("batman").await;
        ctrl.submit("Batman").await;

        assert_eq!(ctrl.store().history(), vec!["Batman"]);
        assert_eq!(ctrl.store().search_count(), 2);
        assert_eq!(ctrl.renderer().search_count_text(), "2");
    }

    #[tokio::test]
    async fn test_blank_submit_is_ignored() {
        let mut ctrl = controller(batman_catalog());
        ctrl.submit("   ").await;
        assert_eq!(ctrl.catalog().calls.get(), 0);
        assert_eq!(ctrl.store().search_count(), 0);
        assert_eq!(ctrl.renderer().results_title(), "Film Populer");
    }

    #[tokio::test]
    async fn test_empty_results_fall_back() {
        let mut ctrl = controller(FakeCatalog::default());
        ctrl.submit("qwertyuiop").await;

        let r = ctrl.renderer();
        assert_eq!(r.results_count(), 2);
        assert!(r.error().is_none());
        assert!(!r.empty_state_visible());
        assert!(r.grid_html().contains("data-id=\"fallback1\""));
        assert!(ctrl.state().showing_fallback);
    }

    #[tokio::test]
    async fn test_failed_search_falls_back_and_still_counts() {
        let mut catalog = FakeCatalog::default();
        catalog.searches.insert("offline".into(), None);
        let mut ctrl = controller(catalog);
        ctrl.submit("offline").await;

        let r = ctrl.renderer();
        assert_eq!(r.results_count(), 2);
        assert!(r.error().is_none());
        assert_eq!(ctrl.state().phase, Phase::ShowingResults);
        assert_eq!(ctrl.store().search_count(), 1);
        assert_eq!(ctrl.state().current_results[0].title, "Hasil untuk \"offline\"");
    }

    #[tokio::test]
    async fn test_detail_failure_shows_fixed_error() {
        let mut ctrl = controller(FakeCatalog::default());
        ctrl.select_detail("tt0000000").await;

        let r = ctrl.renderer();
        assert_eq!(r.error(), Some((DETAIL_ERROR_TITLE, DETAIL_ERROR_MESSAGE)));
        assert!(r.modal().is_none());
        assert!(!r.is_loading());
        assert_eq!(ctrl.state().phase, Phase::ShowingError);

        ctrl.dismiss_error();
        assert!(ctrl.renderer().error().is_none());
        assert_eq!(ctrl.state().phase, Phase::ShowingResults);
    }

    #[tokio::test]
    async fn test_detail_success_opens_modal() {
        let mut catalog = FakeCatalog::default();
        let mut detail = fallback_detail("tt3896198");
        detail.summary.title = "Guardians of the Galaxy Vol. 2".into();
        catalog.details.insert("tt3896198".into(), detail);
        let mut ctrl = controller(catalog);

        ctrl.dispatch(UiSignal::Detail {
            id: "tt3896198".into(),
        })
        .await;
        let (title, _) = ctrl.renderer().modal().unwrap();
        assert_eq!(title, "Guardians of the Galaxy Vol. 2");
        assert_eq!(ctrl.state().selected.as_deref(), Some("tt3896198"));

        ctrl.dispatch(UiSignal::CloseDetail).await;
        assert!(ctrl.renderer().modal().is_none());
        assert!(ctrl.state().selected.is_none());
    }

    #[tokio::test]
    async fn test_fallback_detail_skips_catalog() {
        let mut ctrl = controller(FakeCatalog::default());
        ctrl.submit("nothing").await;
        let calls = ctrl.catalog().calls.get();

        ctrl.select_detail("fallback1").await;
        assert_eq!(ctrl.catalog().calls.get(), calls);
        let (title, _) = ctrl.renderer().modal().unwrap();
        assert_eq!(title, "Sample Movie Details");
        assert!(!ctrl.renderer().is_loading());
    }

    #[tokio::test]
    async fn test_clear_history_keeps_counter() {
        let mut ctrl = controller(batman_catalog());
        ctrl.submit("batman").await;
        ctrl.submit("alien").await;
        ctrl.dispatch(UiSignal::ClearHistory).await;

        let r = ctrl.renderer();
        assert!(r.history().is_empty());
        assert_eq!(r.search_count_text(), "2");
        assert_eq!(r.notices(), [HISTORY_CLEARED_MESSAGE]);
    }

    #[tokio::test]
    async fn test_toggle_theme_persists() {
        let mut ctrl = controller(FakeCatalog::default());
        assert_eq!(ctrl.toggle_theme(), Theme::Dark);
        assert_eq!(ctrl.renderer().theme(), Theme::Dark);
        assert_eq!(ctrl.store().theme(Theme::Light), Theme::Dark);

        ctrl.dispatch(UiSignal::ToggleTheme).await;
        assert_eq!(ctrl.renderer().theme(), Theme::Light);
    }

    #[tokio::test]
    async fn test_retry_repeats_current_query() {
        let mut ctrl = controller(batman_catalog());
        ctrl.submit("batman").await;
        ctrl.select_detail("tt404").await;
        assert!(ctrl.renderer().error().is_some());

        ctrl.dispatch(UiSignal::Retry).await;
        assert!(ctrl.renderer().error().is_none());
        assert_eq!(ctrl.renderer().results_count(), 3);
        assert_eq!(ctrl.store().search_count(), 2);
    }

    #[test]
    fn test_stale_search_is_dropped() {
        let mut ctrl = controller(FakeCatalog::default());
        let slow = ctrl.begin_search("first").unwrap();
        let fast = ctrl.begin_search("second").unwrap();
        assert!(fast.generation() > slow.generation());

        assert!(ctrl.finish_search::<FakeError>(fast, Ok(vec![movie("tt2", "Second")])));
        assert!(!ctrl.finish_search::<FakeError>(slow, Ok(vec![movie("tt1", "First")])));

        assert_eq!(ctrl.renderer().results_title(), "Hasil untuk \"second\"");
        assert_eq!(ctrl.state().current_results[0].id, "tt2");
        assert!(!ctrl.state().loading);
    }

    #[test]
    fn test_loading_holds_until_latest_search_lands() {
        let mut ctrl = controller(FakeCatalog::default());
        let slow = ctrl.begin_search("first").unwrap();
        let fast = ctrl.begin_search("second").unwrap();

        assert!(!ctrl.finish_search::<FakeError>(slow, Ok(vec![])));
        assert!(ctrl.renderer().is_loading());
        assert!(ctrl.finish_search::<FakeError>(fast, Ok(vec![])));
        assert!(!ctrl.renderer().is_loading());
    }

    #[test]
    fn test_without_fencing_last_to_resolve_wins() {
        let options = ControllerOptions {
            discard_stale_results: false,
            ..Default::default()
        };
        let mut ctrl = controller_with(FakeCatalog::default(), MemoryStore::new(), options);
        let slow = ctrl.begin_search("first").unwrap();
        let fast = ctrl.begin_search("second").unwrap();

        assert!(ctrl.finish_search::<FakeError>(fast, Ok(vec![movie("tt2", "Second")])));
        assert!(ctrl.finish_search::<FakeError>(slow, Ok(vec![movie("tt1", "First")])));
        assert_eq!(ctrl.renderer().results_title(), "Hasil untuk \"first\"");
    }

    #[test]
    fn test_stale_detail_is_dropped() {
        let mut ctrl = controller(FakeCatalog::default());
        let first = ctrl.begin_detail("tt1").unwrap();
        let second = ctrl.begin_detail("tt2").unwrap();
        assert_eq!(second.id(), "tt2");

        assert!(ctrl.finish_detail(second, Ok::<_, FakeError>(fallback_detail("tt2"))));
        assert!(!ctrl.finish_detail::<FakeError>(first, Err(FakeError::NotFound)));
        assert!(ctrl.renderer().error().is_none());
        assert!(ctrl.renderer().modal().is_some());
    }

    #[test]
    fn test_detail_finishing_mid_search_hides_spinner_early() {
        let mut ctrl = controller(FakeCatalog::default());
        let search = ctrl.begin_search("alien").unwrap();
        let detail = ctrl.begin_detail("tt0078748").unwrap();

        assert!(ctrl.finish_detail(detail, Ok::<_, FakeError>(fallback_detail("tt0078748"))));
        assert!(!ctrl.renderer().is_loading());

        assert!(ctrl.finish_search::<FakeError>(search, Ok(vec![movie("tt0078748", "Alien")])));
        assert_eq!(ctrl.renderer().results_title(), "Hasil untuk \"alien\"");
        assert_eq!(ctrl.renderer().results_count(), 1);
    }

    #[tokio::test]
    async fn test_last_query_restored_within_session() {
        let store = PersistenceStore::new(Box::new(MemoryStore::new()), Box::new(MemoryStore::new()));
        let mut ctrl = Controller::new(
            batman_catalog(),
            store,
            HtmlRenderer::new(),
            ControllerOptions::default(),
        );
        ctrl.start();
        ctrl.submit("batman").await;

        // A fresh renderer stands in for a page reload within the session.
        *ctrl.renderer_mut() = HtmlRenderer::new();
        ctrl.start();
        assert_eq!(ctrl.renderer().query(), "batman");
        assert_eq!(ctrl.state().current_query, "batman");
        assert_eq!(ctrl.renderer().results_title(), "Film Populer");
    }
}
