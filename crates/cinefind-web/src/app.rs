use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use cinefind_api::{CatalogService, OmdbClient, OmdbError};
use cinefind_core::config::{AppConfig, ThemePreference};
use cinefind_core::models::Theme;
use cinefind_core::persistence::PersistenceStore;
use cinefind_core::view::{CardView, DetailView, RatingBadge};
use cinefind_runtime::{Controller, ControllerOptions, UiSignal};

use crate::renderer::{DomRenderer, Page};
use crate::storage::BrowserStorage;

type WebController = Controller<OmdbClient, DomRenderer>;

fn build_controller(page: Page) -> Result<WebController, OmdbError> {
    let mut config = AppConfig::default();
    if let Some(key) = option_env!("OMDB_API_KEY") {
        config.catalog.api_key = key.to_string();
    }

    let catalog = OmdbClient::from_config(&config.catalog)?;
    let store = PersistenceStore::new(
        Box::new(BrowserStorage::local()),
        Box::new(BrowserStorage::session()),
    )
    .with_max_history(config.history.max_entries);

    let mut options = ControllerOptions::from_config(&config);
    if config.ui.default_theme == ThemePreference::System {
        options.default_theme = system_theme();
    }
    Ok(Controller::new(catalog, store, DomRenderer::new(page), options))
}

fn system_theme() -> Theme {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|m| if m.matches() { Theme::Dark } else { Theme::Light })
        .unwrap_or_default()
}

/// Route one signal into the controller. Catalog calls run on the browser
/// task queue; the controller is never borrowed across an await.
fn dispatch(ctrl: &Rc<RefCell<WebController>>, signal: UiSignal) {
    match signal {
        UiSignal::Search { query } => {
            let Some(ticket) = ctrl.borrow_mut().begin_search(&query) else {
                return;
            };
            let ctrl = Rc::clone(ctrl);
            spawn_local(async move {
                let catalog = ctrl.borrow().catalog().clone();
                let result = catalog.search_by_title(ticket.query()).await;
                ctrl.borrow_mut().finish_search(ticket, result);
            });
        }
        UiSignal::Detail { id } => {
            let Some(ticket) = ctrl.borrow_mut().begin_detail(&id) else {
                return;
            };
            let ctrl = Rc::clone(ctrl);
            spawn_local(async move {
                let catalog = ctrl.borrow().catalog().clone();
                let result = catalog.get_by_id(ticket.id()).await;
                ctrl.borrow_mut().finish_detail(ticket, result);
            });
        }
        UiSignal::Retry => {
            let query = {
                let mut c = ctrl.borrow_mut();
                c.dismiss_error();
                c.state().current_query.clone()
            };
            dispatch(ctrl, UiSignal::Search { query });
        }
        UiSignal::ClearHistory => ctrl.borrow_mut().clear_history(),
        UiSignal::ToggleTheme => {
            ctrl.borrow_mut().toggle_theme();
        }
        UiSignal::DismissError => ctrl.borrow_mut().dismiss_error(),
        UiSignal::CloseDetail => ctrl.borrow_mut().close_detail(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let page = Page::new();
    let (pending, send) = signal(None::<UiSignal>);

    match build_controller(page) {
        Ok(mut ctrl) => {
            ctrl.start();
            let ctrl = Rc::new(RefCell::new(ctrl));
            Effect::new(move |_| {
                if let Some(signal) = pending.get() {
                    dispatch(&ctrl, signal);
                }
            });
        }
        Err(e) => {
            tracing::error!("Failed to set up catalog client: {e}");
            page.error
                .set(Some(("Gagal memulai".into(), e.to_string())));
        }
    }

    let emit = move |signal: UiSignal| send.set(Some(signal));

    let _ = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" && page.detail.with_untracked(Option::is_some) {
            emit(UiSignal::CloseDetail);
        }
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        emit(UiSignal::Search {
            query: page.query.get_untracked(),
        });
    };

    view! {
        <main class="app">
            <header class="app-header">
                <h1>"Cinefind"</h1>
                <form class="search-form" on:submit=on_submit>
                    <input
                        id="searchInput"
                        type="text"
                        placeholder="Cari film..."
                        prop:value=move || page.query.get()
                        on:input=move |ev| page.query.set(event_target_value(&ev))
                    />
                    <button id="searchButton" type="submit">"Cari"</button>
                </form>
                <button id="themeToggle" on:click=move |_| emit(UiSignal::ToggleTheme)>
                    {move || match page.theme.get() {
                        Theme::Light => "Mode Gelap",
                        Theme::Dark => "Mode Terang",
                    }}
                </button>
            </header>

            <aside class="sidebar">
                <h3>"Riwayat Pencarian"</h3>
                <ul id="searchHistory">
                    <For
                        each=move || page.history.get()
                        key=|query| query.clone()
                        children=move |query| {
                            let label = query.clone();
                            view! {
                                <li on:click=move |_| emit(UiSignal::Search { query: query.clone() })>
                                    {label}
                                </li>
                            }
                        }
                    />
                </ul>
                <button id="clearHistory" on:click=move |_| emit(UiSignal::ClearHistory)>
                    "Hapus Riwayat"
                </button>
                <p class="stats">
                    "Total pencarian: "
                    <span id="totalSearches">{move || page.search_count.get()}</span>
                </p>
            </aside>

            <section class="results">
                <Show when=move || page.loading.get()>
                    <div id="loadingIndicator" class="loading">"Memuat..."</div>
                </Show>

                <Show when=move || page.error.with(Option::is_some)>
                    <div id="errorContainer" class="error">
                        <h3 id="errorTitle">
                            {move || page.error.get().map(|(title, _)| title).unwrap_or_default()}
                        </h3>
                        <p id="errorMessage">
                            {move || page.error.get().map(|(_, msg)| msg).unwrap_or_default()}
                        </p>
                        <button id="retryButton" on:click=move |_| emit(UiSignal::Retry)>
                            "Coba Lagi"
                        </button>
                        <button on:click=move |_| emit(UiSignal::DismissError)>"Tutup"</button>
                    </div>
                </Show>

                <div class="results-header">
                    <h2 id="resultsTitle">{move || page.heading.get()}</h2>
                    <span id="resultsCount">{move || page.cards.with(Vec::len)}</span>
                </div>

                <Show when=move || page.empty_state_visible()>
                    <div id="noResults">"Tidak ada film ditemukan."</div>
                </Show>

                <div id="moviesGrid" class="movies-grid" class:hidden=move || page.loading.get()>
                    <For
                        each=move || page.cards.get()
                        key=|card| card.id.clone()
                        children=move |card| movie_card(card, emit)
                    />
                </div>
            </section>

            {move || {
                page.detail.get().map(|detail| {
                    view! {
                        <div
                            id="movieModal"
                            class="modal"
                            on:click=move |ev| {
                                if ev.target() == ev.current_target() {
                                    emit(UiSignal::CloseDetail);
                                }
                            }
                        >
                            <div class="modal-content">
                                <button class="close-modal" on:click=move |_| emit(UiSignal::CloseDetail)>
                                    "×"
                                </button>
                                {detail_panel(detail)}
                            </div>
                        </div>
                    }
                })
            }}
        </main>
    }
}

fn movie_card(
    card: CardView,
    emit: impl Fn(UiSignal) + Copy + Send + Sync + 'static,
) -> impl IntoView {
    let CardView {
        id,
        title,
        poster_url,
        year,
        runtime,
        genre,
        badge,
    } = card;
    let badge_icon = match badge {
        RatingBadge::Score(_) => "fas fa-star",
        RatingBadge::MediaType(_) => "fas fa-film",
    };
    let badge = badge.text().to_string();
    let data_id = id.clone();
    let alt = title.clone();
    let tooltip = title.clone();
    view! {
        <div
            class="movie-card"
            data-id=data_id
            on:click=move |_| emit(UiSignal::Detail { id: id.clone() })
        >
            <div class="poster-container">
                <img src=poster_url alt=alt class="movie-poster" loading="lazy" />
            </div>
            <div class="movie-info">
                <h3 class="movie-title" title=tooltip>{title}</h3>
                <div class="movie-meta">
                    <span class="movie-year">{year}</span>
                    <span class="movie-runtime">{runtime}</span>
                </div>
                <span class="movie-genre">{genre}</span>
                <div class="movie-rating">
                    <i class=badge_icon></i>
                    <span>{badge}</span>
                </div>
            </div>
        </div>
    }
}

fn detail_panel(detail: DetailView) -> impl IntoView {
    let ratings = detail
        .ratings
        .into_iter()
        .map(|row| {
            view! {
                <div class="rating-item">
                    <div class="rating-source">{row.source}</div>
                    <div class="rating-value">
                        {row.value}
                        <small>{row.suffix.unwrap_or_default()}</small>
                    </div>
                </div>
            }
        })
        .collect_view();

    let poster_alt = detail.title.clone();
    let website = match detail.website {
        Some(url) => view! { <a href=url target="_blank">"Official Site"</a> }.into_any(),
        None => view! { <span>"N/A"</span> }.into_any(),
    };

    view! {
        <div class="movie-details" data-id=detail.id>
            <div class="detail-poster-container">
                <img src=detail.poster_url alt=poster_alt class="detail-poster" />
            </div>
            <div class="detail-info">
                <div class="detail-header">
                    <h2>{detail.title} " " <span class="year">"(" {detail.year} ")"</span></h2>
                    <div class="detail-subtitle">
                        <span class="rated">{detail.rated}</span>
                        <span class="runtime">{detail.runtime}</span>
                        <span class="language">{detail.language}</span>
                    </div>
                </div>
                <div class="ratings-section">
                    <h3>"Ratings"</h3>
                    <div class="ratings">{ratings}</div>
                </div>
                <div class="plot-section">
                    <h3>"Plot"</h3>
                    <p class="detail-plot">{detail.plot}</p>
                </div>
                <div class="details-grid">
                    <div class="detail-group"><h4>"Director"</h4><p>{detail.director}</p></div>
                    <div class="detail-group"><h4>"Writers"</h4><p>{detail.writers}</p></div>
                    <div class="detail-group"><h4>"Actors"</h4><p>{detail.actors}</p></div>
                    <div class="detail-group"><h4>"Genre"</h4><p>{detail.genre}</p></div>
                </div>
                <div class="additional-info">
                    <h3>"Additional Information"</h3>
                    <div class="info-items">
                        {detail.box_office.map(|b| view! {
                            <span class="detail-item"><strong>"Box Office: "</strong>{b}</span>
                        })}
                        {detail.awards.map(|a| view! {
                            <span class="detail-item"><strong>"Awards: "</strong>{a}</span>
                        })}
                        <span class="detail-item"><strong>"Country: "</strong>{detail.country}</span>
                        <span class="detail-item"><strong>"Website: "</strong>{website}</span>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use cinefind_core::fallback::{fallback_detail, fallback_results, popular_movies};

    use super::*;

    fn emitter() -> impl Fn(UiSignal) + Copy + Send + Sync + 'static {
        let (_, send) = signal(None::<UiSignal>);
        move |signal| send.set(Some(signal))
    }

    #[test]
    fn test_card_views_build_for_both_badges() {
        let owner = Owner::new();
        owner.set();
        let emit = emitter();

        let rated = CardView::from_summary(&popular_movies()[0]);
        assert!(matches!(rated.badge, RatingBadge::Score(_)));
        let _ = movie_card(rated, emit).into_view();

        let mut unrated = fallback_results("dune").remove(1);
        unrated.rating = None;
        let unrated = CardView::from_summary(&unrated);
        assert!(matches!(unrated.badge, RatingBadge::MediaType(_)));
        let _ = movie_card(unrated, emit).into_view();
    }

    #[test]
    fn test_detail_view_builds_with_and_without_website() {
        let owner = Owner::new();
        owner.set();

        let mut detail = fallback_detail("fallback1");
        let _ = detail_panel(DetailView::from_detail(&detail)).into_view();

        detail.website = Some("https://example.com".into());
        detail.awards = None;
        let _ = detail_panel(DetailView::from_detail(&detail)).into_view();
    }
}
