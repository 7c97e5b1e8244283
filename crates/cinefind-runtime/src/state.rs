use serde::{Deserialize, Serialize};

use cinefind_core::models::MovieSummary;

/// User intents raised by the front end.
///
/// Cards raise `Detail`, history entries and the search box raise `Search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UiSignal {
    Search { query: String },
    Detail { id: String },
    ClearHistory,
    ToggleTheme,
    Retry,
    DismissError,
    CloseDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    ShowingResults,
    ShowingError,
}

/// Text of the visible error panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub title: String,
    pub message: String,
}

/// Controller-owned view state, rebuilt on each transition.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub current_query: String,
    pub current_results: Vec<MovieSummary>,
    pub loading: bool,
    pub error: Option<ErrorNotice>,
    pub phase: Phase,
    /// Id whose detail panel is open or being fetched.
    pub selected: Option<String>,
    /// The grid holds synthesized rows rather than catalog data.
    pub showing_fallback: bool,
}

/// An in-flight search. Hand back to `finish_search` with the catalog's answer.
#[derive(Debug)]
pub struct SearchTicket {
    pub(crate) generation: u64,
    pub(crate) query: String,
}

impl SearchTicket {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// An in-flight detail lookup.
#[derive(Debug)]
pub struct DetailTicket {
    pub(crate) generation: u64,
    pub(crate) id: String,
}

impl DetailTicket {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_wire_shape() {
        let json = serde_json::to_string(&UiSignal::Search {
            query: "batman".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"search","query":"batman"}"#);

        let back: UiSignal = serde_json::from_str(r#"{"kind":"clear_history"}"#).unwrap();
        assert_eq!(back, UiSignal::ClearHistory);
    }
}
