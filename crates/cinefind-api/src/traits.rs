//! Catalog lookups consumed by the controller.
//!
//! Futures carry no `Send` bound so the same clients run on the browser's
//! single-threaded executor.

use std::future::Future;

use cinefind_core::models::{MovieDetail, MovieSummary};

/// A read-only movie metadata provider.
pub trait CatalogService {
    type Error: std::error::Error + 'static;

    /// Search by title. An empty vec is a valid answer.
    fn search_by_title(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<MovieSummary>, Self::Error>>;

    /// Fetch one record by catalog id.
    fn get_by_id(&self, id: &str) -> impl Future<Output = Result<MovieDetail, Self::Error>>;
}
