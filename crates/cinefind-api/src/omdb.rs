pub mod client;
pub mod error;
pub mod types;

pub use client::OmdbClient;
pub use error::OmdbError;
