pub mod config;
pub mod error;
pub mod fallback;
pub mod models;
pub mod persistence;
pub mod storage;
pub mod view;
