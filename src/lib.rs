//! Memo management REST API backed by SQLite.

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod models;
