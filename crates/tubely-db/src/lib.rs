//! Tubely Database Library
//!
//! Video record persistence backed by SQLite through `sqlx`.

pub mod db;

pub use db::{connect_pool, run_migrations, VideoRepository, VideoStore};
