//! # Fyyur Common Library
//!
//! Shared code for the Fyyur booking directory:
//! - Entity models (venues, artists, shows) and genre tags
//! - SQLite schema, queries and sample data
//! - Show classification, partitioning, area grouping and search
//! - Configuration loading
//! - Start-time parsing and display

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod genres;
pub mod time;

pub use catalog::{Catalog, CatalogStore, OwnerKind};
pub use error::{Error, Result};
pub use genres::Genres;
