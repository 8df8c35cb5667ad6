//! Database models and queries

pub mod artists;
pub mod init;
pub mod models;
pub mod seed;
pub mod shows;
pub mod store;
pub mod venues;

pub use init::*;
pub use models::*;
pub use seed::{seed_sample_data, SeedOutcome};
pub use store::SqliteStore;

use sqlx::{Sqlite, Transaction};
use tracing::warn;

/// Roll back a failed write, logging (not returning) any rollback error
///
/// The caller already holds the error that caused the rollback.
pub(crate) async fn rollback(tx: Transaction<'_, Sqlite>) {
    if let Err(e) = tx.rollback().await {
        warn!("Transaction rollback failed: {}", e);
    }
}
