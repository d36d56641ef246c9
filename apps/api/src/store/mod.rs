//! Read-only access to the portal's users and sessions.
//!
//! `AppState` holds an `Arc<dyn ProfileStore>`; production wires in
//! `PgProfileStore`, tests use the in-memory store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::ProfileRow;

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgProfileStore;

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Resolves a session token to its user, ignoring expired sessions.
    async fn session_user(&self, token: &str) -> Result<Option<Uuid>, AppError>;

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<ProfileRow>, AppError>;
}
