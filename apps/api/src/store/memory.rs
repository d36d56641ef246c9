use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use super::ProfileStore;
use crate::errors::AppError;
use crate::models::user::ProfileRow;

/// In-process store for handler and service tests.
#[derive(Default)]
pub struct MemoryProfileStore {
    pub sessions: HashMap<String, Uuid>,
    pub profiles: HashMap<Uuid, ProfileRow>,
}

impl MemoryProfileStore {
    /// Adds a user with a live session under `token`.
    pub fn with_user(mut self, token: &str, profile: ProfileRow) -> Self {
        self.sessions.insert(token.to_string(), profile.id);
        self.profiles.insert(profile.id, profile);
        self
    }

    /// Adds a session whose user row no longer exists.
    pub fn with_orphan_session(mut self, token: &str, user_id: Uuid) -> Self {
        self.sessions.insert(token.to_string(), user_id);
        self
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn session_user(&self, token: &str) -> Result<Option<Uuid>, AppError> {
        Ok(self.sessions.get(token).copied())
    }

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<ProfileRow>, AppError> {
        Ok(self.profiles.get(&user_id).cloned())
    }
}
