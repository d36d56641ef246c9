use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// The whitelisted slice of a `users` row the assistant may read.
/// Credentials and every other column stay out of the SELECT list.
#[derive(Debug, Clone, Default, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: String,
    pub gender: Option<String>,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub resume_url: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub user_id: Uuid,
    pub expires: DateTime<Utc>,
}

impl SessionRow {
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires > now
    }
}
