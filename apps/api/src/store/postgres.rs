use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::ProfileStore;
use crate::errors::AppError;
use crate::models::user::{ProfileRow, SessionRow};

#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn session_user(&self, token: &str) -> Result<Option<Uuid>, AppError> {
        let session: Option<SessionRow> = sqlx::query_as(
            r#"SELECT user_id, expires FROM sessions WHERE session_token = $1"#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session
            .filter(|s| s.is_live_at(Utc::now()))
            .map(|s| s.user_id))
    }

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<ProfileRow>, AppError> {
        // Explicit column list: the assistant must never see credentials.
        let profile = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, name, email, role, gender,
                   COALESCE(skills, '{}') AS skills,
                   bio, phone, location, education, experience, resume_url, image
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }
}
