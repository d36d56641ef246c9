//! Assistant orchestration.
//!
//! Flow: rate limit → guard → scoped profile → system prompt →
//!       primary/secondary provider → reply cleanup.
//!
//! Nothing reaches a provider unless every earlier step passed.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::assistant::features::features_for;
use crate::assistant::guard::{clean_reply, scope_history, validate_message};
use crate::assistant::models::{AssistantReply, AssistantRequest};
use crate::assistant::profile::ScopedProfile;
use crate::assistant::prompts::build_system_prompt;
use crate::assistant::rate_limit::RateLimiter;
use crate::errors::AppError;
use crate::llm_client::{ChatMessage, FallbackChat};
use crate::store::ProfileStore;

pub struct AssistantService {
    chat: FallbackChat,
    limiter: RateLimiter,
    profiles: Arc<dyn ProfileStore>,
}

impl AssistantService {
    pub fn new(chat: FallbackChat, limiter: RateLimiter, profiles: Arc<dyn ProfileStore>) -> Self {
        Self {
            chat,
            limiter,
            profiles,
        }
    }

    pub async fn respond(
        &self,
        user_id: Uuid,
        request: &AssistantRequest,
    ) -> Result<AssistantReply, AppError> {
        if let Err(limited) = self.limiter.check(user_id) {
            warn!("Assistant rate limit hit for user {user_id}");
            return Err(limited.into());
        }

        // The rejected text is never logged.
        let message = validate_message(request.message.as_ref()).map_err(|e| {
            warn!("Assistant input rejected for user {user_id}: {}", e.code());
            e
        })?;

        let row = self
            .profiles
            .find_profile(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        let profile = ScopedProfile::from_row(&row);
        let system = build_system_prompt(&profile);

        let mut messages = scope_history(&request.conversation_history);
        messages.push(ChatMessage::user(message.as_str()));

        let raw = self.chat.complete(&system, &messages).await?;
        info!(
            "Assistant replied to user {user_id} ({} history turns)",
            messages.len() - 1
        );

        Ok(AssistantReply {
            success: true,
            message: clean_reply(&raw),
            features: features_for(&message),
        })
    }

    pub fn remaining(&self, user_id: Uuid) -> u32 {
        self.limiter.remaining(user_id)
    }
}
