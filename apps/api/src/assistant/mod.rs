// Rojgaar career assistant: guarded proxy in front of the LLM providers.
// Every model call goes through llm_client; nothing here talks HTTP directly.

pub mod features;
pub mod guard;
pub mod handlers;
pub mod models;
pub mod profile;
pub mod prompts;
pub mod rate_limit;
pub mod service;
