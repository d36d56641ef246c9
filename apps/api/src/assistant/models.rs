use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::assistant::features::Feature;

/// POST body for the assistant route.
///
/// `message` stays untyped so a non-string value is reported by the guard
/// as invalid input instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRequest {
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub conversation_history: Vec<HistoryMessage>,
}

/// One prior turn as the browser keeps it. Roles are free-form on the wire;
/// unknown roles are dropped when the history is scoped.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssistantReply {
    pub success: bool,
    pub message: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TipResponse {
    pub success: bool,
    pub tip: String,
    pub suggested_feature: Feature,
}
