//! Request guard for the assistant route.
//!
//! Everything a user types passes through here before it can reach an LLM
//! provider: validation, the denylist, and sanitization. Model output comes
//! back through `clean_reply` before it is returned.

use std::sync::LazyLock;

use regex::{Regex, RegexSet};
use serde_json::Value;
use thiserror::Error;

use crate::assistant::models::HistoryMessage;
use crate::llm_client::{ChatMessage, Role};

pub const MAX_MESSAGE_CHARS: usize = 1000;
pub const MAX_REPLY_CHARS: usize = 2000;
pub const MAX_HISTORY_TURNS: usize = 10;

const REDACTED: &str = "[redacted]";

/// Prompt-injection and data-exfiltration phrasing. Matching any entry
/// rejects the message outright.
const DENYLIST: &[&str] = &[
    // instruction override
    r"(?i)\b(ignore|disregard|forget|bypass)\s+(all\s+|any\s+|the\s+|your\s+|my\s+)*(previous\s+|prior\s+|above\s+|earlier\s+|preceding\s+|original\s+|system\s+)?(instructions?|prompts?|rules|guidelines|directions)\b",
    r"(?i)\boverride\s+(your|the|all|any)\s+(instructions?|rules|settings|restrictions|filters|guidelines)\b",
    r"(?i)\bnew\s+(instructions?|rules)\s*:",
    // role-play / jailbreak
    r"(?i)\byou\s+are\s+now\b",
    r"(?i)\bact\s+as\s+(an?|if|my)\b",
    r"(?i)\bpretend\s+(to\s+be|you\s+are|that\s+you)\b",
    r"(?i)\brole[\s-]?play",
    r"(?i)\bjail\s*break",
    r"(?i)\bdo\s+anything\s+now\b",
    r"(?i)\b(developer|god|sudo|admin)\s+mode\b",
    // system prompt extraction
    r"(?i)\bsystem\s+prompt\b",
    r"(?i)\b(reveal|show|print|repeat|display|output|tell\s+me|what\s+(is|are|were))\s+(me\s+)?your\s+(hidden\s+|initial\s+|original\s+|secret\s+)?(instructions|prompt|rules|guidelines|configuration)\b",
    r"(?i)\brepeat\s+(the\s+)?(text|words|everything)\s+above\b",
    // code / image generation
    r"(?i)\b(write|generate|create|give\s+me)\s+(me\s+)?(a\s+|an\s+|some\s+|the\s+)?(\w+\s+)?(code|script|program|function|sql\s+query)\b",
    r"(?i)\b(generate|create|draw|make)\s+(me\s+)?(a\s+|an\s+|some\s+)?(image|picture|photo|drawing|illustration)s?\b",
    // data exfiltration
    r"(?i)\b(all|other|every|another)\s+users?(?:'s|')?\s+(data|emails?|passwords?|details|information|info|profiles?|phone\s+numbers?|records)\b",
    r"(?i)\b(dump|export|leak|extract|download)\s+(the\s+|all\s+|your\s+)*(database|db|tables?|records|user\s+data)\b",
    r"(?i)\bselect\s+\*\s+from\b",
    r"(?i)\b(your|admin'?s?|another\s+user'?s?|other\s+users?'?s?|someone'?s?|system|server|database|internal)\s+(passwords?|access\s+tokens?|tokens?|credentials)\b",
    r"(?i)\b(give|show|tell|reveal|send|share|list|print)\s+(me\s+)?(\w+\s+){0,3}(api[\s_-]?keys?|secret\s+keys?|env(ironment)?\s+variables)\b",
];

static DENYLIST_SET: LazyLock<RegexSet> =
    LazyLock::new(|| RegexSet::new(DENYLIST).expect("denylist patterns must compile"));

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n\t]+").expect("line break pattern must compile"));

static REPLY_LEAKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)system\s+prompt|instructions\s*:").expect("redaction pattern must compile")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GuardError {
    #[error("Please enter a message")]
    InvalidInput,

    #[error("Message is too long (max {max} characters)")]
    InputTooLong { max: usize },

    #[error("I can only help with career and Rojgaar platform questions")]
    BlockedPattern,
}

impl GuardError {
    pub fn code(&self) -> &'static str {
        match self {
            GuardError::InvalidInput => "INVALID_INPUT",
            GuardError::InputTooLong { .. } => "INPUT_TOO_LONG",
            GuardError::BlockedPattern => "BLOCKED_PATTERN",
        }
    }
}

/// Validates a raw `message` field and returns its sanitized text.
///
/// Order matters: type/emptiness, then length on the raw input, then the
/// denylist, and only then sanitization.
pub fn validate_message(raw: Option<&Value>) -> Result<String, GuardError> {
    let text = raw
        .and_then(Value::as_str)
        .ok_or(GuardError::InvalidInput)?;

    if text.trim().is_empty() {
        return Err(GuardError::InvalidInput);
    }

    if text.chars().count() > MAX_MESSAGE_CHARS {
        return Err(GuardError::InputTooLong {
            max: MAX_MESSAGE_CHARS,
        });
    }

    if is_blocked(text) {
        return Err(GuardError::BlockedPattern);
    }

    let clean = sanitize(text);
    if clean.is_empty() {
        return Err(GuardError::InvalidInput);
    }
    // Stripped control characters can join a blocked phrase back together.
    if is_blocked(&clean) {
        return Err(GuardError::BlockedPattern);
    }
    Ok(clean)
}

pub fn is_blocked(text: &str) -> bool {
    DENYLIST_SET.is_match(text)
}

/// Collapses line breaks and tabs to single spaces and drops every other
/// control character. Idempotent.
pub fn sanitize(text: &str) -> String {
    let collapsed = LINE_BREAKS.replace_all(text, " ");
    collapsed
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Reduces browser-supplied history to what may be forwarded: known roles,
/// sanitized and bounded content, nothing the denylist would reject, and
/// only the most recent turns.
pub fn scope_history(history: &[HistoryMessage]) -> Vec<ChatMessage> {
    let mut scoped: Vec<ChatMessage> = history
        .iter()
        .filter_map(|turn| {
            let role = Role::parse(&turn.role)?;
            let clean = sanitize(&turn.content);
            if is_blocked(&turn.content) || is_blocked(&clean) {
                return None;
            }
            let content = truncate_chars(&clean, MAX_MESSAGE_CHARS);
            (!content.is_empty()).then_some(ChatMessage { role, content })
        })
        .collect();

    if scoped.len() > MAX_HISTORY_TURNS {
        scoped.drain(..scoped.len() - MAX_HISTORY_TURNS);
    }
    scoped
}

/// Post-processes model output: redacts prompt-leak phrases, then caps length.
pub fn clean_reply(reply: &str) -> String {
    let redacted = REPLY_LEAKS.replace_all(reply.trim(), REDACTED);
    truncate_chars(&redacted, MAX_REPLY_CHARS)
}

pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
