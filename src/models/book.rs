use serde::{Deserialize, Serialize};

/// Fallback for author/publisher fields the client or the external API left out.
pub const UNKNOWN_FIELD: &str = "unknown";
/// Fallback title for external documents that carry none.
pub const UNTITLED: &str = "untitled";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
