//! Interactive direct-message payloads

use serde::{Deserialize, Serialize};

/// Message attachment with action buttons
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub actions: Vec<PostAction>,
}

/// Button that posts back to the plugin when clicked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAction {
    pub name: String,
    pub url: String,
    /// Opaque values echoed back to the action handler.
    #[serde(default)]
    pub context: serde_json::Map<String, serde_json::Value>,
}
