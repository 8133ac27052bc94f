use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag entity - a named label attachable to multiple posts.
///
/// Names are stored case-preserving but are unique case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

impl Tag {
    /// Create a new tag with a fresh identity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
