//! Item domain types.

use serde::{Deserialize, Serialize};

/// Status assigned when a new item does not carry one.
pub const DEFAULT_STATUS: &str = "active";

/// The single record managed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub status: String,
}

/// Create payload. Fields are optional so that missing values surface as
/// a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl NewItem {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            status: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Partial update payload. Only present, non-empty fields overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl ItemPatch {
    /// Apply the patch to `item` in place.
    pub fn apply(self, item: &mut Item) {
        if let Some(name) = non_empty(self.name) {
            item.name = name;
        }
        if let Some(description) = non_empty(self.description) {
            item.description = description;
        }
        if let Some(status) = non_empty(self.status) {
            item.status = status;
        }
    }
}

/// Treats empty strings the same as absent values.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
