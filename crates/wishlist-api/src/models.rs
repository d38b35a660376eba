use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned identifier of a wishlist item
///
/// The client treats it as opaque: it is only ever read back from the API
/// and echoed into request paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ItemId)
    }
}

/// A wishlist entry as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    // The backend column is nullable, so both missing and null mean "not downloaded"
    #[serde(default, deserialize_with = "null_as_false")]
    pub downloaded: bool,
}

impl WishlistItem {
    /// Category label, if there is a non-empty one
    pub fn category_label(&self) -> Option<&str> {
        non_empty(self.category.as_deref())
    }

    pub fn description_text(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    pub fn url_text(&self) -> Option<&str> {
        non_empty(self.url.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Body of a create request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub downloaded: bool,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = optional(description.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = optional(url.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = optional(category.into());
        self
    }

    pub fn downloaded(mut self, downloaded: bool) -> Self {
        self.downloaded = downloaded;
        self
    }
}

fn optional(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Partial update body - only `Some` fields go over the wire
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloaded: Option<bool>,
}

impl ItemPatch {
    /// Patch that only flips the downloaded flag
    pub fn downloaded(downloaded: bool) -> Self {
        Self {
            downloaded: Some(downloaded),
            ..Self::default()
        }
    }
}
