//! Favorite wallet addresses and the tag identifiers attached to them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag identifier as it travels through requests and storage.
///
/// Equality and hashing go through [`TagId::normalized`], so `" AB12 "` and
/// `"ab12"` name the same tag. The raw form is kept for error messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(String);

impl TagId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The identifier as it was supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn normalized(&self) -> String {
        self.0.trim().to_ascii_lowercase()
    }
}

impl PartialEq for TagId {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for TagId {}

impl std::hash::Hash for TagId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TagId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TagId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteWalletAddress {
    pub wallet_address: String,
    pub tags: Vec<TagId>,
}

impl FavoriteWalletAddress {
    pub fn new<I, T>(wallet_address: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TagId>,
    {
        Self {
            wallet_address: wallet_address.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}
