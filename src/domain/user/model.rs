use std::fmt;

use chrono::{DateTime, Utc};

use super::favorite::{FavoriteWalletAddress, TagId};

/// Permission flags granted to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    EmailVerified,
    AccessStudio,
    Onboarded,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmailVerified => "email:verified",
            Self::AccessStudio => "access:studio",
            Self::Onboarded => "user:onboarded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "email:verified" => Some(Self::EmailVerified),
            "access:studio" => Some(Self::AccessStudio),
            "user:onboarded" => Some(Self::Onboarded),
            _ => None,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A label owned by a user that can be attached to favorite addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTag {
    pub id: TagId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// User model
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub permissions: Vec<Permission>,
    /// Populated only by tag-aware queries.
    pub tags: Vec<UserTag>,
    pub favorite_wallet_addresses: Vec<FavoriteWalletAddress>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_strings_round_trip() {
        for p in [
            Permission::EmailVerified,
            Permission::AccessStudio,
            Permission::Onboarded,
        ] {
            assert_eq!(Permission::parse(p.as_str()), Some(p));
        }
    }

    #[test]
    fn unknown_permission_is_rejected() {
        assert_eq!(Permission::parse("admin:all"), None);
        assert_eq!(Permission::parse("EMAIL:VERIFIED"), None);
    }
}
