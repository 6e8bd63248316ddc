//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::OnboardProfile;
use crate::domain::{FavoriteWalletAddress, TagId, User, UserTag};

/// User API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub permissions: Vec<String>,
    pub tags: Vec<UserTagDto>,
    pub favorite_wallet_addresses: Vec<FavoriteWalletAddressDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            permissions: u.permissions.iter().map(|p| p.as_str().to_string()).collect(),
            tags: u.tags.into_iter().map(UserTagDto::from).collect(),
            favorite_wallet_addresses: u
                .favorite_wallet_addresses
                .into_iter()
                .map(FavoriteWalletAddressDto::from)
                .collect(),
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserTagDto {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserTag> for UserTagDto {
    fn from(t: UserTag) -> Self {
        Self {
            id: t.id.as_str().to_string(),
            name: t.name,
            created_at: t.created_at,
        }
    }
}

/// A favorite wallet address with the ids of the user's tags attached to it
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteWalletAddressDto {
    #[validate(length(min = 1, max = 128))]
    pub wallet_address: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<FavoriteWalletAddress> for FavoriteWalletAddressDto {
    fn from(f: FavoriteWalletAddress) -> Self {
        Self {
            wallet_address: f.wallet_address,
            tags: f.tags.iter().map(|t| t.as_str().to_string()).collect(),
        }
    }
}

impl From<FavoriteWalletAddressDto> for FavoriteWalletAddress {
    fn from(dto: FavoriteWalletAddressDto) -> Self {
        FavoriteWalletAddress::new(dto.wallet_address, dto.tags.into_iter().map(TagId::new))
    }
}

/// Onboarding request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnboardUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
}

impl From<OnboardUserRequest> for OnboardProfile {
    fn from(r: OnboardUserRequest) -> Self {
        Self {
            email: r.email,
            first_name: r.first_name,
            last_name: r.last_name,
        }
    }
}

/// Profile update request. Omitting `favoriteWalletAddresses` leaves the
/// stored list untouched; sending `[]` clears it.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(length(max = 100), nested)]
    pub favorite_wallet_addresses: Option<Vec<FavoriteWalletAddressDto>>,
}
