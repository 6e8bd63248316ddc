use super::FavoriteWalletAddress;

/// Partial update of a user profile. `None` leaves a field untouched;
/// `Some` favorites replace the whole stored list.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserDto {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub favorite_wallet_addresses: Option<Vec<FavoriteWalletAddress>>,
}
