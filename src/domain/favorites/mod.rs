//! Favorite wallet address validation

pub mod validator;

pub use validator::{
    FavoriteAddressRejection, FavoriteAddressValidator, ValidationViolation, ViolationKind,
    FAVORITES_FIELD,
};
