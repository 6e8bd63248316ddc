//! Validation of a replacement list of favorite wallet addresses.
//!
//! Entries are checked in order and the first failing entry decides the
//! outcome. Within one entry every tag problem is collected before the entry
//! is rejected; an address seen on an earlier accepted entry fails on its own.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::domain::user::{FavoriteWalletAddress, TagId, UserTag};

/// Request field the violation messages refer to.
pub const FAVORITES_FIELD: &str = "favoriteWalletAddresses";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    InvalidTag,
    DuplicateTag,
    DuplicateAddress,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidTag => "invalid_tag",
            Self::DuplicateTag => "duplicate_tag",
            Self::DuplicateAddress => "duplicate_address",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationViolation {
    pub kind: ViolationKind,
    pub subject: String,
}

impl ValidationViolation {
    fn new(kind: ViolationKind, subject: impl Into<String>) -> Self {
        Self {
            kind,
            subject: subject.into(),
        }
    }
}

impl fmt::Display for ValidationViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            ViolationKind::InvalidTag => "invalid tag",
            ViolationKind::DuplicateTag => "duplicate tag",
            ViolationKind::DuplicateAddress => "duplicate address",
        };
        write!(f, "{} contains {}: \"{}\"", FAVORITES_FIELD, what, self.subject)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("favorite wallet addresses rejected: {}", .violations.len())]
pub struct FavoriteAddressRejection {
    pub violations: Vec<ValidationViolation>,
}

impl FavoriteAddressRejection {
    /// Human-readable messages in report order.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

/// Validator bound to a snapshot of the tags the user owns.
#[derive(Debug, Clone)]
pub struct FavoriteAddressValidator {
    user_tags: HashSet<TagId>,
}

impl FavoriteAddressValidator {
    pub fn new(user_tags: impl IntoIterator<Item = TagId>) -> Self {
        Self {
            user_tags: user_tags.into_iter().collect(),
        }
    }

    pub fn for_user_tags(tags: &[UserTag]) -> Self {
        Self::new(tags.iter().map(|t| t.id.clone()))
    }

    pub fn validate(
        &self,
        candidates: Vec<FavoriteWalletAddress>,
    ) -> Result<Vec<FavoriteWalletAddress>, FavoriteAddressRejection> {
        let mut addresses: HashSet<&str> = HashSet::new();

        for favorite in &candidates {
            let violations = self.tag_violations(favorite);
            if !violations.is_empty() {
                return Err(FavoriteAddressRejection { violations });
            }

            if !addresses.insert(favorite.wallet_address.as_str()) {
                return Err(FavoriteAddressRejection {
                    violations: vec![ValidationViolation::new(
                        ViolationKind::DuplicateAddress,
                        favorite.wallet_address.as_str(),
                    )],
                });
            }
        }

        Ok(candidates)
    }

    /// Invalid tags first, then duplicates, each in tag order.
    fn tag_violations(&self, favorite: &FavoriteWalletAddress) -> Vec<ValidationViolation> {
        let mut seen: HashSet<&TagId> = HashSet::new();
        let mut invalid = Vec::new();
        let mut duplicate = Vec::new();

        for tag in &favorite.tags {
            if !seen.insert(tag) {
                duplicate.push(ValidationViolation::new(ViolationKind::DuplicateTag, tag.as_str()));
            } else if !self.user_tags.contains(tag) {
                invalid.push(ValidationViolation::new(ViolationKind::InvalidTag, tag.as_str()));
            }
        }

        invalid.extend(duplicate);
        invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator(tags: &[&str]) -> FavoriteAddressValidator {
        FavoriteAddressValidator::new(tags.iter().map(|t| TagId::new(*t)))
    }

    fn fav(address: &str, tags: &[&str]) -> FavoriteWalletAddress {
        FavoriteWalletAddress::new(address, tags.iter().copied())
    }

    #[test]
    fn repeated_tag_in_one_entry_is_reported_as_duplicate() {
        let err = validator(&["A", "B"])
            .validate(vec![fav("0x1", &["A", "A"])])
            .unwrap_err();

        assert_eq!(
            err.messages(),
            vec![r#"favoriteWalletAddresses contains duplicate tag: "A""#]
        );
    }

    #[test]
    fn repeated_address_fails_on_second_entry() {
        let err = validator(&["A"])
            .validate(vec![fav("0x1", &["A"]), fav("0x1", &["A"])])
            .unwrap_err();

        assert_eq!(
            err.messages(),
            vec![r#"favoriteWalletAddresses contains duplicate address: "0x1""#]
        );
        assert_eq!(err.violations[0].kind, ViolationKind::DuplicateAddress);
    }

    #[test]
    fn unknown_tag_is_invalid() {
        let err = validator(&["A"])
            .validate(vec![fav("0x1", &["Z"])])
            .unwrap_err();

        assert_eq!(
            err.messages(),
            vec![r#"favoriteWalletAddresses contains invalid tag: "Z""#]
        );
    }

    #[test]
    fn empty_list_is_accepted() {
        let accepted = validator(&[]).validate(Vec::new()).unwrap();
        assert!(accepted.is_empty());
    }

    #[test]
    fn entry_without_tags_only_checks_address() {
        let accepted = validator(&[])
            .validate(vec![fav("0x1", &[]), fav("0x2", &[])])
            .unwrap();
        assert_eq!(accepted.len(), 2);

        let err = validator(&[])
            .validate(vec![fav("0x1", &[]), fav("0x1", &[])])
            .unwrap_err();
        assert_eq!(err.violations.len(), 1);
    }

    #[test]
    fn all_tag_problems_of_one_entry_are_reported_together() {
        let err = validator(&["A"])
            .validate(vec![fav("0x1", &["X", "A", "X", "A", "Y"])])
            .unwrap_err();

        assert_eq!(
            err.messages(),
            vec![
                r#"favoriteWalletAddresses contains invalid tag: "X""#,
                r#"favoriteWalletAddresses contains invalid tag: "Y""#,
                r#"favoriteWalletAddresses contains duplicate tag: "X""#,
                r#"favoriteWalletAddresses contains duplicate tag: "A""#,
            ]
        );
    }

    #[test]
    fn first_failing_entry_decides_the_report() {
        let err = validator(&["A"])
            .validate(vec![
                fav("0x1", &["A"]),
                fav("0x2", &["Z"]),
                fav("0x1", &["A"]),
                fav("0x3", &["Q"]),
            ])
            .unwrap_err();

        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].kind, ViolationKind::InvalidTag);
        assert_eq!(err.violations[0].subject, "Z");
    }

    #[test]
    fn tag_problems_win_over_a_repeated_address() {
        let err = validator(&["A"])
            .validate(vec![fav("0x1", &["A"]), fav("0x1", &["A", "A"])])
            .unwrap_err();

        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].kind, ViolationKind::DuplicateTag);
    }

    #[test]
    fn tag_membership_uses_normalized_ids() {
        let tags = ["65A1F0C2"];
        let accepted = validator(&tags)
            .validate(vec![fav("0x1", &[" 65a1f0c2 "])])
            .unwrap();
        assert_eq!(accepted[0].tags[0].as_str(), " 65a1f0c2 ");

        let err = validator(&tags)
            .validate(vec![fav("0x1", &["65a1f0c2", "65A1F0C2"])])
            .unwrap_err();
        assert_eq!(
            err.messages(),
            vec![r#"favoriteWalletAddresses contains duplicate tag: "65A1F0C2""#]
        );
    }

    #[test]
    fn accepted_list_is_returned_unchanged_and_revalidates() {
        let v = validator(&["A", "B"]);
        let list = vec![fav("0x1", &["A", "B"]), fav("0x2", &["B"])];

        let accepted = v.validate(list.clone()).unwrap();
        assert_eq!(accepted, list);

        let again = v.validate(accepted).unwrap();
        assert_eq!(again, list);
    }
}
