//! Permission checks shared by handlers and the permission guard.

use crate::domain::Permission;

pub fn is_onboarded(permissions: &[Permission]) -> bool {
    permissions.contains(&Permission::Onboarded)
}

/// Permissions from `required` that `granted` lacks, in `required` order.
pub fn missing(granted: &[Permission], required: &[Permission]) -> Vec<Permission> {
    required
        .iter()
        .filter(|p| !granted.contains(p))
        .copied()
        .collect()
}

pub fn has_all(granted: &[Permission], required: &[Permission]) -> bool {
    missing(granted, required).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn onboarded_flag() {
        assert!(is_onboarded(&[Permission::EmailVerified, Permission::Onboarded]));
        assert!(!is_onboarded(&[Permission::EmailVerified]));
        assert!(!is_onboarded(&[]));
    }

    #[test]
    fn missing_lists_absent_permissions() {
        let granted = [Permission::AccessStudio];
        let required = [Permission::EmailVerified, Permission::AccessStudio];

        assert_eq!(missing(&granted, &required), vec![Permission::EmailVerified]);
        assert!(!has_all(&granted, &required));
        assert!(has_all(&granted, &[]));
    }
}
