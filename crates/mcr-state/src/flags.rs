//! Runtime feature flags that switch lifecycle transitions on and off.
//!
//! Passed explicitly into every gating query. Loaded from the `flags`
//! section of the CLI config; missing keys take the defaults below.

use serde::{Deserialize, Serialize};

/// Feature flags consulted by [`crate::allowed_actions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FeatureFlags {
    /// CMS may withdraw a submitted package. Default on.
    pub withdraw: bool,
    /// CMS may revert a withdrawal. Default off.
    pub undo_withdraw: bool,
    /// CMS may approve ("release to state"). Default on.
    pub release_to_state: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            withdraw: true,
            undo_withdraw: false,
            release_to_state: true,
        }
    }
}

impl FeatureFlags {
    /// Every flag on.
    pub fn all_enabled() -> Self {
        Self {
            withdraw: true,
            undo_withdraw: true,
            release_to_state: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_withdraw_is_off_by_default() {
        let flags = FeatureFlags::default();
        assert!(flags.withdraw);
        assert!(flags.release_to_state);
        assert!(!flags.undo_withdraw);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let flags: FeatureFlags = serde_yaml::from_str("undo-withdraw: true\n").unwrap();
        assert!(flags.undo_withdraw);
        assert!(flags.withdraw);
    }

    #[test]
    fn empty_yaml_mapping_is_default() {
        let flags: FeatureFlags = serde_yaml::from_str("{}").unwrap();
        assert_eq!(flags, FeatureFlags::default());
    }
}
