//! Feature Flags
//!
//! Named boolean switches gating behavior at runtime. Handlers receive an
//! injectable provider and query it per request; nothing here is a process
//! global.

use std::collections::HashSet;
use std::sync::RwLock;

/// Gates publishing newly created people to the external marketing site.
pub const PUBLISH_PERSON_TO_MARKETING_SITE: &str = "publish_person_to_marketing_site";

/// Provider of named boolean switches, queried per request.
pub trait FeatureFlagProvider: Send + Sync {
    fn is_enabled(&self, switch: &str) -> bool;
}

/// In-memory switch set, seeded at startup and toggleable at runtime.
pub struct InMemoryFlags {
    enabled: RwLock<HashSet<String>>,
}

impl InMemoryFlags {
    pub fn new() -> Self {
        Self {
            enabled: RwLock::new(HashSet::new()),
        }
    }

    /// Seed from a list of switch names (e.g. the `[flags] enabled` config section).
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: RwLock::new(names.into_iter().map(Into::into).collect()),
        }
    }

    pub fn enable(&self, switch: &str) {
        self.enabled.write().unwrap().insert(switch.to_string());
    }

    pub fn disable(&self, switch: &str) {
        self.enabled.write().unwrap().remove(switch);
    }

    pub fn set(&self, switch: &str, active: bool) {
        if active {
            self.enable(switch);
        } else {
            self.disable(switch);
        }
    }
}

impl Default for InMemoryFlags {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureFlagProvider for InMemoryFlags {
    fn is_enabled(&self, switch: &str) -> bool {
        self.enabled.read().unwrap().contains(switch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_flags() {
        let flags = InMemoryFlags::from_names([PUBLISH_PERSON_TO_MARKETING_SITE]);
        assert!(flags.is_enabled(PUBLISH_PERSON_TO_MARKETING_SITE));
        assert!(!flags.is_enabled("unknown_switch"));
    }

    #[test]
    fn test_toggle() {
        let flags = InMemoryFlags::new();
        assert!(!flags.is_enabled(PUBLISH_PERSON_TO_MARKETING_SITE));

        flags.set(PUBLISH_PERSON_TO_MARKETING_SITE, true);
        assert!(flags.is_enabled(PUBLISH_PERSON_TO_MARKETING_SITE));

        flags.set(PUBLISH_PERSON_TO_MARKETING_SITE, false);
        assert!(!flags.is_enabled(PUBLISH_PERSON_TO_MARKETING_SITE));
    }
}
