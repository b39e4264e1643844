//! Traversal configuration for the shared role graph

use serde::Deserialize;

use crate::role::MAX_DEPTH;

/// Configuration for [`RoleGraph`](super::RoleGraph) traversals
///
/// # Examples
///
/// ```rust
/// use authz_roles::TraversalConfig;
///
/// let config: TraversalConfig = serde_json::from_str(r#"{"max_depth": 4}"#).unwrap();
/// assert_eq!(config.max_depth, 4);
/// assert!(config.detect_cycles);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Deepest sub-role level a traversal may reach (root is depth 0)
    pub max_depth: usize,

    /// Fail as soon as a role reappears on the current traversal path
    pub detect_cycles: bool,
}

impl TraversalConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_cycle_detection(mut self, enabled: bool) -> Self {
        self.detect_cycles = enabled;
        self
    }
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            detect_cycles: true,
        }
    }
}
