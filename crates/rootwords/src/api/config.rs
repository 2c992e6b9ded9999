use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Where newly committed words attach in the derivation tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachPolicy {
    /// Under whichever node the player last selected (or the last insert).
    #[default]
    Branching,
    /// Always under the most recently inserted word: a single chain.
    Chain,
}

/// How ring slots are enabled once a node becomes current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityPolicy {
    /// The node's own slots are enabled, except the ones its children
    /// already consumed, which show as used. Everything else is disabled.
    #[default]
    MarkChildrenUsed,
    /// Exactly the node's own slots are enabled; nothing shows as used.
    SelectedNodeOnly,
}

/// Configuration for a session, provided by the host page.
/// Every field is optional in JSON and falls back to the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Ring center X in host pixels (default: 150).
    pub center_x: f32,
    /// Ring center Y in host pixels (default: 150).
    pub center_y: f32,
    /// Distance from the center to each letter slot (default: 120).
    pub ring_radius: f32,
    /// Hit radius of a letter slot (default: 25).
    pub slot_radius: f32,
    /// Hit radius of the commit control at the ring center (default: 25).
    pub commit_radius: f32,
    pub attach_policy: AttachPolicy,
    pub availability_policy: AvailabilityPolicy,
    /// Words shorter than this are rejected as invalid (default: 1).
    pub min_word_length: usize,
    /// Location of the newline-delimited word list. The host fetches it once.
    pub dictionary_url: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            center_x: 150.0,
            center_y: 150.0,
            ring_radius: 120.0,
            slot_radius: 25.0,
            commit_radius: 25.0,
            attach_policy: AttachPolicy::default(),
            availability_policy: AvailabilityPolicy::default(),
            min_word_length: 1,
            dictionary_url: "/dictionary.txt".to_string(),
        }
    }
}

impl SessionConfig {
    /// Parse a config from a JSON string. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x, self.center_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_json_is_default() {
        let config = SessionConfig::from_json("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.center(), Vec2::new(150.0, 150.0));
    }

    #[test]
    fn parse_policies_and_geometry() {
        let json = r#"{
            "ring_radius": 200,
            "attach_policy": "chain",
            "availability_policy": "selected_node_only",
            "min_word_length": 3
        }"#;
        let config = SessionConfig::from_json(json).unwrap();
        assert_eq!(config.ring_radius, 200.0);
        assert_eq!(config.attach_policy, AttachPolicy::Chain);
        assert_eq!(config.availability_policy, AvailabilityPolicy::SelectedNodeOnly);
        assert_eq!(config.min_word_length, 3);
        assert_eq!(config.slot_radius, 25.0);
        assert_eq!(config.dictionary_url, "/dictionary.txt");
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = SessionConfig::from_json("{ ring_radius: }").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
