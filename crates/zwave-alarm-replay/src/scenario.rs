//! Scenario files.
//!
//! A scenario describes one node and an ordered list of steps to run against
//! it:
//!
//! ```yaml
//! name: smoke detector discovery
//! node: 7
//! version: 3
//! steps:
//!   - initialize
//!   - request_state:
//!       static: true
//!   - inbound: "08 01 02"
//!   - inbound: "02 01 01 13"
//!   - request_value: {}
//! ```

use crate::error::{ReplayError, ReplayResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use zwave_alarm::{AlarmConfig, NodeId, QueueKind, RequestFlags};

fn default_version() -> u8 {
    1
}

fn default_instance() -> u8 {
    1
}

/// A node and the steps to replay against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Human readable name.
    #[serde(default)]
    pub name: Option<String>,
    /// Node id of the device.
    pub node: NodeId,
    /// Negotiated command class version.
    #[serde(default = "default_version")]
    pub version: u8,
    /// Device instance the steps address.
    #[serde(default = "default_instance")]
    pub instance: u8,
    /// Command class configuration.
    #[serde(default)]
    pub config: AlarmConfig,
    /// Steps in order.
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Parse a scenario from YAML text.
    pub fn from_yaml_str(yaml: &str) -> ReplayResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a scenario file.
    pub fn load(path: impl AsRef<Path>) -> ReplayResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Display name, falling back to the node id.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("{} v{}", self.node, self.version))
    }
}

/// One replay step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Create the header slots.
    Initialize,

    /// Ask the command class to request state.
    RequestState {
        /// Include static discovery.
        #[serde(default, rename = "static")]
        static_: bool,
        /// Include dynamic values.
        #[serde(default)]
        dynamic: bool,
        /// Queue for the resulting frames.
        #[serde(default)]
        queue: QueueKind,
    },

    /// Ask the command class to refresh values.
    RequestValue {
        /// Queue for the resulting frames.
        #[serde(default)]
        queue: QueueKind,
    },

    /// Deliver an inbound frame, written as hex bytes (command byte first).
    Inbound(String),
}

impl Step {
    /// Request flags for a `request_state` step.
    pub fn flags(&self) -> RequestFlags {
        match self {
            Step::RequestState {
                static_, dynamic, ..
            } => {
                let mut flags = RequestFlags::empty();
                if *static_ {
                    flags = flags | RequestFlags::STATIC;
                }
                if *dynamic {
                    flags = flags | RequestFlags::DYNAMIC;
                }
                flags
            }
            Step::RequestValue { .. } => RequestFlags::DYNAMIC,
            Step::Initialize | Step::Inbound(_) => RequestFlags::empty(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Initialize => write!(f, "initialize"),
            Step::RequestState {
                static_,
                dynamic,
                queue,
            } => write!(
                f,
                "request_state static={} dynamic={} queue={}",
                static_, dynamic, queue
            ),
            Step::RequestValue { queue } => write!(f, "request_value queue={}", queue),
            Step::Inbound(frame) => write!(f, "inbound {}", frame),
        }
    }
}

/// Parse a frame written as hex, ignoring whitespace.
pub fn parse_hex_frame(text: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(compact)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
name: smoke
node: 7
version: 3
steps:
  - initialize
  - request_state:
      static: true
  - inbound: "02 01 01 13"
  - request_value:
      queue: poll
"#;

    #[test]
    fn test_parse_scenario() {
        let scenario = Scenario::from_yaml_str(SCENARIO).unwrap();
        assert_eq!(scenario.name.as_deref(), Some("smoke"));
        assert_eq!(scenario.node, NodeId(7));
        assert_eq!(scenario.version, 3);
        assert_eq!(scenario.instance, 1);
        assert_eq!(scenario.config, AlarmConfig::default());
        assert_eq!(scenario.steps.len(), 4);
        assert_eq!(scenario.steps[0], Step::Initialize);
        assert_eq!(scenario.steps[1].flags(), RequestFlags::STATIC);
        assert_eq!(scenario.steps[2], Step::Inbound("02 01 01 13".to_string()));
        assert_eq!(
            scenario.steps[3],
            Step::RequestValue {
                queue: QueueKind::Poll
            }
        );
    }

    #[test]
    fn test_parse_config_override() {
        let yaml = r#"
node: 3
config:
  get_supported: false
steps: []
"#;
        let scenario = Scenario::from_yaml_str(yaml).unwrap();
        assert_eq!(scenario.version, 1);
        assert!(!scenario.config.get_supported);
        assert_eq!(scenario.config.transmit_options, 0x25);
        assert_eq!(scenario.display_name(), "node 003 v1");
    }

    #[test]
    fn test_parse_hex_frame() {
        assert_eq!(parse_hex_frame("05 02 50").unwrap(), vec![0x05, 0x02, 0x50]);
        assert_eq!(parse_hex_frame("0a0B").unwrap(), vec![0x0A, 0x0B]);
        assert!(parse_hex_frame("05 2").is_err());
        assert!(parse_hex_frame("zz").is_err());
    }

    #[test]
    fn test_missing_node_is_error() {
        assert!(Scenario::from_yaml_str("steps: []").is_err());
    }
}
