//! Per-node configuration for the Alarm command class.

use crate::constants::DEFAULT_TRANSMIT_OPTIONS;
use crate::types::QueueKind;
use serde::{Deserialize, Serialize};

/// Configuration for one node's Alarm command class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmConfig {
    /// Transmit options attached to every query.
    pub transmit_options: u8,
    /// Whether the device answers GET requests. Some battery devices only
    /// push reports.
    pub get_supported: bool,
    /// Queue used for follow-up queries issued while handling reports.
    pub discovery_queue: QueueKind,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        AlarmConfig {
            transmit_options: DEFAULT_TRANSMIT_OPTIONS,
            get_supported: true,
            discovery_queue: QueueKind::Query,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alarm_config_default() {
        let config = AlarmConfig::default();
        assert_eq!(config.transmit_options, 0x25);
        assert!(config.get_supported);
        assert_eq!(config.discovery_queue, QueueKind::Query);
    }
}
