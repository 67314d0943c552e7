//! Reports received from Alarm/Notification devices.
//!
//! The report command shares one command byte across three layouts; which
//! layout applies depends on the negotiated command class version, so decoding
//! always takes the version alongside the frame.
//!
//! ```text
//! v1    [0x05, type, level]
//! v2    [0x05, type, level, source_node, status, notif_type, event]
//! v3+   [0x05, type, level, source_node, status, notif_type, event, ...]
//! ```

use crate::constants::*;
use crate::error::{AlarmError, AlarmResult};
use crate::types::*;
use tracing::trace;

/// Extended fields of a v2 alarm report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct V2Extension {
    /// Node that detected the alarm.
    pub source_node_id: u8,
    /// Raw notification type byte; addresses slot `type + 3`.
    pub notification_type: u8,
    /// Event byte, stored as the slot value.
    pub event: u8,
}

/// Notification fields of a v3+ report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct V3Notification {
    /// Notification status (0x00 off, 0xFF on).
    pub status: u8,
    /// Raw notification type byte.
    pub notification_type: u8,
    /// Event within the type.
    pub event: EventCode,
}

impl V3Notification {
    /// Notification type, if the byte is in the known table.
    pub fn known_type(&self) -> Option<NotificationType> {
        NotificationType::try_from(self.notification_type).ok()
    }
}

/// Reports decoded from an inbound Alarm command class frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmReport {
    /// Version 1 report: a flat type/level pair.
    V1 {
        /// Proprietary alarm type.
        alarm_type: u8,
        /// Proprietary alarm level.
        level: u8,
    },

    /// Version 2 report.
    V2 {
        /// Proprietary alarm type.
        alarm_type: u8,
        /// Proprietary alarm level.
        level: u8,
        /// Extended fields, absent when the frame is shorter than 7 bytes.
        extension: Option<V2Extension>,
    },

    /// Version 3+ notification report.
    V3 {
        /// Proprietary alarm type.
        alarm_type: u8,
        /// Notification fields, absent when the frame is shorter than 7 bytes.
        notification: Option<V3Notification>,
    },

    /// Supported notification types.
    SupportedTypes {
        /// Device also speaks the proprietary v1 alarm format.
        v1_alarm: bool,
        /// Type bitmask, bit `n` set when type `n` is supported.
        bitmask: Vec<u8>,
    },

    /// Supported events of one notification type.
    SupportedEvents {
        /// Raw notification type byte.
        notification_type: u8,
        /// Event bitmask, bit `n` set when event `n` is supported.
        bitmask: Vec<u8>,
    },
}

impl AlarmReport {
    /// Decode a report from a command class payload (command byte first).
    pub fn decode(frame: &[u8], version: u8) -> AlarmResult<Self> {
        let Some(&code) = frame.first() else {
            return Err(AlarmError::FrameTooShort {
                expected: 1,
                actual: 0,
            });
        };

        match code {
            ALARM_CMD_REPORT => decode_report(frame, version),

            ALARM_CMD_SUPPORTED_REPORT => {
                require_len(frame, 2)?;
                let count = frame[1];
                Ok(AlarmReport::SupportedTypes {
                    v1_alarm: count & SUPPORTED_V1_ALARM_FLAG != 0,
                    bitmask: take_bitmask(&frame[2..], count & BITMASK_COUNT_MASK),
                })
            }

            ALARM_CMD_EVENT_SUPPORTED_REPORT => {
                require_len(frame, 3)?;
                Ok(AlarmReport::SupportedEvents {
                    notification_type: frame[1],
                    bitmask: take_bitmask(&frame[3..], frame[2] & BITMASK_COUNT_MASK),
                })
            }

            other => Err(AlarmError::UnknownCommand(other)),
        }
    }

    /// Short name of the report kind, for logs and metrics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            AlarmReport::V1 { .. } => "report_v1",
            AlarmReport::V2 { .. } => "report_v2",
            AlarmReport::V3 { .. } => "report_v3",
            AlarmReport::SupportedTypes { .. } => "supported_types",
            AlarmReport::SupportedEvents { .. } => "supported_events",
        }
    }

    /// Whether a report arrived without its version-specific extended fields.
    pub fn is_truncated(&self) -> bool {
        matches!(
            self,
            AlarmReport::V2 { extension: None, .. } | AlarmReport::V3 { notification: None, .. }
        )
    }
}

fn decode_report(frame: &[u8], version: u8) -> AlarmResult<AlarmReport> {
    require_len(frame, REPORT_BASE_LEN)?;
    let alarm_type = frame[1];
    let level = frame[2];
    let extended = frame.len() >= REPORT_EXTENDED_LEN;

    match version {
        0 | 1 => Ok(AlarmReport::V1 { alarm_type, level }),

        2 => Ok(AlarmReport::V2 {
            alarm_type,
            level,
            extension: extended.then(|| V2Extension {
                source_node_id: frame[3],
                notification_type: frame[5],
                event: frame[6],
            }),
        }),

        _ => Ok(AlarmReport::V3 {
            alarm_type,
            notification: extended.then(|| V3Notification {
                status: frame[4],
                notification_type: frame[5],
                event: EventCode(frame[6]),
            }),
        }),
    }
}

fn require_len(frame: &[u8], expected: usize) -> AlarmResult<()> {
    if frame.len() < expected {
        return Err(AlarmError::FrameTooShort {
            expected,
            actual: frame.len(),
        });
    }
    Ok(())
}

fn take_bitmask(data: &[u8], declared: u8) -> Vec<u8> {
    let declared = declared as usize;
    if declared > data.len() {
        trace!(
            "Bitmask declares {} bytes but only {} present, clamping",
            declared,
            data.len()
        );
    }
    data[..declared.min(data.len())].to_vec()
}

/// Positions of set bits in a bitmask: byte index * 8 + bit, low bit first.
pub fn set_bits(bitmask: &[u8]) -> impl Iterator<Item = u16> + '_ {
    bitmask.iter().enumerate().flat_map(|(byte, &mask)| {
        (0..8u16)
            .filter(move |bit| mask & (1 << *bit) != 0)
            .map(move |bit| byte as u16 * 8 + bit)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_v1_report() {
        let report = AlarmReport::decode(&[0x05, 0x02, 0x50], 1).unwrap();
        assert_eq!(
            report,
            AlarmReport::V1 {
                alarm_type: 2,
                level: 0x50
            }
        );
    }

    #[test]
    fn test_decode_v2_report_extended() {
        let report = AlarmReport::decode(&[0x05, 0x01, 0xFF, 0x09, 0xFF, 0x06, 0x16], 2).unwrap();
        assert_eq!(
            report,
            AlarmReport::V2 {
                alarm_type: 1,
                level: 0xFF,
                extension: Some(V2Extension {
                    source_node_id: 9,
                    notification_type: 6,
                    event: 0x16,
                }),
            }
        );
        assert!(!report.is_truncated());
    }

    #[test]
    fn test_decode_v2_report_truncated() {
        let report = AlarmReport::decode(&[0x05, 0x01, 0xFF, 0x09], 2).unwrap();
        assert_eq!(
            report,
            AlarmReport::V2 {
                alarm_type: 1,
                level: 0xFF,
                extension: None,
            }
        );
        assert!(report.is_truncated());
    }

    #[test]
    fn test_decode_v3_report() {
        let report = AlarmReport::decode(&[0x05, 0x00, 0x00, 0x00, 0xFF, 0x07, 0x08, 0x00], 3).unwrap();
        match report {
            AlarmReport::V3 {
                notification: Some(n),
                ..
            } => {
                assert_eq!(n.status, 0xFF);
                assert_eq!(n.known_type(), Some(NotificationType::Burglar));
                assert_eq!(n.event, EventCode(8));
            }
            other => panic!("unexpected report {:?}", other),
        }
    }

    #[test]
    fn test_decode_short_report() {
        assert_eq!(
            AlarmReport::decode(&[0x05, 0x02], 1),
            Err(AlarmError::FrameTooShort {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            AlarmReport::decode(&[], 3),
            Err(AlarmError::FrameTooShort {
                expected: 1,
                actual: 0
            })
        );
    }

    #[test]
    fn test_decode_unknown_command() {
        assert_eq!(
            AlarmReport::decode(&[0x42, 0x00], 3),
            Err(AlarmError::UnknownCommand(0x42))
        );
    }

    #[test]
    fn test_decode_supported_types_clamps_count() {
        let report = AlarmReport::decode(&[0x08, 0x84, 0b0000_0011], 2).unwrap();
        assert_eq!(
            report,
            AlarmReport::SupportedTypes {
                v1_alarm: true,
                bitmask: vec![0b0000_0011],
            }
        );
    }

    #[test]
    fn test_decode_supported_events() {
        let report = AlarmReport::decode(&[0x02, 0x01, 0xE1, 0b0001_0011, 0xAA], 3).unwrap();
        assert_eq!(
            report,
            AlarmReport::SupportedEvents {
                notification_type: 1,
                bitmask: vec![0b0001_0011],
            }
        );
    }

    #[test]
    fn test_set_bits() {
        let bits: Vec<u16> = set_bits(&[0b1000_0001, 0b0000_0010]).collect();
        assert_eq!(bits, vec![0, 7, 9]);
        assert_eq!(set_bits(&[]).count(), 0);
    }
}
