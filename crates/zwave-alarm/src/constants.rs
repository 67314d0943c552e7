//! Protocol constants
//!
//! These constants define the command class identifier, command codes, fixed
//! value indices and transmit options used by the Alarm/Notification command
//! class.

// ============================================================================
// Command Class
// ============================================================================

/// Command class identifier for Alarm (v1-v2) / Notification (v3+).
pub const COMMAND_CLASS_ALARM: u8 = 0x71;

/// Highest command class version this implementation understands.
pub const MAX_SUPPORTED_VERSION: u8 = 8;

// ============================================================================
// Command Codes
// ============================================================================

/// Request the supported events of one notification type (v3+).
pub const ALARM_CMD_EVENT_SUPPORTED_GET: u8 = 0x01;
/// Supported events of one notification type (v3+).
pub const ALARM_CMD_EVENT_SUPPORTED_REPORT: u8 = 0x02;
/// Request the current alarm state.
pub const ALARM_CMD_GET: u8 = 0x04;
/// Alarm state report.
pub const ALARM_CMD_REPORT: u8 = 0x05;
/// Request the supported alarm/notification types (v2+).
pub const ALARM_CMD_SUPPORTED_GET: u8 = 0x07;
/// Supported alarm/notification types (v2+).
pub const ALARM_CMD_SUPPORTED_REPORT: u8 = 0x08;

// ============================================================================
// Fixed Value Indices
// ============================================================================

/// Value index carrying the v1 alarm type.
pub const ALARM_INDEX_TYPE: u16 = 0;
/// Value index carrying the v1 alarm level (or the v3 notification status).
pub const ALARM_INDEX_LEVEL: u16 = 1;
/// Value index carrying the v2 sensor source node id.
pub const ALARM_INDEX_SOURCE_NODE_ID: u16 = 2;
/// Number of always-present header slots preceding the per-type slots.
pub const FIXED_HEADER_SLOTS: u16 = 3;

// ============================================================================
// Event Sentinels
// ============================================================================

/// Event code meaning "no event active" in every notification type.
pub const EVENT_INACTIVE: u8 = 0x00;
/// Event code meaning "unknown event" in every notification type.
pub const EVENT_UNKNOWN: u8 = 0xFE;

/// Label used for any type or event code without a table entry.
pub const UNKNOWN_LABEL: &str = "Unknown";

// ============================================================================
// Frame Layout
// ============================================================================

/// Minimum length of a report carrying the v1 type/level pair.
pub const REPORT_BASE_LEN: usize = 3;
/// Minimum length of a report carrying the v2+ extended notification fields.
pub const REPORT_EXTENDED_LEN: usize = 7;
/// Mask selecting the bitmask byte count from a supported report count byte.
pub const BITMASK_COUNT_MASK: u8 = 0x1F;
/// Flag in the supported-types count byte announcing legacy v1 alarm support.
pub const SUPPORTED_V1_ALARM_FLAG: u8 = 0x80;
/// Event qualifier asking a v3+ device for the first event of a type.
pub const GET_FIRST_EVENT: u8 = 0x01;
/// Placeholder v1 alarm type sent in typed v2+ GET requests.
pub const GET_V1_TYPE_ANY: u8 = 0x00;

// ============================================================================
// Transmit Options
// ============================================================================

/// Request a link-layer acknowledgement.
pub const TRANSMIT_OPTION_ACK: u8 = 0x01;
/// Allow the controller to route automatically.
pub const TRANSMIT_OPTION_AUTO_ROUTE: u8 = 0x04;
/// Fall back to explorer frames when routing fails.
pub const TRANSMIT_OPTION_EXPLORE: u8 = 0x20;
/// Default transmit options for every query issued by this command class.
pub const DEFAULT_TRANSMIT_OPTIONS: u8 =
    TRANSMIT_OPTION_ACK | TRANSMIT_OPTION_AUTO_ROUTE | TRANSMIT_OPTION_EXPLORE;
