//! Z-Wave Alarm/Notification Command Class
//!
//! This crate decodes the Alarm (later Notification) command class, `0x71`,
//! and keeps a node's alarm state in a flat table of byte value slots. It
//! also builds the queries used to discover what a device supports.
//!
//! # Protocol Overview
//!
//! Every frame starts with a command byte. The report layout depends on the
//! command class version negotiated with the device:
//!
//! - **v1**: a proprietary type/level pair
//! - **v2**: adds source node, notification type and event
//! - **v3+**: events are scoped to a notification type and each event gets
//!   its own slot
//!
//! Slots 0..=2 hold the alarm type, level and source node. Event slots follow,
//! packed per notification type (see [`slots`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use zwave_alarm::{AlarmCommandClass, AlarmConfig, CommandClass, InMemoryRegistry,
//!                   NodeContext, NodeId, RecordingTransport};
//!
//! let mut cc = AlarmCommandClass::new(NodeId(5), 3, AlarmConfig::default());
//! let mut registry = InMemoryRegistry::new();
//! let mut transport = RecordingTransport::new();
//! let mut ctx = NodeContext::new(&mut registry, &mut transport);
//!
//! cc.initialize_slots(1, &mut ctx);
//! cc.handle_incoming_frame(&[0x05, 0x00, 0x00, 0x00, 0xFF, 0x07, 0x07], 1, &mut ctx);
//! ```

mod capability;
mod command_class;
mod config;
mod constants;
mod error;
mod frame;
mod registry;
mod reports;
mod requests;
mod transport;
mod types;

pub mod slots;
pub mod tables;
pub mod telemetry;

pub use capability::*;
pub use command_class::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use frame::*;
pub use registry::*;
pub use reports::*;
pub use requests::*;
pub use transport::*;
pub use types::*;
