//! Replay harness for the Alarm command class.
//!
//! Loads a YAML [`Scenario`], drives an [`zwave_alarm::AlarmCommandClass`]
//! through its steps against in-memory collaborators, and reports the final
//! slot table, the outbound frames and the learned capabilities.

pub mod error;
pub mod harness;
pub mod scenario;

pub use error::{ReplayError, ReplayResult};
pub use harness::{run_scenario, ReplayReport};
pub use scenario::{Scenario, Step};
