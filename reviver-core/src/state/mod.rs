//! Supervisor state machine
//!
//! The phase of the supervisor is a pure function of the previous phase and
//! an event. Output levels are derived from the phase, never stored
//! separately.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::Phase;
