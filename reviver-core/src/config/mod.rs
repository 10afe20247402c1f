//! Configuration types
//!
//! The only runtime configuration is the 3-bit strap value read once at
//! boot. It selects one row of a fixed delay table.

pub mod delay;
pub mod strap;

pub use delay::*;
pub use strap::*;
