//! Time-driven animation support.

pub mod clock;
