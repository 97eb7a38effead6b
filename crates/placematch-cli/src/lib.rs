//! Library components of the `placematch` binary.

pub mod logging;
pub mod pipeline;
