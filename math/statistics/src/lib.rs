//! Sampling sequences and discrete distributions used by importance sampling code.

mod distribution;
mod sampling;

pub use distribution::*;
pub use sampling::*;
