//! Flatten shading closure trees into importance sampleable mixtures.
//!
//! A shading network evaluated at one point yields a [`ClosureTree`]: scaled and summed closure
//! components. Before the light transport integrator can use it, the tree is walked once and
//! every component with positive weight is converted into an entry of a fixed capacity
//! composite:
//!
//! - [`CompositeSurfaceClosure`] collects BSDFs (and the IORs of refractive terms)
//! - [`CompositeSubsurfaceClosure`] collects BSSRDFs
//! - [`CompositeEmissionClosure`] collects EDFs
//!
//! Each composite keeps a normalized discrete distribution over its entries, so that a single
//! uniform sample picks one entry proportionally to its weight.
//!
//! Conversions are looked up in a [`ClosureRegistry`] by closure id. The registry is built once
//! before shading starts and is read only afterwards.

mod closures;
mod composite;
mod error;
mod extract;
mod id;
mod math;
mod registry;
mod tree;
mod values;
mod walker;

pub use closures::*;
pub use composite::*;
pub use error::*;
pub use extract::*;
pub use id::*;
pub use math::*;
pub use registry::*;
pub use tree::*;
pub use values::*;
pub use walker::*;

pub use rendiation_color::*;
pub use rendiation_statistics::{Sampler, SobolSampler};

#[cfg(test)]
mod test;
