use std::ops::{Deref, DerefMut};

use rendiation_statistics::{build_discrete_cdf, sample_discrete_cdf};
use smallvec::SmallVec;

use crate::*;

/// BSDF mixture of one shading point, with the distribution of the IORs its refractive closures
/// asked for.
#[derive(Debug, Clone)]
pub struct CompositeSurfaceClosure<'a> {
  base: CompositeClosure<'a>,
  iors: SmallVec<[f32; MAX_IOR_ENTRIES]>,
  ior_weights: SmallVec<[f32; MAX_IOR_ENTRIES]>,
  ior_cdf: SmallVec<[f32; MAX_IOR_ENTRIES]>,
}

impl<'a> Deref for CompositeSurfaceClosure<'a> {
  type Target = CompositeClosure<'a>;
  fn deref(&self) -> &Self::Target {
    &self.base
  }
}

impl<'a> DerefMut for CompositeSurfaceClosure<'a> {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.base
  }
}

impl<'a> CompositeSurfaceClosure<'a> {
  pub fn new(
    registry: &ClosureRegistry,
    geometric_basis: &ShadingBasis,
    tree: Option<&'a ClosureTree>,
  ) -> Result<Self, ClosureError> {
    Self::with_budget(registry, geometric_basis, tree, Default::default())
  }

  pub fn with_budget(
    registry: &ClosureRegistry,
    geometric_basis: &ShadingBasis,
    tree: Option<&'a ClosureTree>,
    budget: ClosureBudget,
  ) -> Result<Self, ClosureError> {
    let mut composite = Self::empty(budget);

    walk_closure_tree(
      tree,
      LinearRGBColor::white(),
      |component, weight| -> Result<LeafVisit<'a>, ClosureError> {
        if weight.luminance() > 0. {
          registry.dispatch(
            component.id,
            &mut composite,
            geometric_basis,
            &component.params,
            weight,
          )?;
        }
        Ok(LeafVisit::Done)
      },
    )?;

    composite.compute_cdf();
    composite.compute_ior_cdf();
    Ok(composite)
  }

  /// a composite without entries, to be filled by hand
  pub fn empty(budget: ClosureBudget) -> Self {
    Self {
      base: CompositeClosure::new(WeightMetric::Luminance, budget),
      iors: SmallVec::new(),
      ior_weights: SmallVec::new(),
      ior_cdf: SmallVec::new(),
    }
  }

  /// Fails when the ior list has no room left. Refractive conversions check this before
  /// adding their entry, so a full ior list never leaves a half converted closure behind.
  pub fn reserve_ior(&self) -> Result<(), ClosureError> {
    let limit = self.base.budget().max_iors;
    if self.iors.len() >= limit {
      log::warn!("refractive closure dropped, ior list is full");
      return Err(ClosureError::IorCapacityExceeded { limit });
    }
    Ok(())
  }

  /// Record the ior of a refractive closure, weighted by the luminance of its weight.
  pub fn add_ior(&mut self, weight: LinearRGBColor<f32>, ior: f32) -> Result<(), ClosureError> {
    self.reserve_ior()?;

    let w = weight.luminance();
    debug_assert!(w > 0.);

    self.iors.push(ior);
    self.ior_weights.push(w);
    Ok(())
  }

  /// Build the ior distribution. Without any refractive closure the surface sits in vacuum
  /// and a single ior of 1 is used.
  pub fn compute_ior_cdf(&mut self) {
    if self.iors.is_empty() {
      self.iors.push(1.0);
      self.ior_weights.push(1.0);
    }

    self.ior_cdf.clear();
    self.ior_cdf.resize(self.ior_weights.len(), 0.);
    build_discrete_cdf(&mut self.ior_weights, &mut self.ior_cdf);
  }

  pub fn ior_count(&self) -> usize {
    self.iors.len()
  }

  pub fn ior(&self, index: usize) -> f32 {
    self.iors[index]
  }

  pub fn ior_weight(&self, index: usize) -> f32 {
    self.ior_weights[index]
  }

  pub fn ior_cdf(&self) -> &[f32] {
    &self.ior_cdf
  }

  /// Pick an ior with the uniform sample `u` in [0, 1).
  pub fn choose_ior(&self, u: f32) -> f32 {
    assert!(!self.iors.is_empty());
    if self.iors.len() == 1 {
      return self.iors[0];
    }
    self.iors[sample_discrete_cdf(&self.ior_cdf, u)]
  }

  pub fn into_base(self) -> CompositeClosure<'a> {
    self.base
  }
}
