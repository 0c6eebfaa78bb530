use std::ops::Deref;

use crate::*;

/// BSSRDF mixture of one shading point.
///
/// Only subsurface closures contribute. Layered closures are looked through: their substrate
/// is walked with the layer's weight, the layer itself is not a subsurface entry.
#[derive(Debug, Clone)]
pub struct CompositeSubsurfaceClosure<'a> {
  base: CompositeClosure<'a>,
}

impl<'a> Deref for CompositeSubsurfaceClosure<'a> {
  type Target = CompositeClosure<'a>;
  fn deref(&self) -> &Self::Target {
    &self.base
  }
}

impl<'a> CompositeSubsurfaceClosure<'a> {
  pub fn new(
    geometric_basis: &ShadingBasis,
    tree: Option<&'a ClosureTree>,
  ) -> Result<Self, ClosureError> {
    Self::with_budget(geometric_basis, tree, Default::default())
  }

  pub fn with_budget(
    geometric_basis: &ShadingBasis,
    tree: Option<&'a ClosureTree>,
    budget: ClosureBudget,
  ) -> Result<Self, ClosureError> {
    let mut base = CompositeClosure::new(WeightMetric::Luminance, budget);

    walk_closure_tree(
      tree,
      LinearRGBColor::white(),
      |component, weight| -> Result<LeafVisit<'a>, ClosureError> {
        if component.id == ClosureId::SUBSURFACE {
          if weight.luminance() > 0. {
            convert_subsurface_closure(&mut base, geometric_basis, &component.params, weight)?;
          }
        } else if component.id.is_layered() {
          if let Some(substrate) = component.params.substrate() {
            return Ok(LeafVisit::Descend {
              tree: substrate,
              weight,
            });
          }
        }
        Ok(LeafVisit::Done)
      },
    )?;

    base.compute_cdf();
    Ok(Self { base })
  }

  pub fn into_base(self) -> CompositeClosure<'a> {
    self.base
  }
}
