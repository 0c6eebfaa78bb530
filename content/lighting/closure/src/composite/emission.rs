use std::ops::Deref;

use crate::*;

/// EDF mixture of one shading point.
///
/// Entries are weighted by their strongest channel instead of luminance, the conversion keeps
/// the normalized color and the channel maximum apart.
#[derive(Debug, Clone)]
pub struct CompositeEmissionClosure<'a> {
  base: CompositeClosure<'a>,
}

impl<'a> Deref for CompositeEmissionClosure<'a> {
  type Target = CompositeClosure<'a>;
  fn deref(&self) -> &Self::Target {
    &self.base
  }
}

impl<'a> CompositeEmissionClosure<'a> {
  pub fn new(tree: Option<&'a ClosureTree>) -> Result<Self, ClosureError> {
    Self::with_budget(tree, Default::default())
  }

  pub fn with_budget(
    tree: Option<&'a ClosureTree>,
    budget: ClosureBudget,
  ) -> Result<Self, ClosureError> {
    let mut base = CompositeClosure::new(WeightMetric::MaxChannel, budget);

    walk_closure_tree(
      tree,
      LinearRGBColor::white(),
      |component, weight| -> Result<LeafVisit<'a>, ClosureError> {
        let max_weight_component = weight.max_channel();
        if max_weight_component > 0. {
          if component.id == ClosureId::EMISSION {
            convert_emission_closure(&mut base, weight, max_weight_component)?;
          } else if component.id.is_layered() {
            if let Some(substrate) = component.params.substrate() {
              return Ok(LeafVisit::Descend {
                tree: substrate,
                weight,
              });
            }
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
