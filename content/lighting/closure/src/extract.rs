use std::convert::Infallible;

use crate::*;

/// Total weight of the `target` closures of a tree, looking through layered closures.
pub fn sum_closure_weight<'a>(
  tree: Option<&'a ClosureTree>,
  target: ClosureId,
) -> LinearRGBColor<f32> {
  let mut sum = LinearRGBColor::zero();

  let result = walk_closure_tree(
    tree,
    LinearRGBColor::white(),
    |component, weight| -> Result<LeafVisit<'a>, Infallible> {
      if component.id == target {
        sum += weight;
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
  );
  match result {
    Ok(()) => {}
    Err(never) => match never {},
  }

  sum
}

/// Opacity of a shading point, one minus its transparency.
pub fn process_transparency_tree(tree: Option<&ClosureTree>) -> f32 {
  let transparency = saturate(sum_closure_weight(tree, ClosureId::TRANSPARENT).luminance());
  1. - transparency
}

pub fn process_holdout_tree(tree: Option<&ClosureTree>) -> f32 {
  saturate(sum_closure_weight(tree, ClosureId::HOLDOUT).luminance())
}

pub fn process_background_tree(tree: Option<&ClosureTree>) -> LinearRGBColor<f32> {
  sum_closure_weight(tree, ClosureId::BACKGROUND)
}
