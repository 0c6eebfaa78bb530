use smallvec::SmallVec;

use crate::*;

/// What the walker should do after a leaf has been visited.
pub enum LeafVisit<'a> {
  Done,
  /// continue into a nested tree (the substrate of a layered closure) with the given weight
  Descend {
    tree: &'a ClosureTree,
    weight: LinearRGBColor<f32>,
  },
}

/// nodes kept inline before the traversal stack spills to the heap
const WALK_STACK_INLINE: usize = 16;

/// Visit every leaf of `root` with its effective weight: `weight` times every scale on the
/// path times the leaf's own weight.
///
/// Both children of a combine node get the full running weight. Leaves are visited in left
/// to right order. The traversal keeps an explicit stack, so deeply nested trees do not
/// consume call stack. The first error returned by `visit_leaf` stops the walk.
pub fn walk_closure_tree<'a, E>(
  root: Option<&'a ClosureTree>,
  weight: LinearRGBColor<f32>,
  mut visit_leaf: impl FnMut(&'a ClosureComponent, LinearRGBColor<f32>) -> Result<LeafVisit<'a>, E>,
) -> Result<(), E> {
  let mut stack: SmallVec<[(&'a ClosureTree, LinearRGBColor<f32>); WALK_STACK_INLINE]> =
    SmallVec::new();

  if let Some(root) = root {
    stack.push((root, weight));
  }

  while let Some((node, weight)) = stack.pop() {
    match node {
      ClosureTree::Scale {
        child,
        weight: scale,
      } => {
        if let Some(child) = child {
          stack.push((&**child, weight * *scale));
        }
      }
      ClosureTree::Combine { left, right } => {
        // pushed in reverse so the left side pops first
        if let Some(right) = right {
          stack.push((&**right, weight));
        }
        if let Some(left) = left {
          stack.push((&**left, weight));
        }
      }
      ClosureTree::Leaf(component) => {
        let visit = visit_leaf(component, weight * component.weight)?;
        if let LeafVisit::Descend { tree, weight } = visit {
          stack.push((tree, weight));
        }
      }
    }
  }

  Ok(())
}
