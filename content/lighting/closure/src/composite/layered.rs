use crate::*;

impl<'a> CompositeClosure<'a> {
  /// Attach the scattering object the host built from the substrate of a layered entry.
  ///
  /// # Panics
  ///
  /// If `entry` is not a layered closure: only internal miswiring can get here.
  pub fn bind_substrate(&mut self, entry: EntryHandle, substrate_bsdf: ScatteringHandle) {
    let entry = self.entry_mut(entry);
    assert!(
      entry.closure_id.is_layered(),
      "closure {} is not a layered closure",
      entry.closure_id
    );

    match (entry.closure_id, &mut entry.values) {
      (ClosureId::AL_SURFACE_LAYER, ClosureValues::AlSurfaceLayer(values)) => {
        values.substrate_bsdf = Some(substrate_bsdf);
      }
      (id, _) => unreachable!("layered closure {id} has no substrate slot"),
    }
  }

  /// Layered entries with their substrate trees, in entry order.
  pub fn layered_entries(
    &self,
  ) -> impl Iterator<Item = (EntryHandle, Option<&'a ClosureTree>)> + '_ {
    self
      .entries()
      .iter()
      .enumerate()
      .filter_map(|(i, e)| Some((EntryHandle::new(i), e.values.as_layered()?.substrate)))
  }

  pub fn substrate_bsdf(&self, entry: EntryHandle) -> Option<ScatteringHandle> {
    self.entry(entry.index()).values.as_layered()?.substrate_bsdf
  }

  /// true while some layered entry still waits for [`Self::bind_substrate`]
  pub fn has_unbound_layers(&self) -> bool {
    self
      .entries()
      .iter()
      .filter_map(|e| e.values.as_layered())
      .any(|v| v.substrate_bsdf.is_none())
  }
}
