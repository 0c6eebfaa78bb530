use once_cell::sync::Lazy;

use crate::*;

/// Converts one closure component into entries of a surface composite.
pub type ClosureConvertFn = for<'a> fn(
  &mut CompositeSurfaceClosure<'a>,
  &ShadingBasis,
  &'a ClosureParams,
  LinearRGBColor<f32>,
) -> Result<(), ClosureError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosureParamType {
  Vector,
  Color,
  Float,
  Int,
  String,
  /// a nested closure tree
  Closure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosureParamDesc {
  pub name: &'static str,
  pub ty: ClosureParamType,
}

#[derive(Clone, Copy)]
pub struct ClosureDescriptor {
  pub name: &'static str,
  pub id: ClosureId,
  /// parameter layout announced to the shading system
  pub params: &'static [ClosureParamDesc],
  /// none for closures that never become surface composite entries
  pub convert: Option<ClosureConvertFn>,
}

impl std::fmt::Debug for ClosureDescriptor {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ClosureDescriptor")
      .field("name", &self.name)
      .field("id", &self.id)
      .field("params", &self.params)
      .field("convertible", &self.convert.is_some())
      .finish()
  }
}

/// Registered ids must stay below this bound, the table holds one slot per id.
pub const MAX_CLOSURE_ID: u32 = 1024;

/// Closure id to descriptor table.
///
/// All registration happens before any shading point is evaluated; afterwards the registry is
/// only read, so one instance can be shared by every render thread without locking.
#[derive(Debug, Default, Clone)]
pub struct ClosureRegistry {
  table: Vec<Option<ClosureDescriptor>>,
}

static GLOBAL_REGISTRY: Lazy<ClosureRegistry> = Lazy::new(ClosureRegistry::with_builtin_closures);

impl ClosureRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_builtin_closures() -> Self {
    let mut registry = Self::new();
    register_builtin_closures(&mut registry);
    registry
  }

  /// process wide registry holding the builtin closures, built on first access
  pub fn global() -> &'static Self {
    &GLOBAL_REGISTRY
  }

  /// # Panics
  ///
  /// If the id is not below [`MAX_CLOSURE_ID`].
  pub fn register(&mut self, descriptor: ClosureDescriptor) {
    assert!(
      descriptor.id.0 < MAX_CLOSURE_ID,
      "closure {} has id {}, registered ids must be below {MAX_CLOSURE_ID}",
      descriptor.name,
      descriptor.id
    );
    let index = descriptor.id.index();
    if index >= self.table.len() {
      self.table.resize(index + 1, None);
    }

    if let Some(previous) = &self.table[index] {
      log::warn!(
        "closure {} replaces {} registered with the same id {}",
        descriptor.name,
        previous.name,
        descriptor.id
      );
    }

    self.table[index] = Some(descriptor);
    log::debug!("registered closure {}.", descriptor.name);
  }

  pub fn descriptor(&self, id: ClosureId) -> Option<&ClosureDescriptor> {
    self.table.get(id.index())?.as_ref()
  }

  pub fn find_by_name(&self, name: &str) -> Option<&ClosureDescriptor> {
    self.iter().find(|d| d.name == name)
  }

  pub fn iter(&self) -> impl Iterator<Item = &ClosureDescriptor> {
    self.table.iter().flatten()
  }

  pub fn len(&self) -> usize {
    self.iter().count()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Run the conversion registered for `id`.
  ///
  /// Unknown ids and closures without conversion contribute nothing; shaders may emit
  /// closures the host does not know about.
  pub fn dispatch<'a>(
    &self,
    id: ClosureId,
    composite: &mut CompositeSurfaceClosure<'a>,
    shading_basis: &ShadingBasis,
    params: &'a ClosureParams,
    weight: LinearRGBColor<f32>,
  ) -> Result<(), ClosureError> {
    match self.descriptor(id).and_then(|d| d.convert) {
      Some(convert) => convert(composite, shading_basis, params, weight),
      None => {
        log::trace!("closure {id} has no surface conversion, skipped");
        Ok(())
      }
    }
  }
}
