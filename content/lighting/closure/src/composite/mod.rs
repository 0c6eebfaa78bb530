use rendiation_statistics::{build_discrete_cdf, sample_discrete_cdf};
use smallvec::SmallVec;

use crate::*;

mod emission;
mod layered;
mod subsurface;
mod surface;

pub use emission::*;
pub use subsurface::*;
pub use surface::*;

/// inline entry capacity of every composite
pub const MAX_CLOSURE_ENTRIES: usize = 8;
/// inline capacity of the ior list of a surface composite
pub const MAX_IOR_ENTRIES: usize = MAX_CLOSURE_ENTRIES;
/// record pool size, enough for a full composite of the largest record kind
pub const MAX_POOL_SIZE: usize = MAX_CLOSURE_ENTRIES * MAX_RECORD_FOOTPRINT;

/// Per evaluation limits of a composite. They can only tighten the inline capacities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosureBudget {
  pub max_entries: usize,
  pub max_iors: usize,
  pub max_pool_bytes: usize,
}

impl Default for ClosureBudget {
  fn default() -> Self {
    Self {
      max_entries: MAX_CLOSURE_ENTRIES,
      max_iors: MAX_IOR_ENTRIES,
      max_pool_bytes: MAX_POOL_SIZE,
    }
  }
}

impl ClosureBudget {
  pub fn new(max_entries: usize, max_iors: usize, max_pool_bytes: usize) -> Self {
    Self {
      max_entries: max_entries.min(MAX_CLOSURE_ENTRIES),
      max_iors: max_iors.min(MAX_IOR_ENTRIES),
      max_pool_bytes: max_pool_bytes.min(MAX_POOL_SIZE),
    }
  }
}

/// How an entry's color weight turns into its selection probability weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightMetric {
  Luminance,
  /// keeps saturated emitters from being undersampled
  MaxChannel,
}

impl WeightMetric {
  pub fn eval(self, weight: LinearRGBColor<f32>) -> f32 {
    match self {
      Self::Luminance => weight.luminance(),
      Self::MaxChannel => weight.max_channel(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryHandle(u8);

impl EntryHandle {
  pub(crate) fn new(index: usize) -> Self {
    debug_assert!(index < MAX_CLOSURE_ENTRIES);
    Self(index as u8)
  }

  pub fn index(self) -> usize {
    self.0 as usize
  }
}

#[derive(Debug, Clone, Copy)]
pub struct CompositeEntry<'a> {
  pub closure_id: ClosureId,
  pub weight: LinearRGBColor<f32>,
  pub shading_basis: ShadingBasis,
  /// byte offset of the record inside the pool, a multiple of [`RECORD_ALIGNMENT`]
  pub pool_offset: usize,
  pub values: ClosureValues<'a>,
}

/// Fixed capacity mixture of closures shared by all composite kinds.
#[derive(Debug, Clone)]
pub struct CompositeClosure<'a> {
  budget: ClosureBudget,
  metric: WeightMetric,
  entries: SmallVec<[CompositeEntry<'a>; MAX_CLOSURE_ENTRIES]>,
  pdf_weights: SmallVec<[f32; MAX_CLOSURE_ENTRIES]>,
  cdf: SmallVec<[f32; MAX_CLOSURE_ENTRIES]>,
  pool_bytes: usize,
}

impl<'a> CompositeClosure<'a> {
  pub fn new(metric: WeightMetric, budget: ClosureBudget) -> Self {
    Self {
      budget: ClosureBudget::new(budget.max_entries, budget.max_iors, budget.max_pool_bytes),
      metric,
      entries: SmallVec::new(),
      pdf_weights: SmallVec::new(),
      cdf: SmallVec::new(),
      pool_bytes: 0,
    }
  }

  /// Append an entry. `normal` and `tangent` orient it, see [`ShadingBasis::derive`].
  ///
  /// The weight must have a positive metric, the walkers prune everything else. On error the
  /// composite is left untouched.
  pub fn add_closure(
    &mut self,
    closure_id: ClosureId,
    geometric_basis: &ShadingBasis,
    weight: LinearRGBColor<f32>,
    normal: Vec3,
    tangent: Option<Vec3>,
    values: ClosureValues<'a>,
  ) -> Result<EntryHandle, ClosureError> {
    if self.entries.len() >= self.budget.max_entries {
      log::warn!("closure {closure_id} dropped, composite is full");
      return Err(ClosureError::EntryCapacityExceeded {
        limit: self.budget.max_entries,
      });
    }

    let footprint = values.footprint();
    if self.pool_bytes + footprint > self.budget.max_pool_bytes {
      log::warn!("closure {closure_id} dropped, record pool is full");
      return Err(ClosureError::PoolCapacityExceeded {
        requested: footprint,
        used: self.pool_bytes,
        limit: self.budget.max_pool_bytes,
      });
    }

    let pdf_weight = self.metric.eval(weight);
    debug_assert!(pdf_weight > 0.);

    debug_assert_eq!(self.pool_bytes % RECORD_ALIGNMENT, 0);
    let handle = EntryHandle::new(self.entries.len());
    self.entries.push(CompositeEntry {
      closure_id,
      weight,
      shading_basis: ShadingBasis::derive(geometric_basis, normal, tangent),
      pool_offset: self.pool_bytes,
      values,
    });
    self.pdf_weights.push(pdf_weight);
    self.pool_bytes += footprint;

    Ok(handle)
  }

  /// Normalize the entry weights into probabilities and build the matching cdf, whose last
  /// element is exactly 1.
  pub fn compute_cdf(&mut self) {
    self.cdf.clear();
    self.cdf.resize(self.pdf_weights.len(), 0.);
    build_discrete_cdf(&mut self.pdf_weights, &mut self.cdf);
  }

  /// Index of the entry selected by the uniform sample `u` in [0, 1).
  pub fn choose_closure(&self, u: f32) -> usize {
    assert!(!self.entries.is_empty(), "no closure to choose from");
    sample_discrete_cdf(&self.cdf, u)
  }

  /// Same as [`Self::choose_closure`], consuming exactly one dimension of `sampler`.
  pub fn choose_closure_with_sampler(&self, sampler: &mut (impl Sampler + ?Sized)) -> usize {
    let u = sampler.next();
    self.choose_closure(u)
  }

  pub fn metric(&self) -> WeightMetric {
    self.metric
  }

  pub fn budget(&self) -> ClosureBudget {
    self.budget
  }

  pub fn closure_count(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn entries(&self) -> &[CompositeEntry<'a>] {
    &self.entries
  }

  pub fn entry(&self, index: usize) -> &CompositeEntry<'a> {
    &self.entries[index]
  }

  pub fn closure_type(&self, index: usize) -> ClosureId {
    self.entries[index].closure_id
  }

  pub fn closure_weight(&self, index: usize) -> LinearRGBColor<f32> {
    self.entries[index].weight
  }

  pub fn closure_pdf_weight(&self, index: usize) -> f32 {
    self.pdf_weights[index]
  }

  pub fn closure_shading_basis(&self, index: usize) -> &ShadingBasis {
    &self.entries[index].shading_basis
  }

  pub fn closure_values(&self, index: usize) -> &ClosureValues<'a> {
    &self.entries[index].values
  }

  pub fn pdf_weights(&self) -> &[f32] {
    &self.pdf_weights
  }

  pub fn cdf(&self) -> &[f32] {
    &self.cdf
  }

  /// bytes of the record pool in use
  pub fn pool_bytes(&self) -> usize {
    self.pool_bytes
  }

  pub(crate) fn entry_mut(&mut self, handle: EntryHandle) -> &mut CompositeEntry<'a> {
    &mut self.entries[handle.index()]
  }
}
