use std::mem::size_of;

use crate::*;

/// Opaque handle of a scattering object built by the host from a layered closure's substrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScatteringHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AshikhminBrdfValues {
  pub rd: LinearRGBColor<f32>,
  pub rd_multiplier: f32,
  pub rg: LinearRGBColor<f32>,
  pub rg_multiplier: f32,
  pub nu: f32,
  pub nv: f32,
  pub fr_multiplier: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisneyBrdfValues {
  pub base_color: LinearRGBColor<f32>,
  pub subsurface: f32,
  pub metallic: f32,
  pub specular: f32,
  pub specular_tint: f32,
  pub anisotropic: f32,
  pub roughness: f32,
  pub sheen: f32,
  pub sheen_tint: f32,
  pub clearcoat: f32,
  pub clearcoat_gloss: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrenNayarBrdfValues {
  pub reflectance: LinearRGBColor<f32>,
  pub reflectance_multiplier: f32,
  pub roughness: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlossyBrdfValues {
  pub reflectance: LinearRGBColor<f32>,
  pub reflectance_multiplier: f32,
  pub roughness: f32,
  pub anisotropy: f32,
  pub ior: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetalBrdfValues {
  pub normal_reflectance: LinearRGBColor<f32>,
  pub edge_tint: LinearRGBColor<f32>,
  pub reflectance_multiplier: f32,
  pub roughness: f32,
  pub anisotropy: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlassBsdfValues {
  pub surface_transmittance: LinearRGBColor<f32>,
  pub surface_transmittance_multiplier: f32,
  pub reflection_tint: LinearRGBColor<f32>,
  pub refraction_tint: LinearRGBColor<f32>,
  pub roughness: f32,
  pub anisotropy: f32,
  pub ior: f32,
  pub volume_transmittance: LinearRGBColor<f32>,
  pub volume_transmittance_distance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SheenBrdfValues {
  pub reflectance: LinearRGBColor<f32>,
  pub reflectance_multiplier: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DiffuseBtdfValues {
  pub transmittance: LinearRGBColor<f32>,
  pub transmittance_multiplier: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DipoleBssrdfValues {
  pub weight: f32,
  pub reflectance: LinearRGBColor<f32>,
  pub reflectance_multiplier: f32,
  pub mfp: LinearRGBColor<f32>,
  pub mfp_multiplier: f32,
  pub g: f32,
  pub ior: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormalizedDiffusionBssrdfValues {
  pub weight: f32,
  pub reflectance: LinearRGBColor<f32>,
  pub reflectance_multiplier: f32,
  pub mfp: LinearRGBColor<f32>,
  pub mfp_multiplier: f32,
  pub ior: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DiffuseEdfValues {
  pub radiance: LinearRGBColor<f32>,
  pub radiance_multiplier: f32,
}

/// Record of a layered closure.
///
/// It is written in two steps: the walker stores the substrate tree, then after the host has
/// evaluated that tree into a scattering object, [`CompositeClosure::bind_substrate`] fills in
/// `substrate_bsdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlSurfaceLayerBrdfValues<'a> {
  pub substrate: Option<&'a ClosureTree>,
  pub substrate_bsdf: Option<ScatteringHandle>,
  pub distribution: i32,
  pub reflectance: LinearRGBColor<f32>,
  pub roughness: f32,
  pub anisotropy: f32,
  pub fresnel_mode: i32,
  pub ior: f32,
  pub normal_reflectance: LinearRGBColor<f32>,
  pub edge_tint: LinearRGBColor<f32>,
}

/// Type specific input values of one composite entry, read by the scattering model selected by
/// the entry's closure id.
#[derive(Debug, Clone, Copy)]
pub enum ClosureValues<'a> {
  Ashikhmin(AshikhminBrdfValues),
  Disney(DisneyBrdfValues),
  OrenNayar(OrenNayarBrdfValues),
  Glossy(GlossyBrdfValues),
  Metal(MetalBrdfValues),
  Glass(GlassBsdfValues),
  Sheen(SheenBrdfValues),
  DiffuseBtdf(DiffuseBtdfValues),
  Dipole(DipoleBssrdfValues),
  NormalizedDiffusion(NormalizedDiffusionBssrdfValues),
  DiffuseEdf(DiffuseEdfValues),
  AlSurfaceLayer(AlSurfaceLayerBrdfValues<'a>),
}

/// every record starts at a multiple of this inside the pool
pub const RECORD_ALIGNMENT: usize = 16;

pub const fn align_up(size: usize, alignment: usize) -> usize {
  (size + alignment - 1) / alignment * alignment
}

const fn max(a: usize, b: usize) -> usize {
  if a > b {
    a
  } else {
    b
  }
}

/// pool bytes taken by the largest record kind
pub const MAX_RECORD_FOOTPRINT: usize = align_up(
  max(
    max(
      max(size_of::<AshikhminBrdfValues>(), size_of::<DisneyBrdfValues>()),
      max(size_of::<GlassBsdfValues>(), size_of::<MetalBrdfValues>()),
    ),
    max(
      max(size_of::<DipoleBssrdfValues>(), size_of::<NormalizedDiffusionBssrdfValues>()),
      size_of::<AlSurfaceLayerBrdfValues<'static>>(),
    ),
  ),
  RECORD_ALIGNMENT,
);

impl<'a> ClosureValues<'a> {
  /// size of the payload rounded up to the record alignment
  pub fn footprint(&self) -> usize {
    let size = match self {
      Self::Ashikhmin(_) => size_of::<AshikhminBrdfValues>(),
      Self::Disney(_) => size_of::<DisneyBrdfValues>(),
      Self::OrenNayar(_) => size_of::<OrenNayarBrdfValues>(),
      Self::Glossy(_) => size_of::<GlossyBrdfValues>(),
      Self::Metal(_) => size_of::<MetalBrdfValues>(),
      Self::Glass(_) => size_of::<GlassBsdfValues>(),
      Self::Sheen(_) => size_of::<SheenBrdfValues>(),
      Self::DiffuseBtdf(_) => size_of::<DiffuseBtdfValues>(),
      Self::Dipole(_) => size_of::<DipoleBssrdfValues>(),
      Self::NormalizedDiffusion(_) => size_of::<NormalizedDiffusionBssrdfValues>(),
      Self::DiffuseEdf(_) => size_of::<DiffuseEdfValues>(),
      Self::AlSurfaceLayer(_) => size_of::<AlSurfaceLayerBrdfValues>(),
    };
    align_up(size, RECORD_ALIGNMENT)
  }

  pub fn as_layered(&self) -> Option<&AlSurfaceLayerBrdfValues<'a>> {
    match self {
      Self::AlSurfaceLayer(v) => Some(v),
      _ => None,
    }
  }
}

#[test]
fn footprints_are_aligned() {
  let records = [
    ClosureValues::OrenNayar(Default::default()),
    ClosureValues::Glass(Default::default()),
    ClosureValues::DiffuseEdf(Default::default()),
    ClosureValues::AlSurfaceLayer(Default::default()),
  ];
  for r in records {
    assert_eq!(r.footprint() % RECORD_ALIGNMENT, 0);
    assert!(r.footprint() <= MAX_RECORD_FOOTPRINT);
  }
}
