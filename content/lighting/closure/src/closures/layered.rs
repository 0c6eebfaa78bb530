use super::mismatch;
use crate::*;

/// First phase of a layered closure: the record keeps the substrate tree, its scattering
/// object is bound later through [`CompositeClosure::bind_substrate`].
pub fn convert_al_surface_layer_closure<'a>(
  composite: &mut CompositeSurfaceClosure<'a>,
  shading_basis: &ShadingBasis,
  params: &'a ClosureParams,
  weight: LinearRGBColor<f32>,
) -> Result<(), ClosureError> {
  let ClosureParams::AlSurfaceLayer(p) = params else {
    return Err(mismatch(ClosureId::AL_SURFACE_LAYER));
  };

  let values = AlSurfaceLayerBrdfValues {
    substrate: p.substrate.as_deref(),
    substrate_bsdf: None,
    distribution: p.distribution,
    reflectance: p.reflectance,
    roughness: p.roughness,
    anisotropy: saturate(p.anisotropy),
    fresnel_mode: p.fresnel_mode,
    ior: p.ior,
    normal_reflectance: p.normal_reflectance,
    edge_tint: p.edge_tint,
  };
  composite.add_closure(
    ClosureId::AL_SURFACE_LAYER,
    shading_basis,
    weight,
    p.n,
    Some(p.t),
    ClosureValues::AlSurfaceLayer(values),
  )?;
  Ok(())
}
