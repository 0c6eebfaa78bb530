use super::{microfacet_closure_id, mismatch};
use crate::*;

pub fn convert_ashikhmin_shirley_closure<'a>(
  composite: &mut CompositeSurfaceClosure<'a>,
  shading_basis: &ShadingBasis,
  params: &'a ClosureParams,
  weight: LinearRGBColor<f32>,
) -> Result<(), ClosureError> {
  let ClosureParams::AshikhminShirley(p) = params else {
    return Err(mismatch(ClosureId::ASHIKHMIN_SHIRLEY));
  };

  let values = AshikhminBrdfValues {
    rd: p.diffuse_reflectance,
    rd_multiplier: 1.,
    rg: p.glossy_reflectance,
    rg_multiplier: 1.,
    nu: p.exponent_u.max(0.01),
    nv: p.exponent_v.max(0.01),
    fr_multiplier: p.fresnel_multiplier,
  };
  composite.add_closure(
    ClosureId::ASHIKHMIN_SHIRLEY,
    shading_basis,
    weight,
    p.n,
    Some(p.t),
    ClosureValues::Ashikhmin(values),
  )?;
  Ok(())
}

pub fn convert_disney_closure<'a>(
  composite: &mut CompositeSurfaceClosure<'a>,
  shading_basis: &ShadingBasis,
  params: &'a ClosureParams,
  weight: LinearRGBColor<f32>,
) -> Result<(), ClosureError> {
  let ClosureParams::Disney(p) = params else {
    return Err(mismatch(ClosureId::DISNEY));
  };

  let values = DisneyBrdfValues {
    base_color: p.base_color,
    subsurface: saturate(p.subsurface),
    metallic: saturate(p.metallic),
    specular: p.specular.max(0.),
    specular_tint: saturate(p.specular_tint),
    anisotropic: p.anisotropic.clamp(-1., 1.),
    roughness: p.roughness.clamp(0.0001, 1.),
    sheen: saturate(p.sheen),
    sheen_tint: saturate(p.sheen_tint),
    clearcoat: p.clearcoat.max(0.),
    clearcoat_gloss: p.clearcoat_gloss.clamp(0.0001, 1.),
  };
  composite.add_closure(
    ClosureId::DISNEY,
    shading_basis,
    weight,
    p.n,
    Some(p.t),
    ClosureValues::Disney(values),
  )?;
  Ok(())
}

/// Lambertian reflection, stored as a smooth oren nayar term.
pub fn convert_diffuse_closure<'a>(
  composite: &mut CompositeSurfaceClosure<'a>,
  shading_basis: &ShadingBasis,
  params: &'a ClosureParams,
  weight: LinearRGBColor<f32>,
) -> Result<(), ClosureError> {
  let ClosureParams::Diffuse { n } = params else {
    return Err(mismatch(ClosureId::DIFFUSE));
  };

  let values = OrenNayarBrdfValues {
    reflectance: LinearRGBColor::white(),
    reflectance_multiplier: 1.,
    roughness: 0.,
  };
  composite.add_closure(
    ClosureId::OREN_NAYAR,
    shading_basis,
    weight,
    *n,
    None,
    ClosureValues::OrenNayar(values),
  )?;
  Ok(())
}

pub fn convert_oren_nayar_closure<'a>(
  composite: &mut CompositeSurfaceClosure<'a>,
  shading_basis: &ShadingBasis,
  params: &'a ClosureParams,
  weight: LinearRGBColor<f32>,
) -> Result<(), ClosureError> {
  let ClosureParams::OrenNayar { n, roughness } = params else {
    return Err(mismatch(ClosureId::OREN_NAYAR));
  };

  let values = OrenNayarBrdfValues {
    reflectance: LinearRGBColor::white(),
    reflectance_multiplier: 1.,
    roughness: roughness.max(0.),
  };
  composite.add_closure(
    ClosureId::OREN_NAYAR,
    shading_basis,
    weight,
    *n,
    None,
    ClosureValues::OrenNayar(values),
  )?;
  Ok(())
}

/// Isotropic phong lobe, expressed with the ashikhmin shirley model.
pub fn convert_phong_closure<'a>(
  composite: &mut CompositeSurfaceClosure<'a>,
  shading_basis: &ShadingBasis,
  params: &'a ClosureParams,
  weight: LinearRGBColor<f32>,
) -> Result<(), ClosureError> {
  let ClosureParams::Phong { n, exponent } = params else {
    return Err(mismatch(ClosureId::PHONG));
  };

  let exponent = exponent.max(0.01);
  let values = AshikhminBrdfValues {
    rd: LinearRGBColor::white(),
    rd_multiplier: 1.,
    rg: LinearRGBColor::white(),
    rg_multiplier: 1.,
    nu: exponent,
    nv: exponent,
    fr_multiplier: 1.,
  };
  composite.add_closure(
    ClosureId::ASHIKHMIN_SHIRLEY,
    shading_basis,
    weight,
    *n,
    None,
    ClosureValues::Ashikhmin(values),
  )?;
  Ok(())
}

pub fn convert_glossy_closure<'a>(
  composite: &mut CompositeSurfaceClosure<'a>,
  shading_basis: &ShadingBasis,
  params: &'a ClosureParams,
  weight: LinearRGBColor<f32>,
) -> Result<(), ClosureError> {
  let ClosureParams::Glossy(p) = params else {
    return Err(mismatch(ClosureId::GLOSSY));
  };

  let id = microfacet_closure_id(&p.dist, ClosureId::GLOSSY_GGX, ClosureId::GLOSSY_BECKMANN)?;
  composite.reserve_ior()?;
  let values = GlossyBrdfValues {
    reflectance: LinearRGBColor::white(),
    reflectance_multiplier: 1.,
    roughness: p.roughness.max(0.),
    anisotropy: p.anisotropy.clamp(-1., 1.),
    ior: p.ior.max(0.001),
  };
  composite.add_closure(
    id,
    shading_basis,
    weight,
    p.n,
    Some(p.t),
    ClosureValues::Glossy(values),
  )?;
  composite.add_ior(weight, values.ior)
}

/// Perfect mirror, a beckmann glossy lobe with zero roughness.
pub fn convert_reflection_closure<'a>(
  composite: &mut CompositeSurfaceClosure<'a>,
  shading_basis: &ShadingBasis,
  params: &'a ClosureParams,
  weight: LinearRGBColor<f32>,
) -> Result<(), ClosureError> {
  let ClosureParams::Reflection { n, ior } = params else {
    return Err(mismatch(ClosureId::REFLECTION));
  };

  let values = GlossyBrdfValues {
    reflectance: LinearRGBColor::white(),
    reflectance_multiplier: 1.,
    roughness: 0.,
    anisotropy: 0.,
    ior: ior.max(0.001),
  };
  composite.add_closure(
    ClosureId::GLOSSY_BECKMANN,
    shading_basis,
    weight,
    *n,
    None,
    ClosureValues::Glossy(values),
  )?;
  Ok(())
}

pub fn convert_metal_closure<'a>(
  composite: &mut CompositeSurfaceClosure<'a>,
  shading_basis: &ShadingBasis,
  params: &'a ClosureParams,
  weight: LinearRGBColor<f32>,
) -> Result<(), ClosureError> {
  let ClosureParams::Metal(p) = params else {
    return Err(mismatch(ClosureId::METAL));
  };

  let id = microfacet_closure_id(&p.dist, ClosureId::METAL_GGX, ClosureId::METAL_BECKMANN)?;
  let values = MetalBrdfValues {
    normal_reflectance: p.normal_reflectance,
    edge_tint: p.edge_tint,
    reflectance_multiplier: 1.,
    roughness: p.roughness.max(0.),
    anisotropy: p.anisotropy.clamp(-1., 1.),
  };
  composite.add_closure(
    id,
    shading_basis,
    weight,
    p.n,
    Some(p.t),
    ClosureValues::Metal(values),
  )?;
  Ok(())
}

pub fn convert_glass_closure<'a>(
  composite: &mut CompositeSurfaceClosure<'a>,
  shading_basis: &ShadingBasis,
  params: &'a ClosureParams,
  weight: LinearRGBColor<f32>,
) -> Result<(), ClosureError> {
  let ClosureParams::Glass(p) = params else {
    return Err(mismatch(ClosureId::GLASS));
  };

  let id = microfacet_closure_id(&p.dist, ClosureId::GLASS_GGX, ClosureId::GLASS_BECKMANN)?;
  composite.reserve_ior()?;
  let values = GlassBsdfValues {
    surface_transmittance: p.surface_transmittance,
    surface_transmittance_multiplier: 1.,
    reflection_tint: p.reflection_tint,
    refraction_tint: p.refraction_tint,
    roughness: p.roughness.max(0.0001),
    anisotropy: p.anisotropy.clamp(-1., 1.),
    ior: p.ior.max(0.001),
    volume_transmittance: p.volume_transmittance,
    volume_transmittance_distance: p.volume_transmittance_distance,
  };
  composite.add_closure(
    id,
    shading_basis,
    weight,
    p.n,
    Some(p.t),
    ClosureValues::Glass(values),
  )?;
  composite.add_ior(weight, values.ior)
}

pub fn convert_sheen_closure<'a>(
  composite: &mut CompositeSurfaceClosure<'a>,
  shading_basis: &ShadingBasis,
  params: &'a ClosureParams,
  weight: LinearRGBColor<f32>,
) -> Result<(), ClosureError> {
  let ClosureParams::Sheen { n } = params else {
    return Err(mismatch(ClosureId::SHEEN));
  };

  let values = SheenBrdfValues {
    reflectance: LinearRGBColor::white(),
    reflectance_multiplier: 1.,
  };
  composite.add_closure(
    ClosureId::SHEEN,
    shading_basis,
    weight,
    *n,
    None,
    ClosureValues::Sheen(values),
  )?;
  Ok(())
}

pub fn convert_translucent_closure<'a>(
  composite: &mut CompositeSurfaceClosure<'a>,
  shading_basis: &ShadingBasis,
  params: &'a ClosureParams,
  weight: LinearRGBColor<f32>,
) -> Result<(), ClosureError> {
  let ClosureParams::Translucent { n } = params else {
    return Err(mismatch(ClosureId::TRANSLUCENT));
  };

  let values = DiffuseBtdfValues {
    transmittance: LinearRGBColor::white(),
    transmittance_multiplier: 1.,
  };
  composite.add_closure(
    ClosureId::TRANSLUCENT,
    shading_basis,
    weight,
    *n,
    None,
    ClosureValues::DiffuseBtdf(values),
  )?;
  Ok(())
}
