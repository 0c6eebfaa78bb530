use crate::*;
use crate::ClosureParamType::{Closure, Color, Float, Int, Vector};

mod emission;
mod layered;
mod subsurface;
mod surface;

pub use emission::*;
pub use layered::*;
pub use subsurface::*;
pub use surface::*;

const fn param(name: &'static str, ty: ClosureParamType) -> ClosureParamDesc {
  ClosureParamDesc { name, ty }
}

const NORMAL_ONLY: &[ClosureParamDesc] = &[param("N", Vector)];
const NO_PARAMS: &[ClosureParamDesc] = &[];

/// Every closure kind known to the renderer, in registration order.
///
/// Closures without a conversion never produce surface composite entries: emission and
/// subsurface have their own composites, the others are only read by the scalar extractors.
pub const BUILTIN_CLOSURES: &[ClosureDescriptor] = &[
  ClosureDescriptor {
    name: "as_alsurface_layer",
    id: ClosureId::AL_SURFACE_LAYER,
    params: &[
      param("substrate", Closure),
      param("distribution", Int),
      param("N", Vector),
      param("T", Vector),
      param("reflectance", Color),
      param("roughness", Float),
      param("anisotropy", Float),
      param("fresnel_mode", Int),
      param("ior", Float),
      param("normal_reflectance", Color),
      param("edge_tint", Color),
    ],
    convert: Some(convert_al_surface_layer_closure),
  },
  ClosureDescriptor {
    name: "as_ashikhmin_shirley",
    id: ClosureId::ASHIKHMIN_SHIRLEY,
    params: &[
      param("N", Vector),
      param("T", Vector),
      param("diffuse_reflectance", Color),
      param("glossy_reflectance", Color),
      param("exponent_u", Float),
      param("exponent_v", Float),
      param("fresnel_multiplier", Float),
    ],
    convert: Some(convert_ashikhmin_shirley_closure),
  },
  ClosureDescriptor {
    name: "background",
    id: ClosureId::BACKGROUND,
    params: NO_PARAMS,
    convert: None,
  },
  ClosureDescriptor {
    name: "debug",
    id: ClosureId::DEBUG,
    params: &[param("tag", ClosureParamType::String)],
    convert: None,
  },
  ClosureDescriptor {
    name: "diffuse",
    id: ClosureId::DIFFUSE,
    params: NORMAL_ONLY,
    convert: Some(convert_diffuse_closure),
  },
  ClosureDescriptor {
    name: "as_disney",
    id: ClosureId::DISNEY,
    params: &[
      param("N", Vector),
      param("T", Vector),
      param("base_color", Color),
      param("subsurface", Float),
      param("metallic", Float),
      param("specular", Float),
      param("specular_tint", Float),
      param("anisotropic", Float),
      param("roughness", Float),
      param("sheen", Float),
      param("sheen_tint", Float),
      param("clearcoat", Float),
      param("clearcoat_gloss", Float),
    ],
    convert: Some(convert_disney_closure),
  },
  ClosureDescriptor {
    name: "emission",
    id: ClosureId::EMISSION,
    params: NO_PARAMS,
    convert: None,
  },
  ClosureDescriptor {
    name: "as_glass",
    id: ClosureId::GLASS,
    params: &[
      param("dist", ClosureParamType::String),
      param("N", Vector),
      param("T", Vector),
      param("surface_transmittance", Color),
      param("reflection_tint", Color),
      param("refraction_tint", Color),
      param("roughness", Float),
      param("anisotropy", Float),
      param("ior", Float),
      param("volume_transmittance", Color),
      param("volume_transmittance_distance", Float),
    ],
    convert: Some(convert_glass_closure),
  },
  ClosureDescriptor {
    name: "as_glossy",
    id: ClosureId::GLOSSY,
    params: &[
      param("dist", ClosureParamType::String),
      param("N", Vector),
      param("T", Vector),
      param("roughness", Float),
      param("anisotropy", Float),
      param("ior", Float),
    ],
    convert: Some(convert_glossy_closure),
  },
  ClosureDescriptor {
    name: "holdout",
    id: ClosureId::HOLDOUT,
    params: NO_PARAMS,
    convert: None,
  },
  ClosureDescriptor {
    name: "as_metal",
    id: ClosureId::METAL,
    params: &[
      param("dist", ClosureParamType::String),
      param("N", Vector),
      param("T", Vector),
      param("normal_reflectance", Color),
      param("edge_tint", Color),
      param("roughness", Float),
      param("anisotropy", Float),
    ],
    convert: Some(convert_metal_closure),
  },
  ClosureDescriptor {
    name: "oren_nayar",
    id: ClosureId::OREN_NAYAR,
    params: &[param("N", Vector), param("roughness", Float)],
    convert: Some(convert_oren_nayar_closure),
  },
  ClosureDescriptor {
    name: "phong",
    id: ClosureId::PHONG,
    params: &[param("N", Vector), param("exponent", Float)],
    convert: Some(convert_phong_closure),
  },
  ClosureDescriptor {
    name: "reflection",
    id: ClosureId::REFLECTION,
    params: &[param("N", Vector), param("ior", Float)],
    convert: Some(convert_reflection_closure),
  },
  ClosureDescriptor {
    name: "as_sheen",
    id: ClosureId::SHEEN,
    params: NORMAL_ONLY,
    convert: Some(convert_sheen_closure),
  },
  ClosureDescriptor {
    name: "as_subsurface",
    id: ClosureId::SUBSURFACE,
    params: &[
      param("profile", ClosureParamType::String),
      param("N", Vector),
      param("reflectance", Color),
      param("mean_free_path", Color),
      param("ior", Float),
    ],
    convert: None,
  },
  ClosureDescriptor {
    name: "translucent",
    id: ClosureId::TRANSLUCENT,
    params: NORMAL_ONLY,
    convert: Some(convert_translucent_closure),
  },
  ClosureDescriptor {
    name: "transparent",
    id: ClosureId::TRANSPARENT,
    params: NO_PARAMS,
    convert: None,
  },
];

pub fn register_builtin_closures(registry: &mut ClosureRegistry) {
  for descriptor in BUILTIN_CLOSURES {
    registry.register(*descriptor);
  }
}

fn mismatch(closure: ClosureId) -> ClosureError {
  ClosureError::ParameterMismatch { closure }
}

/// Entry id of the microfacet distribution named `dist`, picked among the ggx and beckmann
/// variants of one closure kind.
fn microfacet_closure_id(
  dist: &str,
  ggx: ClosureId,
  beckmann: ClosureId,
) -> Result<ClosureId, ClosureError> {
  match dist {
    "ggx" => Ok(ggx),
    "beckmann" => Ok(beckmann),
    _ => Err(ClosureError::UnrecognizedVariant {
      parameter: "microfacet distribution function",
      value: dist.to_owned(),
    }),
  }
}

#[test]
fn microfacet_names() {
  let pick = |d| microfacet_closure_id(d, ClosureId::GLASS_GGX, ClosureId::GLASS_BECKMANN);
  assert_eq!(pick("ggx"), Ok(ClosureId::GLASS_GGX));
  assert_eq!(pick("beckmann"), Ok(ClosureId::GLASS_BECKMANN));
  assert_eq!(
    pick("phong").unwrap_err().to_string(),
    "invalid microfacet distribution function: phong"
  );
}
