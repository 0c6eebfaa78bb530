use super::mismatch;
use crate::*;

/// Add the BSSRDF entry of a subsurface closure, the profile name selects the model.
pub fn convert_subsurface_closure<'a>(
  composite: &mut CompositeClosure<'a>,
  shading_basis: &ShadingBasis,
  params: &'a ClosureParams,
  weight: LinearRGBColor<f32>,
) -> Result<(), ClosureError> {
  let ClosureParams::Subsurface(p) = params else {
    return Err(mismatch(ClosureId::SUBSURFACE));
  };

  let (id, values) = match p.profile.as_str() {
    #[cfg(feature = "normalized-diffusion")]
    "normalized_diffusion" => (
      ClosureId::SUBSURFACE_NORMALIZED_DIFFUSION,
      ClosureValues::NormalizedDiffusion(NormalizedDiffusionBssrdfValues {
        weight: 1.,
        reflectance: p.reflectance,
        reflectance_multiplier: 1.,
        mfp: p.mean_free_path,
        mfp_multiplier: 1.,
        ior: p.ior,
      }),
    ),
    profile => {
      let id = match profile {
        "better_dipole" => ClosureId::SUBSURFACE_BETTER_DIPOLE,
        "standard_dipole" => ClosureId::SUBSURFACE_STANDARD_DIPOLE,
        "directional_dipole" => ClosureId::SUBSURFACE_DIRECTIONAL_DIPOLE,
        _ => {
          return Err(ClosureError::UnrecognizedVariant {
            parameter: "subsurface profile",
            value: profile.to_owned(),
          })
        }
      };
      let values = DipoleBssrdfValues {
        weight: 1.,
        reflectance: p.reflectance,
        reflectance_multiplier: 1.,
        mfp: p.mean_free_path,
        mfp_multiplier: 1.,
        g: 0.,
        ior: p.ior,
      };
      (id, ClosureValues::Dipole(values))
    }
  };

  composite.add_closure(id, shading_basis, weight, p.n, None, values)?;
  Ok(())
}
