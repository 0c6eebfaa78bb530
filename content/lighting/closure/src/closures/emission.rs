use crate::*;

/// Add a diffuse EDF entry. The radiance is stored normalized by its largest channel,
/// which must be positive, and that channel becomes the multiplier.
pub fn convert_emission_closure(
  composite: &mut CompositeClosure,
  weight: LinearRGBColor<f32>,
  max_weight_component: f32,
) -> Result<(), ClosureError> {
  let values = DiffuseEdfValues {
    radiance: weight / max_weight_component,
    radiance_multiplier: max_weight_component,
  };
  composite.add_closure(
    ClosureId::EMISSION,
    &ShadingBasis::default(),
    weight,
    Vec3::zero(),
    None,
    ClosureValues::DiffuseEdf(values),
  )?;
  Ok(())
}
