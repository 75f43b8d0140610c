use glam::Vec3;

/// One Phong light source.
///
/// Directional lights (`is_local == false`) interpret `position` as the
/// direction toward the light; local lights attenuate with distance and may
/// additionally be spotlights. The half vector is derived per fragment in
/// the shader rather than stored here, so there is no field to keep in sync.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub enabled: bool,
    pub is_local: bool,
    pub is_spot: bool,
    pub ambient: Vec3,
    pub color: Vec3,
    pub position: Vec3,
    pub cone_direction: Vec3,
    pub spot_cos_cutoff: f32,
    pub spot_exponent: f32,
    pub constant_attenuation: f32,
    pub linear_attenuation: f32,
    pub quadratic_attenuation: f32,
    pub specular_strength: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            enabled: true,
            is_local: false,
            is_spot: false,
            ambient: Vec3::ZERO,
            color: Vec3::ONE,
            position: Vec3::ZERO,
            cone_direction: Vec3::ZERO,
            spot_cos_cutoff: 0.0,
            spot_exponent: 0.0,
            constant_attenuation: 1.0,
            linear_attenuation: 0.0,
            quadratic_attenuation: 0.0,
            specular_strength: 0.0,
        }
    }
}

/// Phong surface material, combined with the per-vertex mesh colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub emission: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            emission: Vec3::ZERO,
            ambient: Vec3::ONE,
            diffuse: Vec3::ONE,
            specular: Vec3::ONE,
            shininess: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_light_is_white_directional() {
        let light = Light::default();
        assert!(light.enabled);
        assert!(!light.is_local);
        assert!(!light.is_spot);
        assert_eq!(light.color, Vec3::ONE);
        assert_eq!(light.ambient, Vec3::ZERO);
        // Attenuation divides by exactly 1 until configured otherwise.
        assert_eq!(light.constant_attenuation, 1.0);
        assert_eq!(light.linear_attenuation, 0.0);
        assert_eq!(light.quadratic_attenuation, 0.0);
    }

    #[test]
    fn default_material_passes_light_through() {
        let material = Material::default();
        assert_eq!(material.emission, Vec3::ZERO);
        assert_eq!(material.ambient, Vec3::ONE);
        assert_eq!(material.diffuse, Vec3::ONE);
        assert_eq!(material.shininess, 0.0);
    }
}
