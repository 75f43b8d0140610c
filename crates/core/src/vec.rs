use glam::Vec3;

/// World-space up axis. Roll is unsupported, so this never varies.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Directed difference: the vector that carries `from` onto `to`.
///
/// This is the single subtraction convention used across the crate. The look
/// direction is `direction(eye, look_target)`, and the slide basis derives
/// from the same orientation, so camera-relative movement always agrees with
/// the rendered facing.
pub fn direction(from: Vec3, to: Vec3) -> Vec3 {
    to - from
}

/// Normalize `v` to unit length.
///
/// Normalizing a zero-length vector is a precondition violation, not a
/// recoverable error. Callers guarantee non-zero inputs by construction: the
/// look target is always one unit from the eye, and the up axis is a unit
/// vector that the pitch clamp keeps the forward vector away from.
pub fn unit(v: Vec3) -> Vec3 {
    let len_sq = v.length_squared();
    debug_assert!(
        len_sq > f32::EPSILON,
        "cannot normalize a zero-length vector"
    );
    v / len_sq.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-6;

    #[test]
    fn direction_carries_from_onto_to() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        let q = Vec3::new(4.0, 2.0, 1.0);
        let d = direction(p, q);
        assert_eq!(p + d, q);
    }

    #[test]
    fn unit_has_unit_length() {
        let v = unit(Vec3::new(3.0, 0.0, 4.0));
        assert!((v.length() - 1.0).abs() < TOL);
        assert!((v.x - 0.6).abs() < TOL);
        assert!((v.z - 0.8).abs() < TOL);
    }

    #[test]
    #[should_panic(expected = "zero-length")]
    fn unit_rejects_zero_vector() {
        let _ = unit(Vec3::ZERO);
    }

    #[test]
    fn cross_follows_right_hand_rule() {
        // X x Y = Z; the view and slide bases both rely on this orientation.
        let z = Vec3::X.cross(Vec3::Y);
        assert!((z - Vec3::Z).length() < TOL);
        // Anti-commutative: swapping operands flips the result.
        assert!((Vec3::Y.cross(Vec3::X) + Vec3::Z).length() < TOL);
    }
}
