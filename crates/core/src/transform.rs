use glam::{Mat4, Vec3};

/// Per-object model matrix built by composing affine operations.
///
/// Operations left-multiply onto the current matrix (`model = op * model`,
/// column-vector convention), so the most recently applied operation is the
/// outermost one: it runs last in world space. A caller that wants
/// "spin in place, then move out" applies the rotation first and the
/// translation second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTransform {
    matrix: Mat4,
}

impl ModelTransform {
    pub fn new() -> Self {
        Self {
            matrix: Mat4::IDENTITY,
        }
    }

    /// Current model matrix (object space to world space).
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Drop all accumulated operations.
    pub fn reset(&mut self) {
        self.matrix = Mat4::IDENTITY;
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.apply(Mat4::from_translation(Vec3::new(x, y, z)))
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.apply(Mat4::from_scale(Vec3::new(x, y, z)))
    }

    /// Right-hand-rule rotation about the world X axis.
    pub fn rotate_x(&mut self, degrees: f32) -> &mut Self {
        self.apply(Mat4::from_rotation_x(degrees.to_radians()))
    }

    /// Right-hand-rule rotation about the world Y axis.
    pub fn rotate_y(&mut self, degrees: f32) -> &mut Self {
        self.apply(Mat4::from_rotation_y(degrees.to_radians()))
    }

    /// Right-hand-rule rotation about the world Z axis.
    pub fn rotate_z(&mut self, degrees: f32) -> &mut Self {
        self.apply(Mat4::from_rotation_z(degrees.to_radians()))
    }

    /// Left-multiply an arbitrary affine matrix onto the stack.
    pub fn apply(&mut self, op: Mat4) -> &mut Self {
        self.matrix = op * self.matrix;
        self
    }
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-5;

    fn assert_vec3_near(a: Vec3, b: Vec3) {
        assert!((a - b).length() < TOL, "{a:?} != {b:?}");
    }

    #[test]
    fn starts_at_identity() {
        let t = ModelTransform::new();
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn composition_order_matters() {
        let mut translate_first = ModelTransform::new();
        translate_first.translate(1.0, 0.0, 0.0).rotate_z(90.0);

        let mut rotate_first = ModelTransform::new();
        rotate_first.rotate_z(90.0).translate(1.0, 0.0, 0.0);

        assert_ne!(translate_first.matrix(), rotate_first.matrix());

        // Translate-then-rotate leaves the rotation outermost: the origin
        // lands at (1, 0, 0) and is then swung up to (0, 1, 0).
        let p = translate_first.matrix().transform_point3(Vec3::ZERO);
        assert_vec3_near(p, Vec3::new(0.0, 1.0, 0.0));

        // Rotate-then-translate spins the origin in place first.
        let q = rotate_first.matrix().transform_point3(Vec3::ZERO);
        assert_vec3_near(q, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn rotations_follow_right_hand_rule() {
        let mut t = ModelTransform::new();
        t.rotate_x(90.0);
        assert_vec3_near(t.matrix().transform_point3(Vec3::Y), Vec3::Z);

        t.reset();
        t.rotate_y(90.0);
        assert_vec3_near(t.matrix().transform_point3(Vec3::Z), Vec3::X);

        t.reset();
        t.rotate_z(90.0);
        assert_vec3_near(t.matrix().transform_point3(Vec3::X), Vec3::Y);
    }

    #[test]
    fn scale_is_per_axis() {
        let mut t = ModelTransform::new();
        t.scale(1.0, 2.0, 1.0);
        let p = t.matrix().transform_point3(Vec3::new(1.0, 1.0, 1.0));
        assert_vec3_near(p, Vec3::new(1.0, 2.0, 1.0));
    }

    #[test]
    fn apply_accepts_custom_matrices() {
        let shear = Mat4::from_cols_array_2d(&[
            [1.0, 0.0, 0.0, 0.0],
            [1.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let mut t = ModelTransform::new();
        t.translate(0.0, 1.0, 0.0).apply(shear);
        // The shear is outermost: (0, 1, 0) picks up an x offset.
        let p = t.matrix().transform_point3(Vec3::ZERO);
        assert_vec3_near(p, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn reset_returns_to_identity() {
        let mut t = ModelTransform::new();
        t.translate(5.0, -2.0, 3.0).rotate_y(45.0);
        t.reset();
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }
}
