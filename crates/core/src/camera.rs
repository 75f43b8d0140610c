use glam::{Mat4, Vec3, Vec4};

use crate::vec::{direction, unit, WORLD_UP};

/// Pitch is clamped short of 90 degrees so the forward vector can never be
/// parallel to the world up axis; at the pole the view basis would collapse.
/// Residual numerical wobble near the bound is accepted.
pub const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// Free-flying camera: an eye position plus yaw/pitch angles, with the view
/// and projection matrices derived from them.
///
/// Angles are degrees. Yaw lives in `[0, 360)` around the world up axis
/// (yaw 0 faces -Z, increasing yaw turns toward -X); pitch lives in
/// `[-89, 89]` and positive pitch lowers the look target. Roll is
/// unsupported.
///
/// Both matrices are rebuilt from scratch inside every mutator, so a stale
/// matrix is never observable and incremental drift cannot accumulate.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    eye: Vec3,
    yaw: f32,
    pitch: f32,
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
    view: Mat4,
    proj: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(45.0, 1.0)
    }
}

impl Camera {
    /// Camera at the origin facing -Z, with the given vertical field of view
    /// (degrees) and aspect ratio. Clip planes default to 0.1 and 1000.
    pub fn new(fov_y: f32, aspect: f32) -> Self {
        let mut camera = Self {
            eye: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            fov_y,
            aspect,
            near: 0.1,
            far: 1000.0,
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
        };
        camera.rebuild_view();
        camera.rebuild_projection();
        camera
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Yaw in degrees, always within `[0, 360)`.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees, always within `[-89, 89]`.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// World space to camera space.
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Camera space to clip space, NDC depth in `[-1, 1]`.
    pub fn projection_matrix(&self) -> Mat4 {
        self.proj
    }

    pub fn set_eye(&mut self, eye: Vec3) {
        self.eye = eye;
        self.rebuild_view();
    }

    /// Set yaw and pitch directly; yaw wraps into range, pitch saturates.
    pub fn set_angles(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw.rem_euclid(360.0);
        self.pitch = pitch.clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
        self.rebuild_view();
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.rebuild_projection();
    }

    /// Vertical field of view in degrees.
    pub fn set_fov(&mut self, fov_y: f32) {
        self.fov_y = fov_y;
        self.rebuild_projection();
    }

    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
        self.rebuild_projection();
    }

    /// Turn around the world up axis; positive is a left turn.
    pub fn rotate_yaw(&mut self, delta_degrees: f32) {
        self.yaw = (self.yaw + delta_degrees).rem_euclid(360.0);
        self.rebuild_view();
    }

    /// Tilt the view; saturates at the pitch limit instead of wrapping.
    pub fn rotate_pitch(&mut self, delta_degrees: f32) {
        self.pitch =
            (self.pitch + delta_degrees).clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
        self.rebuild_view();
    }

    /// Move the eye in camera-relative ground coordinates.
    ///
    /// `du` slides along the horizontal lateral axis, `dv` moves straight up
    /// or down, `dn` moves along the horizontal back axis (forward motion
    /// passes a negative `dn`). The basis derives from yaw alone: sliding
    /// stays level with the ground no matter how the view is pitched, and
    /// vertical movement never touches the angles.
    pub fn slide(&mut self, du: f32, dv: f32, dn: f32) {
        let yaw = self.yaw.to_radians();
        let back = Vec3::new(yaw.sin(), 0.0, yaw.cos());
        let lateral = unit(back.cross(WORLD_UP));
        self.eye.x += du * lateral.x + dn * back.x;
        self.eye.y += dv;
        self.eye.z += du * lateral.z + dn * back.z;
        self.rebuild_view();
    }

    /// The point one unit from the eye along the direction implied by
    /// yaw and pitch.
    pub fn look_target(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        Vec3::new(
            self.eye.x - yaw.sin() * pitch.cos(),
            self.eye.y - pitch.sin(),
            self.eye.z - yaw.cos() * pitch.cos(),
        )
    }

    // Classic look-at construction: an orthonormal basis from the look
    // direction and world up, then translation by -eye. The whole matrix is
    // rebuilt each time; incremental updates would drift.
    fn rebuild_view(&mut self) {
        let forward = unit(direction(self.eye, self.look_target()));
        let side = unit(forward.cross(WORLD_UP));
        let up = side.cross(forward);
        self.view = Mat4::from_cols(
            Vec4::new(side.x, up.x, -forward.x, 0.0),
            Vec4::new(side.y, up.y, -forward.y, 0.0),
            Vec4::new(side.z, up.z, -forward.z, 0.0),
            Vec4::new(
                -side.dot(self.eye),
                -up.dot(self.eye),
                forward.dot(self.eye),
                1.0,
            ),
        );
    }

    // Symmetric perspective frustum mapping camera space to NDC depth
    // [-1, 1].
    fn rebuild_projection(&mut self) {
        let f = 1.0 / (self.fov_y.to_radians() / 2.0).tan();
        let nf = self.near - self.far;
        self.proj = Mat4::from_cols(
            Vec4::new(f / self.aspect, 0.0, 0.0, 0.0),
            Vec4::new(0.0, f, 0.0, 0.0),
            Vec4::new(0.0, 0.0, (self.far + self.near) / nf, -1.0),
            Vec4::new(0.0, 0.0, (2.0 * self.far * self.near) / nf, 0.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat3;

    const TOL: f32 = 1e-5;

    fn assert_vec3_near(a: Vec3, b: Vec3, tol: f32) {
        assert!((a - b).length() < tol, "{a:?} != {b:?}");
    }

    #[test]
    fn view_basis_is_orthonormal_across_angle_range() {
        let mut camera = Camera::new(60.0, 1.0);
        for yaw in (0..360).step_by(30) {
            for pitch in [-89.0, -60.0, -30.0, 0.0, 30.0, 60.0, 89.0] {
                camera.set_angles(yaw as f32, pitch);
                let basis = Mat3::from_mat4(camera.view_matrix());
                for axis in [basis.x_axis, basis.y_axis, basis.z_axis] {
                    assert!((axis.length() - 1.0).abs() < TOL, "yaw {yaw} pitch {pitch}");
                }
                assert!(basis.x_axis.dot(basis.y_axis).abs() < TOL);
                assert!(basis.y_axis.dot(basis.z_axis).abs() < TOL);
                assert!(basis.z_axis.dot(basis.x_axis).abs() < TOL);
                // Proper rotation, not a reflection.
                assert!((basis.determinant() - 1.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn view_matches_glam_look_at() {
        let mut camera = Camera::new(60.0, 1.0);
        camera.set_eye(Vec3::new(1.0, 2.0, 3.0));
        camera.set_angles(40.0, -20.0);
        let expected = Mat4::look_at_rh(camera.eye(), camera.look_target(), Vec3::Y);
        let got = camera.view_matrix();
        for col in 0..4 {
            assert_vec3_near(
                got.col(col).truncate(),
                expected.col(col).truncate(),
                TOL,
            );
            assert!((got.col(col).w - expected.col(col).w).abs() < TOL);
        }
    }

    #[test]
    fn view_maps_eye_to_origin_and_target_forward() {
        let mut camera = Camera::new(60.0, 1.0);
        camera.set_eye(Vec3::new(-2.0, 1.5, 7.0));
        camera.rotate_yaw(123.0);
        camera.rotate_pitch(-31.0);
        camera.slide(0.5, -0.25, 2.0);

        let view = camera.view_matrix();
        assert_vec3_near(view.transform_point3(camera.eye()), Vec3::ZERO, TOL);
        // The look target sits one unit down the camera's -Z axis.
        assert_vec3_near(
            view.transform_point3(camera.look_target()),
            Vec3::new(0.0, 0.0, -1.0),
            1e-4,
        );
    }

    #[test]
    fn yaw_wraps_into_range() {
        let mut camera = Camera::default();
        camera.rotate_yaw(370.0);
        assert!((camera.yaw() - 10.0).abs() < TOL);

        let mut camera = Camera::default();
        camera.rotate_yaw(-10.0);
        assert!((camera.yaw() - 350.0).abs() < TOL);
    }

    #[test]
    fn pitch_saturates_at_limit() {
        let mut camera = Camera::default();
        camera.rotate_pitch(85.0);
        camera.rotate_pitch(10.0);
        assert_eq!(camera.pitch(), 89.0);
        // Further presses at the boundary are no-ops.
        camera.rotate_pitch(45.0);
        assert_eq!(camera.pitch(), 89.0);

        camera.rotate_pitch(-200.0);
        assert_eq!(camera.pitch(), -89.0);
    }

    #[test]
    fn slide_forward_at_yaw_zero_is_minus_z() {
        let mut camera = Camera::default();
        camera.slide(0.0, 0.0, -1.0);
        assert_vec3_near(camera.eye(), Vec3::new(0.0, 0.0, -1.0), TOL);
        assert_eq!(camera.eye().y, 0.0);
    }

    #[test]
    fn slide_ignores_pitch() {
        let mut camera = Camera::default();
        camera.rotate_pitch(-45.0);
        camera.slide(0.0, 0.0, -1.0);
        // Still a pure ground-plane move.
        assert_vec3_near(camera.eye(), Vec3::new(0.0, 0.0, -1.0), TOL);
    }

    #[test]
    fn slide_lateral_matches_facing() {
        // Facing -Z, a positive du slides toward -X (the camera's left).
        let mut camera = Camera::default();
        camera.slide(1.0, 0.0, 0.0);
        assert_vec3_near(camera.eye(), Vec3::new(-1.0, 0.0, 0.0), TOL);
    }

    #[test]
    fn slide_vertical_never_touches_angles() {
        let mut camera = Camera::default();
        camera.set_angles(77.0, 12.0);
        camera.slide(0.0, 3.0, 0.0);
        assert!((camera.yaw() - 77.0).abs() < TOL);
        assert!((camera.pitch() - 12.0).abs() < TOL);
        assert!((camera.eye().y - 3.0).abs() < TOL);
    }

    #[test]
    fn near_plane_round_trips_to_ndc() {
        let camera = Camera::new(60.0, 1.0);
        let proj = camera.projection_matrix();
        let near = proj.project_point3(Vec3::new(0.0, 0.0, -0.1));
        assert!((near.z + 1.0).abs() < 1e-4, "near plane at z {}", near.z);
        let far = proj.project_point3(Vec3::new(0.0, 0.0, -1000.0));
        assert!((far.z - 1.0).abs() < 1e-3, "far plane at z {}", far.z);
    }

    #[test]
    fn projection_tracks_parameter_changes() {
        let mut camera = Camera::new(60.0, 1.0);
        let before = camera.projection_matrix();
        camera.set_aspect(16.0 / 9.0);
        let after = camera.projection_matrix();
        assert_ne!(before, after);
        // Only the horizontal scale changes with aspect.
        assert!((before.col(1) - after.col(1)).length() < TOL);
        assert!((after.col(0).x - before.col(0).x * 9.0 / 16.0).abs() < TOL);

        // Widening the field of view shrinks the focal scale.
        camera.set_fov(90.0);
        assert!(camera.projection_matrix().col(1).y < after.col(1).y);

        // New clip planes move the near-plane round trip with them.
        camera.set_clip_planes(1.0, 100.0);
        let near = camera
            .projection_matrix()
            .project_point3(Vec3::new(0.0, 0.0, -1.0));
        assert!((near.z + 1.0).abs() < 1e-4);
    }

    #[test]
    fn set_angles_normalizes_inputs() {
        let mut camera = Camera::default();
        camera.set_angles(-90.0, 120.0);
        assert!((camera.yaw() - 270.0).abs() < TOL);
        assert_eq!(camera.pitch(), 89.0);
    }
}
