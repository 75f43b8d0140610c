use glam::Vec3;

/// A high-level command produced by input handling.
///
/// The application applies actions to the camera; camera code never sees raw
/// key events, so bindings can change without touching the math core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Slide the camera by `(du, dv, dn)` in camera-relative ground
    /// coordinates. Constants below are unit steps; the caller scales them
    /// by speed and frame time.
    Slide(Vec3),
    /// Turn around the world up axis by the given degrees
    /// (positive is a left turn).
    Yaw(f32),
    /// Tilt the view by the given degrees (positive lowers the look target).
    Pitch(f32),
    /// Return the camera to its starting position.
    ResetPosition,
    /// Zero the yaw and pitch angles.
    ResetAngles,
    /// Show or hide the overlay.
    ToggleHud,
    /// Leave the application.
    Quit,
}

impl Action {
    /// Forward motion passes a negative `dn` along the camera's back axis.
    pub const FORWARD: Action = Action::Slide(Vec3::new(0.0, 0.0, -1.0));
    pub const BACKWARD: Action = Action::Slide(Vec3::new(0.0, 0.0, 1.0));
    /// The slide lateral axis points to the camera's left, so strafing left
    /// is the positive step.
    pub const STRAFE_LEFT: Action = Action::Slide(Vec3::new(1.0, 0.0, 0.0));
    pub const STRAFE_RIGHT: Action = Action::Slide(Vec3::new(-1.0, 0.0, 0.0));
    pub const YAW_LEFT: Action = Action::Yaw(1.0);
    pub const YAW_RIGHT: Action = Action::Yaw(-1.0);
    /// Positive pitch lowers the look target, so pitching up is the
    /// negative step.
    pub const PITCH_UP: Action = Action::Pitch(-1.0);
    pub const PITCH_DOWN: Action = Action::Pitch(1.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_steps_are_unit_magnitude() {
        for action in [
            Action::FORWARD,
            Action::BACKWARD,
            Action::STRAFE_LEFT,
            Action::STRAFE_RIGHT,
        ] {
            let Action::Slide(step) = action else {
                panic!("movement constant is not a slide");
            };
            assert_eq!(step.length(), 1.0);
            // Ground-relative: no vertical component in any bound step.
            assert_eq!(step.y, 0.0);
        }
    }

    #[test]
    fn forward_is_negative_dn() {
        assert_eq!(Action::FORWARD, Action::Slide(Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn turn_steps_oppose_each_other() {
        let (Action::Yaw(l), Action::Yaw(r)) = (Action::YAW_LEFT, Action::YAW_RIGHT) else {
            panic!("yaw constants are not yaw actions");
        };
        assert_eq!(l, -r);

        let (Action::Pitch(u), Action::Pitch(d)) = (Action::PITCH_UP, Action::PITCH_DOWN)
        else {
            panic!("pitch constants are not pitch actions");
        };
        assert_eq!(u, -d);
    }
}
