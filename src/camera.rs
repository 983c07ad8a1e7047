//! Camera and its mouse-driven controller.

use cgmath::{InnerSpace, Matrix4, Point3, Rad, Vector2, Vector3};

use crate::input::{Input, InputObserver};

const SAFE_FRAC_PI_2: f32 = std::f32::consts::FRAC_PI_2 - 0.0001;

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub yaw: Rad<f32>,
    pub pitch: Rad<f32>,
}

impl Camera {
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
        }
    }

    /// World-space position, as uploaded to `viewPos`.
    pub fn position(&self) -> Vector3<f32> {
        Vector3::new(self.position.x, self.position.y, self.position.z)
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vector3<f32> {
        let (sin_pitch, cos_pitch) = self.pitch.0.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.0.sin_cos();
        Vector3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw).normalize()
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.forward(), Vector3::unit_y())
    }
}

impl Default for Camera {
    fn default() -> Self {
        // right/left, height, forward/backward - looking down the negative z axis
        Self::new((0.0, 0.0, 3.0), Rad(-std::f32::consts::FRAC_PI_2), Rad(0.0))
    }
}

/// Owns the camera and turns mouse movement into yaw/pitch and scrolling
/// into forward motion.
#[derive(Clone, Debug)]
pub struct CameraController {
    camera: Camera,
    speed: f32,
    sensitivity: f32,
    last_mouse: Option<Vector2<f32>>,
}

impl CameraController {
    pub fn new(camera: Camera, speed: f32, sensitivity: f32) -> Self {
        Self {
            camera,
            speed,
            sensitivity,
            last_mouse: None,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn update_camera(&mut self, input: &Input) {
        let camera = &mut self.camera;
        if input.was_changed_mouse_position() {
            let mouse = input.mouse_position();
            // the first sample only anchors the cursor
            if let Some(last) = self.last_mouse {
                let delta = mouse - last;
                camera.yaw += Rad(delta.x * self.sensitivity);
                camera.pitch -= Rad(delta.y * self.sensitivity);
                camera.pitch = Rad(camera.pitch.0.clamp(-SAFE_FRAC_PI_2, SAFE_FRAC_PI_2));
            }
            self.last_mouse = Some(mouse);
        }

        let scroll = input.scroll_value().y;
        if scroll != 0.0 {
            let forward = camera.forward();
            camera.position += forward * scroll * self.speed;
        }
    }
}

impl InputObserver for CameraController {
    fn observe(&mut self, input: &Input) {
        self.update_camera(input);
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(Camera::default(), 1.0, 0.002)
    }
}

#[cfg(test)]
mod tests {
    use cgmath::AbsDiffEq;

    use super::*;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = Camera::default();
        assert!(camera.forward().abs_diff_eq(&Vector3::new(0.0, 0.0, -1.0), 1e-5));
        assert_eq!(camera.position(), Vector3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn mouse_delta_turns_camera() {
        let mut controller = CameraController::new(Camera::default(), 1.0, 0.01);
        let mut input = Input::new();

        input.set_mouse_position(100.0, 100.0);
        controller.update_camera(&input);
        assert_eq!(controller.camera(), &Camera::default());
        input.processing(&mut []);

        input.set_mouse_position(110.0, 100.0);
        controller.update_camera(&input);
        let yaw = controller.camera().yaw.0;
        assert!((yaw - (-std::f32::consts::FRAC_PI_2 + 0.1)).abs() < 1e-5);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut controller = CameraController::new(Camera::default(), 1.0, 1.0);
        let mut input = Input::new();
        input.set_mouse_position(0.0, 0.0);
        controller.update_camera(&input);
        input.set_mouse_position(0.0, -1000.0);
        controller.update_camera(&input);
        assert!(controller.camera().pitch.0 <= SAFE_FRAC_PI_2);
    }

    #[test]
    fn scroll_moves_forward_through_input_processing() {
        let mut controller = CameraController::new(Camera::default(), 2.0, 0.0);
        let mut input = Input::new();
        input.set_scroll_value(0.0, 1.0);
        input.processing(&mut [&mut controller]);
        let position = controller.camera().position();
        assert!(position.abs_diff_eq(&Vector3::new(0.0, 0.0, 1.0), 1e-5));
    }
}
