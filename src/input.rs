//! Input state fed by the windowing layer.
//!
//! The winit window events (focus, cursor, scroll, keys, mouse buttons) are
//! routed into [`Input`] through [`Input::handle_window_event`]; the scene
//! graph only reads it. `Space` skips whole frames while the window is not
//! focused, and observers are only notified while it is.
//!
//! Scroll is a per-frame delta: [`Input::processing`] consumes it together
//! with the cursor-moved flag, so a wheel notch moves the camera once.

use std::collections::HashSet;

use cgmath::Vector2;
use winit::{
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Reacts to the input state once per frame.
pub trait InputObserver {
    fn observe(&mut self, input: &Input);
}

#[derive(Clone, Debug, PartialEq)]
pub struct Input {
    mouse_position: Vector2<f32>,
    scroll_value: Vector2<f32>,
    was_changed_mouse_position: bool,
    is_focused: bool,
    pressed_keys: HashSet<KeyCode>,
    pressed_buttons: HashSet<MouseButton>,
    should_close: bool,
}

impl Input {
    // Pixel deltas (touchpads) are much larger than line deltas.
    const PIXEL_SCROLL_FACTOR: f32 = 0.1;

    pub fn new() -> Self {
        Self {
            mouse_position: Vector2::new(0.0, 0.0),
            scroll_value: Vector2::new(0.0, 0.0),
            was_changed_mouse_position: false,
            is_focused: true,
            pressed_keys: HashSet::new(),
            pressed_buttons: HashSet::new(),
            should_close: false,
        }
    }

    /// Routes one window event into the input state.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::Focused(focused) => {
                self.set_focused(*focused);
                if !*focused {
                    // releases are not delivered to unfocused windows
                    self.pressed_keys.clear();
                    self.pressed_buttons.clear();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.set_mouse_position(position.x as f32, position.y as f32)
            }
            WindowEvent::MouseWheel { delta, .. } => self.handle_mouse_wheel(*delta),
            WindowEvent::MouseInput { state, button, .. } => {
                self.handle_mouse_input(*state, *button)
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.handle_key(key, event.state);
                }
            }
            WindowEvent::CloseRequested => self.request_close(),
            _ => {}
        }
    }

    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    pub fn mouse_position(&self) -> Vector2<f32> {
        self.mouse_position
    }

    /// Cursor moved; also marks the position as changed for this frame.
    pub fn set_mouse_position(&mut self, x: f32, y: f32) {
        self.mouse_position = Vector2::new(x, y);
        self.was_changed_mouse_position = true;
    }

    pub fn scroll_value(&self) -> Vector2<f32> {
        self.scroll_value
    }

    pub fn set_scroll_value(&mut self, x: f32, y: f32) {
        self.scroll_value = Vector2::new(x, y);
    }

    /// Adds a wheel event to this frame's scroll.
    pub fn handle_mouse_wheel(&mut self, delta: MouseScrollDelta) {
        self.scroll_value += match delta {
            MouseScrollDelta::LineDelta(x, y) => Vector2::new(x, y),
            MouseScrollDelta::PixelDelta(position) => {
                Vector2::new(position.x as f32, position.y as f32) * Self::PIXEL_SCROLL_FACTOR
            }
        };
    }

    pub fn was_changed_mouse_position(&self) -> bool {
        self.was_changed_mouse_position
    }

    pub fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.pressed_keys.insert(key);
            }
            ElementState::Released => {
                self.pressed_keys.remove(&key);
            }
        }
    }

    pub fn key_is_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    pub fn key_is_released(&self, key: KeyCode) -> bool {
        !self.key_is_pressed(key)
    }

    pub fn handle_mouse_input(&mut self, state: ElementState, button: MouseButton) {
        match state {
            ElementState::Pressed => {
                self.pressed_buttons.insert(button);
            }
            ElementState::Released => {
                self.pressed_buttons.remove(&button);
            }
        }
    }

    pub fn mouse_button_is_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    pub fn mouse_button_is_released(&self, button: MouseButton) -> bool {
        !self.mouse_button_is_pressed(button)
    }

    /// Set by Escape or by the window's close button. The frame driver stops
    /// after the frame in which it was raised.
    pub fn should_close(&self) -> bool {
        self.should_close
    }

    pub fn request_close(&mut self) {
        if !self.should_close {
            log::info!("close requested");
        }
        self.should_close = true;
    }

    /// Notifies `observers` (only while focused), handles Escape, then
    /// consumes the per-frame deltas.
    pub fn processing(&mut self, observers: &mut [&mut dyn InputObserver]) {
        if self.is_focused {
            for observer in observers.iter_mut() {
                observer.observe(self);
            }
        }
        if self.key_is_pressed(KeyCode::Escape) {
            self.request_close();
        }
        self.was_changed_mouse_position = false;
        self.scroll_value = Vector2::new(0.0, 0.0);
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}
